use tracing::{error, info};

use crate::models::Resume;
use crate::navigation::{Navigator, Notifier, Route};
use crate::store::{ResumeStore, StoreError};

pub const DELETED_MESSAGE: &str = "Resume deleted successfully!";
pub const DELETE_FAILED_MESSAGE: &str = "Error deleting resume";

/// The resume shown on the dashboard: the first one the store returns.
pub async fn load_current(store: &dyn ResumeStore) -> Result<Option<Resume>, StoreError> {
    let resumes = store.fetch_resumes().await?;
    info!("Dashboard loaded {} resume(s)", resumes.len());
    Ok(resumes.into_iter().next())
}

/// Opens the editor: update flow when a resume exists, create flow otherwise.
pub fn open_editor(current: Option<Resume>, navigator: &dyn Navigator) {
    navigator.go_to(Route::ResumeForm, current);
}

/// Deletes `resume`, reloads the dashboard and sends the user to the editor.
/// Returns whatever the dashboard shows after the reload.
pub async fn delete_current(
    store: &dyn ResumeStore,
    resume: &Resume,
    navigator: &dyn Navigator,
    notifier: &dyn Notifier,
) -> Result<Option<Resume>, StoreError> {
    let Some(id) = resume.id.as_deref() else {
        notifier.notify_error(DELETE_FAILED_MESSAGE);
        return Err(StoreError::NotFound("resume has no identifier".to_string()));
    };

    if let Err(e) = store.delete_resume(id).await {
        error!("Failed to delete resume {id}: {e}");
        notifier.notify_error(DELETE_FAILED_MESSAGE);
        return Err(e);
    }
    notifier.notify_success(DELETED_MESSAGE);

    let current = load_current(store).await?;
    navigator.go_to(Route::ResumeForm, None);
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{MockNavigator, MockNotifier};
    use crate::store::MockResumeStore;

    fn stored(id: &str) -> Resume {
        Resume {
            id: Some(id.to_string()),
            name: "Jane Doe".to_string(),
            ..Resume::blank()
        }
    }

    #[tokio::test]
    async fn test_load_current_takes_first() {
        let mut store = MockResumeStore::new();
        store
            .expect_fetch_resumes()
            .returning(|| Ok(vec![stored("a"), stored("b")]));
        let current = load_current(&store).await.unwrap();
        assert_eq!(current.unwrap().id.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn test_load_current_empty() {
        let mut store = MockResumeStore::new();
        store.expect_fetch_resumes().returning(|| Ok(vec![]));
        assert!(load_current(&store).await.unwrap().is_none());
    }

    #[test]
    fn test_open_editor_passes_resume_along() {
        let mut nav = MockNavigator::new();
        nav.expect_go_to()
            .withf(|route, state| {
                *route == Route::ResumeForm
                    && state.as_ref().and_then(|r| r.id.as_deref()) == Some("abc123")
            })
            .times(1)
            .return_const(());
        open_editor(Some(stored("abc123")), &nav);
    }

    #[tokio::test]
    async fn test_delete_reloads_and_opens_editor() {
        let mut store = MockResumeStore::new();
        store
            .expect_delete_resume()
            .withf(|id| id == "abc123")
            .times(1)
            .returning(|_| Ok(()));
        store
            .expect_fetch_resumes()
            .times(1)
            .returning(|| Ok(vec![]));

        let mut nav = MockNavigator::new();
        nav.expect_go_to()
            .withf(|route, state| *route == Route::ResumeForm && state.is_none())
            .times(1)
            .return_const(());
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_success()
            .withf(|m| m == DELETED_MESSAGE)
            .times(1)
            .return_const(());

        let after = delete_current(&store, &stored("abc123"), &nav, &notifier)
            .await
            .unwrap();
        assert!(after.is_none());
    }

    #[tokio::test]
    async fn test_delete_failure_notifies_and_stays() {
        let mut store = MockResumeStore::new();
        store
            .expect_delete_resume()
            .returning(|_| Err(StoreError::Unauthorized));
        store.expect_fetch_resumes().never();

        let mut nav = MockNavigator::new();
        nav.expect_go_to().never();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify_error()
            .withf(|m| m == DELETE_FAILED_MESSAGE)
            .times(1)
            .return_const(());

        let err = delete_current(&store, &stored("abc123"), &nav, &notifier)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Unauthorized));
    }

    #[tokio::test]
    async fn test_delete_without_id_never_calls_store() {
        let mut store = MockResumeStore::new();
        store.expect_delete_resume().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify_error().times(1).return_const(());

        let err = delete_current(&store, &Resume::blank(), &MockNavigator::new(), &notifier)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
