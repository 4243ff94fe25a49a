use anyhow::Context;
use tracing::{debug, info};

use crate::auth::{self, AuthError, HttpAuthApi, SessionStore};
use crate::cli::Command;
use crate::config::Config;
use crate::dashboard;
use crate::errors::AppError;
use crate::form::dates::hydrate;
use crate::form::suggestions::suggest;
use crate::form::FormSession;
use crate::models::Resume;
use crate::navigation::{guard, ConsoleNavigator, ConsoleNotifier, Route};
use crate::render;
use crate::store::HttpResumeStore;

/// Runs one command against the configured API.
pub async fn run(command: Command, config: &Config) -> Result<(), AppError> {
    let session = SessionStore::new(&config.session_file);
    let notifier = ConsoleNotifier;

    match command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let api = HttpAuthApi::new(&config.api_url, config.request_timeout);
            let nav = ConsoleNavigator::new(Route::Register);
            auth::register(&api, &username, &email, &password, &nav, &notifier).await?;
        }

        Command::Login { email, password } => {
            let api = HttpAuthApi::new(&config.api_url, config.request_timeout);
            let nav = ConsoleNavigator::new(Route::Login);
            auth::login(&api, &session, &email, &password, &nav, &notifier).await?;
        }

        Command::Logout => {
            let nav = ConsoleNavigator::new(Route::Dashboard);
            auth::logout(&session, &nav)?;
            println!("Logged out.");
        }

        Command::Show => {
            let store = open_store(&session, config, Route::Dashboard)?;
            match dashboard::load_current(&store).await? {
                Some(resume) => {
                    let json = serde_json::to_string_pretty(&resume)
                        .context("Failed to serialize resume")?;
                    println!("{json}");
                }
                None => println!("No resume yet. Create one with `builder save <file>`."),
            }
        }

        Command::Save { path } => {
            let store = open_store(&session, config, Route::ResumeForm)?;
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let mut incoming: Resume = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid resume document", path.display()))?;

            let nav = ConsoleNavigator::new(Route::Dashboard);
            dashboard::open_editor(dashboard::load_current(&store).await?, &nav);
            let mut form = FormSession::open(nav.take_state());

            // The stored identifier decides create vs update, not the file.
            incoming.id = form.resume().id.clone();
            *form.model_mut()? = hydrate(incoming);
            debug!(update = form.is_update(), "Submitting resume from {}", path.display());

            let outcome = form.submit(&store, &nav, &notifier).await?;
            info!("Resume saved with id {}", outcome.id());
        }

        Command::Delete => {
            let store = open_store(&session, config, Route::Dashboard)?;
            let Some(current) = dashboard::load_current(&store).await? else {
                println!("Nothing to delete.");
                return Ok(());
            };
            let nav = ConsoleNavigator::new(Route::Dashboard);
            dashboard::delete_current(&store, &current, &nav, &notifier).await?;
        }

        Command::Preview { layout } => {
            let resume = current_resume(&session, config).await?;
            print!("{}", render::render(&resume, layout));
        }

        Command::Export { layout } => {
            let resume = current_resume(&session, config).await?;
            let path = render::export(&resume, layout, &config.export_dir)
                .with_context(|| format!("Failed to export to {}", config.export_dir.display()))?;
            println!("Wrote {}", path.display());
        }

        Command::Suggest { list, query } => {
            for hit in suggest(list, &[], &query.join(" ")) {
                println!("{hit}");
            }
        }
    }
    Ok(())
}

/// Store for a protected view. Fails when the route guard would bounce the
/// user back to the login page.
fn open_store(
    session: &SessionStore,
    config: &Config,
    route: Route,
) -> Result<HttpResumeStore, AppError> {
    let token = session.load()?;
    if guard(route, token.is_some()) == Route::Login {
        return Err(AuthError::NotAuthenticated.into());
    }
    Ok(HttpResumeStore::new(
        &config.api_url,
        token,
        config.request_timeout,
    ))
}

async fn current_resume(session: &SessionStore, config: &Config) -> Result<Resume, AppError> {
    let store = open_store(session, config, Route::Dashboard)?;
    dashboard::load_current(&store)
        .await?
        .ok_or_else(|| AppError::Usage("No resume to render yet.".to_string()))
}
