use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::form::TagList;
use crate::render::Layout;

#[derive(Parser, Debug)]
#[command(name = "builder", version)]
#[command(about = "Create, edit and export your resume")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Log in and remember the session
    Login { email: String, password: String },
    /// Forget the session
    Logout,
    /// Print the stored resume as JSON
    Show,
    /// Create or update the resume from a JSON file
    Save { path: PathBuf },
    /// Delete the stored resume
    Delete,
    /// Print the resume as Markdown
    Preview {
        #[arg(long, value_enum, default_value_t = Layout::Classic)]
        layout: Layout,
    },
    /// Write My_Resume.md to EXPORT_DIR
    Export {
        #[arg(long, value_enum, default_value_t = Layout::Classic)]
        layout: Layout,
    },
    /// List suggestions matching a query
    Suggest {
        #[arg(value_enum)]
        list: TagList,
        /// Words of the query; joined with spaces
        query: Vec<String>,
    },
}
