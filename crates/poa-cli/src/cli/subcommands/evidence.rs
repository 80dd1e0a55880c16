use std::path::PathBuf;

use clap::Subcommand;

/// Evidence files attached to plan activities.
#[derive(Clone, Debug, Subcommand)]
pub enum EvidenceCommands {
    /// List evidence.
    List {
        #[arg(long)]
        activity: Option<String>,
        #[arg(long)]
        plan: Option<String>,
    },
    /// Get evidence by ID.
    Get { id: String },
    /// Upload a file as evidence for an activity.
    Upload {
        file: PathBuf,
        #[arg(long)]
        activity: String,
        #[arg(long)]
        plan: String,
        /// Display name (defaults to the file name on the server).
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Rename or redescribe evidence.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete evidence.
    Delete { id: String },
    /// Public download URL for a stored file name.
    Url { file: String },
}
