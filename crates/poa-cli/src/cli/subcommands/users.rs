use clap::Subcommand;
use poa_core::enums::UserRole;

/// User administration.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// List users.
    List,
    /// Get a user by ID.
    Get { id: String },
    /// Create a user.
    Create {
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "Usuario")]
        role: UserRole,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Career id (role Usuario only).
        #[arg(long)]
        career: Option<String>,
        /// Area id (role Usuario only, ignored when a career is given).
        #[arg(long)]
        area: Option<String>,
    },
    /// Update a user; omitted fields are left untouched.
    Update {
        id: String,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<UserRole>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        career: Option<String>,
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a user.
    Delete { id: String },
}
