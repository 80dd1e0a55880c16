use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with username and password.
    Login(LoginArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Clear the stored token and session.
    Logout,
    /// Show the current session.
    Status {
        /// Confirm the session with the server.
        #[arg(long)]
        verify: bool,
    },
}

#[derive(Clone, Debug, Args)]
pub struct LoginArgs {
    pub username: String,
    #[arg(long, conflicts_with = "password_stdin")]
    pub password: Option<String>,
    /// Read the password from the first line of stdin.
    #[arg(long)]
    pub password_stdin: bool,
}

#[derive(Clone, Debug, Args)]
pub struct RegisterArgs {
    pub username: String,
    #[arg(long, conflicts_with = "password_stdin")]
    pub password: Option<String>,
    #[arg(long)]
    pub password_stdin: bool,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    /// Career id.
    #[arg(long)]
    pub career: Option<String>,
    /// Area id.
    #[arg(long)]
    pub area: Option<String>,
}
