use clap::Subcommand;

/// Commands every catalog entity shares.
#[derive(Clone, Debug, Subcommand)]
pub enum RecordCommands {
    /// Get a record by ID.
    Get { id: String },
    /// Create a record from a JSON object (inline, or `@path`).
    Create {
        #[arg(long)]
        json: String,
    },
    /// Update a record from a JSON object (inline, or `@path`).
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// Delete a record.
    Delete { id: String },
}

/// Areas and faculties.
#[derive(Clone, Debug, Subcommand)]
pub enum CatalogCommands {
    /// List records.
    List,
    #[command(flatten)]
    Record(RecordCommands),
}

/// Strategic lines.
#[derive(Clone, Debug, Subcommand)]
pub enum LineCommands {
    /// List strategic lines.
    List,
    /// Lines with their objectives and indicators.
    Tree,
    #[command(flatten)]
    Record(RecordCommands),
}

/// Objectives.
#[derive(Clone, Debug, Subcommand)]
pub enum ObjectiveCommands {
    /// List objectives.
    List {
        /// Only objectives of this line.
        #[arg(long)]
        line: Option<String>,
    },
    #[command(flatten)]
    Record(RecordCommands),
}

/// Indicators.
#[derive(Clone, Debug, Subcommand)]
pub enum IndicatorCommands {
    /// List indicators.
    List {
        #[arg(long)]
        objective: Option<String>,
        #[arg(long)]
        line: Option<String>,
    },
    #[command(flatten)]
    Record(RecordCommands),
}

/// Careers.
#[derive(Clone, Debug, Subcommand)]
pub enum CareerCommands {
    /// List careers.
    List {
        /// Only careers of this faculty.
        #[arg(long)]
        faculty: Option<String>,
    },
    #[command(flatten)]
    Record(RecordCommands),
}
