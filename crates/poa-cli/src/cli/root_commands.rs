use clap::Subcommand;

use crate::cli::subcommands::{
    AuthCommands, CareerCommands, CatalogCommands, EvidenceCommands, IndicatorCommands,
    LineCommands, ObjectiveCommands, PlanCommands, UserCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, session status.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Strategic lines.
    Lines {
        #[command(subcommand)]
        action: LineCommands,
    },
    /// Objectives of strategic lines.
    Objectives {
        #[command(subcommand)]
        action: ObjectiveCommands,
    },
    /// Indicators.
    Indicators {
        #[command(subcommand)]
        action: IndicatorCommands,
    },
    /// Administrative areas.
    Areas {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Careers.
    Careers {
        #[command(subcommand)]
        action: CareerCommands,
    },
    /// Faculties.
    Faculties {
        #[command(subcommand)]
        action: CatalogCommands,
    },
    /// Annual operational plans and their activities.
    Plans {
        #[command(subcommand)]
        action: PlanCommands,
    },
    /// Evidence files.
    Evidence {
        #[command(subcommand)]
        action: EvidenceCommands,
    },
    /// User administration.
    Users {
        #[command(subcommand)]
        action: UserCommands,
    },
}
