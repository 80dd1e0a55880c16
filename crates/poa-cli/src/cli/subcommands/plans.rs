use clap::Subcommand;

use super::RecordCommands;

/// Annual operational plans.
#[derive(Clone, Debug, Subcommand)]
pub enum PlanCommands {
    /// List all plans.
    List,
    /// Plans of the signed-in user's career or area.
    Mine,
    /// Plan, running-plan and activity counts for the signed-in user.
    Summary,
    /// Activities inside a plan.
    Activity {
        #[command(subcommand)]
        action: ActivityCommands,
    },
    #[command(flatten)]
    Record(RecordCommands),
}

#[derive(Clone, Debug, Subcommand)]
pub enum ActivityCommands {
    /// Add an activity from a JSON object (inline, or `@path`).
    Add {
        plan: String,
        #[arg(long)]
        json: String,
    },
    /// Update an activity.
    Update {
        plan: String,
        activity: String,
        #[arg(long)]
        json: String,
    },
    /// Remove an activity.
    Remove { plan: String, activity: String },
}
