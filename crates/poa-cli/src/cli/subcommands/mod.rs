pub mod auth;
pub mod catalog;
pub mod evidence;
pub mod plans;
pub mod users;

pub use auth::{AuthCommands, LoginArgs, RegisterArgs};
pub use catalog::{
    CareerCommands, CatalogCommands, IndicatorCommands, LineCommands, ObjectiveCommands,
    RecordCommands,
};
pub use evidence::EvidenceCommands;
pub use plans::{ActivityCommands, PlanCommands};
pub use users::UserCommands;
