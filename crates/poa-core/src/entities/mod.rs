//! Entity structs for every record the API serves.
//!
//! Field names are English; `serde` renames map them onto the API's Spanish
//! JSON keys. Every record flattens a [`RecordKey`](crate::ids::RecordKey).

mod evidence;
mod indicator;
mod line;
mod objective;
mod plan;
mod unit;
mod user;

pub use evidence::Evidence;
pub use indicator::Indicator;
pub use line::StrategicLine;
pub use objective::Objective;
pub use plan::{Activity, Plan};
pub use unit::{Area, Career, Faculty};
pub use user::User;
