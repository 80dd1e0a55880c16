//! # poa-core
//!
//! Core types shared by every crate of the POA quality-management client.
//!
//! - Entity structs for the records served by the REST API (users, strategic
//!   lines, objectives, indicators, organizational units, plans, activities,
//!   evidence)
//! - [`Reference`], the sum type for foreign keys that arrive either as a bare
//!   id or as a populated sub-object
//! - [`extract_id`] / [`normalize_id`], the reference normalizer
//! - The `{success, data, message}` response envelope

pub mod entities;
pub mod enums;
pub mod ids;
pub mod reference;
pub mod responses;

pub use ids::{Record, RecordKey, normalize_all, normalize_id};
pub use reference::{Identify, Reference, extract_id, same_id};
