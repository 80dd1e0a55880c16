pub mod auth;
pub mod catalog;
pub mod dispatch;
pub mod evidence;
pub mod plans;
pub mod shared;
pub mod users;
