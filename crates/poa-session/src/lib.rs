//! # poa-session
//!
//! Client-side session state for the POA client.
//!
//! - [`SessionStore`]: who is signed in, rehydrated once from durable
//!   storage, reconciled with the server by a memoized `initialize()`, and
//!   observable through a `tokio::sync::watch` channel
//! - [`TokenStore`]: bearer token persistence (keyring → env → file)
//! - [`Storage`]: the durable key/value backend ([`FileStorage`],
//!   [`MemoryStorage`])
//! - [`rehydrate`]: the pure startup rule (a missing token always wins)

pub mod api;
pub mod error;
pub mod jwt;
pub mod persisted;
pub mod state;
pub mod storage;
pub mod store;
pub mod token_store;

pub use api::AuthApi;
pub use error::SessionError;
pub use persisted::{PersistedSession, rehydrate};
pub use state::{Phase, Session, SignedIn, Trust};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{AuthOutcome, SessionStore, Verification};
pub use token_store::{TokenSource, TokenStore};
