//! Hosted remote backend.
//!
//! Implements `SessionRepository` over the hosted REST storage API. Active
//! only when the configured storage backend is `remote`.

pub mod session_store;

pub use session_store::RemoteSessionStore;
