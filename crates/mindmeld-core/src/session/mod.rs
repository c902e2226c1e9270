//! Session persistence: repository trait, service, and import validation.

pub mod import;
pub mod repository;
pub mod service;

pub use repository::SessionRepository;
pub use service::{RenameOutcome, SaveOutcome, SessionService};
