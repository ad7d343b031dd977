//! `storefront-core`: shared building blocks for the storefront domain crates.
//!
//! This crate contains **pure domain** primitives (no storage, no HTTP).

pub mod error;
pub mod id;
pub mod record;
pub mod transition;

pub use error::{DomainError, DomainResult};
pub use id::DocumentId;
pub use record::Record;
pub use transition::{LifecycleStatus, TransitionRules};
