//! Core domain logic for the time-capsule store.
//! This crate is the single source of truth for business invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging};
pub use model::capsule::{Capsule, CapsuleDraft, CapsuleId, CapsuleValidationError};
pub use service::capsule_service::{CapsuleService, CapsuleView, ServiceError, ServiceResult};
pub use store::{CapsuleStore, JsonFileStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
