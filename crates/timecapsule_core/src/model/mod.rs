//! Domain model for time capsules.
//!
//! # Responsibility
//! - Define the canonical capsule record persisted by the store.
//! - Own creation-time validation and the day-granularity lock rule.
//!
//! # Invariants
//! - Every capsule is identified by a stable numeric `CapsuleId`.
//! - `title`, `message` and `open_date` are validated once, at creation;
//!   stored records are never re-validated on read.

pub mod capsule;
