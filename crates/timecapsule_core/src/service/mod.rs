//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs.
//! - Keep HTTP/CLI layers decoupled from persistence details.

pub mod capsule_service;
