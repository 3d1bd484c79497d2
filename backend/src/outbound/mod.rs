//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: a process-local store for development and tests
//! - **security**: Argon2 password hashing
//! - **portal_client**: the HTTP submitter used by the police quiz client
//!
//! Adapters translate between domain types and infrastructure
//! representations and hold no business rules.

pub mod memory;
pub mod persistence;
pub mod portal_client;
pub mod security;
