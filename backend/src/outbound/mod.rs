//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed account store using Diesel ORM
//! - **memory**: process-local account store for development runs
//! - **crypto**: Argon2id credential hashing
//! - **token**: HS256 JWT session tokens
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
pub mod token;
