//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs and schema definitions stay private to this module.
//! Connections come from a `bb8` pool driven by `diesel-async`.

mod diesel_account_repository;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
