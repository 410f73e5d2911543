//! In-process adapters for development runs without PostgreSQL.

mod in_memory_account_repository;

pub use in_memory_account_repository::InMemoryAccountRepository;
