//! Content store implementations

mod postgres_repository;

pub use postgres_repository::PostgresQuestionRepository;
