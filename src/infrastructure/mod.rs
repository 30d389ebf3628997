//! Infrastructure layer - storage implementations and application services

pub mod logging;
pub mod question;
pub mod services;

pub use question::PostgresQuestionRepository;
pub use services::SelectionService;
