use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Inventory fetch failed ({stage}): {message}")]
    InventoryFetch { stage: String, message: String },

    #[error("Question fetch failed for domain '{domain_code}': {message}")]
    DomainFetch {
        domain_code: String,
        message: String,
    },

    #[error(
        "Insufficient questions: requested {requested}, selected {selected}, \
         total available {available}. Content gaps detected."
    )]
    InsufficientContent {
        requested: usize,
        selected: usize,
        available: usize,
    },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn inventory_fetch(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InventoryFetch {
            stage: stage.into(),
            message: message.into(),
        }
    }

    pub fn domain_fetch(domain_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::DomainFetch {
            domain_code: domain_code.into(),
            message: message.into(),
        }
    }

    pub fn insufficient_content(requested: usize, selected: usize, available: usize) -> Self {
        Self::InsufficientContent {
            requested,
            selected,
            available,
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
