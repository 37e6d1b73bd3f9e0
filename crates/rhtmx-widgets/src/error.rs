// File: src/error.rs
// Purpose: Error type for strict serialization and configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WidgetError {
    /// A group is marked as a custom field by a widget this library does not know
    #[error("Unrecognized custom field '{name}'")]
    UnrecognizedComposite { name: String },

    #[error("Invalid widget configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, WidgetError>;
