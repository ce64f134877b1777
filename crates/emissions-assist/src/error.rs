//! Errors raised while loading or compiling a rulebook.
//!
//! Answering a message never fails; these only surface from loaders.
use emissions_core::Persona;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Failed to read rulebook: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse rulebook YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("No greeting defined for persona '{0}'")]
    MissingGreeting(Persona),
    #[error("Rule '{0}' has no keywords")]
    NoKeywords(String),
    #[error("Rule '{0}' has an empty keyword")]
    EmptyKeyword(String),
    #[error("Invalid template '{name}': {reason}")]
    Template { name: String, reason: String },
    #[error("Render failed: {0}")]
    Render(String),
}
