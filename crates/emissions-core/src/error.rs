//! Unified error model
use thiserror::Error;

use crate::form::FormErrors;

#[derive(Error, Debug)]
pub enum EmissionsError {
    #[error("FIXTURE/{0}")]
    Fixture(String),

    #[error("FORM/{0}")]
    Form(FormErrors),

    #[error("DUPLICATE/report id {0} already present")]
    DuplicateId(String),

    #[error("PERSONA/unknown persona '{0}'")]
    UnknownPersona(String),

    #[error("IO/{0}")]
    Io(#[from] std::io::Error),
}

impl From<FormErrors> for EmissionsError {
    fn from(errors: FormErrors) -> Self {
        EmissionsError::Form(errors)
    }
}
