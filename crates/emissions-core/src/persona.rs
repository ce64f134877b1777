//! Personas and conversation turns
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EmissionsError;

/// Viewpoint that scopes which assistant rules apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Company,
    Regulatory,
    Public,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::Company, Persona::Regulatory, Persona::Public];

    pub fn as_str(&self) -> &'static str {
        match self {
            Persona::Company => "company",
            Persona::Regulatory => "regulatory",
            Persona::Public => "public",
        }
    }

    /// Title shown above the assistant panel
    pub fn assistant_title(&self) -> &'static str {
        match self {
            Persona::Company => "Company AI Assistant",
            Persona::Regulatory => "Regulatory AI Assistant",
            Persona::Public => "Public Information Assistant",
        }
    }
}

impl FromStr for Persona {
    type Err = EmissionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "company" => Ok(Persona::Company),
            "regulatory" => Ok(Persona::Regulatory),
            "public" => Ok(Persona::Public),
            _ => Err(EmissionsError::UnknownPersona(s.to_string())),
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a chat transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_parse() {
        assert_eq!("company".parse::<Persona>().unwrap(), Persona::Company);
        assert_eq!(" Regulatory ".parse::<Persona>().unwrap(), Persona::Regulatory);
        assert!(matches!(
            "investor".parse::<Persona>(),
            Err(EmissionsError::UnknownPersona(_))
        ));
    }

    #[test]
    fn test_assistant_titles() {
        assert_eq!(Persona::Company.assistant_title(), "Company AI Assistant");
        assert_eq!(Persona::Public.assistant_title(), "Public Information Assistant");
    }

    #[test]
    fn test_turn_serialization() {
        let json = serde_json::to_string(&Turn::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
