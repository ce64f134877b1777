//! Emissions Assist: rule-based canned replies for the dashboard chat
//!
//! Turns a user message into one of a fixed set of replies. Rules are
//! ordered keyword tables, one per persona plus a universal table, loaded
//! from `grammars/assistant-rules.yaml`. Replies are Handlebars templates
//! rendered against the company profile when there is one.
//!
//! # Example
//!
//! ```
//! use emissions_assist::respond;
//! use emissions_core::{CompanyProfile, ComplianceStatus, Persona};
//!
//! let profile = CompanyProfile::default()
//!     .with_emissions(12000.0)
//!     .with_yoy_change(5.0)
//!     .with_compliance(ComplianceStatus::NonCompliant);
//!
//! let reply = respond("Can you summarize my report?", Persona::Company, Some(&profile));
//! assert!(reply.contains("12,000"));
//! assert!(reply.contains("5% higher"));
//! assert!(reply.contains("Non-Compliant"));
//! ```
//!
//! # Sessions
//!
//! ```ignore
//! use emissions_assist::{AssistantConfig, ChatSession};
//! use emissions_core::Persona;
//!
//! let mut chat = ChatSession::open(Persona::Public, None, &AssistantConfig::default())?;
//! chat.send("What is a CO2 ton?");
//! // user turn is visible now; the reply lands about a second later
//! chat.settle().await;
//! ```

pub mod config;
pub mod error;
pub mod normalizer;
pub mod renderer;
pub mod rulebook;
pub mod selector;
pub mod session;

pub use config::AssistantConfig;
pub use error::AssistError;
pub use rulebook::{Reply, Rule, RuleTable, Rulebook};
pub use selector::{select, Selection};
pub use session::ChatSession;

use emissions_core::{CompanyProfile, Persona};

/// Reply to a message using the built-in rulebook
pub fn respond(utterance: &str, persona: Persona, context: Option<&CompanyProfile>) -> String {
    Rulebook::builtin().respond(utterance, persona, context)
}

/// Reply for a raw persona tag; unknown tags get the fallback reply
pub fn respond_as(utterance: &str, persona_tag: &str, context: Option<&CompanyProfile>) -> String {
    Rulebook::builtin().respond_as(utterance, persona_tag, context)
}

/// Opening message of the built-in rulebook for a persona
pub fn greeting(persona: Persona) -> String {
    Rulebook::builtin().greeting(persona).to_string()
}
