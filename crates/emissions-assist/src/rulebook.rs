//! Rulebook loading and compilation.
//!
//! Supports the assistant-rules.yaml format with:
//! - One greeting per persona
//! - Ordered keyword rules per persona, plus a universal table
//! - Fixed replies and replies that branch on compliance status
//! - A single fallback reply

use emissions_core::{CompanyProfile, ComplianceStatus, Persona};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::AssistError;
use crate::renderer::ReplyRenderer;

/// Rulebook compiled into the crate
pub const BUILTIN_RULES: &str = include_str!("../../../grammars/assistant-rules.yaml");

static BUILTIN: Lazy<Arc<Rulebook>> = Lazy::new(|| {
    Arc::new(Rulebook::from_yaml(BUILTIN_RULES).expect("built-in rulebook must compile"))
});

/// Top-level rulebook file structure
#[derive(Debug, Clone, Deserialize)]
pub struct RulebookFile {
    pub version: String,
    pub greetings: HashMap<Persona, String>,
    #[serde(default)]
    pub personas: HashMap<Persona, Vec<RuleSpec>>,
    #[serde(default)]
    pub universal: Vec<RuleSpec>,
    pub fallback: String,
}

/// A single keyword rule as written in the file
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub keywords: Vec<String>,
    pub reply: ReplySpec,
}

/// What a rule answers with
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplySpec {
    /// Same template every time
    Fixed { template: String },
    /// Template chosen by the context's compliance status
    Compliance {
        compliant: String,
        under_review: String,
        non_compliant: String,
    },
}

/// Which table a rule came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTable {
    Persona(Persona),
    Universal,
}

impl RuleTable {
    fn prefix(&self) -> &'static str {
        match self {
            RuleTable::Persona(p) => p.as_str(),
            RuleTable::Universal => "universal",
        }
    }
}

/// Compiled reply: registered template names
#[derive(Debug, Clone)]
pub enum Reply {
    Fixed(String),
    ByCompliance {
        compliant: String,
        under_review: String,
        non_compliant: String,
    },
}

/// A compiled rule ready for matching
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: String,
    pub description: String,
    pub table: RuleTable,
    /// Lowercased substrings; any one of them triggers the rule
    pub keywords: Vec<String>,
    pub reply: Reply,
}

impl Rule {
    /// Does any keyword occur in the normalized message?
    pub fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|k| normalized.contains(k.as_str()))
    }

    /// Template to render for this context.
    ///
    /// Anything other than Non-Compliant or Under Review, including no
    /// context at all, takes the compliant branch.
    pub fn template_for(&self, context: Option<&CompanyProfile>) -> &str {
        match &self.reply {
            Reply::Fixed(name) => name.as_str(),
            Reply::ByCompliance { compliant, under_review, non_compliant } => {
                match context.and_then(|c| c.compliance) {
                    Some(ComplianceStatus::NonCompliant) => non_compliant.as_str(),
                    Some(ComplianceStatus::UnderReview) => under_review.as_str(),
                    _ => compliant.as_str(),
                }
            }
        }
    }
}

/// Compiled rulebook ready for answering
#[derive(Debug)]
pub struct Rulebook {
    pub version: String,
    greetings: HashMap<Persona, String>,
    personas: HashMap<Persona, Vec<Rule>>,
    universal: Vec<Rule>,
    fallback: String,
    renderer: ReplyRenderer,
}

impl Rulebook {
    /// The rulebook shipped with the crate
    pub fn builtin() -> Arc<Rulebook> {
        Arc::clone(&BUILTIN)
    }

    /// Load and compile a rulebook from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssistError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Compile a rulebook from YAML content
    pub fn from_yaml(yaml: &str) -> Result<Self, AssistError> {
        let file: RulebookFile = serde_yaml::from_str(yaml)?;
        Self::compile(file)
    }

    /// Validate a parsed file and register every template
    pub fn compile(file: RulebookFile) -> Result<Self, AssistError> {
        for persona in Persona::ALL {
            if !file.greetings.contains_key(&persona) {
                return Err(AssistError::MissingGreeting(persona));
            }
        }

        let mut renderer = ReplyRenderer::new();

        let mut personas = HashMap::new();
        for (persona, specs) in file.personas {
            let table = RuleTable::Persona(persona);
            let rules = specs
                .into_iter()
                .map(|spec| compile_rule(spec, table, &mut renderer))
                .collect::<Result<Vec<_>, _>>()?;
            personas.insert(persona, rules);
        }

        let universal = file
            .universal
            .into_iter()
            .map(|spec| compile_rule(spec, RuleTable::Universal, &mut renderer))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            version = %file.version,
            persona_rules = personas.values().map(Vec::len).sum::<usize>(),
            universal_rules = universal.len(),
            "rulebook compiled"
        );

        Ok(Rulebook {
            version: file.version,
            greetings: file.greetings,
            personas,
            universal,
            fallback: file.fallback,
            renderer,
        })
    }

    /// Opening message for a new conversation
    pub fn greeting(&self, persona: Persona) -> &str {
        // Every persona is checked for a greeting at compile time
        self.greetings
            .get(&persona)
            .map(String::as_str)
            .unwrap_or(self.fallback.as_str())
    }

    /// Rules for a persona, in match order
    pub fn persona_rules(&self, persona: Persona) -> &[Rule] {
        self.personas.get(&persona).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Rules checked for every persona after its own table
    pub fn universal_rules(&self) -> &[Rule] {
        &self.universal
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub(crate) fn renderer(&self) -> &ReplyRenderer {
        &self.renderer
    }
}

fn compile_rule(
    spec: RuleSpec,
    table: RuleTable,
    renderer: &mut ReplyRenderer,
) -> Result<Rule, AssistError> {
    if spec.keywords.is_empty() {
        return Err(AssistError::NoKeywords(spec.name));
    }
    if spec.keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(AssistError::EmptyKeyword(spec.name));
    }

    let base = format!("{}.{}", table.prefix(), spec.name);
    let reply = match spec.reply {
        ReplySpec::Fixed { template } => {
            renderer.register(&base, &template)?;
            Reply::Fixed(base)
        }
        ReplySpec::Compliance { compliant, under_review, non_compliant } => {
            let names = (
                format!("{}.compliant", base),
                format!("{}.under_review", base),
                format!("{}.non_compliant", base),
            );
            renderer.register(&names.0, &compliant)?;
            renderer.register(&names.1, &under_review)?;
            renderer.register(&names.2, &non_compliant)?;
            Reply::ByCompliance {
                compliant: names.0,
                under_review: names.1,
                non_compliant: names.2,
            }
        }
    };

    Ok(Rule {
        name: spec.name,
        description: spec.description,
        table,
        keywords: spec.keywords.iter().map(|k| k.to_lowercase()).collect(),
        reply,
    })
}
