//! Reply selection.
//!
//! Walks the persona's rule table, then the universal table, and takes the
//! first rule with a keyword in the normalized message. No match means the
//! fallback reply. Selection never fails.

use emissions_core::{CompanyProfile, Persona};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::normalizer::normalize;
use crate::rulebook::{Rule, Rulebook};

/// Outcome of matching a message against a rulebook
#[derive(Debug, Clone, Copy)]
pub enum Selection<'a> {
    /// A rule fired
    Rule(&'a Rule),
    /// Nothing matched
    Fallback,
}

impl Selection<'_> {
    pub fn rule_name(&self) -> Option<&str> {
        match self {
            Selection::Rule(rule) => Some(rule.name.as_str()),
            Selection::Fallback => None,
        }
    }
}

/// Find the first matching rule for an already-normalized message
pub fn select<'a>(book: &'a Rulebook, normalized: &str, persona: Persona) -> Selection<'a> {
    book.persona_rules(persona)
        .iter()
        .chain(book.universal_rules())
        .find(|rule| rule.matches(normalized))
        .map(Selection::Rule)
        .unwrap_or(Selection::Fallback)
}

impl Rulebook {
    /// Choose and render the reply to a user message
    pub fn respond(
        &self,
        utterance: &str,
        persona: Persona,
        context: Option<&CompanyProfile>,
    ) -> String {
        let normalized = normalize(utterance);
        let selection = select(self, &normalized, persona);

        let rule = match selection {
            Selection::Rule(rule) => rule,
            Selection::Fallback => {
                debug!(%persona, "no rule matched, using fallback");
                return self.fallback().to_string();
            }
        };

        let template = rule.template_for(context);
        debug!(
            %persona,
            rule = %rule.name,
            table = ?rule.table,
            description = %rule.description,
            template,
            "rule matched"
        );

        match self.renderer().render(template, &template_data(context)) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(rule = %rule.name, error = %e, "reply render failed, using fallback");
                self.fallback().to_string()
            }
        }
    }

    /// Like `respond`, for a persona given as a raw tag.
    ///
    /// An unrecognized tag gets the fallback reply.
    pub fn respond_as(
        &self,
        utterance: &str,
        persona_tag: &str,
        context: Option<&CompanyProfile>,
    ) -> String {
        match persona_tag.parse::<Persona>() {
            Ok(persona) => self.respond(utterance, persona, context),
            Err(e) => {
                warn!(error = %e, "unknown persona, using fallback");
                self.fallback().to_string()
            }
        }
    }
}

fn template_data(context: Option<&CompanyProfile>) -> Value {
    context
        .and_then(|c| serde_json::to_value(c).ok())
        .unwrap_or_else(|| json!({}))
}
