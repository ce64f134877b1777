//! Reply rendering.
//!
//! Uses Handlebars for reply templates with number helpers:
//! - grouped: thousands separators (12000 -> "12,000")
//! - magnitude: absolute value (-5 -> "5")
//! - figure: plain number
//! - declined: block helper, renders its body when a value is negative and
//!   its `{{else}}` branch otherwise
//!
//! `grouped`, `magnitude` and `figure` take a fallback string that is
//! written when the value is missing or not a number.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, Renderable,
};
use serde_json::Value;

use crate::error::AssistError;

/// Format a number the way the dashboard shows it: "1234.5" -> "1,234.5".
///
/// At most three fractional digits are kept.
pub fn group_thousands(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let plain = plain_number(rounded.abs());
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Shortest decimal form, without a trailing ".0" for whole numbers
pub fn plain_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Compiled reply templates with registered helpers
pub struct ReplyRenderer {
    handlebars: Handlebars<'static>,
}

impl ReplyRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(false);
        // Replies are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars.register_helper("grouped", Box::new(NumberHelper(group_thousands)));
        handlebars.register_helper("magnitude", Box::new(NumberHelper(|v: f64| plain_number(v.abs()))));
        handlebars.register_helper("figure", Box::new(NumberHelper(plain_number)));
        handlebars.register_helper("declined", Box::new(DeclinedHelper));

        ReplyRenderer { handlebars }
    }

    /// Compile and register a named template
    pub fn register(&mut self, name: &str, template: &str) -> Result<(), AssistError> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| AssistError::Template {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }

    /// Render a named template with data
    pub fn render(&self, name: &str, data: &Value) -> Result<String, AssistError> {
        self.handlebars
            .render(name, data)
            .map_err(|e| AssistError::Render(format!("{}: {}", name, e)))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

impl Default for ReplyRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReplyRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplyRenderer")
            .field("templates", &self.handlebars.get_templates().len())
            .finish()
    }
}

// ============================================================================
// Custom Helpers
// ============================================================================

/// Write a numeric parameter through a formatter, or the fallback text
struct NumberHelper(fn(f64) -> String);

impl HelperDef for NumberHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _r: &'reg Handlebars<'reg>,
        _ctx: &'rc Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let value = h.param(0).and_then(|v| v.value().as_f64());
        let fallback = h.param(1).and_then(|v| v.value().as_str()).unwrap_or("");

        match value {
            Some(v) => out.write(&(self.0)(v))?,
            None => out.write(fallback)?,
        }
        Ok(())
    }
}

/// Block helper: body when the value is negative, inverse otherwise
struct DeclinedHelper;

impl HelperDef for DeclinedHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let declined = h
            .param(0)
            .and_then(|v| v.value().as_f64())
            .map(|v| v < 0.0)
            .unwrap_or(false);

        let branch = if declined { h.template() } else { h.inverse() };
        if let Some(template) = branch {
            template.render(r, ctx, rc, out)?;
        }
        Ok(())
    }
}
