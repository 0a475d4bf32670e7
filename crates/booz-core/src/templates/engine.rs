//! Handlebars-based placeholder substitution
//!
//! The engine runs in non-strict mode with two adjustments for source-code
//! templates: an unresolved placeholder is written back exactly as it appears
//! in the template, and nothing is HTML-escaped.

use super::context::RenderContext;
use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderError,
};
use std::borrow::Cow;

/// Name handlebars looks up when an expression resolves to nothing
const MISSING_HOOK: &str = "helperMissing";

/// Helpers handlebars registers by default
const BUILTIN_HELPERS: &[&str] = &[
    "if", "unless", "each", "with", "lookup", "raw", "log", "eq", "ne", "gt", "gte", "lt", "lte",
    "and", "or", "not", "len",
];

/// Re-emits an unresolved placeholder inside a block as `{{name}}`.
///
/// Top-level expressions never get here, [`escape_unresolved`] keeps their
/// source text. Inside blocks the context can shift, so those are left to
/// handlebars and this hook.
struct KeepLiteral;

impl HelperDef for KeepLiteral {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut handlebars::RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        out.write("{{")?;
        out.write(h.name())?;
        out.write("}}")?;
        Ok(())
    }
}

/// Template renderer for file contents
pub struct TemplateEngine {
    hbs: Handlebars<'static>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(false);
        hbs.register_escape_fn(no_escape);
        hbs.register_helper(MISSING_HOOK, Box::new(KeepLiteral));
        Self { hbs }
    }

    /// Render template text with the given context
    pub fn render(&self, template: &str, context: &RenderContext) -> Result<String, RenderError> {
        let template = escape_unresolved(template, context);
        self.hbs.render_template(&template, context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Prefix `\` to every top-level expression whose root key is not in
/// `context`, so handlebars emits it verbatim.
///
/// Unterminated expressions are left alone for handlebars to report.
fn escape_unresolved<'a>(template: &'a str, context: &RenderContext) -> Cow<'a, str> {
    let mut out = String::new();
    let mut copied = 0;
    let mut depth = 0usize;
    let mut pos = 0;

    while let Some(offset) = template[pos..].find("{{") {
        let start = pos + offset;
        let braces = template[start..].bytes().take_while(|b| *b == b'{').count();
        // raw blocks and already escaped expressions
        if braces > 3 || template[..start].ends_with('\\') {
            pos = start + braces;
            continue;
        }

        let close = if braces == 3 { "}}}" } else { "}}" };
        let body_start = start + braces;
        let Some(len) = template[body_start..].find(close) else {
            break;
        };
        let body = template[body_start..body_start + len]
            .trim_matches(|c: char| c == '~' || c.is_whitespace());
        pos = body_start + len + close.len();

        match body.chars().next() {
            Some('#') | Some('^') => depth += 1,
            Some('/') => depth = depth.saturating_sub(1),
            _ if depth == 0 && is_unresolved(body, context) => {
                out.push_str(&template[copied..start]);
                out.push('\\');
                copied = start;
            }
            _ => {}
        }
    }

    if out.is_empty() {
        Cow::Borrowed(template)
    } else {
        out.push_str(&template[copied..]);
        Cow::Owned(out)
    }
}

/// Whether an expression body names a value or helper that does not exist
fn is_unresolved(body: &str, context: &RenderContext) -> bool {
    let body = body.strip_prefix('&').unwrap_or(body).trim_start();
    let Some(word) = body.split_whitespace().next() else {
        return false;
    };
    let root = word.split(['.', '/']).next().unwrap_or(word);

    let is_name = !root.is_empty()
        && root
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-');
    is_name && root != "this" && !BUILTIN_HELPERS.contains(&root) && context.get(root).is_none()
}
