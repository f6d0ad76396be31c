//! Placeholder interpolation into resolved strings.

use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

/// Options forwarded to the interpolation function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpolateOptions {
    /// Suppress diagnostics for placeholders with no matching data
    pub ignore_missing: bool,
}

/// Substitutes caller data into a template string.
///
/// Implementations must be pure and synchronous.
pub trait Interpolator: Send + Sync {
    fn interpolate(&self, template: &str, data: &Value, options: InterpolateOptions) -> String;
}

impl<F> Interpolator for F
where
    F: Fn(&str, &Value, InterpolateOptions) -> String + Send + Sync,
{
    fn interpolate(&self, template: &str, data: &Value, options: InterpolateOptions) -> String {
        self(template, data, options)
    }
}

/// Replaces `{name}` and dotted `{user.name}` / `{items.0}` placeholders.
///
/// Strings are inserted verbatim, numbers and booleans by their JSON text.
/// Double-brace placeholders (`{{name}}`) insert the same text HTML-escaped.
/// Placeholders whose value is missing, null or structured are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceInterpolator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

// Group 1 is an escaped `{{path}}`, group 2 a raw `{path}`.
fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(
            r"\{\{([A-Za-z0-9_$-]+(?:\.[A-Za-z0-9_$-]+)*)\}\}|\{([A-Za-z0-9_$-]+(?:\.[A-Za-z0-9_$-]+)*)\}",
        )
        .unwrap()
    })
}

impl BraceInterpolator {
    /// Placeholder paths in order of appearance (duplicates included).
    pub fn placeholders(template: &str) -> Vec<String> {
        placeholder_regex()
            .captures_iter(template)
            .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Walk a dotted path through objects and arrays.
fn lookup<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(data, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl Interpolator for BraceInterpolator {
    fn interpolate(&self, template: &str, data: &Value, options: InterpolateOptions) -> String {
        placeholder_regex()
            .replace_all(template, |cap: &Captures| {
                let (path, escape) = match (cap.get(1), cap.get(2)) {
                    (Some(path), _) => (path.as_str(), true),
                    (None, Some(path)) => (path.as_str(), false),
                    (None, None) => return cap[0].to_string(),
                };

                match lookup(data, path).and_then(render) {
                    Some(text) if escape => escape_html(&text),
                    Some(text) => text,
                    None => {
                        if !options.ignore_missing {
                            warn!("Missing a value for the placeholder: {}", path);
                        }
                        cap[0].to_string()
                    }
                }
            })
            .into_owned()
    }
}
