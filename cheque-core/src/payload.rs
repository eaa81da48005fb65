//! Locate the JSON object inside free-form model output.
//!
//! Models wrap their answer in prose or markdown fences. The span taken is
//! from the first `{` to the last `}` of the text. Two separate objects, or
//! braces inside string values, are not disambiguated.

use once_cell::sync::Lazy;
use regex::Regex;

static OBJECT_SPAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("object span pattern is valid"));

/// Greedy first-`{` to last-`}` span, or `None` when the text has no such span.
pub fn find_json_span(text: &str) -> Option<&str> {
    OBJECT_SPAN.find(text).map(|m| m.as_str())
}
