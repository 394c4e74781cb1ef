//! A single labelled numeric input with optional inclusive bounds.
//!
//! Every edit is normalized before it is stored, so the raw text is always
//! one of: empty, a lone `-`, or a canonical integer inside the bounds.
use std::sync::LazyLock;

use regex::Regex;

/// Optional leading minus followed by any number of digits, anchored at the start.
static INTEGER_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?[0-9]*").expect("static pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedIntegerField {
    label: String,
    raw_text: String,
    min: Option<i64>,
    max: Option<i64>,
}

impl BoundedIntegerField {
    /// Create a field. The seed goes through the same normalization as an edit.
    pub fn new(label: impl Into<String>, seed: &str, min: Option<i64>, max: Option<i64>) -> Self {
        let mut field = Self { label: label.into(), raw_text: String::new(), min, max };
        field.edit(seed);
        field
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    /// Replace the field's text with `text`, degrading malformed input to the
    /// nearest valid state instead of rejecting it.
    pub fn edit(&mut self, text: &str) {
        self.raw_text = normalize(text, self.min, self.max);
    }

    /// The current integer, or `None` while the text is `""` or `"-"`.
    pub fn value(&self) -> Option<i64> {
        if is_partial(&self.raw_text) { None } else { self.raw_text.parse().ok() }
    }

    /// Whether `value` lies inside this field's declared bounds.
    pub fn in_bounds(&self, value: i64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// `""` and `"-"` are valid intermediate states that are not numbers yet.
fn is_partial(text: &str) -> bool {
    text.is_empty() || text == "-"
}

/// Core edit rule: longest `-?[0-9]*` prefix, then clamp into `[min, max]`.
pub fn normalize(text: &str, min: Option<i64>, max: Option<i64>) -> String {
    let matched = INTEGER_PREFIX.find(text).map(|m| m.as_str()).unwrap_or("0");
    if is_partial(matched) {
        return matched.to_string();
    }

    let mut number = parse_saturating(matched);
    if let Some(min) = min.filter(|&min| number < min) {
        number = min;
    } else if let Some(max) = max.filter(|&max| number > max) {
        number = max;
    }
    number.to_string()
}

/// Parse a `-?[0-9]+` string, saturating at the i64 range on overflow.
fn parse_saturating(digits: &str) -> i64 {
    digits.parse::<i64>().unwrap_or(if digits.starts_with('-') { i64::MIN } else { i64::MAX })
}
