use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::FieldsConfig;
use crate::error::ParamError;
use crate::field::BoundedIntegerField;

/// The four fixed parameter keys, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKey {
    Low,
    High,
    Certainty,
    Delay,
}

impl ParamKey {
    pub const ALL: [ParamKey; 4] = [ParamKey::Low, ParamKey::High, ParamKey::Certainty, ParamKey::Delay];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKey::Low => "low",
            ParamKey::High => "high",
            ParamKey::Certainty => "certainty",
            ParamKey::Delay => "delay",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParamKey {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKey::ALL.into_iter().find(|k| k.as_str() == s).ok_or_else(|| ParamError::KeyNotFound(s.to_string()))
    }
}

/// Parsed values handed to the service for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams {
    pub low: i64,
    pub high: i64,
    pub certainty: i64,
    pub delay: i64,
}

/// Ordered container for the four fields. Holds no validation logic of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    fields: [BoundedIntegerField; 4],
}

impl ParameterSet {
    pub fn from_config(config: &FieldsConfig) -> Self {
        let build = |key: ParamKey| {
            let spec = config.get(key);
            BoundedIntegerField::new(spec.label.clone(), &spec.seed, spec.min, spec.max)
        };
        Self { fields: ParamKey::ALL.map(build) }
    }

    /// Typed access; cannot fail because the key set is closed.
    pub fn field(&self, key: ParamKey) -> &BoundedIntegerField {
        &self.fields[key.index()]
    }

    pub fn field_mut(&mut self, key: ParamKey) -> &mut BoundedIntegerField {
        &mut self.fields[key.index()]
    }

    /// Lookup by name, as used by the command line and config overlays.
    pub fn get(&self, key: &str) -> Result<&BoundedIntegerField, ParamError> {
        key.parse::<ParamKey>().map(|k| self.field(k))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut BoundedIntegerField, ParamError> {
        let key = key.parse::<ParamKey>()?;
        Ok(self.field_mut(key))
    }

    /// Fields paired with their keys, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ParamKey, &BoundedIntegerField)> {
        ParamKey::ALL.into_iter().zip(self.fields.iter())
    }

    /// Bulk read of the current integers. A field that is not a number yet
    /// is reported by key.
    pub fn values(&self) -> Result<QueryParams, ParamKey> {
        let value = |key: ParamKey| self.field(key).value().ok_or(key);
        Ok(QueryParams {
            low: value(ParamKey::Low)?,
            high: value(ParamKey::High)?,
            certainty: value(ParamKey::Certainty)?,
            delay: value(ParamKey::Delay)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn defaults() -> ParameterSet {
        ParameterSet::from_config(&Config::default().fields)
    }

    #[test]
    fn seeds_match_defaults() {
        let params = defaults();
        assert_eq!(params.values(), Ok(QueryParams { low: 1, high: 10, certainty: 5, delay: 100 }));
    }

    #[test]
    fn display_order_is_fixed() {
        let params = defaults();
        let labels: Vec<&str> = params.iter().map(|(_, f)| f.label()).collect();
        assert_eq!(labels, vec!["Low", "High", "Certainty", "Delay"]);
    }

    #[test]
    fn unknown_key_is_reported() {
        let params = defaults();
        assert_eq!(params.get("speed"), Err(ParamError::KeyNotFound("speed".to_string())));
        assert_eq!(params.get("delay").map(|f| f.raw_text()), Ok("100"));
    }

    #[test]
    fn edit_through_named_lookup() {
        let mut params = defaults();
        params.get_mut("certainty").map(|f| f.edit("15")).ok();
        assert_eq!(params.field(ParamKey::Certainty).raw_text(), "10");
    }

    #[test]
    fn partial_field_blocks_bulk_read() {
        let mut params = defaults();
        params.field_mut(ParamKey::High).edit("-");
        assert_eq!(params.values(), Err(ParamKey::High));
    }
}
