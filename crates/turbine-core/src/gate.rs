//! Single-flight submission guard and the cross-field validity rule.
use std::fmt;

use crate::params::{ParamKey, ParameterSet, QueryParams};

/// Why a submission did not start. Never mutates any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A request is already in flight
    Busy,
    /// A field is empty or a lone `-`
    Incomplete(ParamKey),
    /// `low` is not strictly below `high`
    EmptyRange,
    /// A field's value escaped its declared bounds
    OutOfBounds(ParamKey),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Busy => write!(f, "a request is already running"),
            Rejection::Incomplete(key) => write!(f, "{} needs a number", key),
            Rejection::EmptyRange => write!(f, "low must be less than high"),
            Rejection::OutOfBounds(key) => write!(f, "{} is out of range", key),
        }
    }
}

/// Check the values currently in `params`. Bounds are re-read from the fields
/// rather than trusted from the last edit.
pub fn validate(params: &ParameterSet) -> Result<QueryParams, Rejection> {
    let values = params.values().map_err(Rejection::Incomplete)?;
    if values.low >= values.high {
        return Err(Rejection::EmptyRange);
    }
    for (key, field) in params.iter() {
        // values() already proved every field holds a number
        if let Some(value) = field.value()
            && !field.in_bounds(value)
        {
            return Err(Rejection::OutOfBounds(key));
        }
    }
    Ok(values)
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionGate {
    busy: bool,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Whether `try_start` would succeed right now.
    pub fn is_eligible(&self, params: &ParameterSet) -> bool {
        !self.busy && validate(params).is_ok()
    }

    /// Authorize exactly one request. `Ok` carries the validated values.
    pub fn try_start(&mut self, params: &ParameterSet) -> Result<QueryParams, Rejection> {
        if self.busy {
            return Err(Rejection::Busy);
        }
        let values = validate(params)?;
        self.busy = true;
        Ok(values)
    }

    /// Release the gate. Safe to call more than once.
    pub fn finish(&mut self) {
        self.busy = false;
    }
}
