//! Three-valued filter toggle

use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A filter toggle with three states.
///
/// On the wire this is a nullable boolean: `true` is [`TriState::Enabled`],
/// `false` is [`TriState::Disabled`] and `null` (or an absent field) is
/// [`TriState::Unset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum TriState {
    /// The condition must hold
    Enabled,

    /// The condition must not hold
    Disabled,

    /// No constraint
    #[default]
    Unset,
}

impl TriState {
    /// Whether this toggle constrains anything
    pub fn is_set(self) -> bool {
        self != TriState::Unset
    }
}

impl From<Option<bool>> for TriState {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => TriState::Enabled,
            Some(false) => TriState::Disabled,
            None => TriState::Unset,
        }
    }
}

impl From<TriState> for Option<bool> {
    fn from(state: TriState) -> Self {
        match state {
            TriState::Enabled => Some(true),
            TriState::Disabled => Some(false),
            TriState::Unset => None,
        }
    }
}

impl FromStr for TriState {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "include" | "on" => Ok(TriState::Enabled),
            "false" | "no" | "exclude" | "off" => Ok(TriState::Disabled),
            "" | "null" | "unset" | "any" => Ok(TriState::Unset),
            _ => Err(FilterError::InvalidTriState(s.to_string())),
        }
    }
}

impl fmt::Display for TriState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriState::Enabled => "true",
            TriState::Disabled => "false",
            TriState::Unset => "unset",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_representation() {
        assert_eq!(serde_json::to_string(&TriState::Enabled).unwrap(), "true");
        assert_eq!(serde_json::to_string(&TriState::Disabled).unwrap(), "false");
        assert_eq!(serde_json::to_string(&TriState::Unset).unwrap(), "null");

        let state: TriState = serde_json::from_str("null").unwrap();
        assert_eq!(state, TriState::Unset);
    }

    #[test]
    fn test_parse() {
        assert_eq!("true".parse::<TriState>().unwrap(), TriState::Enabled);
        assert_eq!("Exclude".parse::<TriState>().unwrap(), TriState::Disabled);
        assert_eq!("unset".parse::<TriState>().unwrap(), TriState::Unset);
        assert!("maybe".parse::<TriState>().is_err());
    }
}
