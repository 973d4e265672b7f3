#![forbid(unsafe_code)]

//! Tunables for split detection and column clamping.
//!
//! Every field has a default that reproduces the stock mega menu behaviour,
//! so `LayoutConfig::default()` is what most hosts want. Hosts that need to
//! calibrate the heuristic load a JSON document:
//!
//! ```json
//! { "split_multiplier": 3, "default_columns": 4, "tie_break": "last_processed" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Smallest column count a panel can use.
pub const MIN_COLUMNS: u8 = 1;
/// Largest column count a panel can use.
pub const MAX_COLUMNS: u8 = 5;

/// Columns set aside around a split when deriving the default divisor:
/// the split's own column plus one balancing unit.
pub(crate) const SPLIT_RESERVED_COLUMNS: u8 = 2;

/// Which item wins when several share the maximum weight.
///
/// "Processing order" is the reversed child order the builder works in, so
/// `FirstProcessed` favours the item that comes last in the source menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitTieBreak {
    #[default]
    FirstProcessed,
    LastProcessed,
}

/// Layout heuristics configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Split when `heaviest >= (total - heaviest) * split_multiplier`.
    pub split_multiplier: u32,
    /// Column count used when the requested count is zero or negative.
    pub default_columns: u8,
    /// Tie-break among equally heavy split candidates.
    pub tie_break: SplitTieBreak,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            split_multiplier: 2,
            default_columns: MAX_COLUMNS,
            tie_break: SplitTieBreak::default(),
        }
    }
}

impl LayoutConfig {
    /// Parse a JSON config document and validate it.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the builder cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.split_multiplier == 0 {
            return Err(LayoutError::InvalidMultiplier);
        }
        if !(MIN_COLUMNS..=MAX_COLUMNS).contains(&self.default_columns) {
            return Err(LayoutError::DefaultColumnsOutOfRange {
                value: self.default_columns,
                min: MIN_COLUMNS,
                max: MAX_COLUMNS,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_split_multiplier(mut self, multiplier: u32) -> Self {
        self.split_multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_default_columns(mut self, columns: u8) -> Self {
        self.default_columns = columns;
        self
    }

    #[must_use]
    pub fn with_tie_break(mut self, tie_break: SplitTieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = LayoutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.split_multiplier, 2);
        assert_eq!(config.default_columns, 5);
        assert_eq!(config.tie_break, SplitTieBreak::FirstProcessed);
    }

    #[test]
    fn zero_multiplier_is_rejected() {
        let config = LayoutConfig::default().with_split_multiplier(0);
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidMultiplier)
        ));
    }

    #[test]
    fn default_columns_must_be_in_range() {
        for bad in [0, 6, 200] {
            let config = LayoutConfig::default().with_default_columns(bad);
            assert!(matches!(
                config.validate(),
                Err(LayoutError::DefaultColumnsOutOfRange { value, .. }) if value == bad
            ));
        }
        for good in MIN_COLUMNS..=MAX_COLUMNS {
            let config = LayoutConfig::default().with_default_columns(good);
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = LayoutConfig::from_json_str(r#"{ "split_multiplier": 3 }"#).unwrap();
        assert_eq!(config.split_multiplier, 3);
        assert_eq!(config.default_columns, 5);
        assert_eq!(config.tie_break, SplitTieBreak::FirstProcessed);
    }

    #[test]
    fn json_tie_break_uses_snake_case() {
        let config = LayoutConfig::from_json_str(r#"{ "tie_break": "last_processed" }"#).unwrap();
        assert_eq!(config.tie_break, SplitTieBreak::LastProcessed);
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let result = LayoutConfig::from_json_str(r#"{ "multiplier": 3 }"#);
        assert!(matches!(result, Err(LayoutError::Config(_))));
    }

    #[test]
    fn json_runs_validation() {
        let result = LayoutConfig::from_json_str(r#"{ "default_columns": 7 }"#);
        assert!(matches!(
            result,
            Err(LayoutError::DefaultColumnsOutOfRange { value: 7, .. })
        ));
    }
}
