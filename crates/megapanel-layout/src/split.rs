#![forbid(unsafe_code)]

//! Split detection: decide whether one child is heavy enough to get a
//! column of its own.
//!
//! # Rules
//!
//! 1. The candidate is the heaviest item; ties resolve through
//!    [`SplitTieBreak`].
//! 2. Panels with two or fewer columns never split.
//! 3. Three-column panels only split an item sitting at either end of the
//!    sequence; isolating an interior item would reorder its siblings.
//! 4. Otherwise split when `heaviest >= diff * split_multiplier`, where
//!    `diff` is the weight of everything else.
//!
//! Items are expected in processing (reversed) order, which is why the
//! tie-break is phrased in terms of processing order.

use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, SplitTieBreak};
use crate::item::Item;

/// The item pulled into its own column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// Position in processing order.
    pub index: usize,
    pub id: String,
    pub weight: u64,
    /// Combined weight of every other item.
    pub diff: u64,
}

/// Why a panel did or did not split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SplitOutcome {
    Isolated(Split),
    /// No items at all.
    Empty,
    /// Two or fewer columns leave no room for a dedicated column.
    TooFewColumns,
    /// Three columns and the heaviest item has neighbours on both sides.
    InteriorOnThreeColumns { candidate: String },
    /// The heaviest item does not dominate the rest.
    BelowThreshold {
        candidate: String,
        weight: u64,
        diff: u64,
    },
}

/// Result of split detection for one panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDecision {
    /// Sum of all item weights.
    pub total: u64,
    #[serde(flatten)]
    pub outcome: SplitOutcome,
}

impl SplitDecision {
    #[must_use]
    pub fn split(&self) -> Option<&Split> {
        match &self.outcome {
            SplitOutcome::Isolated(split) => Some(split),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_split(&self) -> bool {
        self.split().is_some()
    }

    /// Weight of the split item, or 0 without a split.
    #[must_use]
    pub fn split_weight(&self) -> u64 {
        self.split().map_or(0, |split| split.weight)
    }
}

/// Run split detection over `items` (processing order) for a panel of
/// `columns` columns.
#[must_use]
pub fn detect_split(items: &[Item], columns: u8, config: &LayoutConfig) -> SplitDecision {
    let total = items
        .iter()
        .fold(0u64, |total, item| total.saturating_add(item.weight));

    let Some(index) = heaviest_index(items, config.tie_break) else {
        return SplitDecision {
            total,
            outcome: SplitOutcome::Empty,
        };
    };
    let candidate = &items[index];

    let outcome = if columns <= 2 {
        SplitOutcome::TooFewColumns
    } else if columns == 3 && index != 0 && index != items.len() - 1 {
        SplitOutcome::InteriorOnThreeColumns {
            candidate: candidate.id.clone(),
        }
    } else {
        let diff = total - candidate.weight;
        if candidate.weight >= diff.saturating_mul(u64::from(config.split_multiplier)) {
            SplitOutcome::Isolated(Split {
                index,
                id: candidate.id.clone(),
                weight: candidate.weight,
                diff,
            })
        } else {
            SplitOutcome::BelowThreshold {
                candidate: candidate.id.clone(),
                weight: candidate.weight,
                diff,
            }
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        total,
        columns,
        candidate = %candidate.id,
        outcome = ?outcome,
        "split detection"
    );

    SplitDecision { total, outcome }
}

fn heaviest_index(items: &[Item], tie_break: SplitTieBreak) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;
    for (index, item) in items.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, weight)) => match tie_break {
                SplitTieBreak::FirstProcessed => item.weight > weight,
                SplitTieBreak::LastProcessed => item.weight >= weight,
            },
        };
        if replace {
            best = Some((index, item.weight));
        }
    }
    best.map(|(index, _)| index)
}
