#![forbid(unsafe_code)]

//! Position classification relative to the split.
//!
//! Every item is tagged `before`, `split` or `after` (in processing order),
//! the weight on each side is summed, and a [`GroupPosition`] is derived
//! that tells the packer how the columns around the split are shared out.
//!
//! # Group position
//!
//! | split | columns left after reservation | both sides weighted | result |
//! |-------|-------------------------------|---------------------|--------|
//! | no    | -                             | -                   | `none` |
//! | yes   | > 2                           | yes                 | heavier side, `none` on a tie |
//! | yes   | > 2                           | no                  | `none` |
//! | yes   | <= 2                          | yes                 | `equal` |
//! | yes   | <= 2                          | no                  | `none` |

use serde::{Deserialize, Serialize};

use crate::config::SPLIT_RESERVED_COLUMNS;
use crate::item::Item;
use crate::split::SplitDecision;

/// Where an item sits relative to the split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionLabel {
    /// No split in this panel.
    #[serde(rename = "none")]
    Unlabeled,
    Before,
    Split,
    After,
}

/// How the leftover columns around a split absorb the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPosition {
    /// Default weight-balanced packing.
    #[default]
    #[serde(rename = "none")]
    Ungrouped,
    /// The `before` side gets two columns, `after` collapses into one.
    Before,
    /// The `after` side gets two columns, `before` collapses into one.
    After,
    /// One column per side.
    Equal,
}

impl PositionLabel {
    /// The label of the opposite side, if this is a side at all.
    #[must_use]
    pub fn opposite(self) -> Option<Self> {
        match self {
            Self::Before => Some(Self::After),
            Self::After => Some(Self::Before),
            Self::Split | Self::Unlabeled => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledItem {
    pub id: String,
    pub weight: u64,
    pub position: PositionLabel,
}

/// Per-panel working data handed from classification to packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelLayout {
    /// Items in processing order.
    pub items: Vec<LabeledItem>,
    pub total: u64,
    pub amount_before: u64,
    pub amount_after: u64,
    pub group_position: GroupPosition,
}

impl PanelLayout {
    /// Weight on the side named by the group position, if it names one.
    #[must_use]
    pub fn grouped_amount(&self) -> Option<u64> {
        match self.group_position {
            GroupPosition::Before => Some(self.amount_before),
            GroupPosition::After => Some(self.amount_after),
            GroupPosition::Equal | GroupPosition::Ungrouped => None,
        }
    }
}

/// Label `items` (processing order) against `decision` and derive the
/// group position for a panel of `columns` columns.
#[must_use]
pub fn classify(items: &[Item], decision: &SplitDecision, columns: u8) -> PanelLayout {
    let split_index = decision.split().map(|split| split.index);
    let mut amount_before = 0u64;
    let mut amount_after = 0u64;

    let labeled = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let position = match split_index {
                None => PositionLabel::Unlabeled,
                Some(split) if index == split => PositionLabel::Split,
                Some(split) if index < split => {
                    amount_before = amount_before.saturating_add(item.weight);
                    PositionLabel::Before
                }
                Some(_) => {
                    amount_after = amount_after.saturating_add(item.weight);
                    PositionLabel::After
                }
            };
            LabeledItem {
                id: item.id.clone(),
                weight: item.weight,
                position,
            }
        })
        .collect();

    let group_position = if split_index.is_some() {
        group_position(columns, amount_before, amount_after)
    } else {
        GroupPosition::Ungrouped
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        amount_before,
        amount_after,
        group_position = ?group_position,
        "classified panel"
    );

    PanelLayout {
        items: labeled,
        total: decision.total,
        amount_before,
        amount_after,
        group_position,
    }
}

fn group_position(columns: u8, before: u64, after: u64) -> GroupPosition {
    if before == 0 || after == 0 {
        return GroupPosition::Ungrouped;
    }
    if columns.saturating_sub(SPLIT_RESERVED_COLUMNS) > 2 {
        match before.cmp(&after) {
            std::cmp::Ordering::Greater => GroupPosition::Before,
            std::cmp::Ordering::Less => GroupPosition::After,
            std::cmp::Ordering::Equal => GroupPosition::Ungrouped,
        }
    } else {
        GroupPosition::Equal
    }
}
