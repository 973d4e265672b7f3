#![forbid(unsafe_code)]

//! Greedy column packing.
//!
//! Columns are walked left to right; for each column the not-yet-placed
//! items are walked in processing order and admitted until the column's
//! target weight would be exceeded. When a column closes, the target for the
//! following columns is recomputed from the weight still unplaced.
//!
//! # Column lifecycle
//!
//! `open -> filling -> closed`, or `skipped` when the split item took the
//! slot before the walk reached it. Closure is final: weight never moves
//! between closed columns.
//!
//! # Invariants
//!
//! 1. The split item never shares a column.
//! 2. Placed items always form a prefix of the processing order, so
//!    concatenating the columns yields the input order.
//! 3. Every item is placed. A suffix the walk could not fit is swept into
//!    the last column, or into a column of its own when the last column
//!    holds the split.

use rustc_hash::FxHashSet;

use crate::classify::{GroupPosition, LabeledItem, PanelLayout, PositionLabel};
use crate::config::SPLIT_RESERVED_COLUMNS;
use crate::split::SplitDecision;

/// Packing policy for the non-split items, chosen once per panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackPolicy {
    /// Weight-balanced columns with adaptive targets.
    Balanced,
    /// `side` is shared by two columns; the opposite side collapses into
    /// a single column.
    Grouped { side: PositionLabel },
    /// Each side of the split collapses into one column.
    Equal,
}

/// What to do with the next item offered to the open column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Place the item; `charge` adds its weight to the column's running
    /// total.
    Place { charge: bool },
    /// Close the column and move on.
    Close,
}

impl PackPolicy {
    #[must_use]
    pub fn for_group(group: GroupPosition) -> Self {
        match group {
            GroupPosition::Ungrouped => Self::Balanced,
            GroupPosition::Before => Self::Grouped {
                side: PositionLabel::Before,
            },
            GroupPosition::After => Self::Grouped {
                side: PositionLabel::After,
            },
            GroupPosition::Equal => Self::Equal,
        }
    }

    /// Decide whether `item` joins a column that currently carries
    /// `charged` weight against `target`.
    ///
    /// A grouped column takes its first item without charging it, so the
    /// target is only measured against what follows.
    #[must_use]
    pub fn admit(
        self,
        item: &LabeledItem,
        column_empty: bool,
        charged: u64,
        target: u64,
    ) -> Admission {
        let fits = charged.saturating_add(item.weight) <= target;
        match self {
            Self::Equal => Admission::Place { charge: false },
            Self::Grouped { side } if side.opposite() == Some(item.position) => {
                Admission::Place { charge: false }
            }
            Self::Grouped { .. } if column_empty => Admission::Place { charge: false },
            Self::Grouped { .. } if fits => Admission::Place { charge: true },
            Self::Balanced if column_empty || fits => Admission::Place { charge: true },
            Self::Grouped { .. } | Self::Balanced => Admission::Close,
        }
    }
}

/// Running target-size bookkeeping for one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Budget {
    /// Weight ceiling for the column being filled.
    target: u64,
    /// Weight not yet accounted to a closed column.
    remainder: u64,
    divisor: u64,
    /// Balanced closures so far, starting at 1.
    step: u64,
}

impl Budget {
    fn new(layout: &PanelLayout, decision: &SplitDecision, columns: u8) -> Self {
        let remainder = layout.total - decision.split_weight();
        let (dividend, divisor) = match layout.grouped_amount() {
            Some(amount) => (amount, 2),
            None if decision.has_split() => (
                remainder,
                u64::from(columns.saturating_sub(SPLIT_RESERVED_COLUMNS)),
            ),
            None => (remainder, u64::from(columns)),
        };
        let divisor = divisor.max(1);
        Self {
            target: dividend.div_ceil(divisor),
            remainder,
            divisor,
            step: 1,
        }
    }

    fn close(&mut self, policy: PackPolicy, charged: u64) {
        match policy {
            PackPolicy::Grouped { .. } => {
                // The one grouped column left absorbs everything.
                self.remainder = self.remainder.saturating_sub(charged);
                self.target = self.remainder;
            }
            PackPolicy::Balanced => {
                let columns_left = self.divisor.saturating_sub(self.step);
                if columns_left > 0 {
                    self.remainder = self.remainder.saturating_sub(charged);
                    self.target = self.remainder.div_ceil(columns_left);
                    self.step += 1;
                }
            }
            PackPolicy::Equal => {}
        }
    }
}

/// Pack the classified items of one panel into columns.
///
/// Returns item indices (processing order) grouped per column, in walk
/// order, with empty columns dropped.
#[must_use]
pub fn pack(layout: &PanelLayout, decision: &SplitDecision, columns: u8) -> Vec<Vec<usize>> {
    let split_index = decision.split().map(|split| split.index);
    let packable = usize::from(if split_index.is_some() {
        columns.saturating_sub(1)
    } else {
        columns
    });
    let policy = PackPolicy::for_group(layout.group_position);
    let mut budget = Budget::new(layout, decision, columns);

    // One spare slot: the split may land one column past the walk.
    let mut walk: Vec<Vec<usize>> = vec![Vec::new(); packable + 1];
    let mut placed: FxHashSet<usize> = FxHashSet::default();
    let mut skip_next = false;

    for column in 0..packable {
        if std::mem::take(&mut skip_next) {
            continue;
        }
        let mut charged = 0u64;

        for (index, item) in layout.items.iter().enumerate() {
            if placed.contains(&index) {
                continue;
            }

            if split_index == Some(index) {
                let slot = if walk[column].is_empty() {
                    column
                } else {
                    skip_next = true;
                    column + 1
                };
                walk[slot].push(index);
                placed.insert(index);
                break;
            }

            match policy.admit(item, walk[column].is_empty(), charged, budget.target) {
                Admission::Place { charge } => {
                    if charge {
                        charged = charged.saturating_add(item.weight);
                    }
                    walk[column].push(index);
                    placed.insert(index);
                }
                Admission::Close => {
                    budget.close(policy, charged);

                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        column,
                        charged,
                        target = budget.target,
                        remainder = budget.remainder,
                        "column closed"
                    );

                    break;
                }
            }
        }
    }

    walk.retain(|column| !column.is_empty());
    sweep_leftovers(&mut walk, layout.items.len(), &placed, split_index);
    walk
}

fn sweep_leftovers(
    walk: &mut Vec<Vec<usize>>,
    len: usize,
    placed: &FxHashSet<usize>,
    split_index: Option<usize>,
) {
    let leftovers: Vec<usize> = (0..len).filter(|index| !placed.contains(index)).collect();
    if leftovers.is_empty() {
        return;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(count = leftovers.len(), "sweeping unplaced items");

    let needs_own_column = walk
        .last()
        .is_none_or(|last| split_index.is_some_and(|split| last.contains(&split)));
    if needs_own_column {
        walk.push(leftovers);
    } else if let Some(last) = walk.last_mut() {
        last.extend(leftovers);
    }
}
