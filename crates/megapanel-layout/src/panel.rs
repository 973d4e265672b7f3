#![forbid(unsafe_code)]

//! Panel builder: runs the three stages for one parent node and shapes the
//! result for a renderer.
//!
//! # Pipeline
//!
//! `clamp columns -> reverse children -> detect split -> classify -> pack ->
//! reverse items within each column -> reverse column order -> number from 1`
//!
//! Packing in reversed order and reversing back is part of the contract: the
//! greedy walk overfills the columns it fills first, and the double reversal
//! moves that surplus towards the front of the rendered panel. Reordering
//! these steps changes which column ends up fullest.
//!
//! # State
//!
//! The builder only holds its [`LayoutConfig`]. Every stage result is a
//! fresh value threaded through the pipeline, so successive or concurrent
//! builds on one builder cannot observe each other.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::{PanelLayout, classify};
use crate::config::{LayoutConfig, MAX_COLUMNS};
use crate::error::Result;
use crate::item::{Item, MenuNode};
use crate::pack::pack;
use crate::split::{SplitDecision, detect_split};

/// Normalize a requested column count into `[1, MAX_COLUMNS]`.
///
/// Zero or negative requests fall back to `default`; anything above the
/// maximum is clamped down. Never fails.
#[must_use]
pub fn clamp_columns(requested: i64, default: u8) -> u8 {
    if requested <= 0 {
        default
    } else {
        requested.min(i64::from(MAX_COLUMNS)) as u8
    }
}

/// Final column assignment for one panel.
///
/// `columns` only holds non-empty columns, numbered contiguously from 1.
/// When there are fewer items than requested columns, the map is shorter
/// than `number_of_columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelColumns {
    /// The clamped column count the panel was built for.
    pub number_of_columns: u8,
    pub columns: BTreeMap<u8, Vec<String>>,
    /// Column holding the isolated item, if the panel split.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_col: Option<u8>,
}

impl PanelColumns {
    /// Items of column `number` (1-based).
    #[must_use]
    pub fn column(&self, number: u8) -> Option<&[String]> {
        self.columns.get(&number).map(Vec::as_slice)
    }

    /// All item ids, reading columns left to right.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.columns.values().flatten().map(String::as_str)
    }
}

/// Every intermediate stage of a build, for inspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelPlan {
    pub number_of_columns: u8,
    pub decision: SplitDecision,
    /// Classified items, in processing (reversed) order.
    pub layout: PanelLayout,
    pub columns: PanelColumns,
}

/// One panel produced by [`PanelBuilder::build_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEntry {
    /// Id of the parent node the panel was built for.
    pub id: String,
    pub panel: PanelColumns,
}

/// Builds balanced column layouts.
#[derive(Debug, Clone, Default)]
pub struct PanelBuilder {
    config: LayoutConfig,
}

impl PanelBuilder {
    /// Create a builder, rejecting an invalid config.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Build the panel for `node`'s children.
    ///
    /// Returns `None` when `node` has no children: a lone item needs no
    /// panel.
    #[must_use]
    pub fn build(&self, node: &MenuNode, requested_columns: i64) -> Option<PanelColumns> {
        self.build_items(&node.items(), requested_columns)
    }

    /// Build a panel from weighted items in source order.
    #[must_use]
    pub fn build_items(&self, items: &[Item], requested_columns: i64) -> Option<PanelColumns> {
        self.plan(items, requested_columns).map(|plan| plan.columns)
    }

    /// Build a panel for every node in `nodes` that has children, in node
    /// order.
    #[must_use]
    pub fn build_all(&self, nodes: &[MenuNode], requested_columns: i64) -> Vec<PanelEntry> {
        nodes
            .iter()
            .filter_map(|node| {
                self.build(node, requested_columns).map(|panel| PanelEntry {
                    id: node.id.clone(),
                    panel,
                })
            })
            .collect()
    }

    /// Run the full pipeline and keep every stage.
    #[must_use]
    pub fn plan(&self, items: &[Item], requested_columns: i64) -> Option<PanelPlan> {
        if items.is_empty() {
            return None;
        }
        let columns = clamp_columns(requested_columns, self.config.default_columns);

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("panel", items = items.len(), columns).entered();

        let processing: Vec<Item> = items.iter().rev().cloned().collect();
        let decision = detect_split(&processing, columns, &self.config);
        let layout = classify(&processing, &decision, columns);
        let walk = pack(&layout, &decision, columns);
        let panel = finish(walk, &layout, &decision, columns);

        Some(PanelPlan {
            number_of_columns: columns,
            decision,
            layout,
            columns: panel,
        })
    }
}

/// Undo the processing-order reversal and number the columns.
fn finish(
    walk: Vec<Vec<usize>>,
    layout: &PanelLayout,
    decision: &SplitDecision,
    number_of_columns: u8,
) -> PanelColumns {
    let split_index = decision.split().map(|split| split.index);
    let mut columns = BTreeMap::new();
    let mut split_col = None;

    for (offset, column) in walk.into_iter().rev().enumerate() {
        let number = offset as u8 + 1;
        if split_index.is_some_and(|split| column.contains(&split)) {
            split_col = Some(number);
        }
        let ids: Vec<String> = column
            .into_iter()
            .rev()
            .map(|index| layout.items[index].id.clone())
            .collect();
        columns.insert(number, ids);
    }

    PanelColumns {
        number_of_columns,
        columns,
        split_col,
    }
}
