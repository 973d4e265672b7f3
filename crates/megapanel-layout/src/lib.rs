#![forbid(unsafe_code)]

//! Balanced multi-column layout for mega menu panels.
//!
//! Given the ordered children of one menu node, each weighted by itself plus
//! its direct children, [`PanelBuilder`] partitions them into up to five
//! columns. Order is preserved across the panel, a single overwhelmingly
//! heavy child may be isolated into its own column, and the remaining weight
//! is spread greedily with adaptive per-column targets.
//!
//! # Usage
//!
//! ```ignore
//! use megapanel_layout::{MenuNode, PanelBuilder};
//!
//! let menu: MenuNode = serde_json::from_str(json)?;
//! let panel = PanelBuilder::default().build(&menu, 5);
//! ```
//!
//! # Stages
//!
//! 1. [`split`]: is one child heavy enough for a column of its own?
//! 2. [`classify`]: label children before/after the split and decide how
//!    the columns around it are shared.
//! 3. [`pack`]: greedy left-to-right column walk.
//!
//! [`panel`] wires them together and owns the order reversal that puts the
//! surplus weight towards the front of the panel.

pub mod classify;
pub mod config;
pub mod error;
pub mod item;
pub mod pack;
pub mod panel;
pub mod split;

pub use classify::{GroupPosition, LabeledItem, PanelLayout, PositionLabel};
pub use config::{LayoutConfig, MAX_COLUMNS, MIN_COLUMNS, SplitTieBreak};
pub use error::LayoutError;
pub use item::{Item, MenuNode};
pub use pack::PackPolicy;
pub use panel::{PanelBuilder, PanelColumns, PanelEntry, PanelPlan, clamp_columns};
pub use split::{Split, SplitDecision, SplitOutcome};
