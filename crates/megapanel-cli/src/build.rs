use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use megapanel_layout::PanelBuilder;
use serde::Serialize;

use crate::error::{CliError, Result};
use crate::menu::{find_node, load_config, load_menu};

#[derive(Debug, Clone, Args)]
pub struct PanelSource {
    /// JSON menu file: an array of top-level items or a single root item.
    #[arg(long)]
    pub menu: PathBuf,

    /// Requested column count; values <= 0 use the configured default,
    /// values above 5 are clamped.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub columns: i64,

    /// JSON layout config file.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: PanelSource,

    /// Id of the item whose children form the panel.
    #[arg(long)]
    pub item: String,
}

#[derive(Debug, Clone, Args)]
pub struct BuildAllArgs {
    #[command(flatten)]
    pub source: PanelSource,
}

fn builder(source: &PanelSource) -> Result<PanelBuilder> {
    Ok(PanelBuilder::new(load_config(source.config.as_deref())?)?)
}

fn emit<T: Serialize>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Build the panel for one item.
pub fn run_build(args: BuildArgs, out: &mut dyn Write) -> Result<()> {
    let builder = builder(&args.source)?;
    let nodes = load_menu(&args.source.menu)?;
    let node = find_node(&nodes, &args.item)?;
    let panel = builder
        .build(node, args.source.columns)
        .ok_or_else(|| CliError::invalid(format!("item {} has no children", args.item)))?;
    emit(out, &panel)
}

/// Build a panel for every top-level item with children.
pub fn run_build_all(args: BuildAllArgs, out: &mut dyn Write) -> Result<()> {
    let builder = builder(&args.source)?;
    let nodes = load_menu(&args.source.menu)?;
    let entries = builder.build_all(&nodes, args.source.columns);
    tracing::info!(panels = entries.len(), "built panels");
    emit(out, &entries)
}

/// Print every intermediate stage for one item.
pub fn run_explain(args: BuildArgs, out: &mut dyn Write) -> Result<()> {
    let builder = builder(&args.source)?;
    let nodes = load_menu(&args.source.menu)?;
    let node = find_node(&nodes, &args.item)?;
    let plan = builder
        .plan(&node.items(), args.source.columns)
        .ok_or_else(|| CliError::invalid(format!("item {} has no children", args.item)))?;
    emit(out, &plan)
}
