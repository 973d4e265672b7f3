use std::fs;
use std::path::Path;

use megapanel_layout::{LayoutConfig, MenuNode};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// A menu file holds either the top-level items or a single root node.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MenuFile {
    Items(Vec<MenuNode>),
    Root(MenuNode),
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse menu JSON into its top-level nodes.
pub fn parse_menu(raw: &str) -> Result<Vec<MenuNode>> {
    Ok(match serde_json::from_str(raw)? {
        MenuFile::Items(items) => items,
        MenuFile::Root(root) => vec![root],
    })
}

pub fn load_menu(path: &Path) -> Result<Vec<MenuNode>> {
    let nodes = parse_menu(&read(path)?)?;
    tracing::info!(path = %path.display(), nodes = nodes.len(), "loaded menu");
    Ok(nodes)
}

/// Load a layout config, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => {
            let config = LayoutConfig::from_json_str(&read(path)?)?;
            tracing::info!(path = %path.display(), ?config, "loaded layout config");
            Ok(config)
        }
        None => Ok(LayoutConfig::default()),
    }
}

/// Depth-first search for the node with `id`.
pub fn find_node<'a>(nodes: &'a [MenuNode], id: &str) -> Result<&'a MenuNode> {
    fn walk<'a>(nodes: &'a [MenuNode], id: &str) -> Option<&'a MenuNode> {
        nodes.iter().find_map(|node| {
            if node.id == id {
                Some(node)
            } else {
                walk(&node.children, id)
            }
        })
    }

    walk(nodes, id).ok_or_else(|| CliError::ItemNotFound { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = r#"[
        { "id": "home" },
        { "id": "docs", "children": [
            { "id": "guides", "children": [ { "id": "setup" } ] }
        ] }
    ]"#;

    #[test]
    fn parses_top_level_array() {
        let nodes = parse_menu(SITE).unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[1].id, "docs");
    }

    #[test]
    fn parses_single_root() {
        let nodes = parse_menu(r#"{ "id": "root", "children": [ { "id": "a" } ] }"#).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].children.len(), 1);
    }

    #[test]
    fn rejects_malformed_menu() {
        assert!(matches!(
            parse_menu(r#"{ "children": [] }"#),
            Err(CliError::Json(_))
        ));
    }

    #[test]
    fn finds_nested_nodes() {
        let nodes = parse_menu(SITE).unwrap();
        assert_eq!(find_node(&nodes, "guides").unwrap().children.len(), 1);
        assert!(matches!(
            find_node(&nodes, "missing"),
            Err(CliError::ItemNotFound { id }) if id == "missing"
        ));
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_config(None).unwrap(), LayoutConfig::default());
    }

    #[test]
    fn unreadable_menu_reports_path() {
        let error = load_menu(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(error, CliError::Read { .. }));
        assert!(error.to_string().contains("/definitely/not/here.json"));
    }
}
