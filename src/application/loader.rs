//! Decoding of item collections from JSON and TOML.
//!
//! JSON input is a top-level array of items:
//! ```json
//! [{"id": 1, "parent": "root"}, {"id": 2, "parent": 1, "type": "test"}]
//! ```
//! TOML input is an array of tables under `items`:
//! ```toml
//! [[items]]
//! id = 1
//! parent = "root"
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Item, TreeStore};

/// Input encoding of an item collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension, JSON otherwise
    #[default]
    Auto,
    Json,
    Toml,
}

impl InputFormat {
    /// Resolve `Auto` against an optional source path.
    pub fn resolve(self, path: Option<&Path>) -> Self {
        match self {
            InputFormat::Auto => match path.and_then(|p| p.extension()) {
                Some(ext) if ext.eq_ignore_ascii_case("toml") => InputFormat::Toml,
                _ => InputFormat::Json,
            },
            other => other,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::Auto => "auto",
            InputFormat::Json => "json",
            InputFormat::Toml => "toml",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for InputFormat {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(InputFormat::Auto),
            "json" => Ok(InputFormat::Json),
            "toml" => Ok(InputFormat::Toml),
            other => Err(ApplicationError::Config {
                message: format!("unknown input format: {}", other),
            }),
        }
    }
}

/// Decode `text` into items, failing with `InvalidInput` when it is not a sequence of items.
#[instrument(level = "debug", skip(text))]
pub fn load_items(text: &str, format: InputFormat) -> ApplicationResult<Vec<Item>> {
    let items = match format.resolve(None) {
        InputFormat::Toml => items_from_toml(text)?,
        _ => items_from_json(text)?,
    };
    debug!(count = items.len(), "items decoded");
    Ok(items)
}

pub fn load_store(text: &str, format: InputFormat) -> ApplicationResult<TreeStore> {
    let items = load_items(text, format)?;
    Ok(TreeStore::new(items)?)
}

#[instrument(level = "debug")]
pub fn load_store_from_path(path: &Path, format: InputFormat) -> ApplicationResult<TreeStore> {
    let text = std::fs::read_to_string(path).map_err(|e| ApplicationError::OperationFailed {
        context: format!("read input: {}", path.display()),
        source: Box::new(e),
    })?;
    load_store(&text, format.resolve(Some(path)))
}

fn items_from_json(text: &str) -> ApplicationResult<Vec<Item>> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| ApplicationError::invalid_input(format!("malformed JSON: {}", e)))?;

    match value {
        serde_json::Value::Array(elements) => elements
            .into_iter()
            .enumerate()
            .map(|(i, element)| {
                serde_json::from_value(element)
                    .map_err(|e| ApplicationError::invalid_input(format!("item {}: {}", i, e)))
            })
            .collect(),
        other => Err(ApplicationError::invalid_input(format!(
            "expected an array of items, found {}",
            json_kind(&other)
        ))),
    }
}

fn items_from_toml(text: &str) -> ApplicationResult<Vec<Item>> {
    let table: toml::Table = toml::from_str(text)
        .map_err(|e| ApplicationError::invalid_input(format!("malformed TOML: {}", e)))?;

    match table.get("items") {
        Some(toml::Value::Array(elements)) => elements
            .iter()
            .enumerate()
            .map(|(i, element)| {
                Item::deserialize(element.clone())
                    .map_err(|e| ApplicationError::invalid_input(format!("item {}: {}", i, e)))
            })
            .collect(),
        Some(other) => Err(ApplicationError::invalid_input(format!(
            "`items` must be an array, found {}",
            other.type_str()
        ))),
        None => Err(ApplicationError::invalid_input("missing `items` array")),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
