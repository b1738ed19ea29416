//! Output formatting: table, JSON, YAML, XML.
//!
//! Renders data in the format selected by `--output`. Tables use `tabled`,
//! structured formats use serde. Device configuration is XML on the wire,
//! so it converts into a JSON value before going through serde.

use std::io::{self, Write};

use serde_json::{Map, Value};
use tabled::{Table, Tabled, settings::Style};
use xmltree::{Element, XMLNode};

use crate::cli::OutputFormat;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a single serde-serializable item in the chosen format.
///
/// Table and XML use `detail_fn`, which returns a pre-formatted string.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table | OutputFormat::Xml => detail_fn(data),
        OutputFormat::Json => render_json_pretty(data),
        OutputFormat::JsonCompact => render_json_compact(data),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// JSON view of a `DeviceConfiguration` tree; `null` when absent.
pub fn configuration_value(config: Option<&Element>) -> Value {
    config.map_or(Value::Null, element_to_value)
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

pub(crate) fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

pub(crate) fn render_json_pretty<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string_pretty(data).expect("serialization should not fail")
}

pub(crate) fn render_json_compact<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_json::to_string(data).expect("serialization should not fail")
}

pub(crate) fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).expect("serialization should not fail")
}

// ── XML → JSON ───────────────────────────────────────────────────────

/// Convert an element into a JSON value.
///
/// Text-only elements become strings. Anything else becomes an object of
/// its children; repeated child tags (rows of a table) collapse into an
/// array. Attributes are kept under `@name` keys.
pub fn element_to_value(element: &Element) -> Value {
    let children: Vec<&Element> = element
        .children
        .iter()
        .filter_map(|node| match node {
            XMLNode::Element(child) => Some(child),
            _ => None,
        })
        .collect();

    if children.is_empty() && element.attributes.is_empty() {
        return Value::String(
            element
                .get_text()
                .map(|t| t.trim().to_owned())
                .unwrap_or_default(),
        );
    }

    let mut map = Map::new();
    for (name, value) in &element.attributes {
        map.insert(format!("@{name}"), Value::String(value.clone()));
    }
    for child in children {
        let value = element_to_value(child);
        match map.get_mut(&child.name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(child.name.clone(), value);
            }
        }
    }
    Value::Object(map)
}
