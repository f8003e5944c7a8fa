use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Number of rows shown in the preview table unless configured otherwise.
pub const DEFAULT_PREVIEW_ROWS: usize = 100;

/// Style that hides the preview section when there is nothing to show.
const HIDDEN_STYLE: &str = "display:none";

/// Rows of a data frame, one value per column.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }
}

/// The object stored in a pin, as far as the preview page cares.
#[derive(Clone, Debug, PartialEq)]
pub enum PinData {
    Table(Table),
    /// Anything that is not tabular, described by its type name.
    Object { kind: String },
}

/// Title given to a pin when its author didn't provide one.
pub fn default_title(data: &PinData, name: &str) -> String {
    match data {
        PinData::Table(table) => format!(
            "{}: a pinned {} x {} DataFrame",
            name,
            table.rows.len(),
            table.columns.len()
        ),
        PinData::Object { kind } => format!("{}: a pinned {} object", name, kind),
    }
}

/// Column description understood by the paged table widget.
///
/// Every field is a one-element list, the shape the widget's R producer emits.
#[derive(Serialize)]
struct ColumnSpec<'a> {
    name: [&'a str; 1],
    label: [&'a str; 1],
    align: [&'a str; 1],
    #[serde(rename = "type")]
    type_: [&'a str; 1],
}

#[derive(Serialize)]
struct TablePayload<'a> {
    data: Vec<Map<String, Value>>,
    columns: Vec<ColumnSpec<'a>>,
}

/// The JSON payload and section style of a pin's data preview.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPreview {
    pub json: String,
    pub style: String,
}

impl DataPreview {
    /// Builds the preview of the first `max_rows` rows of tabular data.
    ///
    /// Null cells are left out of their row. Non-tabular data produces an empty
    /// JSON object and a hidden section.
    pub fn build(data: &PinData, max_rows: usize) -> Result<Self> {
        match data {
            PinData::Table(table) => Ok(Self {
                json: table_json(table, max_rows)?,
                style: String::new(),
            }),
            PinData::Object { .. } => Ok(Self {
                json: "{}".to_string(),
                style: HIDDEN_STYLE.to_string(),
            }),
        }
    }

}

fn table_json(table: &Table, max_rows: usize) -> Result<String> {
    let data = table
        .rows
        .iter()
        .take(max_rows)
        .enumerate()
        .map(|(i, row)| {
            if row.len() != table.columns.len() {
                log::warn!(
                    "preview row {} has {} cells for {} columns, unmatched cells are dropped",
                    i,
                    row.len(),
                    table.columns.len()
                );
            }
            table
                .columns
                .iter()
                .zip(row)
                .filter(|(_, value)| !value.is_null())
                .map(|(column, value)| (column.clone(), value.clone()))
                .collect::<Map<String, Value>>()
        })
        .collect();

    let columns = table
        .columns
        .iter()
        .map(|column| ColumnSpec {
            name: [column.as_str()],
            label: [column.as_str()],
            align: ["left"],
            type_: [""],
        })
        .collect();

    let json = serde_json::to_string(&TablePayload { data, columns })?;
    Ok(escape_for_script(&json))
}

/// Escapes the characters that could end the surrounding `<script>` element.
///
/// They can only occur inside JSON strings, where the `\u` forms decode to the
/// same text.
fn escape_for_script(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
