use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pin types whose data must live in exactly one file.
const REQUIRES_SINGLE_FILE: &[&str] = &["csv", "joblib", "file"];

/// One file name or a list of them, as written in a pin's `data.txt`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FileField {
    One(String),
    Many(Vec<String>),
}

impl Default for FileField {
    fn default() -> Self {
        FileField::Many(Vec::new())
    }
}

/// One file size or a list of them, matching [`FileField`].
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FileSize {
    One(u64),
    Many(Vec<u64>),
}

impl Default for FileSize {
    fn default() -> Self {
        FileSize::One(0)
    }
}

/// Metadata stored alongside every pin version.
///
/// Every field is optional when reading: a metadata file missing `type` or
/// `description` still loads, and the preview page renders those values empty.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PinMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    pub created: String,
    pub pin_hash: String,
    pub file: FileField,
    pub file_size: FileSize,
    #[serde(rename = "type")]
    pub type_: String,
    pub api_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub user: BTreeMap<String, serde_yaml::Value>,
}

impl Default for PinMeta {
    fn default() -> Self {
        Self {
            title: None,
            description: String::new(),
            created: String::new(),
            pin_hash: String::new(),
            file: FileField::default(),
            file_size: FileSize::default(),
            type_: String::new(),
            api_version: 1,
            name: None,
            user: BTreeMap::new(),
        }
    }
}

impl PinMeta {
    /// Reads the contents of a pin's `data.txt`.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).map_err(|e| Error::Metadata(e.to_string()))
    }

    /// Serializes the metadata the way it is shown in the "Raw metadata" panel.
    pub fn to_pin_yaml(&self) -> Result<String> {
        YamlFormatter.format(self)
    }

    pub fn file_names(&self) -> Vec<String> {
        match &self.file {
            FileField::One(name) => vec![name.clone()],
            FileField::Many(names) => names.clone(),
        }
    }

    /// Returns the location of the file holding this pin's data.
    ///
    /// `version_dir` is the parent directory of the pin version. Boards without
    /// versions store the full location in the file name, so `None` returns the
    /// file name untouched.
    pub fn data_path(&self, version_dir: Option<&str>) -> Result<String> {
        let names = self.file_names();
        if names.len() > 1 && REQUIRES_SINGLE_FILE.contains(&self.type_.as_str()) {
            return Err(Error::MultipleFiles {
                type_: self.type_.clone(),
            });
        }

        // tables are stored as data.rds plus data.csv, only the csv is readable
        let target = if self.type_ == "table" {
            "data.csv"
        } else {
            names.first().map(String::as_str).unwrap_or_default()
        };

        Ok(match version_dir {
            Some(dir) => format!("{}/{}", dir.trim_end_matches('/'), target),
            None => target.to_string(),
        })
    }
}

/// Turns pin metadata into the text shown in the "Raw metadata" panel.
pub trait MetaFormatter {
    fn format(&self, meta: &PinMeta) -> Result<String>;
}

/// Formats metadata as YAML, the same format as `data.txt`.
#[derive(Clone, Copy, Debug, Default)]
pub struct YamlFormatter;

impl MetaFormatter for YamlFormatter {
    fn format(&self, meta: &PinMeta) -> Result<String> {
        serde_yaml::to_string(meta).map_err(|e| Error::Metadata(e.to_string()))
    }
}
