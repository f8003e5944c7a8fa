use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::meta::PinMeta;

/// Format of the `created` field in pin metadata and of version names.
const CREATED_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const HASH_PREFIX_LEN: usize = 5;

/// A pin version, named `<created>-<hash prefix>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PinVersion {
    pub created: DateTime<Utc>,
    pub hash: String,
}

impl PinVersion {
    pub fn from_meta(meta: &PinMeta) -> Result<Self> {
        Ok(Self {
            created: parse_created(&meta.created)?,
            hash: meta.pin_hash.clone(),
        })
    }

    /// Parses a version directory name such as `20230101T000000Z-c0ffe`.
    pub fn parse(name: &str) -> Result<Self> {
        let (created, hash) = name
            .split_once('-')
            .ok_or_else(|| Error::InvalidVersion(name.to_string()))?;

        if hash.is_empty() {
            return Err(Error::InvalidVersion(name.to_string()));
        }

        Ok(Self {
            created: parse_created(created)?,
            hash: hash.to_string(),
        })
    }

    pub fn name(&self) -> String {
        let prefix: String = self.hash.chars().take(HASH_PREFIX_LEN).collect();
        format!("{}-{}", self.created.format(CREATED_FORMAT), prefix)
    }

    /// The "Last updated" value shown on the preview page, to the second.
    pub fn display_date(&self) -> String {
        self.created.format(DISPLAY_FORMAT).to_string()
    }
}

fn parse_created(created: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(created, CREATED_FORMAT)
        .map_err(|_| Error::InvalidVersion(created.to_string()))?;
    Ok(Utc.from_utc_datetime(&naive))
}
