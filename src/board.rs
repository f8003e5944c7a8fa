use crate::error::{Error, Result};

/// Where a board keeps its pins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// A local folder.
    Folder(String),
    /// An RStudio Connect server.
    RsConnect(String),
    /// Any other filesystem protocol, by name (`s3`, `gcs`, ...).
    Other(String),
}

/// The parts of a board needed to describe how to reconnect to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub protocol: Protocol,
    pub allow_pickle_read: Option<bool>,
}

impl Board {
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            protocol: Protocol::Folder(path.into()),
            allow_pickle_read: None,
        }
    }

    pub fn rsconnect(server_url: impl Into<String>) -> Self {
        Self {
            protocol: Protocol::RsConnect(server_url.into()),
            allow_pickle_read: None,
        }
    }

    pub fn with_allow_pickle_read(mut self, allow: bool) -> Self {
        self.allow_pickle_read = Some(allow);
        self
    }

    /// Returns the Python expression that reconnects to this board.
    ///
    /// Only key pieces are kept. API keys in particular are left out and have to
    /// come from the reader's environment.
    pub fn deparse(&self) -> Result<String> {
        let allow_pickle = match self.allow_pickle_read {
            Some(true) => ", allow_pickle_read=True",
            Some(false) => ", allow_pickle_read=False",
            None => "",
        };

        match &self.protocol {
            Protocol::Folder(path) => Ok(format!("board_folder({}{})", py_repr(path), allow_pickle)),
            Protocol::RsConnect(url) => Ok(format!(
                "board_rsconnect(server_url={}{})",
                py_repr(url),
                allow_pickle
            )),
            Protocol::Other(name) => Err(Error::UnsupportedProtocol(name.clone())),
        }
    }
}

/// Quotes a string literal like Python's `repr`: single quotes unless the text
/// contains a single quote and no double quote.
fn py_repr(text: &str) -> String {
    let quote = if text.contains('\'') && !text.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut repr = String::with_capacity(text.len() + 2);
    repr.push(quote);
    for ch in text.chars() {
        match ch {
            '\\' => repr.push_str("\\\\"),
            '\n' => repr.push_str("\\n"),
            '\r' => repr.push_str("\\r"),
            '\t' => repr.push_str("\\t"),
            ch if ch == quote => {
                repr.push('\\');
                repr.push(ch);
            },
            ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => {
                repr.push_str(&format!("\\x{:02x}", ch as u32));
            },
            ch => repr.push(ch),
        }
    }
    repr.push(quote);
    repr
}
