//! Renders the HTML preview page stored next to each pin version.
//!
//! The page shows the pin's metadata, a code sample kept as an inactive
//! comment, and the first rows of tabular data in a paged table:
//!
//! ```no_run
//! use pinpage::{render, PinMeta, RenderContext};
//!
//! let context = RenderContext {
//!     pin_name: "iris".to_string(),
//!     pin_metadata: Some(PinMeta::from_yaml("type: csv\ndescription: Iris dataset\n")?),
//!     date: Some("2023-01-01".to_string()),
//!     ..RenderContext::default()
//! };
//! let html = render(&context)?;
//! assert!(html.contains("Iris dataset"));
//! # Ok::<(), pinpage::Error>(())
//! ```

mod board;
mod config;
mod context;
mod error;
mod files;
mod html;
mod meta;
mod preview;
mod render;
mod site;
mod version;

pub use board::{Board, Protocol};
pub use config::PreviewConfig;
pub use context::RenderContext;
pub use error::{Error, Result};
pub use files::PinFiles;
pub use meta::{FileField, FileSize, MetaFormatter, PinMeta, YamlFormatter};
pub use preview::{default_title, DataPreview, PinData, Table, DEFAULT_PREVIEW_ROWS};
pub use render::{render, PageRenderer, INACTIVE_CODE_SAMPLE, PAGE_TEMPLATE};
pub use site::{render_pin_to_dir, render_to_dir, write_preview, INDEX_FILE};
pub use version::PinVersion;
