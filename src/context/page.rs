use serde::Serialize;

use super::RenderContext;

/// The metadata fields the page shows directly.
#[derive(Serialize)]
pub struct MetaView<'a> {
    #[serde(rename = "type")]
    pub type_: &'a str,
    pub api_version: u32,
    pub description: &'a str,
}

/// Values handed to the page template.
///
/// `date` is dropped when there is no metadata, and `raw_metadata` is the
/// already formatted metadata dump.
#[derive(Serialize)]
pub struct PageContext<'a> {
    pub pin_name: &'a str,
    pub pin_metadata: Option<MetaView<'a>>,
    pub raw_metadata: Option<String>,
    pub date: Option<&'a str>,
    pub pin_files: &'a str,
    pub data_preview: &'a str,
    pub data_preview_style: &'a str,
    pub board_deparse: &'a str,
}

impl<'a> PageContext<'a> {
    pub fn new(context: &'a RenderContext, raw_metadata: Option<String>) -> Self {
        let pin_metadata = context.pin_metadata.as_ref().map(|meta| MetaView {
            type_: &meta.type_,
            api_version: meta.api_version,
            description: &meta.description,
        });

        Self {
            pin_name: &context.pin_name,
            date: pin_metadata.as_ref().and(context.date.as_deref()),
            pin_metadata,
            raw_metadata,
            pin_files: context.pin_files.as_str(),
            data_preview: &context.data_preview,
            data_preview_style: &context.data_preview_style,
            board_deparse: &context.board_deparse,
        }
    }
}
