use crate::board::Board;
use crate::error::Result;
use crate::files::PinFiles;
use crate::meta::PinMeta;
use crate::preview::{DataPreview, PinData};
use crate::version::PinVersion;

/// Name of the metadata file stored in every pin version.
const META_FILE: &str = "data.txt";

/// Everything the preview page of a single pin shows.
///
/// Empty strings and `None` are left out of the page, except `pin_name` which
/// is always substituted (empty when missing).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderContext {
    pub pin_name: String,
    pub pin_metadata: Option<PinMeta>,
    /// Last updated timestamp. Only shown together with `pin_metadata`.
    pub date: Option<String>,
    pub pin_files: PinFiles,
    /// JSON payload of the paged table.
    pub data_preview: String,
    /// Inline CSS for the preview section, usually empty or `display:none`.
    pub data_preview_style: String,
    /// Expression that reconnects to the board holding the pin.
    pub board_deparse: String,
}

impl RenderContext {
    /// Assembles the context for a pin version that was just stored.
    ///
    /// A `created` stamp that doesn't parse drops the date, and a board that
    /// can't be deparsed leaves the expression empty. Both only degrade the page.
    pub fn for_pin(
        pin_name: impl Into<String>, meta: PinMeta, data: &PinData, board: Option<&Board>,
        max_rows: usize,
    ) -> Result<Self> {
        let pin_name = pin_name.into();

        let date = match PinVersion::from_meta(&meta) {
            Ok(version) => Some(version.display_date()),
            Err(e) => {
                log::warn!("no last updated date for pin {:?}: {}", pin_name, e);
                None
            },
        };

        let mut files = meta.file_names();
        files.push(META_FILE.to_string());

        let board_deparse = match board.map(Board::deparse).transpose() {
            Ok(expr) => expr.unwrap_or_default(),
            Err(e) => {
                log::warn!("{}", e);
                String::new()
            },
        };

        let preview = DataPreview::build(data, max_rows)?;

        Ok(Self {
            pin_name,
            pin_metadata: Some(meta),
            date,
            pin_files: PinFiles::from_names(files),
            data_preview: preview.json,
            data_preview_style: preview.style,
            board_deparse,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::board::Protocol;
    use crate::meta::FileField;
    use crate::preview::{Table, DEFAULT_PREVIEW_ROWS};

    fn iris_meta() -> PinMeta {
        PinMeta {
            description: "Iris dataset".to_string(),
            created: "20230101T120000Z".to_string(),
            pin_hash: "c0ffee".to_string(),
            file: FileField::One("iris.csv".to_string()),
            type_: "csv".to_string(),
            ..PinMeta::default()
        }
    }

    fn iris_table() -> PinData {
        let mut table = Table::new(vec!["species".to_string()]);
        table.push_row(vec![json!("setosa")]);
        PinData::Table(table)
    }

    #[test]
    fn context_for_stored_pin() {
        let board = Board::folder("boards/local");
        let context = RenderContext::for_pin(
            "iris",
            iris_meta(),
            &iris_table(),
            Some(&board),
            DEFAULT_PREVIEW_ROWS,
        )
        .unwrap();

        assert_eq!(context.pin_name, "iris");
        assert_eq!(context.date.as_deref(), Some("2023-01-01 12:00:00"));
        assert_eq!(
            context.pin_files.as_str(),
            r#"<a href="iris.csv">iris.csv</a>, <a href="data.txt">data.txt</a>"#
        );
        assert_eq!(context.board_deparse, "board_folder('boards/local')");
        assert!(context.data_preview.starts_with(r#"{"data":[{"species":"setosa"}]"#));
        assert_eq!(context.data_preview_style, "");
    }

    #[test]
    fn degrades_on_bad_version_and_board() {
        let mut meta = iris_meta();
        meta.created = "not a date".to_string();
        let board = Board {
            protocol: Protocol::Other("s3".to_string()),
            allow_pickle_read: None,
        };
        let data = PinData::Object {
            kind: "dict".to_string(),
        };

        let context =
            RenderContext::for_pin("config", meta, &data, Some(&board), DEFAULT_PREVIEW_ROWS)
                .unwrap();

        assert_eq!(context.date, None);
        assert_eq!(context.board_deparse, "");
        assert_eq!(context.data_preview, "{}");
        assert_eq!(context.data_preview_style, "display:none");
    }
}
