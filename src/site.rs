use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

use crate::board::Board;
use crate::config::PreviewConfig;
use crate::context::RenderContext;
use crate::meta::PinMeta;
use crate::preview::PinData;
use crate::render::PageRenderer;

/// File name of the preview page inside a pin version directory.
pub const INDEX_FILE: &str = "index.html";

/// Builds the page of a stored pin, with `config.preview_rows` rows of preview,
/// and writes it into `version_dir`.
pub fn render_pin_to_dir(
    pin_name: &str, meta: PinMeta, data: &PinData, board: Option<&Board>, version_dir: &Path,
    config: &PreviewConfig,
) -> Result<PathBuf> {
    let context = RenderContext::for_pin(pin_name, meta, data, board, config.preview_rows)
        .with_context(|| format!("failed to build preview context for pin {:?}", pin_name))?;

    render_to_dir(&context, version_dir, config)
}

/// Renders `context` and writes the page into `version_dir`, along with the
/// configured asset bundles.
pub fn render_to_dir(
    context: &RenderContext, version_dir: &Path, config: &PreviewConfig,
) -> Result<PathBuf> {
    let renderer = PageRenderer::from_config(config)?;
    let html = renderer
        .render(context)
        .with_context(|| format!("failed to render preview for pin {:?}", context.pin_name))?;

    write_preview(version_dir, &html, config.assets_dir.as_deref())
}

/// Writes `html` as the version's `index.html` and copies the contents of
/// `assets_dir` next to it, so the page's relative asset links resolve.
///
/// Returns the path of the written page.
pub fn write_preview(version_dir: &Path, html: &str, assets_dir: Option<&Path>) -> Result<PathBuf> {
    std::fs::create_dir_all(version_dir)
        .with_context(|| format!("failed to create directory {:?}", version_dir))?;

    let index_path = version_dir.join(INDEX_FILE);
    std::fs::write(&index_path, html)
        .with_context(|| format!("failed to write to {:?}", &index_path))?;

    if let Some(assets_dir) = assets_dir {
        copy_dir_contents(assets_dir, version_dir)
            .with_context(|| format!("failed to copy preview assets from {:?}", assets_dir))?;
    }

    log::info!("wrote pin preview to {:?}", index_path);

    Ok(index_path)
}

/// Copies all contents in `dir` to `dest` recursively.
fn copy_dir_contents(dir: &Path, dest: &Path) -> Result<()> {
    anyhow::ensure!(dir.is_dir(), "assets directory {:?} does not exist", dir);
    log::debug!("copying preview assets from {:?} to {:?}", dir, dest);

    let walkdir = WalkDir::new(dir).into_iter().filter_map(|entry| {
        if let Err(e) = &entry {
            log::warn!("failed to read assets entry {:?}", e);
        }
        entry.ok()
    });

    for entry in walkdir {
        if entry.metadata().map(|m| m.is_file()).unwrap_or(false) {
            let relative_path = entry.path().strip_prefix(dir)?;
            let out_path = dest.join(relative_path);
            let parent = out_path.parent().unwrap_or(dest);

            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create assets directory {:?}", parent))?;

            std::fs::copy(entry.path(), &out_path).with_context(|| {
                format!(
                    "failed to copy asset from {:?} to {:?}",
                    entry.path(),
                    out_path
                )
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::Table;

    #[test]
    fn writes_index_without_assets() {
        let dir = tempfile::tempdir().unwrap();
        let version_dir = dir.path().join("iris/20230101T000000Z-c0ffe");

        let path = write_preview(&version_dir, "<html></html>", None).unwrap();

        assert_eq!(path, version_dir.join("index.html"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn copies_asset_bundles() {
        let assets = tempfile::tempdir().unwrap();
        let js = assets.path().join("pagedtable-1.1/js");
        std::fs::create_dir_all(&js).unwrap();
        std::fs::write(js.join("pagedtable.js"), "// widget").unwrap();
        std::fs::write(assets.path().join("README"), "bundles").unwrap();

        let out = tempfile::tempdir().unwrap();
        write_preview(out.path(), "<html></html>", Some(assets.path())).unwrap();

        assert_eq!(
            std::fs::read_to_string(out.path().join("pagedtable-1.1/js/pagedtable.js")).unwrap(),
            "// widget"
        );
        assert!(out.path().join("README").is_file());
    }

    #[test]
    fn missing_assets_dir_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let missing = out.path().join("nope");

        let err = write_preview(out.path(), "", Some(&missing)).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to copy preview assets"));
        assert!(message.contains("assets directory"));
    }

    #[test]
    fn configured_row_count_reaches_written_page() {
        let mut table = Table::new(vec!["x".to_string()]);
        for i in 0..250 {
            table.push_row(vec![serde_json::json!(i)]);
        }
        let config = PreviewConfig::from_toml("preview_rows = 3").unwrap();
        let meta = PinMeta {
            type_: "csv".to_string(),
            ..PinMeta::default()
        };

        let out = tempfile::tempdir().unwrap();
        let path = render_pin_to_dir(
            "numbers",
            meta,
            &PinData::Table(table),
            None,
            out.path(),
            &config,
        )
        .unwrap();
        let html = std::fs::read_to_string(path).unwrap();

        let open = "data-pagedtable-source>";
        let start = html.find(open).expect("Should have preview script") + open.len();
        let len = html[start..].find("</script>").unwrap();
        let payload: serde_json::Value = serde_json::from_str(&html[start..start + len]).unwrap();

        assert_eq!(payload["data"].as_array().unwrap().len(), 3);
        assert_eq!(payload["data"][2]["x"], serde_json::json!(2));
    }

    #[test]
    fn strict_config_fails_on_empty_name() {
        let out = tempfile::tempdir().unwrap();
        let config = PreviewConfig {
            strict: true,
            ..PreviewConfig::default()
        };

        let err = render_to_dir(&RenderContext::default(), out.path(), &config).unwrap_err();
        assert!(err.to_string().contains("failed to render preview"));
        assert!(!out.path().join(INDEX_FILE).exists());
    }
}
