use minijinja::Environment;

use crate::config::PreviewConfig;
use crate::context::{PageContext, RenderContext};
use crate::error::{Error, Result};
use crate::meta::{MetaFormatter, YamlFormatter};

const PAGE_TEMPLATE_NAME: &str = "index.html";
const CODE_SAMPLE_TEMPLATE_NAME: &str = "code_sample.html";

pub const PAGE_TEMPLATE: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/index.html"));

/// Code showing how to read the pin back.
///
/// The page keeps it inside an HTML comment: it is rendered with the pin's
/// values but browsers never display it.
pub const INACTIVE_CODE_SAMPLE: &str = r#"<pre><code class="python">import pins
board = pins.{{ board_deparse }}
df = board.pin_read("{{ pin_name }}")</code></pre>"#;

/// Renders pin preview pages.
///
/// Scalar values are HTML-escaped. The file listing and the preview JSON are
/// inserted verbatim.
pub struct PageRenderer {
    env: Environment<'static>,
    formatter: Box<dyn MetaFormatter + Send + Sync>,
    strict: bool,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        Self::with_formatter(YamlFormatter)
    }

    /// Creates a renderer that dumps raw metadata with `formatter`.
    pub fn with_formatter<F>(formatter: F) -> Result<Self>
    where
        F: MetaFormatter + Send + Sync + 'static,
    {
        let mut env = Environment::new();
        env.add_template(PAGE_TEMPLATE_NAME, PAGE_TEMPLATE)?;
        env.add_template(CODE_SAMPLE_TEMPLATE_NAME, INACTIVE_CODE_SAMPLE)?;

        Ok(Self {
            env,
            formatter: Box::new(formatter),
            strict: false,
        })
    }

    pub fn from_config(config: &PreviewConfig) -> Result<Self> {
        Ok(Self::new()?.strict(config.strict))
    }

    /// In strict mode an empty `pin_name` is an error instead of an empty
    /// substitution.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn render(&self, context: &RenderContext) -> Result<String> {
        if self.strict && context.pin_name.is_empty() {
            return Err(Error::MissingVariable("pin_name"));
        }

        log::debug!("rendering preview page for pin {:?}", context.pin_name);

        let raw_metadata = context
            .pin_metadata
            .as_ref()
            .map(|meta| self.formatter.format(meta))
            .transpose()?;

        let page = PageContext::new(context, raw_metadata);
        Ok(self.env.get_template(PAGE_TEMPLATE_NAME)?.render(&page)?)
    }

    pub fn try_render(&self, context: Option<&RenderContext>) -> Result<String> {
        self.render(context.ok_or(Error::MissingContext)?)
    }
}

/// Renders `context` with a default renderer.
pub fn render(context: &RenderContext) -> Result<String> {
    PageRenderer::new()?.render(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::PinMeta;

    struct Fixed;

    impl MetaFormatter for Fixed {
        fn format(&self, _meta: &PinMeta) -> Result<String> {
            Ok("raw <dump>".to_string())
        }
    }

    struct Failing;

    impl MetaFormatter for Failing {
        fn format(&self, _meta: &PinMeta) -> Result<String> {
            Err(Error::Metadata("no formatter".to_string()))
        }
    }

    fn with_meta() -> RenderContext {
        RenderContext {
            pin_name: "iris".to_string(),
            pin_metadata: Some(PinMeta::default()),
            ..RenderContext::default()
        }
    }

    #[test]
    fn uses_injected_formatter() {
        let html = PageRenderer::with_formatter(Fixed)
            .unwrap()
            .render(&with_meta())
            .unwrap();

        assert!(html.contains("<pre>raw &lt;dump&gt;</pre>"));
    }

    #[test]
    fn formatter_errors_abort_the_render() {
        let err = PageRenderer::with_formatter(Failing)
            .unwrap()
            .render(&with_meta())
            .unwrap_err();

        assert!(matches!(err, Error::Metadata(_)));
    }

    #[test]
    fn formatter_is_skipped_without_metadata() {
        let context = RenderContext {
            pin_name: "iris".to_string(),
            ..RenderContext::default()
        };

        assert!(PageRenderer::with_formatter(Failing)
            .unwrap()
            .render(&context)
            .is_ok());
    }

    #[test]
    fn missing_context() {
        let renderer = PageRenderer::new().unwrap();
        assert!(matches!(
            renderer.try_render(None),
            Err(Error::MissingContext)
        ));
        assert!(renderer.try_render(Some(&with_meta())).is_ok());
    }

    #[test]
    fn empty_pin_name() {
        let context = RenderContext::default();

        let html = PageRenderer::new().unwrap().render(&context).unwrap();
        assert!(html.contains("<h1></h1>"));

        let err = PageRenderer::new()
            .unwrap()
            .strict(true)
            .render(&context)
            .unwrap_err();
        assert!(matches!(err, Error::MissingVariable("pin_name")));
    }

    #[test]
    fn code_sample_template_parses() {
        let renderer = PageRenderer::new().unwrap();
        assert!(renderer.env.get_template(CODE_SAMPLE_TEMPLATE_NAME).is_ok());
    }
}
