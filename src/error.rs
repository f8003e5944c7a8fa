use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while assembling or rendering a pin preview page.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no render context was given")]
    MissingContext,

    #[error("missing template variable `{0}`")]
    MissingVariable(&'static str),

    #[error("invalid pin metadata: {0}")]
    Metadata(String),

    #[error("failed to render preview template: {0}")]
    Template(String),

    #[error("board deparsing currently not supported for protocol: {0}")]
    UnsupportedProtocol(String),

    #[error("cannot load `{type_}` pin data when more than 1 file")]
    MultipleFiles { type_: String },

    #[error("invalid pin version `{0}`")]
    InvalidVersion(String),

    #[error("failed to serialize data preview")]
    Json(#[from] serde_json::Error),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Error::Template(err.to_string())
    }
}
