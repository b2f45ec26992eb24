use thiserror::Error;

/// All errors produced by page-fx.
///
/// A missing element is never an error: behaviors whose elements are absent
/// simply stay inert. `FxError` covers bad configuration and host API
/// rejections.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct FxError {
    pub kind: ErrorKind,
    /// Which behavior or config field the error relates to, if known.
    pub context: Option<String>,
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A config value failed validation.
    #[error("invalid config: {0}")]
    Config(String),
    /// Config JSON could not be parsed.
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The host document rejected an operation.
    #[error("DOM operation failed: {0}")]
    Dom(String),
    /// Unknown preset name.
    #[error("unknown preset '{0}' (expected 'home' or 'subpage')")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, FxError>;

impl From<ErrorKind> for FxError {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }
}

impl From<serde_json::Error> for FxError {
    fn from(err: serde_json::Error) -> Self {
        ErrorKind::Json(err).into()
    }
}

/// Shorthand constructors.
impl FxError {
    pub fn config(field: &str, msg: &str) -> Self {
        Self {
            kind: ErrorKind::Config(format!("{field}: {msg}")),
            context: Some(field.to_string()),
        }
    }

    pub fn dom(msg: impl Into<String>) -> Self {
        ErrorKind::Dom(msg.into()).into()
    }

    pub fn unknown_preset(name: &str) -> Self {
        ErrorKind::UnknownPreset(name.to_string()).into()
    }

    /// Attach the behavior or field this error came from.
    pub fn in_context(mut self, context: &str) -> Self {
        self.context = Some(context.to_string());
        self
    }
}
