#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidVersion,
    InvalidCapacity,
    InvalidResize,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidVersion => "InvalidVersion",
            ErrorCode::InvalidCapacity => "InvalidCapacity",
            ErrorCode::InvalidResize => "InvalidResize",
        }
    }
}

/// A problem found while validating a replay script. Validation collects all
/// of them instead of stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    pub code: ErrorCode,
    pub message: String,
    pub path: Option<String>,
}

impl ScriptError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

pub type ValidationResult = Result<(), Vec<ScriptError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheErrorKind {
    /// Capacity was zero or negative.
    InvalidConfiguration,
    InvalidScript,
    InvalidTrace,
}

impl CacheErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheErrorKind::InvalidConfiguration => "InvalidConfiguration",
            CacheErrorKind::InvalidScript => "InvalidScript",
            CacheErrorKind::InvalidTrace => "InvalidTrace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheError {
    pub kind: CacheErrorKind,
    pub message: String,
    pub path: Option<String>,
}

impl CacheError {
    pub fn new(kind: CacheErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub(crate) fn invalid_capacity(raw: impl std::fmt::Display) -> Self {
        CacheError::new(
            CacheErrorKind::InvalidConfiguration,
            format!("capacity must be a positive integer, got {}", raw),
        )
    }
}

impl std::fmt::Display for CacheError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{} (path: {})", self.message, path)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for CacheError {}

impl From<csv::Error> for CacheError {
    fn from(err: csv::Error) -> Self {
        let error = CacheError::new(CacheErrorKind::InvalidTrace, format!("csv error: {}", err));
        match err.position() {
            Some(position) => error.with_path(format!("line {}", position.line())),
            None => error,
        }
    }
}

impl From<serde_yaml::Error> for CacheError {
    fn from(err: serde_yaml::Error) -> Self {
        CacheError::new(
            CacheErrorKind::InvalidScript,
            format!("script error: {}", err),
        )
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::new(CacheErrorKind::InvalidScript, format!("json error: {}", err))
    }
}
