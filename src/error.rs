//! Unified error types for the offline data layer.
//!
//! Loaders distinguish between failures the caller must abort on (a missing
//! or undecodable catalog) and the not-found kind, which the optional data
//! paths recover from. [`OfflineError::is_not_found`] is the classifier for
//! that split.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for offline data operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OfflineError {
    /// Neither a side-by-side file nor an embedded resource exists
    #[error("Unable to find data file '{name}'")]
    ResourceNotFound { name: String },

    /// A resource was found but could not be decoded
    #[error("Failed to decode '{resource}': {context}")]
    Decode {
        resource: String,
        context: String,
        #[source]
        source: DecodeErrorKind,
    },

    /// A report-writer plugin could not be loaded or registered
    #[error("Plugin '{name}' failed: {context}")]
    Plugin {
        name: String,
        context: String,
        #[source]
        source: PluginErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific decode error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    #[error("Decompression failed: {0}")]
    Decompress(String),

    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Invalid public key token '{token}': {reason}")]
    InvalidToken { token: String, reason: String },
}

/// Specific plugin error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PluginErrorKind {
    #[error("No module named '{0}' is known to this build")]
    UnknownModule(String),

    #[error("Module dependency missing: {0}")]
    MissingDependency(String),

    #[error("Report writer construction failed: {0}")]
    Registration(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for offline data operations
pub type Result<T> = std::result::Result<T, OfflineError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl OfflineError {
    /// Create a not-found error for a logical resource name
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    /// Create a decode error for a resource
    pub fn decode(resource: impl Into<String>, source: DecodeErrorKind) -> Self {
        Self::Decode {
            resource: resource.into(),
            context: String::new(),
            source,
        }
    }

    /// Create a plugin error
    pub fn plugin(name: impl Into<String>, source: PluginErrorKind) -> Self {
        Self::Plugin {
            name: name.into(),
            context: String::new(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this is the not-found failure kind.
    ///
    /// An IO error of kind `NotFound` counts too: the file can vanish between
    /// the existence probe and the open.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ResourceNotFound { .. } => true,
            Self::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            _ => false,
        }
    }

    /// The logical resource name carried by a not-found error.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        match self {
            Self::ResourceNotFound { name } => Some(name),
            Self::Decode { resource, .. } => Some(resource),
            _ => None,
        }
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for OfflineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for OfflineError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode("json", DecodeErrorKind::InvalidJson(err.to_string()))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context is prepended to any context the error already carries. The
/// not-found kind is passed through untouched so its logical name survives.
///
/// # Example
///
/// ```ignore
/// use apiport_offline::error::ErrorContext;
///
/// let stream = resolver.open("catalog.bin").context("loading API catalog")?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, only evaluated on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<OfflineError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: OfflineError, new_ctx: &str) -> OfflineError {
    match err {
        OfflineError::Decode {
            resource,
            context: existing,
            source,
        } => OfflineError::Decode {
            resource,
            context: chain_context(new_ctx, &existing),
            source,
        },
        OfflineError::Plugin {
            name,
            context: existing,
            source,
        } => OfflineError::Plugin {
            name,
            context: chain_context(new_ctx, &existing),
            source,
        },
        OfflineError::Io {
            path,
            message,
            source,
        } => OfflineError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        OfflineError::Config(msg) => OfflineError::Config(chain_context(new_ctx, &msg)),
        OfflineError::Validation(msg) => OfflineError::Validation(chain_context(new_ctx, &msg)),
        not_found @ OfflineError::ResourceNotFound { .. } => not_found,
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| OfflineError::Validation(context.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_resource() {
        let err = OfflineError::not_found("catalog.bin");
        assert!(err.to_string().contains("catalog.bin"));
        assert!(err.is_not_found());
        assert_eq!(err.resource_name(), Some("catalog.bin"));
    }

    #[test]
    fn test_io_not_found_is_not_found_kind() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(OfflineError::io("/tmp/exceptions.bin", io_err).is_not_found());

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!OfflineError::io("/tmp/exceptions.bin", io_err).is_not_found());
    }

    #[test]
    fn test_decode_is_not_not_found() {
        let err = OfflineError::decode("catalog.bin", DecodeErrorKind::Decompress("bad magic".into()));
        assert!(!err.is_not_found());
        assert_eq!(err.resource_name(), Some("catalog.bin"));
    }

    #[test]
    fn test_context_keeps_not_found_name() {
        let result: Result<()> = Err(OfflineError::not_found("exceptions.bin"));
        let err = result.context("loading additional data").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.resource_name(), Some("exceptions.bin"));
    }

    #[test]
    fn test_context_chaining() {
        fn inner() -> Result<()> {
            Err(OfflineError::decode(
                "catalog.bin",
                DecodeErrorKind::InvalidJson("eof".into()),
            ))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(OfflineError::Decode { context, .. }) => {
                assert_eq!(context, "outer layer: middle layer");
            }
            other => panic!("Expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");
    }

    #[test]
    fn test_option_context() {
        let none_value: Option<i32> = None;
        match none_value.context_none("missing value") {
            Err(OfflineError::Validation(msg)) => assert_eq!(msg, "missing value"),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
