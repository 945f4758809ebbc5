//! Crate-level error types.

use std::fmt;

/// Errors produced by the scrollcam crate.
#[derive(Debug)]
pub enum ScrollError {
    /// Setup-time misconfiguration: a trigger selector missing from the
    /// page, a malformed trigger position, an invalid asset path. Fatal to
    /// scene setup, never retried.
    Configuration(String),
    /// The 3D asset could not be read or is not a glTF container.
    AssetLoad {
        /// Path that was requested.
        path: String,
        /// Human-readable failure reason.
        reason: String,
    },
    /// A viewer plugin could not be registered (unmet dependency,
    /// duplicate registration).
    Plugin(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Browser binding failure (missing window, DOM call rejected).
    #[cfg(feature = "web")]
    Web(String),
}

impl ScrollError {
    /// Shorthand for a [`ScrollError::Configuration`] error.
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Shorthand for a [`ScrollError::AssetLoad`] error.
    pub(crate) fn asset(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => {
                write!(f, "configuration error: {msg}")
            }
            Self::AssetLoad { path, reason } => {
                write!(f, "asset load error for {path}: {reason}")
            }
            Self::Plugin(msg) => write!(f, "plugin error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            #[cfg(feature = "web")]
            Self::Web(msg) => write!(f, "web binding error: {msg}"),
        }
    }
}

impl std::error::Error for ScrollError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScrollError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
