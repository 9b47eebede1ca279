// restkit/src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or executing requests.
///
/// Validation failures name the offending parameter and are surfaced
/// immediately; transport and codec failures pass through unmodified.
#[derive(Debug, Error)]
pub enum Error {
    /// A required value was absent or blank.
    #[error("missing required value for `{name}`")]
    Missing { name: &'static str },

    /// A value was present but not parseable in its required form.
    #[error("malformed value for `{name}`: {value:?} ({reason})")]
    Malformed {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// A value was outside its fixed set of accepted values.
    #[error("value for `{name}` is out of range: {value:?}")]
    OutOfRange { name: &'static str, value: String },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl Error {
    pub(crate) fn missing(name: &'static str) -> Self {
        Self::Missing { name }
    }

    pub(crate) fn malformed(
        name: &'static str,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::Malformed {
            name,
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn out_of_range(name: &'static str, value: impl Into<String>) -> Self {
        Self::OutOfRange {
            name,
            value: value.into(),
        }
    }

    /// Name of the parameter a validation failure refers to, if any.
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::Missing { name }
            | Self::Malformed { name, .. }
            | Self::OutOfRange { name, .. } => Some(name),
            _ => None,
        }
    }

    /// True for missing/malformed/out-of-range failures, as opposed to
    /// transport or codec errors passed through from below.
    pub fn is_validation(&self) -> bool {
        self.parameter().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_on_validation_errors() {
        assert_eq!(Error::missing("host").parameter(), Some("host"));
        assert_eq!(
            Error::malformed("endpoint", "??", "no scheme").parameter(),
            Some("endpoint")
        );
        assert_eq!(
            Error::out_of_range("method", "SAYHELLO").parameter(),
            Some("method")
        );
    }

    #[test]
    fn test_parameter_absent_on_passthrough() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.parameter(), None);
        assert!(!err.is_validation());
    }

    #[test]
    fn test_display_names_the_parameter() {
        let msg = Error::missing("content_type").to_string();
        assert!(msg.contains("content_type"), "got: {}", msg);
    }
}
