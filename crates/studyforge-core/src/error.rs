//! Input error types.
//!
//! Fatal, classified input failures. Everything else travels as
//! `anyhow::Error` with file context attached; callers that need to tell
//! these apart can downcast.

use std::path::PathBuf;

use thiserror::Error;

/// Errors caused by an input file that cannot be interpreted.
#[derive(Debug, Error)]
pub enum InputError {
    /// The JSON root has none of the shapes the stage accepts.
    #[error("unsupported JSON format in {}; expected {accepted}", path.display())]
    UnsupportedShape { path: PathBuf, accepted: String },

    /// A domain value outside the closed set 1..=5.
    #[error("invalid domain: {0} (expected 1-5)")]
    InvalidDomain(String),
}

impl InputError {
    /// Build an [`InputError::UnsupportedShape`] listing the accepted shapes.
    pub fn unsupported_shape(path: impl Into<PathBuf>, accepted: &[&str]) -> Self {
        InputError::UnsupportedShape {
            path: path.into(),
            accepted: accepted.join(", or "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_shape_names_path_and_shapes() {
        let err = InputError::unsupported_shape("data/in.json", &["an array", "{ domains }"]);
        let msg = err.to_string();
        assert!(msg.contains("data/in.json"));
        assert!(msg.contains("an array, or { domains }"));
    }

    #[test]
    fn downcast_from_anyhow() {
        let err: anyhow::Error = InputError::InvalidDomain("7".into()).into();
        assert!(matches!(
            err.downcast_ref::<InputError>(),
            Some(InputError::InvalidDomain(d)) if d == "7"
        ));
    }
}
