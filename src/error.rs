use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors at the edges of the lab.
///
/// The simulation itself is infallible; these come from loading settings and
/// from the external narration collaborator.
#[derive(Debug, Error)]
pub enum Error {
    /// A settings value outside its valid domain.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    /// The narration collaborator failed (network, service fault, empty reply).
    #[error("narrator unavailable: {0}")]
    Narrator(String),

    /// Malformed settings JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Propagated I/O errors (settings files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidSetting("frame_hz must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid setting"));
        assert!(msg.contains("frame_hz"));
    }

    #[test]
    fn json_errors_convert() {
        let parsed: std::result::Result<u32, _> = serde_json::from_str("nope");
        let e: Error = parsed.unwrap_err().into();
        assert!(matches!(e, Error::Json(_)));
    }
}
