/// Errors that can occur while loading fonts.
///
/// Layout and the text field never fail; degenerate input produces empty
/// geometry instead. Only resource loading reports errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// Nothing exists at the given path.
    FontFileNotFound(std::path::PathBuf),

    /// The bytes did not contain a usable font face.
    InvalidFontData(String),

    /// A font with this name is already registered.
    DuplicateFont(String),

    /// The file exists but could not be read.
    IoError(String),
}

impl std::fmt::Display for TextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FontFileNotFound(path) => write!(f, "no font file at {}", path.display()),
            Self::InvalidFontData(reason) => write!(f, "unusable font data: {reason}"),
            Self::DuplicateFont(name) => write!(f, "a font named '{name}' is already registered"),
            Self::IoError(reason) => write!(f, "failed to read font: {reason}"),
        }
    }
}

impl std::error::Error for TextError {}

impl From<std::io::Error> for TextError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

/// Result type for text operations.
pub type TextResult<T> = Result<T, TextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = TextError::DuplicateFont("mono".into());
        assert_eq!(err.to_string(), "a font named 'mono' is already registered");
        let err = TextError::FontFileNotFound("fonts/missing.ttf".into());
        assert_eq!(err.to_string(), "no font file at fonts/missing.ttf");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TextError = io.into();
        assert!(matches!(err, TextError::IoError(msg) if msg.contains("denied")));
    }
}
