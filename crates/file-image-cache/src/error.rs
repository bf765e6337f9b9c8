//! Error types for the image cache

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum CacheError {
    /// No entry exists for the key
    NotFound,
    /// Any other filesystem failure
    Io(Box<io::Error>),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheError::NotFound => write!(f, "Cache entry not found"),
            CacheError::Io(err) => write!(f, "Cache IO error: {}", err),
        }
    }
}

impl std::error::Error for CacheError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CacheError::Io(err) => Some(err.as_ref()),
            CacheError::NotFound => None,
        }
    }
}

impl From<io::Error> for CacheError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            CacheError::NotFound
        } else {
            CacheError::Io(Box::new(err))
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_io_error_maps_to_not_found() {
        let err = CacheError::from(io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, CacheError::NotFound));
    }

    #[test]
    fn test_other_io_error_is_preserved() {
        let err = CacheError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(matches!(err, CacheError::Io(_)));
        assert_eq!(format!("{}", err), "Cache IO error: disk full");
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(format!("{}", CacheError::NotFound), "Cache entry not found");
    }
}
