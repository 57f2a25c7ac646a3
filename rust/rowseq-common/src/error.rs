use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

pub type StdErrorBoxed = Box<dyn std::error::Error + Send + Sync + 'static>;

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidArgument {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn arrow<E>(context: impl Into<String>, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Arrow {
                context: context.into(),
                source: Box::new(source),
            }
            .into(),
        )
    }

    /// Wraps a failure attributed to a single input row of a batch.
    pub fn row<E>(row: usize, source: E) -> Error
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error(
            ErrorKind::Row {
                row,
                source: Box::new(source),
            }
            .into(),
        )
    }

    /// Returns the failing row index if this error was raised for a specific row.
    pub fn row_index(&self) -> Option<usize> {
        match self.kind() {
            ErrorKind::Row { row, .. } => Some(*row),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("Arrow error: {context}")]
    Arrow {
        context: String,
        source: StdErrorBoxed,
    },

    #[error("row {row}: {source}")]
    Row { row: usize, source: StdErrorBoxed },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}

impl From<arrow_schema::ArrowError> for Error {
    fn from(e: arrow_schema::ArrowError) -> Self {
        Error::arrow("", e)
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn test_row_error_display() {
        let inner = std::io::Error::other("step must not be zero");
        let err = Error::row(7, inner);
        assert_eq!(err.row_index(), Some(7));
        assert_eq!(err.to_string(), "row 7: step must not be zero");
    }

    #[test]
    fn test_invalid_arg_kind() {
        let err = Error::invalid_arg("start", "unsupported type Utf8");
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        assert_eq!(err.row_index(), None);
        assert_eq!(
            err.to_string(),
            "invalid argument start: unsupported type Utf8"
        );
    }

    #[test]
    fn test_from_arrow_error() {
        let err: Error = arrow_schema::ArrowError::InvalidArgumentError("bad".into()).into();
        assert!(matches!(err.into_kind(), ErrorKind::Arrow { .. }));
    }
}
