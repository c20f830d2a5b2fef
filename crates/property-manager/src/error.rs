use thiserror::Error;

/// Boxed error returned by compute functions that fail for their own reasons.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum PropertyError {
    /// A declaration can't be bound: no compute function, or a bad or
    /// duplicated property name.
    #[error("{0}")]
    InvalidDeclaration(String),

    /// Assignment to a non-writable property, or reset of a non-resettable one.
    #[error("'{type_name}' object attribute '{name}' is read-only")]
    ReadOnly {
        type_name: &'static str,
        name: String,
    },

    #[error("got an unexpected keyword argument '{0}'")]
    UnexpectedArgument(String),

    #[error("missing {} ({})", pluralize(.0.len(), "required argument"), .0.join(", "))]
    MissingRequiredArguments(Vec<String>),

    #[error("'{type_name}' object has no attribute '{name}'")]
    UnknownProperty {
        type_name: &'static str,
        name: String,
    },

    /// A compute function failed. The underlying error is kept as-is.
    #[error(transparent)]
    Compute(BoxError),

    #[error("Config error: {0}")]
    Config(String),
}

impl PropertyError {
    /// Wrap an arbitrary error raised inside a compute function.
    pub fn compute(err: impl Into<BoxError>) -> Self {
        PropertyError::Compute(err.into())
    }
}

pub type Result<T> = std::result::Result<T, PropertyError>;

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_only_message() {
        let err = PropertyError::ReadOnly {
            type_name: "Example",
            name: "answer".into(),
        };
        assert_eq!(
            err.to_string(),
            "'Example' object attribute 'answer' is read-only"
        );
    }

    #[test]
    fn missing_arguments_message_is_pluralized() {
        let one = PropertyError::MissingRequiredArguments(vec!["important".into()]);
        assert_eq!(one.to_string(), "missing 1 required argument (important)");

        let two = PropertyError::MissingRequiredArguments(vec!["a".into(), "b".into()]);
        assert_eq!(two.to_string(), "missing 2 required arguments (a, b)");
    }

    #[test]
    fn unexpected_argument_message() {
        let err = PropertyError::UnexpectedArgument("bogus".into());
        assert_eq!(err.to_string(), "got an unexpected keyword argument 'bogus'");
    }

    #[test]
    fn compute_errors_keep_their_identity() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = PropertyError::compute(io);
        assert_eq!(err.to_string(), "gone");

        let PropertyError::Compute(inner) = err else {
            panic!("Expected Compute");
        };
        let io = inner.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }
}
