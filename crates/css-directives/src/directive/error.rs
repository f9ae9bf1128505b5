//! Errors raised at the directive registration boundary.

/// Error returned when a registration or merge request is rejected.
///
/// Both kinds are raised before the registry is touched, so a failed call
/// never leaves a partial registration behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// An input had the wrong shape (for example styles that are not a mapping).
    #[error("invalid argument type: \"{parameter}\" must be {expected}")]
    InvalidArgument {
        /// The parameter or sheet entry that was rejected.
        parameter: String,
        /// What the parameter should have been.
        expected: String,
    },

    /// An input had the right shape but a disallowed value.
    #[error("invalid argument value: \"{parameter}\" {message}")]
    InvalidValue {
        /// The parameter or sheet entry that was rejected.
        parameter: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl DirectiveError {
    /// Creates an invalid-argument error.
    pub fn invalid_argument(parameter: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter: parameter.into(),
            expected: expected.into(),
        }
    }

    /// Creates an invalid-value error.
    pub fn invalid_value(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}
