use crate::engine::EngineError;

/// Error returned by the [`Validator`](crate::Validator) facade.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rule violation, rendered in the validator's locale.
    #[error("{0}")]
    Invalid(String),

    /// Misconfiguration reported by the engine (unknown tag, bad parameter,
    /// unserializable value). Never a user-facing validation message.
    #[error(transparent)]
    Engine(EngineError),
}

impl Error {
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::Invalid(_))
    }

    /// The localized message of a rule violation.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Invalid(message) => Some(message),
            Error::Engine(_) => None,
        }
    }
}
