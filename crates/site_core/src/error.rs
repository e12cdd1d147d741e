use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("contact form has been torn down")]
    TornDown,
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("unknown form field '{0}'")]
    UnknownField(String),
}

/// Failure to get a readable answer from the contact endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("contact endpoint unreachable: {0}")]
    Network(String),
    #[error("contact endpoint returned an unreadable body: {0}")]
    Decode(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SceneLoadError {
    #[error("scene module is not available")]
    Unavailable,
    #[error("scene source '{0}' is not a valid url")]
    InvalidSource(String),
    #[error("scene module failed to load: {0}")]
    Failed(String),
}
