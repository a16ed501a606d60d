use thiserror::Error;

/// Error type for `Authorization` header parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("No authorization header present")]
    MissingHeader,

    #[error("Authorization header must follow convention 'Bearer <token>' (found {fields} fields)")]
    MalformedHeader { fields: usize },

    #[error("Authorization scheme is not 'Bearer'")]
    UnsupportedScheme,
}
