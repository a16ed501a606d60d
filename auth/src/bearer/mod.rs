pub mod errors;

pub use errors::BearerError;

/// Authorization scheme accepted by [`extract_bearer_token`]. Case-sensitive.
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the raw token from an `Authorization` header value.
///
/// The value must hold exactly two whitespace-separated fields, the first of
/// which is the literal `Bearer`. An absent header should be passed as `""`.
///
/// # Errors
/// * `MissingHeader` - Header value is empty
/// * `MalformedHeader` - Field count is not two
/// * `UnsupportedScheme` - First field is not exactly `Bearer`
pub fn extract_bearer_token(header_value: &str) -> Result<&str, BearerError> {
    if header_value.is_empty() {
        return Err(BearerError::MissingHeader);
    }

    let fields: Vec<&str> = header_value.split_whitespace().collect();
    match fields.as_slice() {
        [BEARER_SCHEME, token] => Ok(*token),
        [_, _] => Err(BearerError::UnsupportedScheme),
        _ => Err(BearerError::MalformedHeader {
            fields: fields.len(),
        }),
    }
}
