//! Internal error types for labdesk-reqwest.

use thiserror::Error;

/// Internal error type, converted into [`labdesk_core::Error`] at the API boundary.
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Request body could not be encoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Response body was not the expected JSON.
    #[error("Invalid response body: {0}")]
    Decode(serde_json::Error),
    /// URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<Error> for labdesk_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    labdesk_core::Error::transport()
                        .with_message("request timed out")
                        .with_source(e)
                } else if e.is_connect() {
                    labdesk_core::Error::transport()
                        .with_message("connection failed")
                        .with_source(e)
                } else if e.is_builder() {
                    labdesk_core::Error::configuration()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_decode() {
                    labdesk_core::Error::malformed_response()
                        .with_message(e.to_string())
                        .with_source(e)
                } else {
                    labdesk_core::Error::transport()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => labdesk_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Decode(e) => labdesk_core::Error::malformed_response()
                .with_message(e.to_string())
                .with_source(e),
            Error::Url(e) => labdesk_core::Error::configuration()
                .with_message(format!("invalid URL: {e}"))
                .with_source(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use labdesk_core::ErrorKind;

    use super::*;

    #[test]
    fn test_decode_maps_to_malformed_response() {
        let source = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = labdesk_core::Error::from(Error::Decode(source));
        assert_eq!(error.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn test_url_maps_to_configuration() {
        let source = url::Url::parse("not a url").unwrap_err();
        let error = labdesk_core::Error::from(Error::Url(source));
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert!(error.to_string().starts_with("[configuration]: invalid URL"));
    }
}
