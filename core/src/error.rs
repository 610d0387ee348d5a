//! Error type for API calls.
//!
//! # Design
//! The server reports failures as a JSON envelope `{code, message, data}`.
//! A non-2xx response with a parseable envelope becomes [`Error::Api`]; when
//! the body is not an envelope (HTML error page, empty body, proxy garbage)
//! the original status and untouched body are kept in [`Error::Http`], so a
//! failed decode never replaces the information the server actually sent.

use serde::Deserialize;

use crate::http::Response;

/// Errors returned by request builders' terminal calls.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport: {0}")]
    Transport(#[from] ureq::Error),

    /// The server answered with a structured error envelope.
    #[error("[{status}][{code}] {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// Non-2xx response whose body is not an error envelope. The body is
    /// carried verbatim.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A 2xx response body did not match the expected shape.
    #[error("decoding response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Error envelope wire shape. `data.status` repeats the HTTP status and is
/// ignored; the status on the response line is authoritative.
#[derive(Debug, Deserialize)]
struct Envelope {
    code: String,
    message: String,
}

impl Error {
    /// Turn a non-2xx response into the richest error the body supports.
    pub(crate) fn from_response(response: &Response) -> Error {
        match serde_json::from_str::<Envelope>(&response.body) {
            Ok(envelope) => Error::Api {
                status: response.status,
                code: envelope.code,
                message: envelope.message,
            },
            Err(_) => Error::Http {
                status: response.status,
                body: response.body.clone(),
            },
        }
    }

    /// HTTP status of the failed call, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the server reported 404 for the addressed entity.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
