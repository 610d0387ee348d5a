//! Wire-level request and response data.
//!
//! # Design
//! Requests and responses are plain data. The builders in [`crate::request`]
//! assemble `Request` values and [`crate::client::Client::execute`] is the
//! only place they touch the network, so every request shape can be asserted
//! in unit tests without a server.

use std::fmt;

use crate::client::Credentials;

/// HTTP verb for a request. The API mutates through POST, so PUT and PATCH
/// never appear on this wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A fully assembled request: absolute URL, query pairs still unencoded,
/// credentials already resolved by the client's attachment policy, and an
/// optional JSON body.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub query: Vec<(&'static str, String)>,
    pub auth: Option<Credentials>,
    pub body: Option<String>,
}

/// Status and body of an executed request. Non-2xx responses are data, not
/// transport errors; interpretation happens during decoding.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
