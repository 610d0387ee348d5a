//! Client handle, credential policy and the single HTTP execution path.
//!
//! # Design
//! `Client` owns the normalized API root, optional Basic credentials and one
//! ureq agent shared by every builder created from it. Builders assemble
//! [`Request`] values; `execute` is the only function that performs I/O, with
//! status interpretation left to the decoding layer (the agent is configured
//! to return non-2xx responses as data).
//!
//! Credential attachment is one policy for the whole crate: writes carry the
//! configured credentials, reads carry them only when the caller asked for
//! the `edit` context. No call site attaches credentials on its own.

use std::fmt;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::Deserialize;
use ureq::Agent;

use crate::categories::Categories;
use crate::comments::Comments;
use crate::error::Error;
use crate::http::{Method, Request, Response};
use crate::pages::Pages;
use crate::posts::Posts;
use crate::query::Context;
use crate::request::RetrieveRequest;
use crate::taxonomies::Taxonomies;

/// HTTP Basic credentials. The Debug form never shows the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl Credentials {
    /// RFC 7617 `Authorization` header value.
    pub(crate) fn basic_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Whether a request reads or mutates server state. Input to the credential
/// attachment policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    Read,
    Write,
}

/// Synchronous client for a WordPress-style REST API.
///
/// # Example
///
/// ```no_run
/// use wp_core::{Client, Context};
///
/// # fn main() -> Result<(), wp_core::Error> {
/// let client = Client::new("https://blog.example.com")
///     .with_basic_auth("editor", "app-password");
///
/// let drafts = client.posts().list().context(Context::Edit).send()?;
/// println!("{} drafts", drafts.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    root: String,
    credentials: Option<Credentials>,
    agent: Agent,
}

impl Client {
    /// Create a client for the site at `base_url`. The REST root (`/wp-json`)
    /// is appended after trimming trailing slashes.
    pub fn new(base_url: &str) -> Self {
        Self {
            root: format!("{}/wp-json", base_url.trim_end_matches('/')),
            credentials: None,
            agent: build_agent(None),
        }
    }

    /// Configure HTTP Basic credentials. They are attached per the crate-wide
    /// policy: always on writes, on reads only for the `edit` context.
    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });
        self
    }

    /// Apply a global timeout to every request made through this client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(Some(timeout));
        self
    }

    /// Unauthenticated GET of the API root, decoding the site's discovery
    /// document.
    pub fn discover(&self) -> Result<SiteInfo, Error> {
        RetrieveRequest::new(self, "").send()
    }

    pub fn posts(&self) -> Posts<'_> {
        Posts::new(self)
    }

    pub fn pages(&self) -> Pages<'_> {
        Pages::new(self)
    }

    pub fn comments(&self) -> Comments<'_> {
        Comments::new(self)
    }

    pub fn categories(&self) -> Categories<'_> {
        Categories::new(self)
    }

    pub fn taxonomies(&self) -> Taxonomies<'_> {
        Taxonomies::new(self)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    /// The one credential-attachment decision for the whole crate.
    pub(crate) fn credentials_for(
        &self,
        access: Access,
        context: Option<Context>,
    ) -> Option<Credentials> {
        match access {
            Access::Write => self.credentials.clone(),
            Access::Read if context == Some(Context::Edit) => self.credentials.clone(),
            Access::Read => None,
        }
    }

    /// Perform the HTTP round trip for an assembled request.
    pub(crate) fn execute(&self, request: &Request) -> Result<Response, Error> {
        debug!("{} {}", request.method, request.url);

        let auth = request.auth.as_ref().map(Credentials::basic_header);
        let sent = match (request.method, request.body.as_deref()) {
            (Method::Get, _) => {
                with_request_parts(self.agent.get(&request.url), request, auth.as_ref()).call()
            }
            (Method::Delete, _) => {
                with_request_parts(self.agent.delete(&request.url), request, auth.as_ref()).call()
            }
            (Method::Post, Some(body)) => {
                with_request_parts(self.agent.post(&request.url), request, auth.as_ref())
                    .content_type("application/json")
                    .send(body.as_bytes())
            }
            (Method::Post, None) => {
                with_request_parts(self.agent.post(&request.url), request, auth.as_ref())
                    .send_empty()
            }
        };

        let mut raw = sent?;
        let status = raw.status().as_u16();
        let body = raw.body_mut().read_to_string()?;
        debug!("{} {} -> {}", request.method, request.url, status);

        Ok(Response { status, body })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("root", &self.root)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

/// Non-2xx statuses come back as data so the decoding layer owns status
/// interpretation.
fn build_agent(timeout: Option<Duration>) -> Agent {
    Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(timeout)
        .build()
        .new_agent()
}

fn with_request_parts<Any>(
    mut call: ureq::RequestBuilder<Any>,
    request: &Request,
    auth: Option<&String>,
) -> ureq::RequestBuilder<Any> {
    for (key, value) in &request.query {
        call = call.query(*key, value);
    }
    if let Some(header) = auth {
        call = call.header("Authorization", header.as_str());
    }
    call
}

/// Site metadata served at the API root.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub home: String,
    #[serde(default)]
    pub gmt_offset: f64,
    #[serde(default)]
    pub timezone_string: String,
    #[serde(default)]
    pub page_for_posts: u64,
    #[serde(default)]
    pub page_on_front: u64,
    #[serde(default)]
    pub show_on_front: String,
    #[serde(default)]
    pub namespaces: Vec<String>,
    /// Available authentication schemes; shape varies between server
    /// versions, so it stays untyped.
    #[serde(default)]
    pub authentication: serde_json::Value,
    #[serde(default)]
    pub site_logo: u64,
    #[serde(default)]
    pub site_icon: u64,
    #[serde(default)]
    pub site_icon_url: String,
}
