//! HTTP collaborator
//!
//! HTTP steps delegate to the [`HttpClient`] trait so tests can stub the
//! transport. The live implementation wraps a blocking reqwest client and
//! parses each response body as HTML, extracting the document title and the
//! full text content.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::{json, Value};
use tracing::debug;

use crate::common::Result;

// Compiled once; parsing a static selector cannot fail.
static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("static selector"));

/// What an HTTP step observes about a response: the status code plus the
/// parsed document's title and text content.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse {
    pub status_code: u16,
    /// Text of the `<title>` element, if the document has one
    pub title: Option<String>,
    /// Full extracted text content of the document
    pub content: String,
}

impl PageResponse {
    /// Parse an HTML body into the recorded response shape.
    pub fn from_html(status_code: u16, body: &str) -> Self {
        let document = Html::parse_document(body);
        let title = document
            .select(&TITLE_SELECTOR)
            .next()
            .map(|el| el.text().collect::<String>());
        let content = document.root_element().text().collect::<String>();
        Self {
            status_code,
            title,
            content,
        }
    }

    /// The value recorded into the run state under the step's
    /// `response_name`. A missing title becomes `null`, not a failure.
    pub fn to_value(&self) -> Value {
        json!({
            "status_code": self.status_code,
            "html": {
                "title": self.title,
                "content": self.content,
            },
        })
    }
}

/// Blocking HTTP transport used by the URL steps.
pub trait HttpClient {
    fn get(&self, url: &str) -> Result<PageResponse>;
    fn post(&self, url: &str, body: &Value) -> Result<PageResponse>;
    fn patch(&self, url: &str, body: &Value) -> Result<PageResponse>;
}

/// Live [`HttpClient`] backed by a blocking reqwest client.
#[derive(Debug)]
pub struct WebClient {
    client: reqwest::blocking::Client,
}

impl WebClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch(&self, request: reqwest::blocking::RequestBuilder) -> Result<PageResponse> {
        let response = request.send()?;
        let status_code = response.status().as_u16();
        let body = response.text()?;
        debug!(status_code, bytes = body.len(), "received response");
        Ok(PageResponse::from_html(status_code, &body))
    }

    /// String bodies are sent verbatim; anything else goes out as JSON.
    fn with_body(
        builder: reqwest::blocking::RequestBuilder,
        body: &Value,
    ) -> reqwest::blocking::RequestBuilder {
        match body {
            Value::String(text) => builder.body(text.clone()),
            other => builder.json(other),
        }
    }
}

impl Default for WebClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for WebClient {
    fn get(&self, url: &str) -> Result<PageResponse> {
        debug!(%url, "GET");
        self.fetch(self.client.get(url))
    }

    fn post(&self, url: &str, body: &Value) -> Result<PageResponse> {
        debug!(%url, "POST");
        self.fetch(Self::with_body(self.client.post(url), body))
    }

    fn patch(&self, url: &str, body: &Value) -> Result<PageResponse> {
        debug!(%url, "PATCH");
        self.fetch(Self::with_body(self.client.patch(url), body))
    }
}
