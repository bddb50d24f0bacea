use crate::error::{ErrorKind, Result};
use serde_json::Value;

pub use reqwest::header::HeaderMap;
pub use reqwest::{Method, StatusCode, Url};

/// A fully built request, ready to go over the wire.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    /// JSON body for POST / PUT requests.
    pub body: Option<Value>,
}

/// Status, headers and raw body of a response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Performs a single HTTP round trip.
///
/// Implementations only report transport failures; status handling and body
/// decoding happen in the caller.
pub trait Transport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| ErrorKind::Http(e.to_string()))?;
        Ok(ReqwestTransport { client })
    }

    /// Wraps an already configured client, e.g. one with custom timeouts.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        ReqwestTransport { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let res = builder
            .send()
            .map_err(|e| ErrorKind::Http(e.to_string()))?;
        let status = res.status();
        let headers = res.headers().clone();
        let body = res
            .bytes()
            .map_err(|e| ErrorKind::Http(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
