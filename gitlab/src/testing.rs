//! Test doubles for the HTTP layer.

use crate::error::{ErrorKind, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use crate::{Client, Config};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, LINK};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(crate) const BASE_URL: &str = "https://gitlab.example.com/api/v4";

/// Replays canned responses in order and records every request.
pub(crate) struct FakeTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    pub(crate) fn new(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(FakeTransport {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(vec![]),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url.to_string()).collect()
    }
}

impl Transport for FakeTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ErrorKind::Http("connection refused".to_string()).into())
    }
}

pub(crate) fn json_response(status: u16, body: &str, link: Option<&str>) -> HttpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Some(link) = link {
        headers.insert(LINK, HeaderValue::from_str(link).unwrap());
    }

    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers,
        body: body.as_bytes().to_vec(),
    }
}

pub(crate) fn client(transport: Arc<FakeTransport>) -> Client {
    let cfg = Config::new_authenticated(BASE_URL, "glpat-test").unwrap();
    Client::with_transport(cfg, transport)
}
