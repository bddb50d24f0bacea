use crate::error::{ErrorKind, Result};
use crate::transport::{HttpRequest, HttpResponse};
use crate::util::pagination::{decorate, FetchFn, Paginated};
use crate::util::query::Query;
use crate::{Client, Config};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LINK, USER_AGENT};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const PRIVATE_TOKEN: &str = "private-token";

/// Appends `segments` to the configured base url and sets the query string.
/// Each segment is percent-encoded, `group/project` becomes `group%2Fproject`.
pub(crate) fn build_url(cfg: &Config, segments: &[&str], query: Option<&Query>) -> Result<Url> {
    let mut url = cfg.base_url.clone();
    url.path_segments_mut()
        .map_err(|_| ErrorKind::Url(format!("{} cannot be a base url", cfg.base_url)))?
        .pop_if_empty()
        .extend(segments);

    match query {
        Some(q) if !q.is_empty() => url.set_query(Some(&q.to_query_string())),
        _ => url.set_query(None),
    }

    Ok(url)
}

/// Returns a request for a given method and url
/// and configures auth headers according to configuration.
pub(crate) fn get_request(
    cfg: &Config,
    method: Method,
    url: Url,
    body: Option<serde_json::Value>,
) -> Result<HttpRequest> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&cfg.user_agent)
            .map_err(|e| ErrorKind::Config(format!("invalid user agent: {}", e)))?,
    );

    if let Some(token) = &cfg.private_token {
        let mut value = HeaderValue::from_str(token)
            .map_err(|e| ErrorKind::Config(format!("invalid private token: {}", e)))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static(PRIVATE_TOKEN), value);
    }

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
    })
}

/// Sends `request`, turning non-2xx answers into [`ErrorKind::Status`].
pub(crate) fn execute(client: &Client, request: HttpRequest) -> Result<HttpResponse> {
    debug!(method = %request.method, url = %request.url, "sending request");
    let method = request.method.clone();
    let url = request.url.clone();

    let res = client.transport().send(request)?;
    if !res.status.is_success() {
        warn!(%method, %url, status = res.status.as_u16(), "request failed");
        return Err(ErrorKind::Status {
            status: res.status.as_u16(),
            body: String::from_utf8_lossy(&res.body).into_owned(),
        }
        .into());
    }

    Ok(res)
}

pub(crate) fn decode<T: DeserializeOwned>(res: &HttpResponse) -> Result<T> {
    serde_json::from_slice(&res.body).map_err(|e| ErrorKind::Json(e.to_string()).into())
}

/// GET a single resource.
pub(crate) fn get<T: DeserializeOwned>(
    client: &Client,
    segments: &[&str],
    query: Option<&Query>,
) -> Result<T> {
    let url = build_url(client.config(), segments, query)?;
    let res = execute(client, get_request(client.config(), Method::GET, url, None)?)?;
    decode(&res)
}

/// GET a list resource and decorate the result with the pagination links
/// of the response. `fetch` is the endpoint function being served, so that
/// the links can call it again.
pub(crate) fn get_page<A: Clone, T: DeserializeOwned>(
    client: &Client,
    segments: &[&str],
    args: &A,
    query: Option<&Query>,
    fetch: FetchFn<A, T>,
) -> Result<Paginated<A, T>> {
    let url = build_url(client.config(), segments, query)?;
    let res = execute(client, get_request(client.config(), Method::GET, url, None)?)?;
    let items = decode(&res)?;

    let link = res.headers.get(LINK).and_then(|v| v.to_str().ok());
    Ok(Paginated {
        items,
        links: decorate(link, client, fetch, args, query),
    })
}

/// POST / PUT a JSON body and decode the answer.
pub(crate) fn send_json<T: DeserializeOwned, B: Serialize>(
    client: &Client,
    method: Method,
    segments: &[&str],
    body: &B,
) -> Result<T> {
    let body = serde_json::to_value(body).map_err(|e| ErrorKind::Json(e.to_string()))?;
    let url = build_url(client.config(), segments, None)?;
    let res = execute(client, get_request(client.config(), method, url, Some(body))?)?;
    decode(&res)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{self, FakeTransport};
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    #[test]
    fn test_build_url() {
        let tests = vec![
            (
                "https://gitlab.example.com/api/v4",
                vec!["projects", "7"],
                None,
                "https://gitlab.example.com/api/v4/projects/7",
            ),
            (
                "https://gitlab.example.com/api/v4/",
                vec!["projects", "7"],
                None,
                "https://gitlab.example.com/api/v4/projects/7",
            ),
            (
                "https://gitlab.example.com/api/v4",
                vec!["projects", "group/sub/project", "repository", "tags", "release/1.0"],
                None,
                "https://gitlab.example.com/api/v4/projects/group%2Fsub%2Fproject/repository/tags/release%2F1.0",
            ),
            (
                "https://gitlab.example.com/api/v4",
                vec!["projects", "7", "issues"],
                Some(Query::new().with("state", "opened")),
                "https://gitlab.example.com/api/v4/projects/7/issues?state=opened",
            ),
            (
                "https://gitlab.example.com/api/v4",
                vec!["projects"],
                Some(Query::new()),
                "https://gitlab.example.com/api/v4/projects",
            ),
        ];

        for (base, segments, query, expect) in tests {
            let cfg = Config::new(base).unwrap();
            let url = build_url(&cfg, &segments, query.as_ref()).unwrap();
            assert_eq!(url.as_str(), expect);
        }
    }

    #[test]
    fn test_request_headers() {
        let cfg =
            Config::new_authenticated("https://gitlab.example.com/api/v4", "glpat-123").unwrap();
        let url = build_url(&cfg, &["projects"], None).unwrap();
        let req = get_request(&cfg, Method::GET, url.clone(), None).unwrap();
        assert_eq!(req.headers["Private-Token"], "glpat-123");
        assert!(req.headers["Private-Token"].is_sensitive());
        assert!(req.headers[USER_AGENT].to_str().unwrap().starts_with("gitlab-rs/"));

        let anonymous = Config::new("https://gitlab.example.com/api/v4").unwrap();
        let req = get_request(&anonymous, Method::GET, url, None).unwrap();
        assert!(req.headers.get("Private-Token").is_none());
    }

    #[test]
    fn test_non_success_status_is_an_error() {
        let fake = FakeTransport::new(vec![testing::json_response(
            404,
            "{\"message\":\"404 Project Not Found\"}",
            None,
        )]);
        let client = testing::client(fake);

        let err = get::<Value>(&client, &["projects", "404"], None).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::Status {
                status: 404,
                body: "{\"message\":\"404 Project Not Found\"}".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let fake = FakeTransport::new(vec![testing::json_response(200, "<html>", None)]);
        let client = testing::client(fake);

        let err = get::<Value>(&client, &["projects", "1"], None).unwrap_err();
        match err.kind() {
            ErrorKind::Json(_) => {}
            other => panic!("expected json error, got {:?}", other),
        }
    }

    #[test]
    fn test_transport_errors_propagate() {
        let client = testing::client(FakeTransport::new(vec![]));
        let err = get::<Value>(&client, &["projects", "1"], None).unwrap_err();
        match err.kind() {
            ErrorKind::Http(_) => {}
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[test]
    fn test_send_json() {
        let fake = FakeTransport::new(vec![testing::json_response(201, "{\"ok\":true}", None)]);
        let client = testing::client(fake.clone());

        let body = serde_json::json!({ "name": "v1" });
        let res: Value = send_json(&client, Method::POST, &["things"], &body).unwrap();
        assert_eq!(res["ok"], true);

        let req = fake.last_request();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body, Some(body));
    }
}
