use crate::endpoint::{ProjectId, User};
use crate::util::request;
use crate::{Client, Paginated, Query, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub assignees: Vec<User>,
    pub web_url: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
}

/// GET /projects/:id/issues
pub fn search(
    client: &Client,
    project: &ProjectId,
    query: Option<&Query>,
) -> Result<Paginated<ProjectId, Issue>> {
    request::get_page(
        client,
        &["projects", project.as_str(), "issues"],
        project,
        query,
        search,
    )
}

/// GET /projects/:id/issues/:issue_iid
pub fn get(client: &Client, project: &ProjectId, iid: u64) -> Result<Issue> {
    request::get(
        client,
        &["projects", project.as_str(), "issues", iid.to_string().as_str()],
        None,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{self, FakeTransport};
    use pretty_assertions::assert_eq;

    const ISSUE: &str = r#"{
        "id": 76,
        "iid": 6,
        "project_id": 1,
        "title": "Consequatur vero maxime deserunt laboriosam est voluptas dolorem.",
        "description": null,
        "state": "opened",
        "labels": ["foo", "bar"],
        "assignees": [],
        "web_url": "https://gitlab.example.com/g/p/issues/6",
        "created_at": "2016-01-04T15:31:51.081Z"
    }"#;

    #[test]
    fn test_search_issues_prev_page() {
        let link = "<https://gitlab.example.com/api/v4/projects/1/issues?page=1&per_page=1>; rel=\"prev\"";
        let fake = FakeTransport::new(vec![
            testing::json_response(200, &format!("[{}]", ISSUE), Some(link)),
            testing::json_response(200, &format!("[{}]", ISSUE), None),
        ]);
        let client = testing::client(fake.clone());

        let query = Query::new().with("labels", "foo,bar").with("page", 2).with("per_page", 1);
        let page = search(&client, &ProjectId::from(1), Some(&query)).unwrap();
        assert_eq!(page.items[0].labels, vec!["foo", "bar"]);
        assert!(page.next().is_none());

        let prev = page.prev().unwrap();
        assert_eq!(prev.page(), 1);
        prev.fetch().unwrap();
        assert_eq!(
            fake.urls()[1],
            "https://gitlab.example.com/api/v4/projects/1/issues?labels=foo%2Cbar&page=1&per_page=1"
        );
    }

    #[test]
    fn test_get_issue() {
        let fake = FakeTransport::new(vec![testing::json_response(200, ISSUE, None)]);
        let client = testing::client(fake.clone());

        let issue = get(&client, &ProjectId::from(1), 6).unwrap();
        assert_eq!(issue.id, 76);
        assert_eq!(issue.author, None);
        assert_eq!(fake.urls(), vec!["https://gitlab.example.com/api/v4/projects/1/issues/6"]);
    }

    #[test]
    fn test_fetcher_errors_propagate() {
        let link = "<https://gitlab.example.com/api/v4/projects/1/issues?page=2&per_page=1>; rel=\"next\"";
        let fake = FakeTransport::new(vec![
            testing::json_response(200, &format!("[{}]", ISSUE), Some(link)),
            testing::json_response(500, "{\"message\":\"500 Internal Server Error\"}", None),
            testing::json_response(502, "Bad Gateway", None),
        ]);
        let client = testing::client(fake);

        let page = search(&client, &ProjectId::from(1), None).unwrap();
        let err = page.next().unwrap().fetch().unwrap_err();
        assert_eq!(err.status(), Some(500));

        let err = page.collect_all().unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::Status {
                status: 502,
                body: "Bad Gateway".to_string()
            }
        );
    }
}
