use crate::endpoint::ProjectId;
use crate::util::request;
use crate::{Client, Paginated, Query, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub short_id: String,
    pub title: String,
    #[serde(default)]
    pub message: Option<String>,
    pub author_name: String,
    pub author_email: String,
    #[serde(default)]
    pub authored_date: Option<String>,
    #[serde(default)]
    pub committer_name: Option<String>,
    #[serde(default)]
    pub committed_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub parent_ids: Vec<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}

/// A branch or tag that contains a commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    /// `branch` or `tag`
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

/// GET /projects/:id/repository/commits
pub fn search(
    client: &Client,
    project: &ProjectId,
    query: Option<&Query>,
) -> Result<Paginated<ProjectId, Commit>> {
    request::get_page(
        client,
        &["projects", project.as_str(), "repository", "commits"],
        project,
        query,
        search,
    )
}

/// GET /projects/:id/repository/commits/:sha
pub fn get(client: &Client, project: &ProjectId, sha: &str) -> Result<Commit> {
    request::get(
        client,
        &["projects", project.as_str(), "repository", "commits", sha],
        None,
    )
}

/// GET /projects/:id/repository/commits/:sha/refs
///
/// `args` is the project and the commit sha. A `type` of `branch`, `tag` or
/// `all` can be passed in `query`.
pub fn refs(
    client: &Client,
    args: &(ProjectId, String),
    query: Option<&Query>,
) -> Result<Paginated<(ProjectId, String), CommitRef>> {
    let (project, sha) = args;
    request::get_page(
        client,
        &["projects", project.as_str(), "repository", "commits", sha.as_str(), "refs"],
        args,
        query,
        refs,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::{self, FakeTransport};
    use pretty_assertions::assert_eq;

    const COMMIT: &str = r#"{
        "id": "6104942438c14ec7bd21c6cd5bd995272b3faff6",
        "short_id": "6104942438c",
        "title": "Sanitize for network graph",
        "message": "Sanitize for network graph",
        "author_name": "randx",
        "author_email": "user@example.com",
        "authored_date": "2021-09-20T09:06:12.300+03:00",
        "committer_name": "Venkatesh Thalluri",
        "committed_date": "2021-09-20T09:06:12.300+03:00",
        "created_at": "2021-09-20T09:06:12.300+03:00",
        "parent_ids": ["ae1d9fb46aa2b07ee9836d49862ec4e2c46fbbba"],
        "web_url": "https://gitlab.example.com/janedoe/gitlab-foss/-/commit/6104942438c14ec7bd21c6cd5bd995272b3faff6"
    }"#;

    #[test]
    fn test_get_commit() {
        let fake = FakeTransport::new(vec![testing::json_response(200, COMMIT, None)]);
        let client = testing::client(fake.clone());

        let commit = get(&client, &ProjectId::from(5), "master").unwrap();
        assert_eq!(commit.short_id, "6104942438c");
        assert_eq!(commit.parent_ids.len(), 1);
        assert_eq!(
            fake.urls(),
            vec!["https://gitlab.example.com/api/v4/projects/5/repository/commits/master"]
        );
    }

    #[test]
    fn test_search_commits() {
        let body = format!("[{}]", COMMIT);
        let fake = FakeTransport::new(vec![testing::json_response(200, &body, None)]);
        let client = testing::client(fake.clone());

        let query = Query::new().with("ref_name", "main").with("since", "2021-09-01T00:00:00Z");
        let page = search(&client, &ProjectId::from(5), Some(&query)).unwrap();
        assert_eq!(page.items[0].author_name, "randx");
        assert_eq!(
            fake.urls(),
            vec!["https://gitlab.example.com/api/v4/projects/5/repository/commits?ref_name=main&since=2021-09-01T00%3A00%3A00Z"]
        );
    }

    #[test]
    fn test_commit_refs_keep_both_fixed_args() {
        let link = "<https://gitlab.example.com/api/v4/projects/5/repository/commits/abc/refs?page=2&per_page=2&type=all>; rel=\"next\"";
        let fake = FakeTransport::new(vec![
            testing::json_response(
                200,
                r#"[{"type": "branch", "name": "main"}, {"type": "tag", "name": "v1.1.0"}]"#,
                Some(link),
            ),
            testing::json_response(200, r#"[{"type": "branch", "name": "test"}]"#, None),
        ]);
        let client = testing::client(fake.clone());

        let args = (ProjectId::from(5), "abc".to_string());
        let query = Query::new().with("type", "all");
        let page = refs(&client, &args, Some(&query)).unwrap();
        assert_eq!(
            page.items,
            vec![
                CommitRef { kind: "branch".to_string(), name: "main".to_string() },
                CommitRef { kind: "tag".to_string(), name: "v1.1.0".to_string() },
            ]
        );

        let next = page.next().unwrap();
        assert_eq!(next.args(), &args);

        let all = page.collect_all().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(
            fake.urls(),
            vec![
                "https://gitlab.example.com/api/v4/projects/5/repository/commits/abc/refs?type=all",
                "https://gitlab.example.com/api/v4/projects/5/repository/commits/abc/refs?page=2&per_page=2&type=all",
            ]
        );
    }
}
