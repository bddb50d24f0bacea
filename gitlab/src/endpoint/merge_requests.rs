use crate::endpoint::{ProjectId, User};
use crate::util::request;
use crate::{Client, Paginated, Query, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: String,
    pub source_branch: String,
    pub target_branch: String,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    #[serde(default)]
    pub draft: bool,
    pub web_url: String,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub merged_at: Option<String>,
}

/// GET /projects/:id/merge_requests
///
/// Filters such as `state`, `target_branch` or `labels` go in `query`.
pub fn search(
    client: &Client,
    project: &ProjectId,
    query: Option<&Query>,
) -> Result<Paginated<ProjectId, MergeRequest>> {
    request::get_page(
        client,
        &["projects", project.as_str(), "merge_requests"],
        project,
        query,
        search,
    )
}

/// GET /projects/:id/merge_requests/:merge_request_iid
pub fn get(client: &Client, project: &ProjectId, iid: u64) -> Result<MergeRequest> {
    request::get(
        client,
        &["projects", project.as_str(), "merge_requests", iid.to_string().as_str()],
        None,
    )
}
