use crate::endpoint::{ProjectId, User};
use crate::util::request;
use crate::{Client, Paginated, Query, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub author: Option<User>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub released_at: Option<String>,
    #[serde(default)]
    pub upcoming_release: bool,
    #[serde(default)]
    pub assets: Option<Assets>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assets {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub links: Vec<AssetLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetLink {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub link_type: Option<String>,
}

/// Body of POST /projects/:id/releases
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateRelease {
    pub tag_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Commit sha or branch to create the tag from, when the tag does not exist yet.
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub milestones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
}

/// Body of PUT /projects/:id/releases/:tag_name. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateRelease {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestones: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_at: Option<String>,
}

/// GET /projects/:id/releases
pub fn search(
    client: &Client,
    project: &ProjectId,
    query: Option<&Query>,
) -> Result<Paginated<ProjectId, Release>> {
    request::get_page(
        client,
        &["projects", project.as_str(), "releases"],
        project,
        query,
        search,
    )
}

/// GET /projects/:id/releases/:tag_name
pub fn get(client: &Client, project: &ProjectId, tag_name: &str) -> Result<Release> {
    request::get(client, &["projects", project.as_str(), "releases", tag_name], None)
}

/// POST /projects/:id/releases
pub fn create(client: &Client, project: &ProjectId, body: &CreateRelease) -> Result<Release> {
    debug!(%project, ?body, "create tag release");
    request::send_json(
        client,
        Method::POST,
        &["projects", project.as_str(), "releases"],
        body,
    )
}

/// PUT /projects/:id/releases/:tag_name
pub fn update(
    client: &Client,
    project: &ProjectId,
    tag_name: &str,
    body: &UpdateRelease,
) -> Result<Release> {
    debug!(%project, tag_name, ?body, "update tag release");
    request::send_json(
        client,
        Method::PUT,
        &["projects", project.as_str(), "releases", tag_name],
        body,
    )
}
