use crate::endpoint::repository::commits::Commit;
use crate::endpoint::ProjectId;
use crate::util::request;
use crate::{Client, Paginated, Query, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub message: Option<String>,
    pub target: String,
    pub commit: Commit,
    #[serde(default)]
    pub release: Option<TagRelease>,
    #[serde(default)]
    pub protected: bool,
}

/// Release notes attached to a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRelease {
    pub tag_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// GET /projects/:id/repository/tags
pub fn search(
    client: &Client,
    project: &ProjectId,
    query: Option<&Query>,
) -> Result<Paginated<ProjectId, Tag>> {
    request::get_page(
        client,
        &["projects", project.as_str(), "repository", "tags"],
        project,
        query,
        search,
    )
}

/// GET /projects/:id/repository/tags/:tag_name
pub fn get(client: &Client, project: &ProjectId, tag_name: &str) -> Result<Tag> {
    request::get(
        client,
        &["projects", project.as_str(), "repository", "tags", tag_name],
        None,
    )
}
