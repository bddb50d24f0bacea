use crate::endpoint::ProjectId;
use crate::util::request;
use crate::{Client, Paginated, Query, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    pub web_url: String,
    #[serde(default)]
    pub http_url_to_repo: Option<String>,
    #[serde(default)]
    pub ssh_url_to_repo: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_activity_at: Option<String>,
}

/// GET /projects/:id
pub fn get(client: &Client, project: &ProjectId) -> Result<Project> {
    request::get(client, &["projects", project.as_str()], None)
}

/// GET /projects
pub fn search(client: &Client, args: &(), query: Option<&Query>) -> Result<Paginated<(), Project>> {
    request::get_page(client, &["projects"], args, query, search)
}
