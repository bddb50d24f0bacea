use serde::{Deserialize, Serialize};
use std::fmt;

pub mod issues;
pub mod merge_requests;
pub mod projects;
pub mod releases;
pub mod repository;

/// Identifies a project either by numeric id or by its namespaced path
/// (`group/subgroup/project`). Paths are encoded when put in a url.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        ProjectId(s.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        ProjectId(s)
    }
}

macro_rules! project_id_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for ProjectId {
            fn from(id: $t) -> Self {
                ProjectId(id.to_string())
            }
        })*
    };
}

project_id_from_int!(i32, i64, u32, u64, usize);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<String>,
}
