//! GitLab
//!
//! A thin blocking client for a subset of the GitLab REST API: projects,
//! merge requests, issues, tags, commits and releases. List endpoints return
//! a [`Paginated`] page whose links re-run the same query at another page.
//!
//! ## Usage
//! ```no_run
//! use gitlab::endpoint::merge_requests;
//! use gitlab::{Client, Config, ProjectId, Query};
//!
//! fn main() -> gitlab::Result<()> {
//!     let cfg = Config::new_authenticated("https://gitlab.com/api/v4", "secret_access_token")?;
//!     let client = Client::new(cfg)?;
//!
//!     let query = Query::new().with("state", "opened");
//!     let page = merge_requests::search(&client, &ProjectId::from(42), Some(&query))?;
//!     if let Some(next) = page.next() {
//!         let _second = next.fetch()?;
//!     }
//!     Ok(())
//! }
//! ```

mod client;
mod config;
pub mod endpoint;
mod error;
pub mod transport;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use client::Client;
pub use config::{Config, GITLAB_API_ENDPOINT, GITLAB_PERSONAL_TOKEN};
pub use endpoint::ProjectId;
pub use error::{Error, ErrorKind, Result};
pub use util::{
    decorate, merge_query, FetchFn, LinkRelation, Links, PageFetcher, Paginated, Query, Rel,
};
