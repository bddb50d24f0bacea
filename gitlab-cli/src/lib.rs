use clap::{Args, Parser, Subcommand};
use failure::Error;
use gitlab::endpoint::releases::{self, CreateRelease, UpdateRelease};
use gitlab::endpoint::repository::{commits, tags};
use gitlab::endpoint::{issues, merge_requests, projects};
use gitlab::{Client, Config, Paginated, ProjectId, Query};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Command line access to the GitLab REST API
#[derive(Debug, Parser)]
#[command(name = "gitlab-cli", version)]
pub struct Cli {
    /// Base API url, e.g. https://gitlab.com/api/v4
    #[arg(long, env = gitlab::GITLAB_API_ENDPOINT)]
    pub endpoint: String,

    /// Personal access token, sent as the Private-Token header
    #[arg(long, env = gitlab::GITLAB_PERSONAL_TOKEN, hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn config(&self) -> gitlab::Result<Config> {
        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => Config::new_authenticated(&self.endpoint, token),
            None => Config::new(&self.endpoint),
        }
    }
}

/// Options shared by every list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Query filter, may be repeated: -f state=opened -f labels=bug
    #[arg(short, long = "filter", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub filters: Vec<(String, String)>,

    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub per_page: Option<u32>,

    /// Follow the next links and print every page
    #[arg(long)]
    pub all: bool,
}

impl ListArgs {
    pub fn query(&self) -> Query {
        let mut query: Query = self.filters.iter().cloned().collect();
        if let Some(page) = self.page {
            query.insert("page", page);
        }
        if let Some(per_page) = self.per_page {
            query.insert("per_page", per_page);
        }
        query
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a project
    Project { project: String },
    /// List projects
    Projects {
        #[command(flatten)]
        list: ListArgs,
    },
    /// List merge requests of a project
    MergeRequests {
        project: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a merge request
    MergeRequest { project: String, iid: u64 },
    /// List issues of a project
    Issues {
        project: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show an issue
    Issue { project: String, iid: u64 },
    /// List repository tags
    Tags {
        project: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a repository tag
    Tag { project: String, name: String },
    /// List repository commits
    Commits {
        project: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a commit
    Commit { project: String, sha: String },
    /// List the branches and tags containing a commit
    Refs {
        project: String,
        sha: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// List releases
    Releases {
        project: String,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Show a release
    Release { project: String, tag_name: String },
    /// Create a release for a tag
    CreateRelease {
        project: String,
        #[arg(long)]
        tag_name: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Branch or sha to create the tag from when it does not exist
        #[arg(long = "ref")]
        git_ref: Option<String>,
        #[arg(long)]
        released_at: Option<String>,
    },
    /// Update the name or notes of a release
    UpdateRelease {
        project: String,
        tag_name: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        released_at: Option<String>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("invalid KEY=VALUE: no `=` found in `{}`", s)),
    }
}

/// Runs the parsed command and returns what should be printed.
pub fn run(cli: &Cli, client: &Client) -> Result<Value, Error> {
    let value = match &cli.command {
        Command::Project { project } => to_json(projects::get(client, &id(project))?)?,
        Command::Projects { list } => {
            list_json(projects::search(client, &(), Some(&list.query())), list.all)?
        }
        Command::MergeRequests { project, list } => list_json(
            merge_requests::search(client, &id(project), Some(&list.query())),
            list.all,
        )?,
        Command::MergeRequest { project, iid } => {
            to_json(merge_requests::get(client, &id(project), *iid)?)?
        }
        Command::Issues { project, list } => list_json(
            issues::search(client, &id(project), Some(&list.query())),
            list.all,
        )?,
        Command::Issue { project, iid } => to_json(issues::get(client, &id(project), *iid)?)?,
        Command::Tags { project, list } => list_json(
            tags::search(client, &id(project), Some(&list.query())),
            list.all,
        )?,
        Command::Tag { project, name } => to_json(tags::get(client, &id(project), name)?)?,
        Command::Commits { project, list } => list_json(
            commits::search(client, &id(project), Some(&list.query())),
            list.all,
        )?,
        Command::Commit { project, sha } => to_json(commits::get(client, &id(project), sha)?)?,
        Command::Refs { project, sha, list } => list_json(
            commits::refs(client, &(id(project), sha.clone()), Some(&list.query())),
            list.all,
        )?,
        Command::Releases { project, list } => list_json(
            releases::search(client, &id(project), Some(&list.query())),
            list.all,
        )?,
        Command::Release { project, tag_name } => {
            to_json(releases::get(client, &id(project), tag_name)?)?
        }
        Command::CreateRelease {
            project,
            tag_name,
            name,
            description,
            git_ref,
            released_at,
        } => {
            let body = CreateRelease {
                tag_name: tag_name.clone(),
                name: name.clone(),
                description: description.clone(),
                git_ref: git_ref.clone(),
                released_at: released_at.clone(),
                ..CreateRelease::default()
            };
            let release = releases::create(client, &id(project), &body)?;
            info!(
                project = project.as_str(),
                tag_name = release.tag_name.as_str(),
                "created release"
            );
            to_json(release)?
        }
        Command::UpdateRelease {
            project,
            tag_name,
            name,
            description,
            released_at,
        } => {
            let body = UpdateRelease {
                name: name.clone(),
                description: description.clone(),
                released_at: released_at.clone(),
                ..UpdateRelease::default()
            };
            let release = releases::update(client, &id(project), tag_name, &body)?;
            info!(project = project.as_str(), tag_name = tag_name.as_str(), "updated release");
            to_json(release)?
        }
    };

    Ok(value)
}

fn id(project: &str) -> ProjectId {
    ProjectId::from(project)
}

fn to_json<T: Serialize>(value: T) -> Result<Value, Error> {
    Ok(serde_json::to_value(value)?)
}

fn list_json<A: Clone, T: Serialize>(
    page: gitlab::Result<Paginated<A, T>>,
    all: bool,
) -> Result<Value, Error> {
    let page = page?;
    let items = if all {
        page.collect_all()?
    } else {
        page.into_items()
    };
    to_json(items)
}
