use crate::util::parser;
use crate::util::query::{merge_query, Query};
use crate::{Client, Result};
use reqwest::Url;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Name of a pagination relation in a Link header.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rel {
    Prev,
    Next,
    First,
    Last,
    Other(String),
}

impl Rel {
    pub fn as_str(&self) -> &str {
        match self {
            Rel::Prev => "prev",
            Rel::Next => "next",
            Rel::First => "first",
            Rel::Last => "last",
            Rel::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for Rel {
    fn from(s: &str) -> Self {
        let s = s.to_ascii_lowercase();
        match s.as_str() {
            "prev" => Rel::Prev,
            "next" => Rel::Next,
            "first" => Rel::First,
            "last" => Rel::Last,
            _ => Rel::Other(s),
        }
    }
}

impl From<String> for Rel {
    fn from(s: String) -> Self {
        Rel::from(s.as_str())
    }
}

impl FromStr for Rel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Rel::from(s))
    }
}

impl fmt::Display for Rel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed entry of a Link header.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRelation {
    pub rel: Rel,
    pub url: Url,
    pub page: u32,
    pub per_page: u32,
    /// Link parameters other than `rel`, e.g. `title`.
    pub params: BTreeMap<String, String>,
}

/// Signature shared by every paginated endpoint: client, fixed path
/// arguments, query filters.
pub type FetchFn<A, T> = fn(&Client, &A, Option<&Query>) -> Result<Paginated<A, T>>;

/// Relation name to fetcher, as attached to every [`Paginated`] result.
pub type Links<A, T> = BTreeMap<Rel, PageFetcher<A, T>>;

/// A deferred call of a paginated endpoint at another page.
///
/// Holds the endpoint function, the fixed arguments of the original call and
/// the original query with `page` / `per_page` replaced. Every call to
/// [`PageFetcher::fetch`] is a new request; nothing is cached.
pub struct PageFetcher<A, T> {
    client: Client,
    fetch: FetchFn<A, T>,
    args: A,
    query: Query,
    page: u32,
    per_page: u32,
}

impl<A, T> PageFetcher<A, T> {
    pub fn new(
        client: &Client,
        fetch: FetchFn<A, T>,
        args: A,
        query: Query,
        page: u32,
        per_page: u32,
    ) -> Self {
        PageFetcher {
            client: client.clone(),
            fetch,
            args,
            query,
            page,
            per_page,
        }
    }

    pub fn fetch(&self) -> Result<Paginated<A, T>> {
        (self.fetch)(&self.client, &self.args, Some(&self.query))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// The query the next request will be sent with.
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn args(&self) -> &A {
        &self.args
    }
}

impl<A: Clone, T> Clone for PageFetcher<A, T> {
    fn clone(&self) -> Self {
        PageFetcher {
            client: self.client.clone(),
            fetch: self.fetch,
            args: self.args.clone(),
            query: self.query.clone(),
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl<A: fmt::Debug, T> fmt::Debug for PageFetcher<A, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("PageFetcher")
            .field("args", &self.args)
            .field("query", &self.query)
            .finish()
    }
}

/// A page of results plus fetchers for the neighbouring pages.
#[derive(Debug)]
pub struct Paginated<A, T> {
    pub items: Vec<T>,
    pub links: Links<A, T>,
}

impl<A, T> Paginated<A, T> {
    /// A page without any pagination links.
    pub fn new(items: Vec<T>) -> Self {
        Paginated {
            items,
            links: Links::new(),
        }
    }

    pub fn link(&self, rel: &Rel) -> Option<&PageFetcher<A, T>> {
        self.links.get(rel)
    }

    pub fn next(&self) -> Option<&PageFetcher<A, T>> {
        self.link(&Rel::Next)
    }

    pub fn prev(&self) -> Option<&PageFetcher<A, T>> {
        self.link(&Rel::Prev)
    }

    pub fn first(&self) -> Option<&PageFetcher<A, T>> {
        self.link(&Rel::First)
    }

    pub fn last(&self) -> Option<&PageFetcher<A, T>> {
        self.link(&Rel::Last)
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Follows `next` links until there are none left and returns every item.
    ///
    /// Stops early if the server points `next` at a page already fetched.
    pub fn collect_all(self) -> Result<Vec<T>> {
        let Paginated {
            items: mut out,
            mut links,
        } = self;
        let mut seen = BTreeSet::new();

        while let Some(next) = links.remove(&Rel::Next) {
            if !seen.insert(next.page) {
                break;
            }
            let page = next.fetch()?;
            out.extend(page.items);
            links = page.links;
        }

        Ok(out)
    }
}

/// Turns a raw Link header into fetchers that re-run `fetch` with `args` and
/// `query`, moved to the page each relation points at.
///
/// An absent or empty header yields no links. Unparseable entries are skipped.
pub fn decorate<A: Clone, T>(
    link: Option<&str>,
    client: &Client,
    fetch: FetchFn<A, T>,
    args: &A,
    query: Option<&Query>,
) -> Links<A, T> {
    let mut links = Links::new();
    let raw = match link {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return links,
    };

    let original = query.cloned().unwrap_or_default();
    for relation in parser::link_headers(raw) {
        let query = merge_query(&original, relation.page, relation.per_page);
        links.insert(
            relation.rel,
            PageFetcher::new(
                client,
                fetch,
                args.clone(),
                query,
                relation.page,
                relation.per_page,
            ),
        );
    }

    links
}
