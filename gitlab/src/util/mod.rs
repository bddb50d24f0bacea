pub(crate) mod pagination;
mod parser;
pub(crate) mod query;
pub(crate) mod request;

pub use pagination::{decorate, FetchFn, LinkRelation, Links, PageFetcher, Paginated, Rel};
pub use query::{merge_query, Query};
