pub mod commits;
pub mod tags;
