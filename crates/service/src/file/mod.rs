//! Typed stores for the two collections served by the API.

pub mod blogs;
pub mod users;
