//! Pinboard core domain logic.
//!
//! Shared by the todo API (`pinboard-api`, `pinboard-db`) and the thumbnail
//! function (`pinboard-thumbnailer`). Nothing in this crate performs I/O.

pub mod error;
pub mod imaging;
pub mod thumbnail;
pub mod todo;
pub mod types;
