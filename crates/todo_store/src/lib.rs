//! Todo and user storage for the todo backend.
//!
//! This crate provides the data-access boundary between the server and the
//! relational store. It exposes the [`TodoStore`] trait together with an
//! in-memory implementation (tests, local development) and a SQLite
//! implementation backed by `sqlx`.

mod error;
mod memory;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
