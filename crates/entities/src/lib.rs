//! Core entity definitions for the todo backend.
//!
//! This crate defines the persisted record types shared by the store and the
//! server: users and the todos that may be assigned to them.

mod todo;
mod user;

pub use todo::*;
pub use user::*;
