//! Domain entities and value objects.

pub mod auth;
pub mod category;
pub mod note;
pub mod page;
pub mod types;
pub mod user;
pub mod visit;
