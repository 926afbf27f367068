//! View structs handed to the templates.

pub mod categories;
pub mod pages;
