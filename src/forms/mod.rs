//! Submitted form data and its conversion into validated payloads.

pub mod auth;
pub mod categories;
pub mod pages;
