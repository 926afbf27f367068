//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text lengths, URLs and counters are checked once at the
//! boundary and can be trusted everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

/// Maximum length of category names and page titles.
pub const TITLE_MAX_LENGTH: usize = 128;
/// Maximum length of a page URL.
pub const URL_MAX_LENGTH: usize = 200;
/// Maximum length of a note name.
pub const NOTE_NAME_MAX_LENGTH: usize = 100;
/// Maximum length of a username.
pub const USERNAME_MAX_LENGTH: usize = 150;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A counter required to be positive was zero.
    #[error("{0} must be greater than zero")]
    NonPositiveNumber(&'static str),
    /// A counter required to be non-negative was negative.
    #[error("{0} must be zero or greater")]
    NegativeNumber(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded its maximum length in characters.
    #[error("{0} must be at most {1} characters long")]
    TooLong(&'static str, usize),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

fn require_max_length(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, TypeConstraintError> {
    if value.chars().count() > max {
        Err(TypeConstraintError::TooLong(field, max))
    } else {
        Ok(value)
    }
}

/// Implements the read-only accessors shared by every string wrapper.
macro_rules! string_accessors {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Trimmed, non-empty text with an upper bound on its length.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Trims the value and checks it is non-empty and short enough.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                require_max_length(trimmed, $field, $max).map(Self)
            }
        }

        string_accessors!($name);
    };
}

/// Non-negative counters such as view and like tallies.
macro_rules! counter_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone,
            Copy,
            Debug,
            Default,
            Serialize,
            Deserialize,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a counter, rejecting negative values.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value >= 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NegativeNumber($field))
                }
            }

            /// A counter that has not been bumped yet.
            pub const fn zero() -> Self {
                Self(0)
            }

            /// Returns the raw value.
            pub const fn get(self) -> i32 {
                self.0
            }

            /// The counter after one more event.
            pub const fn incremented(self) -> Self {
                Self(self.0.saturating_add(1))
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

id_newtype!(CategoryId, "Unique identifier of a category.", "category_id");
id_newtype!(PageId, "Unique identifier of a page.", "page_id");
id_newtype!(NoteId, "Unique identifier of a note.", "note_id");
id_newtype!(UserId, "Unique identifier of a registered user.", "user_id");

bounded_string_newtype!(
    CategoryName,
    "Human readable, unique category name.",
    "category name",
    TITLE_MAX_LENGTH
);
bounded_string_newtype!(PageTitle, "Title of a page.", "page title", TITLE_MAX_LENGTH);
bounded_string_newtype!(NoteName, "Short name of a note.", "note name", NOTE_NAME_MAX_LENGTH);

counter_newtype!(ViewCount, "How many times an entity was viewed.", "views");
counter_newtype!(LikeCount, "How many times a category was liked.", "likes");

/// Absolute URL of a page.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PageUrl(String);

impl PageUrl {
    /// Constructs a trimmed URL and validates its format and length.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "page url")?;
        let trimmed = require_max_length(trimmed, "page url", URL_MAX_LENGTH)?;
        if !trimmed.as_str().validate_url() {
            return Err(TypeConstraintError::InvalidUrl("page url"));
        }
        Ok(Self(trimmed))
    }
}

string_accessors!(PageUrl);

/// URL-safe identifier derived from a category name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Accepts an already slugified value, e.g. a URL path segment.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.is_empty() {
            return Err(TypeConstraintError::EmptyString("slug"));
        }
        if slugify(&value) != value {
            return Err(TypeConstraintError::InvalidValue(format!(
                "'{value}' is not a valid slug"
            )));
        }
        Ok(Self(value))
    }

    /// Derives the slug of a category name.
    pub fn from_name(name: &CategoryName) -> Result<Self, TypeConstraintError> {
        let slug = slugify(name.as_str());
        if slug.is_empty() {
            return Err(TypeConstraintError::InvalidValue(format!(
                "category name '{name}' must contain at least one letter or digit"
            )));
        }
        Ok(Self(slug))
    }
}

string_accessors!(CategorySlug);

/// Lower-cases the input, keeps ASCII letters, digits and underscores, turns
/// runs of whitespace and hyphens into a single `-` and trims `-`/`_` at both
/// ends. Everything else is dropped.
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_separator = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' {
            pending_separator = true;
        }
    }

    slug.trim_matches(|c| c == '-' || c == '_').to_string()
}

/// Login name of a registered user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Letters, digits and `@ . + - _` only.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "username")?;
        let trimmed = require_max_length(trimmed, "username", USERNAME_MAX_LENGTH)?;
        let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
        if !trimmed.chars().all(allowed) {
            return Err(TypeConstraintError::InvalidValue(
                "username may contain only letters, digits and @/./+/-/_".to_string(),
            ));
        }
        Ok(Self(trimmed))
    }
}

string_accessors!(Username);

/// Contact address of a registered user.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trims, lower-cases and validates an email address.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?.to_lowercase();
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }
}

string_accessors!(Email);
