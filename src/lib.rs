//! This crate turns a `.bib` file into a publication list for personal
//! or lab websites.
//!
//! One entry in such a file can look like this:
//!
//! ```tex
//! @phdthesis{doe2021,
//!     author = {Doe, Jane},
//!     title  = {A {Robust} Method for Things},
//!     school = {University of Somewhere},
//!     year   = {2021},
//!     month  = {7},
//!     doi    = {10.1000/xyz123}
//! }
//! ```
//!
//! We call `phdthesis` the `kind` of the entry and `doe2021` its `ID`.
//! Then we have a sequence of fields with `name` (like `year`) and `data` (like `2021`).
//!
//! The processing happens in a few steps:
//!
//! 1. [`Parser`] splits the source into records and fields. Brace groups nested
//!    inside field data are kept, commas inside them do not end a field.
//! 2. [`normalize`] rewrites accent escapes as HTML entities, reorders author
//!    names (“Doe, Jane” becomes “Jane Doe”) and turns `3--14` into `3-14`.
//! 3. [`render`] builds the citation of one entry. Optional parts appear
//!    only if their field exists, always in the same order.
//! 4. [`listing`] groups the citations by year, newest first, and
//!    [`template`] fills them into an HTML template. Alternatively,
//!    [`markdown`] writes one front matter document per entry.
//!
//! ```rust
//! use bibtex2html::{listing::Publications, Parser};
//!
//! let p = Parser::from_string(r#"@book{tolkien1937, author = {Tolkien, J. R. R.}, title = {The Hobbit}, year = 1937}"#);
//! let publications = Publications::from_bibliography(&p.bibliography());
//! for publication in publications.iter() {
//!     assert_eq!(publication.citation.to_text(), "J. R. R. Tolkien, The Hobbit (1937).");
//! }
//! ```
//!
//! Entries without author or title, or without an integer year, are skipped
//! silently. Only missing files and an empty year range are errors.

pub mod convert;
mod errors;
mod lexer;
pub mod listing;
pub mod markdown;
pub mod normalize;
mod parser;
pub mod render;
pub mod template;
mod types;

pub use crate::errors::{Error, Result};
pub use crate::parser::{BibEntries, Parser};
pub use crate::types::{BibEntry, Bibliography};
