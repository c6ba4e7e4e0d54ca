//! # outsite-render
//!
//! HTML page templating for outsite.
//!
//! This crate wraps rendered page bodies in a full HTML document using Askama.

pub mod templates;

pub use templates::{wrap, PageTemplate};
