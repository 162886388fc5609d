//! Core library for prometrix
//!
//! This crate implements the **Functional Core** of the prometrix tooling,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`prometrix_core`** (this crate): Pure transformation functions with zero I/O
//! - **`prometrix`**: Input reading, output formatting and orchestration (the Imperative Shell)
//!
//! All functions in this crate are pure and deterministic: they take owned or
//! borrowed values and return new ones, with no file, network or clock access.
//! Anything time-dependent takes the instant as a parameter.
//!
//! # Module Organization
//!
//! - [`markdown`]: Markdown subset to HTML fragment and to plain text
//! - [`refine`]: Composition of refined prompt documents
//! - [`version`]: Labels and scores of refined prompt versions
//! - [`history`]: Mapping of prompt history responses for display
//!
//! # Example Usage
//!
//! ```rust
//! use prometrix_core::markdown::{plain_text, render_html};
//!
//! let doc = "## Title\n**Tone:** Strict";
//!
//! assert_eq!(render_html(doc), "<h2>Title</h2><br /><strong>Tone:</strong> Strict");
//! assert_eq!(plain_text(doc), "Title\nTone: Strict");
//! ```

mod error;

pub mod history;
pub mod markdown;
pub mod refine;
pub mod version;

pub use error::Error;
