//! wordhtml CLI - Command-line interface library
//!
//! This library provides the CLI functionality for wordhtml:
//! - Convert: DOCX to an HTML fragment
//! - Tree: dump the document tree as JSON
//! - Text: extract the raw text of a document
//!
//! # Library Usage
//!
//! ```ignore
//! use wordhtml_cli::{convert_command, ConvertArgs};
//!
//! convert_command(&args)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Convert a document, writing warnings to stderr
//! wordhtml convert report.docx --output report.html
//!
//! # Use a custom style map
//! wordhtml convert report.docx --config wordhtml.toml
//!
//! # Inspect what the reader saw
//! wordhtml tree report.docx
//! ```

pub mod app;

// Re-export main entry point and commands
pub use app::{convert_command, text_command, tree_command};
pub use app::{run_cli, ConvertArgs};
