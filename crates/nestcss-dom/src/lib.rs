//! nestcss document injection
//!
//! Writes stylesheet text into a `<style>` element of a document.
//! The document is reached through the [`StyleDocument`] trait, so the same
//! injection logic drives the browser DOM and the in-memory [`MemoryDocument`].
//!
//! # Example
//!
//! ```
//! use nestcss_core::StyleNode;
//! use nestcss_dom::{inject_style, InjectOptions, Injection, MemoryDocument};
//!
//! let mut doc = MemoryDocument::new();
//! let style = StyleNode::new().nest("title", StyleNode::new().set("fontWeight", 700));
//! let outcome = inject_style(&mut doc, style, InjectOptions::new().with_id("theme")).unwrap();
//! assert_eq!(outcome, Injection::Created);
//! assert_eq!(doc.render_head(), "<style id=\"theme\">.title{font-weight:700;}</style>");
//! ```

pub mod inject;
pub mod memory;

pub use inject::{inject_style, InjectOptions, Injection, StyleContent, StyleDocument};
pub use memory::{ElementId, MemoryDocument};
