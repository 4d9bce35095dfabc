//! nestcss core
//!
//! Converts a nested style tree into flat CSS text.
//! Keys are camel-case identifiers; nested maps become descendant class selectors.
//!
//! ```text
//! StyleNode → flatten() → Vec<FlatRule> → format() → String
//! ```
//!
//! # Example
//!
//! ```
//! use nestcss_core::{to_css, StyleNode};
//!
//! let style = StyleNode::new()
//!     .nest("card", StyleNode::new().set("backgroundColor", "white"));
//! assert_eq!(to_css(&style), ".card{background-color:white;}");
//! ```

pub mod flatten;
pub mod format;
pub mod name;
pub mod tree;

pub use flatten::{flatten, FlatRule};
pub use format::format;
pub use name::hyphenate;
pub use tree::{StyleEntry, StyleNode, StyleValue};

/// Errors raised while accepting style input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    /// The input has the wrong shape at the top level.
    #[error("Invalid input: expected {expected}, received {received}")]
    InvalidInput {
        expected: &'static str,
        received: String,
    },

    /// A nested value could not be read as a style value or style map.
    ///
    /// Counts as invalid input (see [`StyleError::is_invalid_input`]).
    #[error("Invalid input: {message}")]
    Malformed { message: String },

    /// The input text is not valid JSON.
    ///
    /// Counts as invalid input (see [`StyleError::is_invalid_input`]).
    #[error("Invalid input: malformed JSON: {message}")]
    Syntax { message: String },

    /// An element with the requested id exists but is not a `<style>` element.
    ///
    /// Counts as invalid input (see [`StyleError::is_invalid_input`]).
    #[error("Invalid input: element #{id} is a <{tag}>, not a <style> element")]
    NotAStyleElement { id: String, tag: String },

    /// The document collaborator failed.
    #[error("Document error: {message}")]
    Host { message: String },
}

impl StyleError {
    /// Whether the caller has to fix its input (as opposed to a document failure).
    ///
    /// Every variant except [`StyleError::Host`] is an invalid-input error;
    /// the extra variants only say which part of the input was wrong.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StyleError::InvalidInput { .. }
                | StyleError::Malformed { .. }
                | StyleError::Syntax { .. }
                | StyleError::NotAStyleElement { .. }
        )
    }
}

/// Convert a style tree into CSS text.
pub fn to_css(root: &StyleNode) -> String {
    format(&flatten(root))
}

/// Parse a JSON object into a style tree, keeping key order.
pub fn parse_style(json: &str) -> Result<StyleNode, StyleError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| StyleError::Syntax {
            message: e.to_string(),
        })?;
    StyleNode::try_from(value)
}

/// Parse a JSON object and convert it straight to CSS text.
pub fn to_css_json(json: &str) -> Result<String, StyleError> {
    parse_style(json).map(|root| to_css(&root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn css(json: &str) -> String {
        to_css_json(json).unwrap()
    }

    // =========================================================================
    // to_css
    // =========================================================================

    #[test]
    fn test_root_declaration_has_empty_selector() {
        assert_eq!(css(r#"{"color": "red"}"#), "{color:red;}");
    }

    #[test]
    fn test_sibling_order_preserved() {
        assert_eq!(
            css(r#"{"a": {"color": "red"}, "b": {"color": "blue"}}"#),
            ".a{color:red;}.b{color:blue;}"
        );
    }

    #[test]
    fn test_deep_nesting_skips_empty_parent() {
        assert_eq!(
            css(r#"{"card": {"title": {"color": "red"}}}"#),
            ".card .title{color:red;}"
        );
    }

    #[test]
    fn test_parent_rule_before_children() {
        assert_eq!(
            css(r#"{"color": "black", "card": {"padding": 4, "title": {"fontSize": "2em"}}, "footer": {"margin": 0}}"#),
            "{color:black;}.card{padding:4;}.card .title{font-size:2em;}.footer{margin:0;}"
        );
    }

    #[test]
    fn test_hyphenated_selectors() {
        assert_eq!(
            css(r#"{"navBar": {"linkItem": {"textDecoration": "none"}}}"#),
            ".nav-bar .link-item{text-decoration:none;}"
        );
    }

    #[test]
    fn test_deterministic_output() {
        let json = r#"{"x": {"y": {"zIndex": 3}, "opacity": 0.5}, "w": {"top": 0}}"#;
        let first = css(json);
        for _ in 0..5 {
            assert_eq!(css(json), first);
        }
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(css("{}"), "");
    }

    // =========================================================================
    // Rejection
    // =========================================================================

    #[test]
    fn test_reject_array() {
        let err = parse_style("[1, 2]").unwrap_err();
        assert_eq!(
            err,
            StyleError::InvalidInput {
                expected: "a style object",
                received: "array".into(),
            }
        );
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_reject_primitives() {
        for (json, received) in [("\"red\"", "string"), ("12", "number"), ("true", "boolean"), ("null", "null")] {
            match parse_style(json) {
                Err(StyleError::InvalidInput { received: r, .. }) => assert_eq!(r, received),
                other => panic!("expected InvalidInput for {json}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_reject_nested_array() {
        let err = parse_style(r#"{"card": {"margin": [1, 2]}}"#).unwrap_err();
        assert!(matches!(err, StyleError::Malformed { .. }));
        assert!(err.is_invalid_input());
        assert!(err.to_string().starts_with("Invalid input: "));
        assert!(err.to_string().contains("sequence"));
    }

    #[test]
    fn test_reject_bad_json() {
        let err = parse_style("{color: red}").unwrap_err();
        assert!(matches!(err, StyleError::Syntax { .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_large_numbers_written_in_full() {
        assert_eq!(
            css(r#"{"zIndex": 1e20, "order": 100000000000000000000}"#),
            "{z-index:100000000000000000000;order:100000000000000000000;}"
        );
    }

    #[test]
    fn test_not_a_style_element_message() {
        let err = StyleError::NotAStyleElement {
            id: "theme".into(),
            tag: "div".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid input: element #theme is a <div>, not a <style> element"
        );
        assert!(err.is_invalid_input());
        assert!(!StyleError::Host { message: "gone".into() }.is_invalid_input());
    }
}
