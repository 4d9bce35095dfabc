//! Style injection.
//!
//! Resolves stylesheet text from raw CSS or a style tree and writes it into a
//! `<style>` element. An existing element with the same id is replaced in
//! place, or left alone when the caller marks it as not overridable.

use nestcss_core::{to_css, StyleError, StyleNode};

/// The document operations injection needs.
///
/// Implemented by `MemoryDocument` here and by the browser binding in
/// `nestcss-wasm`.
pub trait StyleDocument {
    /// Handle to an element of the document.
    type Element: Clone;

    fn get_element_by_id(&self, id: &str) -> Result<Option<Self::Element>, StyleError>;

    /// Tag name of an element, in any case.
    fn tag_name(&self, element: &Self::Element) -> Result<String, StyleError>;

    fn create_style_element(&mut self) -> Result<Self::Element, StyleError>;

    fn set_text_content(&mut self, element: &Self::Element, text: &str) -> Result<(), StyleError>;

    fn set_id(&mut self, element: &Self::Element, id: &str) -> Result<(), StyleError>;

    fn append_child(
        &mut self,
        parent: &Self::Element,
        child: &Self::Element,
    ) -> Result<(), StyleError>;

    /// The default host for new `<style>` elements.
    fn head(&self) -> Result<Self::Element, StyleError>;
}

/// What to inject: ready CSS text or a style tree to convert.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleContent {
    Css(String),
    Tree(StyleNode),
}

impl StyleContent {
    /// Reject content that can never produce a stylesheet.
    pub fn validate(&self) -> Result<(), StyleError> {
        match self {
            StyleContent::Css(css) if css.is_empty() => Err(StyleError::InvalidInput {
                expected: "CSS text or a style object",
                received: "empty string".into(),
            }),
            _ => Ok(()),
        }
    }

    /// The stylesheet text to write.
    pub fn into_css(self) -> String {
        match self {
            StyleContent::Css(css) => css,
            StyleContent::Tree(tree) => to_css(&tree),
        }
    }
}

impl From<&str> for StyleContent {
    fn from(css: &str) -> Self {
        StyleContent::Css(css.to_string())
    }
}

impl From<String> for StyleContent {
    fn from(css: String) -> Self {
        StyleContent::Css(css)
    }
}

impl From<StyleNode> for StyleContent {
    fn from(tree: StyleNode) -> Self {
        StyleContent::Tree(tree)
    }
}

/// Injection settings.
#[derive(Debug, Clone, PartialEq)]
pub struct InjectOptions<E> {
    /// Identity of the `<style>` element.
    pub id: Option<String>,
    /// Whether an existing `<style>` with the same id may be replaced.
    pub overridable: bool,
    /// Where new elements are appended. `None` means the document head.
    pub host: Option<E>,
}

impl<E> Default for InjectOptions<E> {
    fn default() -> Self {
        Self {
            id: None,
            overridable: true,
            host: None,
        }
    }
}

impl<E> InjectOptions<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn overridable(mut self, overridable: bool) -> Self {
        self.overridable = overridable;
        self
    }

    pub fn with_host(mut self, host: E) -> Self {
        self.host = Some(host);
        self
    }
}

/// What an injection call did to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// A new `<style>` element was appended to the host.
    Created,
    /// The text of an existing `<style>` element was replaced.
    Replaced,
    /// An existing `<style>` element was kept because it is not overridable.
    Skipped,
}

/// Inject a stylesheet into `doc`.
pub fn inject_style<D: StyleDocument>(
    doc: &mut D,
    content: impl Into<StyleContent>,
    options: InjectOptions<D::Element>,
) -> Result<Injection, StyleError> {
    let content = content.into();
    content.validate()?;

    if let Some(id) = options.id.as_deref() {
        if let Some(existing) = doc.get_element_by_id(id)? {
            let tag = doc.tag_name(&existing)?;
            if !tag.eq_ignore_ascii_case("style") {
                return Err(StyleError::NotAStyleElement {
                    id: id.to_string(),
                    tag: tag.to_ascii_lowercase(),
                });
            }
            if !options.overridable {
                log::warn!("style #{id} already exists and is not overridable, skipping");
                return Ok(Injection::Skipped);
            }
            doc.set_text_content(&existing, &content.into_css())?;
            log::debug!("replaced style #{id}");
            return Ok(Injection::Replaced);
        }
    }

    let element = doc.create_style_element()?;
    doc.set_text_content(&element, &content.into_css())?;
    if let Some(id) = options.id.as_deref() {
        doc.set_id(&element, id)?;
    }
    let host = match options.host {
        Some(host) => host,
        None => doc.head()?,
    };
    doc.append_child(&host, &element)?;
    Ok(Injection::Created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryDocument;
    use pretty_assertions::assert_eq;

    fn tree() -> StyleNode {
        StyleNode::new().nest("btn", StyleNode::new().set("borderRadius", "4px"))
    }

    // =========================================================================
    // Content
    // =========================================================================

    #[test]
    fn test_empty_string_rejected() {
        let mut doc = MemoryDocument::new();
        let err = inject_style(&mut doc, "", InjectOptions::new()).unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            err,
            StyleError::InvalidInput {
                expected: "CSS text or a style object",
                received: "empty string".into(),
            }
        );
        assert_eq!(doc.render_head(), "");
    }

    #[test]
    fn test_empty_tree_allowed() {
        let mut doc = MemoryDocument::new();
        let outcome = inject_style(&mut doc, StyleNode::new(), InjectOptions::new()).unwrap();
        assert_eq!(outcome, Injection::Created);
        assert_eq!(doc.render_head(), "<style></style>");
    }

    #[test]
    fn test_raw_css_written_as_is() {
        let mut doc = MemoryDocument::new();
        inject_style(&mut doc, "body { margin: 0 }", InjectOptions::new()).unwrap();
        assert_eq!(doc.render_head(), "<style>body { margin: 0 }</style>");
    }

    // =========================================================================
    // Creation
    // =========================================================================

    #[test]
    fn test_create_with_id() {
        let mut doc = MemoryDocument::new();
        let outcome =
            inject_style(&mut doc, tree(), InjectOptions::new().with_id("buttons")).unwrap();
        assert_eq!(outcome, Injection::Created);
        let el = doc.get_element_by_id("buttons").unwrap().unwrap();
        assert_eq!(doc.text_content(el), Some(".btn{border-radius:4px;}"));
        assert_eq!(doc.children(doc.head_id()), &[el]);
    }

    #[test]
    fn test_without_id_appends_each_time() {
        let mut doc = MemoryDocument::new();
        inject_style(&mut doc, "a{}", InjectOptions::new()).unwrap();
        inject_style(&mut doc, "b{}", InjectOptions::new()).unwrap();
        assert_eq!(doc.render_head(), "<style>a{}</style><style>b{}</style>");
    }

    #[test]
    fn test_custom_host() {
        let mut doc = MemoryDocument::new();
        let body = doc.body_id();
        inject_style(&mut doc, "p{}", InjectOptions::new().with_host(body)).unwrap();
        assert_eq!(doc.render_head(), "");
        assert_eq!(doc.children(body).len(), 1);
    }

    #[test]
    fn test_unknown_id_creates() {
        let mut doc = MemoryDocument::new();
        inject_style(&mut doc, "a{}", InjectOptions::new().with_id("one")).unwrap();
        let outcome = inject_style(&mut doc, "b{}", InjectOptions::new().with_id("two")).unwrap();
        assert_eq!(outcome, Injection::Created);
        assert_eq!(
            doc.render_head(),
            "<style id=\"one\">a{}</style><style id=\"two\">b{}</style>"
        );
    }

    // =========================================================================
    // Existing element
    // =========================================================================

    #[test]
    fn test_override_replaces_text() {
        let mut doc = MemoryDocument::new();
        inject_style(&mut doc, "old{}", InjectOptions::new().with_id("theme")).unwrap();
        let outcome = inject_style(&mut doc, tree(), InjectOptions::new().with_id("theme")).unwrap();
        assert_eq!(outcome, Injection::Replaced);
        assert_eq!(
            doc.render_head(),
            "<style id=\"theme\">.btn{border-radius:4px;}</style>"
        );
    }

    #[test]
    fn test_not_overridable_skips() {
        let mut doc = MemoryDocument::new();
        inject_style(&mut doc, "old{}", InjectOptions::new().with_id("theme")).unwrap();
        let outcome = inject_style(
            &mut doc,
            tree(),
            InjectOptions::new().with_id("theme").overridable(false),
        )
        .unwrap();
        assert_eq!(outcome, Injection::Skipped);
        assert_eq!(doc.render_head(), "<style id=\"theme\">old{}</style>");
    }

    #[test]
    fn test_existing_non_style_element_rejected() {
        let mut doc = MemoryDocument::new();
        let div = doc.create_element("DIV");
        doc.set_id(&div, "theme").unwrap();
        let body = doc.body_id();
        doc.append_child(&body, &div).unwrap();

        let err = inject_style(&mut doc, "a{}", InjectOptions::new().with_id("theme")).unwrap_err();
        assert_eq!(
            err,
            StyleError::NotAStyleElement {
                id: "theme".into(),
                tag: "div".into(),
            }
        );
        assert!(err.is_invalid_input());
        assert_eq!(doc.text_content(div), Some(""));
    }

    #[test]
    fn test_non_style_rejected_even_when_not_overridable() {
        let mut doc = MemoryDocument::new();
        let span = doc.create_element("span");
        doc.set_id(&span, "x").unwrap();
        let body = doc.body_id();
        doc.append_child(&body, &span).unwrap();
        let result = inject_style(
            &mut doc,
            "a{}",
            InjectOptions::new().with_id("x").overridable(false),
        );
        assert!(matches!(result, Err(StyleError::NotAStyleElement { .. })));
    }

    #[test]
    fn test_options_default() {
        let options: InjectOptions<crate::ElementId> = InjectOptions::default();
        assert!(options.overridable);
        assert_eq!(options.id, None);
        assert_eq!(options.host, None);
    }
}
