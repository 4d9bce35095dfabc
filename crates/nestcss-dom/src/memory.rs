//! In-memory document.
//!
//! A small element tree (`<html>` with `<head>` and `<body>`) that implements
//! [`StyleDocument`]. Useful for rendering injected styles on the server and
//! for exercising injection without a browser.

use nestcss_core::StyleError;

use crate::inject::StyleDocument;

/// Handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Clone, PartialEq)]
struct MemoryElement {
    tag: String,
    id: Option<String>,
    text: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl MemoryElement {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// An element tree held in a flat arena.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    root: ElementId,
    head: ElementId,
    body: ElementId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document with an empty head and body.
    pub fn new() -> Self {
        let mut doc = Self {
            elements: Vec::new(),
            root: ElementId(0),
            head: ElementId(0),
            body: ElementId(0),
        };
        doc.root = doc.create_element("html");
        doc.head = doc.create_element("head");
        doc.body = doc.create_element("body");
        doc.attach(doc.root, doc.head);
        doc.attach(doc.root, doc.body);
        doc
    }

    // =======================================================================
    // Accessors
    // =======================================================================

    pub fn root_id(&self) -> ElementId {
        self.root
    }

    pub fn head_id(&self) -> ElementId {
        self.head
    }

    pub fn body_id(&self) -> ElementId {
        self.body
    }

    pub fn tag(&self, el: ElementId) -> Option<&str> {
        self.elements.get(el.0).map(|e| e.tag.as_str())
    }

    pub fn text_content(&self, el: ElementId) -> Option<&str> {
        self.elements.get(el.0).map(|e| e.text.as_str())
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        self.elements
            .get(el.0)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the element is reachable from the document root.
    pub fn is_connected(&self, el: ElementId) -> bool {
        let mut current = Some(el);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.elements.get(id.0).and_then(|e| e.parent);
        }
        false
    }

    // =======================================================================
    // Mutation
    // =======================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(MemoryElement::new(tag));
        id
    }

    /// Move `child` under `parent`, detaching it from any previous parent.
    fn attach(&mut self, parent: ElementId, child: ElementId) {
        if let Some(old) = self.elements[child.0].parent.take() {
            self.elements[old.0].children.retain(|c| *c != child);
        }
        self.elements[child.0].parent = Some(parent);
        self.elements[parent.0].children.push(child);
    }

    fn element_mut(&mut self, el: ElementId) -> Result<&mut MemoryElement, StyleError> {
        self.elements.get_mut(el.0).ok_or_else(|| unknown(el))
    }

    // =======================================================================
    // Rendering
    // =======================================================================

    /// Serialize an element and its subtree as HTML.
    pub fn render(&self, el: ElementId) -> String {
        let mut out = String::new();
        self.render_into(el, &mut out);
        out
    }

    /// Serialize the children of `<head>`, ready to splice into a page.
    pub fn render_head(&self) -> String {
        let mut out = String::new();
        for child in self.children(self.head) {
            self.render_into(*child, &mut out);
        }
        out
    }

    fn render_into(&self, el: ElementId, out: &mut String) {
        let Some(element) = self.elements.get(el.0) else {
            return;
        };

        out.push('<');
        out.push_str(&element.tag);
        if let Some(ref id) = element.id {
            out.push_str(&format!(" id=\"{}\"", id.replace('"', "&quot;")));
        }
        out.push('>');

        // <style> and <script> hold raw text
        if is_raw_text(&element.tag) {
            out.push_str(&element.text);
        } else {
            out.push_str(&escape_text(&element.text));
        }
        for child in &element.children {
            self.render_into(*child, out);
        }

        out.push_str("</");
        out.push_str(&element.tag);
        out.push('>');
    }
}

impl StyleDocument for MemoryDocument {
    type Element = ElementId;

    // Like the browser, only connected elements are found.
    fn get_element_by_id(&self, id: &str) -> Result<Option<ElementId>, StyleError> {
        Ok((0..self.elements.len()).map(ElementId).find(|el| {
            self.elements[el.0].id.as_deref() == Some(id) && self.is_connected(*el)
        }))
    }

    fn tag_name(&self, element: &ElementId) -> Result<String, StyleError> {
        self.tag(*element)
            .map(str::to_string)
            .ok_or_else(|| unknown(*element))
    }

    fn create_style_element(&mut self) -> Result<ElementId, StyleError> {
        Ok(self.create_element("style"))
    }

    fn set_text_content(&mut self, element: &ElementId, text: &str) -> Result<(), StyleError> {
        let children = {
            let el = self.element_mut(*element)?;
            el.text = text.to_string();
            std::mem::take(&mut el.children)
        };
        for child in children {
            self.elements[child.0].parent = None;
        }
        Ok(())
    }

    fn set_id(&mut self, element: &ElementId, id: &str) -> Result<(), StyleError> {
        self.element_mut(*element)?.id = Some(id.to_string());
        Ok(())
    }

    fn append_child(&mut self, parent: &ElementId, child: &ElementId) -> Result<(), StyleError> {
        if parent.0 >= self.elements.len() {
            return Err(unknown(*parent));
        }
        if child.0 >= self.elements.len() {
            return Err(unknown(*child));
        }
        // Appending an ancestor would create a cycle.
        let mut current = Some(*parent);
        while let Some(id) = current {
            if id == *child {
                return Err(StyleError::Host {
                    message: "cannot append an element to its own subtree".into(),
                });
            }
            current = self.elements[id.0].parent;
        }
        self.attach(*parent, *child);
        Ok(())
    }

    fn head(&self) -> Result<ElementId, StyleError> {
        Ok(self.head)
    }
}

fn unknown(el: ElementId) -> StyleError {
    StyleError::Host {
        message: format!("unknown element {}", el.0),
    }
}

fn is_raw_text(tag: &str) -> bool {
    tag.eq_ignore_ascii_case("style") || tag.eq_ignore_ascii_case("script")
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
