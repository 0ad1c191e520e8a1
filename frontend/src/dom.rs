//! # Document Model
//!
//! Minimal in-memory DOM the page logic runs against.
//!
//! - Elements carry a tag, ordered attributes, a display state and children
//! - Lookups are by `id` attribute, depth first, first match wins
//! - Serializes to HTML with text and attribute values escaped
//!
//! The form handler talks to the page through [`Page`]. [`Document`] implements it
//! natively, the browser build implements it over the real DOM (see `browser`).
use std::fmt::Write;

const VOID_TAGS: [&str; 4] = ["br", "img", "input", "meta"];
// Children written as-is, these elements hold code rather than markup.
const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

/// Operations the form handler and renderer need from a page, all keyed by element id.
///
/// Mutators return `false` when the element is missing.
pub trait Page {
    fn has(&self, id: &str) -> bool;

    /// Value of a form control, empty when missing.
    fn value(&self, id: &str) -> String;

    fn set_value(&mut self, id: &str, value: &str) -> bool;

    fn set_display(&mut self, id: &str, display: Display) -> bool;

    fn set_text(&mut self, id: &str, text: &str) -> bool;

    fn replace_children(&mut self, id: &str, children: Vec<Node>) -> bool;
}

/// Inline `display` style of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Inherit,
    None,
    Block,
}

impl Display {
    /// Value for the CSS `display` property, `None` when the property is left unset.
    pub fn css_value(self) -> Option<&'static str> {
        match self {
            Display::Inherit => None,
            Display::None => Some("none"),
            Display::Block => Some("block"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn to_html(&self) -> String {
        match self {
            Node::Element(element) => element.to_html(),
            Node::Text(text) => escape(text),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    display: Display,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attributes: Vec::new(),
            display: Display::default(),
            children: Vec::new(),
        }
    }

    pub fn with_id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn attr(mut self, key: &str, value: &str) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.display = Display::None;
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    /// Current value of a form control.
    pub fn value(&self) -> &str {
        self.attribute("value").unwrap_or_default()
    }

    pub fn set_value(&mut self, value: &str) {
        self.set_attribute("value", value);
    }

    pub fn display(&self) -> Display {
        self.display
    }

    pub fn set_display(&mut self, display: Display) {
        self.display = display;
    }

    pub fn is_hidden(&self) -> bool {
        self.display == Display::None
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    pub fn append_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn clear(&mut self) {
        self.children.clear();
    }

    pub fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }

    /// Replaces all children with a single text node, like assigning `textContent`.
    pub fn set_text(&mut self, text: &str) {
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::from(text));
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Element(element) => element.collect_text(out),
                Node::Text(text) => out.push_str(text),
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }

        self.child_elements().find_map(|element| element.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Element> {
        if self.id() == Some(id) {
            return Some(self);
        }

        self.children.iter_mut().find_map(|node| match node {
            Node::Element(element) => element.find_mut(id),
            Node::Text(_) => None,
        })
    }

    /// Descendants with the given tag, in document order.
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_by_tag(tag, &mut found);
        found
    }

    fn collect_by_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for element in self.child_elements() {
            if element.tag == tag {
                found.push(element);
            }
            element.collect_by_tag(tag, found);
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);

        for (key, value) in &self.attributes {
            let _ = write!(out, " {key}=\"{}\"", escape(value));
        }
        if let Some(display) = self.display.css_value() {
            let _ = write!(out, " style=\"display: {display}\"");
        }
        out.push('>');

        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }

        let raw = RAW_TEXT_TAGS.contains(&self.tag.as_str());
        for node in &self.children {
            match node {
                Node::Element(element) => element.write_html(out),
                Node::Text(text) if raw => out.push_str(text),
                Node::Text(text) => out.push_str(&escape(text)),
            }
        }

        let _ = write!(out, "</{}>", self.tag);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.root.find(id)
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.root.find_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_element_by_id(id).is_some()
    }

    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>{}", self.root.to_html())
    }
}

impl Page for Document {
    fn has(&self, id: &str) -> bool {
        self.contains(id)
    }

    fn value(&self, id: &str) -> String {
        self.get_element_by_id(id)
            .map(|element| element.value().to_string())
            .unwrap_or_default()
    }

    fn set_value(&mut self, id: &str, value: &str) -> bool {
        self.get_element_by_id_mut(id)
            .map(|element| element.set_value(value))
            .is_some()
    }

    fn set_display(&mut self, id: &str, display: Display) -> bool {
        self.get_element_by_id_mut(id)
            .map(|element| element.set_display(display))
            .is_some()
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        self.get_element_by_id_mut(id)
            .map(|element| element.set_text(text))
            .is_some()
    }

    fn replace_children(&mut self, id: &str, children: Vec<Node>) -> bool {
        self.get_element_by_id_mut(id)
            .map(|element| element.replace_children(children))
            .is_some()
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());

    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
