use crate::utils::error::Result;
use kuchikiki::traits::*;
use kuchikiki::NodeRef;

/// Parsed HTML page. Node handles taken from it share the tree, so mutations
/// through a handle show up when the document is serialized.
pub struct Document {
    root: NodeRef,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            root: kuchikiki::parse_html().one(html),
        }
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    pub fn to_html(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.root.serialize(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.utf8_error()).into()
        })
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeRef> {
        self.root
            .descendants()
            .find(|node| attribute(node, "id").as_deref() == Some(id))
    }
}

pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.as_element()
        .is_some_and(|element| (&*element.name.local).eq_ignore_ascii_case(tag))
}

pub fn has_class(node: &NodeRef, class: &str) -> bool {
    attribute(node, "class")
        .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
}

pub fn has_all_classes(node: &NodeRef, classes: &[String]) -> bool {
    !classes.is_empty() && classes.iter().all(|class| has_class(node, class))
}

pub fn attribute(node: &NodeRef, name: &str) -> Option<String> {
    let element = node.as_element()?;
    let attributes = element.attributes.borrow();
    attributes.get(name).map(str::to_string)
}

pub fn set_attribute(node: &NodeRef, name: &str, value: &str) {
    if let Some(element) = node.as_element() {
        element
            .attributes
            .borrow_mut()
            .insert(name, value.to_string());
    }
}

/// Replaces everything inside `node` with a single text node.
pub fn replace_text(node: &NodeRef, value: &str) {
    let children: Vec<NodeRef> = node.children().collect();
    for child in children {
        child.detach();
    }
    node.append(NodeRef::new_text(value));
}

/// Text content with runs of whitespace collapsed, as used for title lookup.
pub fn normalized_text(node: &NodeRef) -> String {
    node.text_contents()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
