//! Declarative view tree produced by the renderer.
//!
//! Nodes carry plain attributes plus an optional [`Hook`] naming the input
//! source an element represents. The dioxus layer materializes the tree and
//! routes events for hooked elements back into the session.

/// Element tags the renderer emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Div,
    Span,
    Strong,
    Img,
    H2,
    P,
    Button,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Span => "span",
            Tag::Strong => "strong",
            Tag::Img => "img",
            Tag::H2 => "h2",
            Tag::P => "p",
            Tag::Button => "button",
        }
    }
}

/// Input source an element stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Result card button for the given external id.
    Card(String),
    /// Hover details surface attached to a card.
    Surface(String),
    /// Card poster image; reports load failures.
    Poster(String),
    ModalClose,
    Overlay,
    /// Modal container; hosts the focus trap.
    Modal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Element(ElementNode),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: Tag,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<ViewNode>,
    pub hook: Option<Hook>,
}

pub fn el(tag: Tag) -> ElementNode {
    ElementNode {
        tag,
        attributes: Vec::new(),
        children: Vec::new(),
        hook: None,
    }
}

pub fn text(value: impl Into<String>) -> ViewNode {
    ViewNode::Text(value.into())
}

impl ElementNode {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    pub fn id(self, value: impl Into<String>) -> Self {
        self.attr("id", value)
    }

    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn children(mut self, nodes: impl IntoIterator<Item = ViewNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(text(value))
    }

    pub fn hook(mut self, hook: Hook) -> Self {
        self.hook = Some(hook);
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

impl From<ElementNode> for ViewNode {
    fn from(node: ElementNode) -> Self {
        ViewNode::Element(node)
    }
}

impl ViewNode {
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            ViewNode::Element(node) => Some(node),
            ViewNode::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            ViewNode::Text(value) => out.push_str(value),
            ViewNode::Element(node) => {
                for child in &node.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for every element matching `pred`.
    pub fn find_all<'a>(&'a self, pred: &dyn Fn(&ElementNode) -> bool) -> Vec<&'a ElementNode> {
        let mut found = Vec::new();
        self.walk(pred, &mut found);
        found
    }

    fn walk<'a>(&'a self, pred: &dyn Fn(&ElementNode) -> bool, found: &mut Vec<&'a ElementNode>) {
        if let ViewNode::Element(node) = self {
            if pred(node) {
                found.push(node);
            }
            for child in &node.children {
                child.walk(pred, found);
            }
        }
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&ElementNode> {
        self.find_all(&|node| node.has_class(class))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ElementNode> {
        self.find_all(&|node| node.get_attr("id") == Some(id))
            .into_iter()
            .next()
    }
}

impl ElementNode {
    pub fn text_content(&self) -> String {
        self.children.iter().map(ViewNode::text_content).collect()
    }
}
