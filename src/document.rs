//! Output document: an arena of nodes plus a pending-removal set
//!
//! Nodes are addressed by [`NodeId`] handles that stay valid for the whole
//! processing run. Removing a node only marks it; [`Document::apply_removals`]
//! compacts the arena once all replacements have been appended.

use crate::error::Result;
use crate::models::{MaskDef, Shape, ShapeKind};
use crate::svg::{Element, XmlNode, parse_svg, parse_svg_str};
use std::path::Path;

/// Stable handle of a node inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Handle for the node at `index`
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position in the arena
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One top-level entry of the document body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A shape the engine understands
    Shape(Shape),
    /// Shapes grouped under one `<g>`
    Layer(Vec<Shape>),
    /// Source markup the engine does not interpret
    Markup(XmlNode),
}

impl Node {
    /// The shape, if this node is one
    pub fn as_shape(&self) -> Option<&Shape> {
        match self {
            Node::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    /// Element if this node is untouched markup with the given local name
    pub fn as_markup(&self, local_name: &str) -> Option<&Element> {
        match self {
            Node::Markup(XmlNode::Element(el)) if el.local_name() == local_name => Some(el),
            _ => None,
        }
    }
}

/// Shared `<defs>` collection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Defs {
    /// Attributes of the source `<defs>` element
    pub attrs: Vec<(String, String)>,
    /// Children carried over from the source
    pub existing: Vec<XmlNode>,
    /// Masks added by registration marks
    pub masks: Vec<MaskDef>,
}

impl Defs {
    /// Nothing to write
    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.masks.is_empty()
    }

    /// An existing child or generated mask already uses `id`
    pub fn contains_id(&self, id: &str) -> bool {
        self.masks.iter().any(|mask| mask.id == id)
            || self.existing.iter().any(|node| match node {
                XmlNode::Element(el) => el.attr("id") == Some(id),
                _ => false,
            })
    }
}

/// The document being rounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root_name: String,
    root_attrs: Vec<(String, String)>,
    defs: Defs,
    nodes: Vec<Node>,
    removed: Vec<bool>,
}

impl Document {
    /// Empty document with a plain `<svg>` root in the SVG namespace
    pub fn new() -> Self {
        Self {
            root_name: "svg".to_string(),
            root_attrs: vec![("xmlns".to_string(), "http://www.w3.org/2000/svg".to_string())],
            defs: Defs::default(),
            nodes: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Wrap a parsed `<svg>` root.
    ///
    /// Direct children become markup nodes, except the first `<defs>`, which
    /// seeds the shared defs collection. Whitespace between top-level
    /// children is dropped; the writer emits one child per line.
    pub fn from_svg(root: Element) -> Self {
        let mut doc = Self {
            root_name: root.name,
            root_attrs: root.attrs,
            defs: Defs::default(),
            nodes: Vec::new(),
            removed: Vec::new(),
        };
        let mut seen_defs = false;
        for child in root.children {
            match child {
                XmlNode::Element(el) if el.local_name() == "defs" && !seen_defs => {
                    seen_defs = true;
                    doc.defs.attrs = el.attrs;
                    doc.defs.existing = el.children;
                }
                blank if blank.is_blank_text() => {}
                other => {
                    doc.push(Node::Markup(other));
                }
            }
        }
        doc
    }

    /// Parse and wrap an SVG string
    pub fn from_svg_str(content: &str) -> Result<Self> {
        Ok(Self::from_svg(parse_svg_str(content)?))
    }

    /// Parse and wrap the SVG file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_svg(parse_svg(path.as_ref())?))
    }

    /// Qualified name of the root element
    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    /// Attributes of the root element in source order
    pub fn root_attrs(&self) -> &[(String, String)] {
        &self.root_attrs
    }

    /// Qualify a new element name with the root's namespace prefix, so that
    /// generated shapes land in the same namespace as the source.
    pub fn qualify(&self, local: &str) -> String {
        match self.root_name.split_once(':') {
            Some((prefix, _)) => format!("{prefix}:{local}"),
            None => local.to_string(),
        }
    }

    /// The shared definitions collection
    pub fn defs(&self) -> &Defs {
        &self.defs
    }

    /// Append a mask definition unless one with the same id exists.
    pub fn add_mask(&mut self, mask: MaskDef) -> bool {
        if self.defs.contains_id(&mask.id) {
            return false;
        }
        self.defs.masks.push(mask);
        true
    }

    /// Append a node on top of everything else
    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.removed.push(false);
        NodeId(self.nodes.len() - 1)
    }

    /// Append a shape on top of everything else
    pub fn push_shape(&mut self, shape: Shape) -> NodeId {
        self.push(Node::Shape(shape))
    }

    /// Swap the content of a node while keeping its position.
    pub fn replace(&mut self, id: NodeId, node: Node) {
        if let Some(slot) = self.nodes.get_mut(id.0) {
            *slot = node;
        }
    }

    /// Mark a node for removal; it stays addressable until
    /// [`apply_removals`](Self::apply_removals).
    pub fn remove(&mut self, id: NodeId) {
        if let Some(flag) = self.removed.get_mut(id.0) {
            *flag = true;
        }
    }

    /// Node behind `id`, removed or not
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Shape behind `id`, if that node is a shape
    pub fn shape(&self, id: NodeId) -> Option<&Shape> {
        self.get(id).and_then(Node::as_shape)
    }

    /// Live nodes with their handles, in paint order
    pub fn live(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(i, _)| !self.removed[*i])
            .map(|(i, node)| (NodeId(i), node))
    }

    /// Live nodes in paint order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.live().map(|(_, node)| node)
    }

    /// Mark every top-level `<g>` for removal, returning how many were dropped.
    pub fn strip_groups(&mut self) -> usize {
        let groups: Vec<NodeId> = self
            .live()
            .filter(|(_, node)| node.as_markup("g").is_some())
            .map(|(id, _)| id)
            .collect();
        for id in &groups {
            self.remove(*id);
        }
        groups.len()
    }

    /// Drop every node marked for removal. Handles issued before this call
    /// are invalidated.
    pub fn apply_removals(&mut self) -> usize {
        let before = self.nodes.len();
        let removed = std::mem::take(&mut self.removed);
        let nodes = std::mem::take(&mut self.nodes);
        self.nodes = nodes
            .into_iter()
            .zip(removed)
            .filter(|(_, gone)| !gone)
            .map(|(node, _)| node)
            .collect();
        self.removed = vec![false; self.nodes.len()];
        before - self.nodes.len()
    }

    /// All live shapes, flattening layers, in paint order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.nodes().flat_map(|node| match node {
            Node::Shape(shape) => std::slice::from_ref(shape),
            Node::Layer(shapes) => shapes.as_slice(),
            Node::Markup(_) => &[][..],
        })
    }

    /// Number of live shapes of `kind`, layers included
    pub fn count_kind(&self, kind: ShapeKind) -> usize {
        self.shapes().filter(|shape| shape.kind() == kind).count()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
