use std::collections::btree_map::{self, BTreeMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    #[must_use]
    pub fn is_dir(self) -> bool {
        self == Self::Directory
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileNode {
    content: String,
}

impl FileNode {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Directory entries keyed by name. Sibling names are unique by
/// construction and iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirNode {
    children: BTreeMap<String, Node>,
}

impl DirNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Inserts `node` under `name` unless the name is taken. Returns false
    /// (leaving the directory untouched) on a collision.
    pub fn insert(&mut self, name: impl Into<String>, node: Node) -> bool {
        match self.children.entry(name.into()) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(node);
                true
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Node> {
        self.children.remove(name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.children.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    File(FileNode),
    Dir(DirNode),
}

impl Node {
    #[must_use]
    pub fn file(content: impl Into<String>) -> Self {
        Self::File(FileNode::new(content))
    }

    #[must_use]
    pub fn empty_dir() -> Self {
        Self::Dir(DirNode::new())
    }

    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Dir(_) => NodeKind::Directory,
        }
    }

    #[must_use]
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Dir(_))
    }

    #[must_use]
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    #[must_use]
    pub fn as_dir(&self) -> Option<&DirNode> {
        match self {
            Self::Dir(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    pub fn as_dir_mut(&mut self) -> Option<&mut DirNode> {
        match self {
            Self::Dir(dir) => Some(dir),
            Self::File(_) => None,
        }
    }

    #[must_use]
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Dir(_) => None,
        }
    }
}
