use crate::error::{FsError, FsResult};
use crate::node::{DirNode, Node, NodeKind};
use crate::path::{split_token, NodePath, Step};
use tracing::debug;

const TREE_BRANCH: &str = "|-- ";
const TREE_INDENT: &str = "    ";

/// One row of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: NodeKind,
}

impl DirEntry {
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// In-memory filesystem owned by a single session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryTree {
    root: Node,
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTree {
    /// An empty tree holding only the root directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::empty_dir(),
        }
    }

    /// A fresh copy of the game's seed tree.
    #[must_use]
    pub fn seeded() -> Self {
        crate::seed::SEED_TREE.clone()
    }

    #[must_use]
    pub fn lookup(&self, path: &NodePath) -> Option<&Node> {
        let mut current = &self.root;
        for segment in path.segments() {
            current = current.as_dir()?.get(segment)?;
        }
        Some(current)
    }

    fn lookup_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut current = &mut self.root;
        for segment in path.segments() {
            current = current.as_dir_mut()?.get_mut(segment)?;
        }
        Some(current)
    }

    #[must_use]
    pub fn is_dir(&self, path: &NodePath) -> bool {
        self.lookup(path).is_some_and(Node::is_dir)
    }

    #[must_use]
    pub fn is_file(&self, path: &NodePath) -> bool {
        self.lookup(path).is_some_and(Node::is_file)
    }

    /// Resolves a path token typed at `base` by walking the tree one step
    /// at a time. Every named step must exist, only directories can be
    /// stepped through (`..` included), and a trailing `/` demands a
    /// directory.
    pub fn resolve(&self, base: &NodePath, token: &str) -> FsResult<NodePath> {
        let (anchored, steps) = split_token(token);
        let mut current = if anchored { NodePath::root() } else { base.clone() };
        for step in steps {
            self.dir(&current)?;
            match step {
                Step::Parent => {
                    current.pop();
                }
                Step::Child(name) => {
                    current.push(name);
                    if self.lookup(&current).is_none() {
                        return Err(FsError::not_found(current.to_string()));
                    }
                }
                Step::Current => {}
            }
        }
        if token.ends_with('/') {
            self.dir(&current)?;
        }
        Ok(current)
    }

    /// Like [`resolve`](Self::resolve), but the final name may be missing:
    /// only its parent has to be an existing directory. Used by commands
    /// that create entries.
    pub fn resolve_entry(&self, base: &NodePath, token: &str) -> FsResult<NodePath> {
        let (_, steps) = split_token(token);
        match steps.last() {
            Some(Step::Child(name)) if !token.ends_with('/') => {
                let parent = self.resolve(base, &token[..token.len() - name.len()])?;
                self.dir(&parent)?;
                Ok(parent.join(name))
            }
            _ => self.resolve(base, token),
        }
    }

    pub fn dir(&self, path: &NodePath) -> FsResult<&DirNode> {
        self.lookup(path)
            .ok_or_else(|| FsError::not_found(path.to_string()))?
            .as_dir()
            .ok_or_else(|| FsError::not_directory(path.to_string()))
    }

    fn dir_mut(&mut self, path: &NodePath) -> FsResult<&mut DirNode> {
        let display = path.to_string();
        self.lookup_mut(path)
            .ok_or_else(|| FsError::not_found(display.clone()))?
            .as_dir_mut()
            .ok_or_else(|| FsError::not_directory(display))
    }

    pub fn list(&self, path: &NodePath) -> FsResult<Vec<DirEntry>> {
        Ok(self
            .dir(path)?
            .entries()
            .map(|(name, node)| DirEntry {
                name: name.to_string(),
                kind: node.kind(),
            })
            .collect())
    }

    pub fn read_file(&self, path: &NodePath) -> FsResult<&str> {
        match self.lookup(path) {
            Some(Node::File(file)) => Ok(file.content()),
            Some(Node::Dir(_)) => Err(FsError::is_directory(path.to_string())),
            None => Err(FsError::not_found(path.to_string())),
        }
    }

    fn insert(&mut self, path: &NodePath, node: Node) -> FsResult<()> {
        let Some((parent, name)) = path.split_last() else {
            return Err(FsError::already_exists(path.to_string()));
        };
        if self.dir_mut(&parent)?.insert(name, node) {
            Ok(())
        } else {
            Err(FsError::already_exists(path.to_string()))
        }
    }

    /// Creates a file holding `content`. Existing entries are never
    /// overwritten.
    pub fn create_file(&mut self, path: &NodePath, content: impl Into<String>) -> FsResult<()> {
        self.insert(path, Node::file(content))?;
        debug!(path = %path, "created file");
        Ok(())
    }

    pub fn create_dir(&mut self, path: &NodePath) -> FsResult<()> {
        self.insert(path, Node::empty_dir())?;
        debug!(path = %path, "created directory");
        Ok(())
    }

    /// Creates `path` and any missing ancestors. Existing directories along
    /// the way are reused; an existing file is an error.
    pub fn create_dir_all(&mut self, path: &NodePath) -> FsResult<()> {
        let mut current = NodePath::root();
        for segment in path.segments() {
            current.push(segment.as_str());
            match self.lookup(&current) {
                Some(node) if node.is_dir() => {}
                Some(_) => return Err(FsError::not_directory(current.to_string())),
                None => self.create_dir(&current)?,
            }
        }
        Ok(())
    }

    fn parent_of<'p>(&mut self, path: &'p NodePath) -> FsResult<(&mut DirNode, &'p str)> {
        let (parent, name) = path
            .split_last()
            .ok_or_else(|| FsError::busy(path.to_string()))?;
        let dir = self
            .dir_mut(&parent)
            .map_err(|_| FsError::not_found(path.to_string()))?;
        Ok((dir, name))
    }

    pub fn remove_file(&mut self, path: &NodePath) -> FsResult<()> {
        if path.is_root() {
            return Err(FsError::is_directory(path.to_string()));
        }
        let (dir, name) = self.parent_of(path)?;
        match dir.get(name) {
            None => return Err(FsError::not_found(path.to_string())),
            Some(Node::Dir(_)) => return Err(FsError::is_directory(path.to_string())),
            Some(Node::File(_)) => {}
        }
        dir.remove(name);
        debug!(path = %path, "removed file");
        Ok(())
    }

    /// Removes an empty directory.
    pub fn remove_dir(&mut self, path: &NodePath) -> FsResult<()> {
        let (dir, name) = self.parent_of(path)?;
        match dir.get(name) {
            None => return Err(FsError::not_found(path.to_string())),
            Some(Node::File(_)) => return Err(FsError::not_directory(path.to_string())),
            Some(Node::Dir(child)) if !child.is_empty() => {
                return Err(FsError::directory_not_empty(path.to_string()))
            }
            Some(Node::Dir(_)) => {}
        }
        dir.remove(name);
        debug!(path = %path, "removed directory");
        Ok(())
    }

    /// Renders the subtree below `path`, one `|-- name` line per entry,
    /// directories suffixed with `/` and indented one level per depth.
    pub fn render_tree(&self, path: &NodePath) -> FsResult<String> {
        let mut lines = Vec::new();
        render_dir(self.dir(path)?, "", &mut lines);
        Ok(lines.join("\n"))
    }

    /// Every directory path in the tree, parents before children.
    #[must_use]
    pub fn directories(&self) -> Vec<NodePath> {
        let mut found = Vec::new();
        if let Some(root) = self.root.as_dir() {
            collect_dirs(root, &NodePath::root(), &mut found);
        }
        found
    }
}

fn render_dir(dir: &DirNode, prefix: &str, lines: &mut Vec<String>) {
    for (name, node) in dir.entries() {
        let marker = if node.is_dir() { "/" } else { "" };
        lines.push(format!("{prefix}{TREE_BRANCH}{name}{marker}"));
        if let Node::Dir(child) = node {
            render_dir(child, &format!("{prefix}{TREE_INDENT}"), lines);
        }
    }
}

fn collect_dirs(dir: &DirNode, path: &NodePath, found: &mut Vec<NodePath>) {
    found.push(path.clone());
    for (name, node) in dir.entries() {
        if let Node::Dir(child) = node {
            collect_dirs(child, &path.join(name), found);
        }
    }
}
