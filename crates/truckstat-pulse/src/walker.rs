//! Depth-first traversal of the contribution tree.
//!
//! Every analyzer is a [`TreeVisitor`]; [`walk`] drives it over the tree so
//! no analyzer re-implements the recursion.

use truckstat_core::{ContributionDocument, NodeKind, TreeNode};

/// Receives every file node reached by [`walk`].
///
/// Implemented for any `FnMut(&TreeNode, &str)`, so a closure works too.
///
/// # Examples
///
/// ```
/// use truckstat_core::TreeNode;
/// use truckstat_pulse::walker::walk;
///
/// let root = TreeNode::tree("repo", vec![
///     TreeNode::tree("src", vec![TreeNode::blob("main.ts")]),
///     TreeNode::blob("README.md"),
/// ]);
/// let mut paths = Vec::new();
/// walk(&root, &mut |_: &TreeNode, path: &str| paths.push(path.to_string()));
/// assert_eq!(paths, vec!["src/main.ts", "README.md"]);
/// ```
pub trait TreeVisitor {
    /// Called once per blob with its derived path.
    fn visit_blob(&mut self, node: &TreeNode, path: &str);
}

impl<F> TreeVisitor for F
where
    F: FnMut(&TreeNode, &str),
{
    fn visit_blob(&mut self, node: &TreeNode, path: &str) {
        self(node, path)
    }
}

/// Walk `root` pre-order, calling `visitor` for each blob.
///
/// Children are visited in document order. Directories are descended
/// into but never visited; nodes of unknown kind are skipped along with
/// anything below them. The root's own path is empty, so its children's
/// paths are just their names. Returns the number of blobs visited.
///
/// Uses an explicit stack, so deep trees cannot overflow the call stack.
pub fn walk<V>(root: &TreeNode, visitor: &mut V) -> usize
where
    V: TreeVisitor + ?Sized,
{
    let mut visited = 0;
    let mut stack: Vec<(&TreeNode, String)> = vec![(root, String::new())];

    while let Some((node, path)) = stack.pop() {
        match node.kind {
            NodeKind::Blob => {
                visitor.visit_blob(node, &path);
                visited += 1;
            }
            NodeKind::Tree => {
                // Reversed so the first child is popped first.
                for child in node.children.iter().rev() {
                    stack.push((child, child_path(&path, &child.name)));
                }
            }
            NodeKind::Unknown => {}
        }
    }

    visited
}

/// Walk the document's tree, if it has one. Returns the number of blobs visited.
pub fn walk_document<V>(doc: &ContributionDocument, visitor: &mut V) -> usize
where
    V: TreeVisitor + ?Sized,
{
    match &doc.simplified_tree {
        Some(root) => walk(root, visitor),
        None => 0,
    }
}

/// Join a parent path and a child name.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::walker::child_path;
///
/// assert_eq!(child_path("", "src"), "src");
/// assert_eq!(child_path("src", "lib.rs"), "src/lib.rs");
/// ```
pub fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Directory part of a derived path; empty for top-level files.
///
/// # Examples
///
/// ```
/// use truckstat_pulse::walker::parent_dir;
///
/// assert_eq!(parent_dir("apps/web/page.tsx"), "apps/web");
/// assert_eq!(parent_dir("README.md"), "");
/// ```
pub fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}
