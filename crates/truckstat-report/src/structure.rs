//! Box-drawing rendering of the whole document tree.

use std::fmt::Write;

use truckstat_core::{NodeKind, TreeNode};

use crate::format::format_size;

const BRANCH: &str = "\u{251c}\u{2500}\u{2500} ";
const LAST_BRANCH: &str = "\u{2514}\u{2500}\u{2500} ";
const PIPE: &str = "\u{2502}   ";
const SPACE: &str = "    ";

/// Render `root` and every descendant, one node per line.
///
/// Files are annotated with size and commit count, plus `[BINARY]` for
/// binary files. Nodes of unknown type are skipped along with their
/// subtrees, and do not count as siblings when choosing connectors.
///
/// # Examples
///
/// ```
/// use truckstat_core::TreeNode;
/// use truckstat_report::structure::render_structure;
///
/// let root = TreeNode::tree("repo", vec![
///     TreeNode::blob("a.ts").with_size(10).with_commits(1),
/// ]);
/// let tree = render_structure(&root);
/// assert_eq!(
///     tree,
///     "\u{2514}\u{2500}\u{2500} repo\n    \u{2514}\u{2500}\u{2500} a.ts (10.0 B, 1 commits)\n"
/// );
/// ```
pub fn render_structure(root: &TreeNode) -> String {
    let mut out = String::new();
    if root.kind == NodeKind::Unknown {
        return out;
    }

    let mut stack: Vec<(&TreeNode, String, bool)> = vec![(root, String::new(), true)];
    while let Some((node, prefix, is_last)) = stack.pop() {
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let _ = write!(out, "{prefix}{connector}{}", node.name);
        if node.is_blob() {
            let _ = write!(
                out,
                " ({}, {} commits)",
                format_size(node.size_in_bytes),
                node.no_commits
            );
            if node.is_binary {
                out.push_str(" [BINARY]");
            }
        }
        out.push('\n');

        if node.is_tree() {
            let children: Vec<&TreeNode> = node
                .children
                .iter()
                .filter(|child| child.kind != NodeKind::Unknown)
                .collect();
            let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
            let count = children.len();
            for (i, child) in children.into_iter().enumerate().rev() {
                stack.push((child, child_prefix.clone(), i + 1 == count));
            }
        }
    }
    out
}
