//! Walking the Figma document tree towards a configured frame.

use crate::types::FigmaNode;

/// Direct child of `node` named `name`, if any.
pub fn find_child<'a>(node: &'a FigmaNode, name: &str) -> Option<&'a FigmaNode> {
    node.children.iter().find(|child| child.name == name)
}

/// Descends from `root` one path segment at a time.
///
/// The walk stops at the first segment that has no matching child and returns
/// the node reached so far, so a path whose first segment is unknown yields
/// `root` itself. An empty path also yields `root`.
pub fn resolve_path<'a, S: AsRef<str>>(root: &'a FigmaNode, path: &[S]) -> &'a FigmaNode {
    let mut current = root;
    for segment in path {
        match find_child(current, segment.as_ref()) {
            Some(child) => current = child,
            None => break,
        }
    }
    current
}
