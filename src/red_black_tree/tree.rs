use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::node::{Color, Link, Node};
use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::error;
use std::fmt;

/// A broken red black tree invariant reported by `Tree::validate`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// The root node is red.
    RedRoot,
    /// A red node has a red child.
    RedViolation,
    /// Two paths from the same node to an absent child pass through different numbers of black
    /// nodes.
    BlackHeightMismatch,
    /// A key is not strictly between the keys of its ancestors.
    OutOfOrder,
    /// A child's parent link does not point back at its parent.
    BrokenParentLink,
    /// The stored length disagrees with the number of reachable nodes.
    LengthMismatch { expected: usize, actual: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RedRoot => write!(f, "root node is red"),
            Violation::RedViolation => write!(f, "red node has a red child"),
            Violation::BlackHeightMismatch => write!(f, "black height differs between paths"),
            Violation::OutOfOrder => write!(f, "keys are out of order"),
            Violation::BrokenParentLink => write!(f, "child does not link back to its parent"),
            Violation::LengthMismatch { expected, actual } => {
                write!(f, "expected {} nodes, found {}", expected, actual)
            },
        }
    }
}

impl error::Error for Violation {}

/// An arena-backed red black tree with parent links.
pub struct Tree<T> {
    nodes: TypedArena<Node<T>>,
    root: Link,
    len: usize,
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Tree {
            nodes: TypedArena::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    fn is_red(&self, link: Link) -> bool {
        match link {
            None => false,
            Some(handle) => self.nodes[handle].is_red(),
        }
    }

    fn set_color(&mut self, link: Link, color: Color) {
        if let Some(handle) = link {
            self.nodes[handle].color = color;
        }
    }

    // precondition: both children of the node exist
    fn flip_colors(&mut self, handle: Handle) {
        let Node { left, right, .. } = self.nodes[handle];
        for child in [Some(handle), left, right].iter() {
            let child = child.expect("Expected both child nodes to be `Some`.");
            self.nodes[child].color = self.nodes[child].color.flip();
        }
    }

    fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes[handle].left {
            handle = left;
        }
        handle
    }

    fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes[handle].right {
            handle = right;
        }
        handle
    }

    // Points the slot that held `old` under `parent` (or the root slot) at `new`. The parent link
    // of `new` is left to the caller.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = &mut self.nodes[parent];
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            },
        }
    }

    fn transplant(&mut self, old: Handle, new: Link) {
        let parent = self.nodes[old].parent;
        self.replace_child(parent, old, new);
        if let Some(new) = new {
            self.nodes[new].parent = parent;
        }
    }

    // Promotes the right child of `handle` into its position and returns the new subtree root.
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let child = self.nodes[handle]
            .right
            .expect("Expected right child node to be `Some`.");
        let inner = self.nodes[child].left;
        self.nodes[handle].right = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(handle);
        }
        self.transplant(handle, Some(child));
        self.nodes[child].left = Some(handle);
        self.nodes[handle].parent = Some(child);
        child
    }

    // Promotes the left child of `handle` into its position and returns the new subtree root.
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let child = self.nodes[handle]
            .left
            .expect("Expected left child node to be `Some`.");
        let inner = self.nodes[child].right;
        self.nodes[handle].left = inner;
        if let Some(inner) = inner {
            self.nodes[inner].parent = Some(handle);
        }
        self.transplant(handle, Some(child));
        self.nodes[child].right = Some(handle);
        self.nodes[handle].parent = Some(child);
        child
    }

    fn find<V>(&self, key: &V) -> Link
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            curr = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts `key` and returns `true`. Returns `false` and leaves the tree untouched if an equal
    /// key is already stored.
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        let mut parent = None;
        let mut curr = self.root;
        let mut is_left = false;
        while let Some(handle) = curr {
            let node = &self.nodes[handle];
            match key.cmp(&node.key) {
                Ordering::Less => {
                    is_left = true;
                    curr = node.left;
                },
                Ordering::Greater => {
                    is_left = false;
                    curr = node.right;
                },
                Ordering::Equal => return false,
            }
            parent = Some(handle);
        }

        let handle = self.nodes.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) if is_left => self.nodes[parent].left = Some(handle),
            Some(parent) => self.nodes[parent].right = Some(handle),
        }
        self.len += 1;

        self.insert_fixup(handle);
        true
    }

    // Repairs a red node whose parent may also be red.
    fn insert_fixup(&mut self, mut handle: Handle) {
        while let Some(parent) = self.nodes[handle].parent {
            if !self.nodes[parent].is_red() {
                break;
            }
            // a red parent is never the root, so the grandparent exists
            let grandparent = self.nodes[parent]
                .parent
                .expect("Expected red node to have a parent.");
            let parent_is_left = self.nodes[grandparent].left == Some(parent);
            let uncle = if parent_is_left {
                self.nodes[grandparent].right
            } else {
                self.nodes[grandparent].left
            };

            if self.is_red(uncle) {
                self.flip_colors(grandparent);
                handle = grandparent;
                continue;
            }

            let is_left = self.nodes[parent].left == Some(handle);
            let top = match (parent_is_left, is_left) {
                (true, true) => self.rotate_right(grandparent),
                (true, false) => {
                    self.rotate_left(parent);
                    self.rotate_right(grandparent)
                },
                (false, false) => self.rotate_left(grandparent),
                (false, true) => {
                    self.rotate_right(parent);
                    self.rotate_left(grandparent)
                },
            };
            let Node { left, right, .. } = self.nodes[top];
            self.nodes[top].color = Color::Black;
            self.set_color(left, Color::Red);
            self.set_color(right, Color::Red);
            break;
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Removes the node holding `key` and returns its key, or `None` if no such node exists.
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let handle = self.find(key)?;
        let Node {
            left,
            right,
            parent,
            color,
            ..
        } = self.nodes[handle];

        // `child` takes over the vacated slot below `child_parent`; it may be absent.
        let (child, child_parent, removed_color) = match (left, right) {
            (None, _) => {
                self.transplant(handle, right);
                (right, parent, color)
            },
            (_, None) => {
                self.transplant(handle, left);
                (left, parent, color)
            },
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_color = self.nodes[successor].color;
                let child = self.nodes[successor].right;
                let child_parent = if successor == right {
                    successor
                } else {
                    let successor_parent = self.nodes[successor].parent;
                    self.transplant(successor, child);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                    successor_parent.expect("Expected successor to have a parent.")
                };
                self.transplant(handle, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                self.nodes[successor].color = color;
                (child, Some(child_parent), successor_color)
            },
        };

        let node = self.nodes.free(handle);
        self.len -= 1;

        if removed_color == Color::Black {
            self.remove_fixup(child, child_parent);
        }
        Some(node.key)
    }

    // Restores black height after a black node was removed above `curr`. `curr` carries the
    // extra black and may be the absent position below `parent`.
    fn remove_fixup(&mut self, mut curr: Link, mut parent: Link) {
        while curr != self.root && !self.is_red(curr) {
            let parent_handle = match parent {
                Some(parent_handle) => parent_handle,
                None => break,
            };

            if self.nodes[parent_handle].left == curr {
                let mut sibling = self.nodes[parent_handle]
                    .right
                    .expect("Expected sibling of a double black node.");
                if self.nodes[sibling].is_red() {
                    self.nodes[sibling].color = Color::Black;
                    self.nodes[parent_handle].color = Color::Red;
                    self.rotate_left(parent_handle);
                    sibling = self.nodes[parent_handle]
                        .right
                        .expect("Expected sibling of a double black node.");
                }

                let Node { left, right, .. } = self.nodes[sibling];
                if !self.is_red(left) && !self.is_red(right) {
                    self.nodes[sibling].color = Color::Red;
                    curr = parent;
                    parent = self.nodes[parent_handle].parent;
                } else {
                    if !self.is_red(right) {
                        self.set_color(left, Color::Black);
                        self.nodes[sibling].color = Color::Red;
                        self.rotate_right(sibling);
                        sibling = self.nodes[parent_handle]
                            .right
                            .expect("Expected sibling of a double black node.");
                    }
                    self.nodes[sibling].color = self.nodes[parent_handle].color;
                    self.nodes[parent_handle].color = Color::Black;
                    let far = self.nodes[sibling].right;
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent_handle);
                    curr = self.root;
                    parent = None;
                }
            } else {
                let mut sibling = self.nodes[parent_handle]
                    .left
                    .expect("Expected sibling of a double black node.");
                if self.nodes[sibling].is_red() {
                    self.nodes[sibling].color = Color::Black;
                    self.nodes[parent_handle].color = Color::Red;
                    self.rotate_right(parent_handle);
                    sibling = self.nodes[parent_handle]
                        .left
                        .expect("Expected sibling of a double black node.");
                }

                let Node { left, right, .. } = self.nodes[sibling];
                if !self.is_red(left) && !self.is_red(right) {
                    self.nodes[sibling].color = Color::Red;
                    curr = parent;
                    parent = self.nodes[parent_handle].parent;
                } else {
                    if !self.is_red(left) {
                        self.set_color(right, Color::Black);
                        self.nodes[sibling].color = Color::Red;
                        self.rotate_left(sibling);
                        sibling = self.nodes[parent_handle]
                            .left
                            .expect("Expected sibling of a double black node.");
                    }
                    self.nodes[sibling].color = self.nodes[parent_handle].color;
                    self.nodes[parent_handle].color = Color::Black;
                    let far = self.nodes[sibling].left;
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent_handle);
                    curr = self.root;
                    parent = None;
                }
            }
        }
        self.set_color(curr, Color::Black);
    }

    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    pub fn min(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.leftmost(root)].key)
    }

    pub fn max(&self) -> Option<&T> {
        self.root.map(|root| &self.nodes[self.rightmost(root)].key)
    }

    // An absent subtree has height -1, so a leaf has height 0.
    fn subtree_height(&self, link: Link) -> isize {
        match link {
            None => -1,
            Some(handle) => {
                let node = &self.nodes[handle];
                1 + cmp::max(
                    self.subtree_height(node.left),
                    self.subtree_height(node.right),
                )
            },
        }
    }

    /// Returns the number of edges on the longest path from the root to a leaf. Both the empty
    /// tree and a single node tree have height 0.
    pub fn height(&self) -> usize {
        cmp::max(self.subtree_height(self.root), 0) as usize
    }

    fn subtree_count_black(&self, link: Link) -> usize {
        match link {
            None => 0,
            Some(handle) => {
                let node = &self.nodes[handle];
                let count = self.subtree_count_black(node.left) + self.subtree_count_black(node.right);
                if node.is_red() {
                    count
                } else {
                    count + 1
                }
            },
        }
    }

    /// Returns the total number of black nodes in the tree.
    pub fn count_black(&self) -> usize {
        self.subtree_count_black(self.root)
    }

    pub fn iter(&self) -> TreeIter<'_, T> {
        TreeIter {
            tree: self,
            current: self.root,
            stack: Vec::new(),
        }
    }

    /// Renders the tree sideways, one node per line, annotating every key with its color.
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        let mut ret = String::new();
        self.render_subtree(self.root, "", true, &mut ret);
        ret
    }

    fn render_subtree(&self, link: Link, indent: &str, last: bool, out: &mut String)
    where
        T: fmt::Display,
    {
        if let Some(handle) = link {
            let node = &self.nodes[handle];
            let (branch, padding) = if last {
                ("R----", "     ")
            } else {
                ("L----", "|    ")
            };
            out.push_str(&format!("{}{}{}({})\n", indent, branch, node.key, node.color));
            let indent = format!("{}{}", indent, padding);
            self.render_subtree(node.left, &indent, false, out);
            self.render_subtree(node.right, &indent, true, out);
        }
    }

    /// Checks every red black tree invariant and returns the first one that is broken.
    pub fn validate(&self) -> Result<(), Violation>
    where
        T: Ord,
    {
        if self.is_red(self.root) {
            return Err(Violation::RedRoot);
        }
        if let Some(root) = self.root {
            if self.nodes[root].parent.is_some() {
                return Err(Violation::BrokenParentLink);
            }
        }

        let mut count = 0;
        self.validate_subtree(self.root, None, None, &mut count)?;
        if count != self.len || self.nodes.len() != self.len {
            return Err(Violation::LengthMismatch {
                expected: self.len,
                actual: count,
            });
        }
        Ok(())
    }

    // Returns the black height of the subtree.
    fn validate_subtree<'a>(
        &'a self,
        link: Link,
        lower: Option<&'a T>,
        upper: Option<&'a T>,
        count: &mut usize,
    ) -> Result<usize, Violation>
    where
        T: Ord,
    {
        let handle = match link {
            None => return Ok(0),
            Some(handle) => handle,
        };
        let node = &self.nodes[handle];
        *count += 1;

        let above_lower = lower.map_or(true, |lower| node.key > *lower);
        let below_upper = upper.map_or(true, |upper| node.key < *upper);
        if !above_lower || !below_upper {
            return Err(Violation::OutOfOrder);
        }

        for child in [node.left, node.right].iter().filter_map(|child| *child) {
            if self.nodes[child].parent != Some(handle) {
                return Err(Violation::BrokenParentLink);
            }
            if node.is_red() && self.nodes[child].is_red() {
                return Err(Violation::RedViolation);
            }
        }

        let left_height = self.validate_subtree(node.left, lower, Some(&node.key), count)?;
        let right_height = self.validate_subtree(node.right, Some(&node.key), upper, count)?;
        if left_height != right_height {
            return Err(Violation::BlackHeightMismatch);
        }

        if node.is_red() {
            Ok(left_height)
        } else {
            Ok(left_height + 1)
        }
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An in-order iterator over the keys of a `Tree<T>` that keeps its own stack of pending nodes.
pub struct TreeIter<'a, T> {
    tree: &'a Tree<T>,
    current: Link,
    stack: Vec<Handle>,
}

impl<'a, T> Iterator for TreeIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(handle) = self.current {
            self.stack.push(handle);
            self.current = tree.nodes[handle].left;
        }
        self.stack.pop().map(|handle| {
            let node = &tree.nodes[handle];
            self.current = node.right;
            &node.key
        })
    }
}
