//! A linked BST. Every node exclusively owns its two optional children and there are no parent
//! pointers. The tree never rebalances itself: call [`Tree::rebalance`] when
//! [`Tree::is_balanced`] says the shape has degraded.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree: Tree<_> = [1, 3, 2, 4, 5, 6].into_iter().collect();
//!
//! assert!(tree.contains(&4));
//! assert_eq!(tree.find(&42), None);
//!
//! // Deleting returns the stored value, or an error if it was never there.
//! assert_eq!(tree.delete(&4), Ok(4));
//! assert_eq!(tree.delete(&4), Err(Error::NotFound));
//!
//! tree.rebalance();
//! assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 2, 3, 5, 6]);
//! assert_eq!(tree.range(&2, &5), [&2, &3, &5]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter;
use std::mem;

use crate::error::{Error, Result};
use crate::iter::{InOrder, Iter};

type Link<T> = Option<Box<Node<T>>>;

/// An unbalanced Binary Search Tree holding values of type `T`. Values equal to an existing one
/// are stored again (in the right subtree) rather than overwriting it.
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    fn children(&self) -> impl Iterator<Item = &Self> + '_ {
        self.left.as_deref().into_iter().chain(self.right.as_deref())
    }

    /// Unlinks the rightmost node of the subtree behind `link` and returns its value. The
    /// removed node has no right child so its left child takes its place.
    fn detach_max(link: &mut Link<T>) -> Option<T> {
        let mut link = link;
        while link.as_ref().is_some_and(|node| node.right.is_some()) {
            if let Some(node) = link {
                link = &mut node.right;
            }
        }

        let node = link.take()?;
        let Node { value, left, .. } = *node;
        *link = left;
        Some(value)
    }
}

/// Drops a subtree one node at a time so that dropping a skewed tree doesn't recurse once per
/// level through `Box`'s destructor.
fn teardown<T>(root: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        teardown(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of values stored in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        log::trace!("clearing tree of {} values", self.size);
        teardown(self.root.take());
        self.size = 0;
    }

    /// Pre-order iterator over the tree: each node is visited before its left subtree, which
    /// is visited before its right subtree. This is also what iterating over `&Tree` gives.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.iter().collect::<Vec<_>>(), [&2, &1, &3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.size)
    }

    /// In-order iterator over the tree, yielding values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&1, &2, &3]);
    /// ```
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref(), self.size)
    }

    /// Post-order traversal. Not supported yet: this always yields nothing.
    pub fn postorder(&self) -> iter::Empty<&T> {
        log::debug!("post-order traversal is not supported");
        iter::empty()
    }

    /// Level-order traversal. Not supported yet: this always yields nothing.
    pub fn levelorder(&self) -> iter::Empty<&T> {
        log::debug!("level-order traversal is not supported");
        iter::empty()
    }

    /// Consumes the tree, returning its values in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.take_sorted()
    }

    /// Moves every value out in ascending order, leaving the tree empty.
    fn take_sorted(&mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.size);
        let mut pending = Vec::new();
        let mut current = self.root.take();
        self.size = 0;

        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                pending.push(node);
            }
            let Some(node) = pending.pop() else {
                break;
            };
            let Node { value, right, .. } = *node;
            sorted.push(value);
            current = right;
        }

        sorted
    }

    /// The number of edges on the longest path from the root down to a leaf. A tree with a
    /// single value (and an empty tree) has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<_> = self.root.as_deref().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.children().map(|child| (child, depth + 1)));
        }

        height
    }

    /// A loose balance check: `height < 2 * log2(len + 1) - 1`. This is not AVL balance; it only
    /// says whether [`rebalance`][Self::rebalance] is worth calling.
    ///
    /// An empty tree is reported as balanced even though the formula alone would give
    /// `0 < -1`: there is nothing to rebuild.
    pub fn is_balanced(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let bound = 2.0 * ((self.size + 1) as f64).log2() - 1.0;
        (self.height() as f64) < bound
    }
}

impl<T: Ord> Tree<T> {
    /// Potentially finds the stored value equal to `value`. If no node holds such a value,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1), Some(&1));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }

        None
    }

    /// Whether a value equal to `value` is stored in the tree.
    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Inserts the value into the tree. Values less than a node go to its left, everything
    /// else (including equal values) goes to its right.
    ///
    /// Nothing is rebalanced here: inserting values in ascending order produces a tree that is
    /// effectively a linked list, with `height() == len() - 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for x in 1..=5 {
    ///     tree.insert(x);
    /// }
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn insert(&mut self, value: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if value < node.value {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        *link = Some(Node::new_boxed(value));
        self.size += 1;
    }

    /// Deletes a node holding `value` from the tree and returns its value. If the tree doesn't
    /// contain the value, [`Error::NotFound`] is returned and the tree is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.delete(&2), Ok(2));
    /// assert_eq!(tree.delete(&2), Err(Error::NotFound));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, value: &T) -> Result<T> {
        // `link` is the slot owning the node under inspection, which makes the root no
        // different from any other child.
        let mut link = &mut self.root;
        while link.as_ref().is_some_and(|node| node.value != *value) {
            if let Some(node) = link {
                link = if *value < node.value {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
        }

        let mut node = link.take().ok_or(Error::NotFound)?;
        let removed = if node.right.is_some() {
            match Node::detach_max(&mut node.left) {
                // Two children: the largest value on the left takes this node's place.
                Some(max) => {
                    let removed = mem::replace(&mut node.value, max);
                    *link = Some(node);
                    removed
                }
                None => {
                    let Node { value, right, .. } = *node;
                    *link = right;
                    value
                }
            }
        } else {
            let Node { value, left, .. } = *node;
            *link = left;
            value
        };

        self.size -= 1;
        debug_assert_eq!(self.size == 0, self.root.is_none());
        Ok(removed)
    }

    /// Overwrites the stored value equal to `value` with `new_value` and returns the old one,
    /// or `None` if `value` isn't stored.
    ///
    /// The node stays where it is. If `new_value` doesn't sort into the same position the
    /// search order is broken and later lookups may miss values.
    pub fn replace(&mut self, value: &T, new_value: T) -> Option<T> {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match value.cmp(&node.value) {
                Ordering::Equal => return Some(mem::replace(&mut node.value, new_value)),
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }

        None
    }

    /// Returns the first value greater than `value` met while walking right from the root.
    ///
    /// This only looks along the right spine, so it is the true successor only when the
    /// answer lies on that path. For example, in a tree built from `[2, 6, 5]` the successor
    /// of `4` is reported as `6`.
    pub fn successor(&self, value: &T) -> Option<&T> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if *value < node.value {
                return Some(&node.value);
            }
            current = node.right.as_deref();
        }

        None
    }

    /// Returns the last value less than `value` met while walking right from the root.
    ///
    /// Like [`successor`][Self::successor], this only follows the right spine and never looks
    /// into left subtrees.
    pub fn predecessor(&self, value: &T) -> Option<&T> {
        let mut previous: Option<&Node<T>> = None;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.value >= *value {
                return previous.map(|node| &node.value);
            }
            if node.right.is_none() {
                return Some(&node.value);
            }
            previous = Some(node);
            current = node.right.as_deref();
        }

        None
    }

    /// Returns every stored value `v` with `low <= v <= high`, in ascending order. Subtrees that
    /// can't hold such values are never visited. If `low > high` nothing is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(tree.range(&3, &5), [&3, &4, &5]);
    /// assert!(tree.range(&5, &3).is_empty());
    /// ```
    pub fn range(&self, low: &T, high: &T) -> Vec<&T> {
        match self.root.as_deref() {
            Some(root) if low <= high => collect_range(root, low, high),
            _ => Vec::new(),
        }
    }

    /// Rebuilds the tree with minimal height. The values are taken out in sorted order and
    /// re-inserted middle first, so the result doesn't depend on the previous shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=6).collect();
    /// assert!(!tree.is_balanced());
    ///
    /// tree.rebalance();
    /// assert!(tree.is_balanced());
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = log::log_enabled!(log::Level::Debug).then(|| self.height());

        let mut sorted: Vec<_> = self.take_sorted().into_iter().map(Some).collect();
        self.rebuild(&mut sorted);

        if let Some(height_before) = height_before {
            log::debug!(
                "rebalanced {} values: height {} -> {}",
                self.size,
                height_before,
                self.height()
            );
        }
    }

    /// Inserts the sorted `values` so that each middle element ends up above its halves.
    /// Every slot is `Some` on entry and `None` on return.
    fn rebuild(&mut self, values: &mut [Option<T>]) {
        if values.len() < 3 {
            for value in values.iter_mut().filter_map(Option::take) {
                self.insert(value);
            }
            return;
        }

        let pivot = values.len() / 2;
        let (left, rest) = values.split_at_mut(pivot);
        let (middle, right) = rest.split_at_mut(1);
        if let Some(value) = middle[0].take() {
            self.insert(value);
        }
        self.rebuild(left);
        self.rebuild(right);
    }
}

/// In-order walk for [`Tree::range`] that skips subtrees which can't hold values in
/// `[low, high]`. Uses an explicit stack, so skewed trees don't recurse once per level.
fn collect_range<'a, T: Ord>(root: &'a Node<T>, low: &T, high: &T) -> Vec<&'a T> {
    let mut found = Vec::new();
    let mut pending = Vec::new();
    let mut current = Some(root);

    // Left descendants are `<=` a node and right descendants `>=`, so bounds equal to a
    // node's value still have to look on that side for duplicates.
    loop {
        while let Some(node) = current {
            pending.push(node);
            current = if *low <= node.value {
                node.left.as_deref()
            } else {
                None
            };
        }
        let Some(node) = pending.pop() else {
            return found;
        };
        if *low <= node.value && node.value <= *high {
            found.push(&node.value);
        }
        current = if node.value <= *high {
            node.right.as_deref()
        } else {
            None
        };
    }
}

impl<T: Ord> FromIterator<T> for Tree<T> {
    /// Inserts the values one by one in iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tree = Self::new();
        tree.extend(values);
        tree
    }
}

impl<T: Ord> Extend<T> for Tree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inorder()).finish()
    }
}

/// Draws the tree rotated 90 degrees counterclockwise: the root is in the first column, right
/// subtrees are above their parent and each level deeper is indented by one `"| "`.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = Vec::new();
        let mut current = self.root.as_deref().map(|root| (root, 0));

        // Reverse in-order: right subtree, node, left subtree.
        loop {
            while let Some((node, level)) = current {
                pending.push((node, level));
                current = node.right.as_deref().map(|right| (right, level + 1));
            }
            let Some((node, level)) = pending.pop() else {
                return Ok(());
            };
            writeln!(f, "{}{}", "| ".repeat(level), node.value)?;
            current = node.left.as_deref().map(|left| (left, level + 1));
        }
    }
}
