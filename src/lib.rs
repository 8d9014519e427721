//! This crate exposes a linked Binary Search Tree (BST) used as an ordered container.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores the value
//! that was inserted and may have up to two child `Node`s. The invariant
//! maintained by [`Tree`] is:
//!
//! 1. For every `Node`, the values in its left subtree are less than its own value.
//! 2. For every `Node`, the values in its right subtree are greater than or equal to its own
//!    value. Equal values are stored again rather than overwritten.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for a value takes `O(height)` (where `height` is the longest
//! path from the root `Node` to a leaf `Node`). [`Tree`] never rebalances on its
//! own, so inserting sorted input yields a tree whose height equals its size minus one.
//! [`Tree::rebalance`] rebuilds it with `O(lg N)` height on demand. BSTs also
//! naturally support sorted iteration by visiting the left subtree, then the
//! subtree root, then the right subtree (see [`Tree::inorder`]).
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger itself.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
pub mod iter;
pub mod linked;

pub use error::{Error, Result};
pub use linked::Tree;
