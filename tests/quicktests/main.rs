//! Property tests against the public API of `linked_bst`.

mod tree;
