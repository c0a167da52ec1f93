//! A skiplist is a way of storing elements in such a way that elements can be efficiently
//! accessed, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where we each node `[x]` has references to nodes further down the list, allowing the algorithm
//! to effectively skip ahead.
//!
//! Every link also records how many elements it jumps over.  Summing those lengths along a search
//! gives the position of an element, so the list can be indexed (`get`) and ranked (`rank`) in
//! `O(log(n))` as well.
//!
//! The ordered skiplist has an associated sorting function which **must** be well-behaved.
//! Specifically, given some ordering function `f(a, b)`, it must satisfy the folowing properties:
//!
//! - Be well defined: `f(a, b)` should always return the same value
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less` and `f(a, b) == Equal == f(b, a)`.
//! - By transitive: If `f(a, b) == Greater` and `f(b, c) == Greater` then `f(a, c) == Greater`.
//!
//! Failure to satisfy these properties leaves the order of the elements unspecified.  Nodes are
//! kept in an arena and refer to each other by index, so no ordering function can cause memory
//! unsafety.

extern crate rand;

mod cursor;
mod error;
mod level_generator;
pub mod ordered_skiplist;
mod rebuild;
mod skipnode;

pub use cursor::{Cursor, CursorState};
pub use error::SkipListError;
pub use level_generator::{GeometricalLevelGenerator, LevelGenerator};
pub use ordered_skiplist::{Iter, OrderedSkipList};
