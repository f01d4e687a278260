//! # veb-tree
//!
//! Ordered integer set over a fixed universe [0, U) backed by a
//! Van Emde Boas tree. O(1) min/max. Stable O(log log U) latency.
//!
//! ## Features
//! - O(1) min/max
//! - O(log log U) insert, remove, contains, successor, predecessor
//! - Lazy cluster allocation: memory tracks stored keys, not the universe
//! - Ascending iteration via repeated successor
//! - no_std compatible (requires alloc)

#![no_std]

extern crate alloc;

mod error;
mod tree;
mod universe;

pub use error::{Result, VebError};
pub use tree::{Iter, VebTree};
