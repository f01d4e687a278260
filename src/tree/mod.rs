//! Van Emde Boas tree structure and main API.

mod iter;
mod query;
mod state;
mod tree;

pub use iter::Iter;
pub use tree::VebTree;
