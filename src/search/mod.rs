//! Search layer facade.
//!
//! - **[`query`]**: the pure substring filter run on every keystroke.
//! - **[`store`]**: the shared, wholesale-replaceable index the filter reads.

pub mod query;
pub mod store;

pub use query::search;
pub use store::{IndexOrigin, IndexStore};
