pub mod search_field;
pub mod view_tree;

pub use search_field::*;
pub use view_tree::*;
