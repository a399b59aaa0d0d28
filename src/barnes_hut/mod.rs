mod quad_node;
mod node_arena;
mod barnes_hut_tree;
mod barnes_hut_forces;

pub use quad_node::*;
pub use node_arena::*;
pub use barnes_hut_tree::*;
pub use barnes_hut_forces::*;
