pub mod arena;
pub mod avl_tree;
pub mod red_black_tree;
pub mod traverse;
