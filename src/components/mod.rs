//! Pipeline components.

pub mod recipe_graph;
