//! CLI command implementations.

pub mod keymap;
pub mod render;
pub mod routes;
