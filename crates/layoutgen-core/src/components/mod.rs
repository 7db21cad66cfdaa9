//! Components - plain data making up a recipe.

mod common;
mod entity;

pub use common::*;
pub use entity::*;
