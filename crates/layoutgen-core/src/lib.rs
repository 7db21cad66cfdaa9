//! Procedural warehouse layout engine.
//!
//! Turns a small set of facility parameters (envelope, inlet/outlet sizes,
//! occupancy ratio) into recipes: fully placed entity groups for renderers
//! and for the gas-dispersal meshing pipeline. Everything here is pure
//! computation; randomness is an explicit `Rng` handle.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`assets`] | Asset catalog: category → ordered `(asset, mockup)` pairs |
//! | [`components`] | `Vec3`, face `Rect`, and the placed `Entity` |
//! | [`config`] | JSON generator configuration and validation |
//! | [`error`] | `LayoutError` and the crate `Result` alias |
//! | [`generation`] | Facility templates, boundaries, interior, boolean solids, dressing |
//! | [`persistence`] | Recipe documents on disk, keyed by type and instance id |
//! | [`recipe`] | Per-instance recipe assembly and seeded batch generation |
//! | [`validation`] | Integrity checks over generated or loaded recipes |

pub mod assets;
pub mod components;
pub mod config;
pub mod error;
pub mod generation;
pub mod persistence;
pub mod recipe;
pub mod validation;

pub use config::GeneratorConfig;
pub use error::{LayoutError, Result};
pub use recipe::{generate_batch, Recipe};
