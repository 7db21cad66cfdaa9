//! Save/load recipe documents as pretty-printed JSON.
//!
//! Documents are keyed by `{env_type}_{env_id}.json` inside the recipe
//! directory; downstream exporters locate them by that name.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{LayoutError, Result};
use crate::recipe::Recipe;

pub const RECIPE_EXTENSION: &str = "json";

/// File name a recipe is stored under.
pub fn recipe_file_name(recipe: &Recipe) -> String {
    format!("{}.{RECIPE_EXTENSION}", recipe.name())
}

/// Serialize a recipe to any writer.
pub fn save_recipe<W: Write>(writer: W, recipe: &Recipe) -> Result<()> {
    serde_json::to_writer_pretty(writer, recipe)?;
    Ok(())
}

/// Deserialize a recipe from any reader.
pub fn load_recipe<R: Read>(reader: R) -> Result<Recipe> {
    Ok(serde_json::from_reader(reader)?)
}

/// Write `recipe` into `dir`, creating the directory if needed. Returns the
/// path written.
pub fn write_recipe(dir: impl AsRef<Path>, recipe: &Recipe) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| LayoutError::io(dir, e))?;

    let path = dir.join(recipe_file_name(recipe));
    let file = File::create(&path).map_err(|e| LayoutError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    save_recipe(&mut writer, recipe)?;
    writer.flush().map_err(|e| LayoutError::io(&path, e))?;

    log::debug!("wrote {}", path.display());
    Ok(path)
}

pub fn read_recipe(path: impl AsRef<Path>) -> Result<Recipe> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| LayoutError::io(path, e))?;
    load_recipe(BufReader::new(file))
}

/// Write every recipe of a batch; stops at the first failure.
pub fn write_batch(dir: impl AsRef<Path>, recipes: &[Recipe]) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    recipes.iter().map(|r| write_recipe(dir, r)).collect()
}
