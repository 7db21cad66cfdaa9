//! Generator configuration, loaded from a JSON document.
//!
//! Every field has a default, so a config file only needs the settings it
//! changes:
//!
//! ```json
//! { "env_type": "wh_complex", "env_amount": 4, "env_size": [15, 15, 8], "seed": 42 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::AssetCatalog;
use crate::components::Vec3;
use crate::error::{LayoutError, Result};
use crate::generation::{Facility, FacilityParams, FacilityType};

pub const DEFAULT_ASSET_ROOT: &str = "content/ov-industrial3dpack-01-100.1.1";
pub const DEFAULT_PROPS_ROOT: &str = "content/isaac-simple-warehouse/Props";
pub const DEFAULT_MOCKUP_ROOT: &str = "assets/mockup";
pub const DEFAULT_RECIPE_DIR: &str = "environments/recipes";

/// Settings for one batch of recipes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub env_type: FacilityType,
    /// Number of instances to generate.
    pub env_amount: usize,
    /// Envelope `[X, Y, Z]` in metres.
    pub env_size: [f64; 3],
    /// Inlet `[Y, Z]`.
    pub inlet_size: [f64; 2],
    /// Outlet `[Y, Z]`.
    pub outlet_size: [f64; 2],
    /// Least fraction of rack positions that are filled.
    #[serde(alias = "emptyfullrackdiv")]
    pub occupancy_ratio: f64,
    /// Use the plain wall variant on every layer.
    pub white_walls: bool,
    /// Extra wall height stacked above the envelope.
    pub wall_headroom: f64,
    /// Base seed; instance `i` uses `seed + i`. Entropy when absent.
    pub seed: Option<u64>,
    pub recipe_dir: PathBuf,
    pub assets: AssetCatalog,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let params = FacilityParams::default();
        Self {
            env_type: params.facility_type,
            env_amount: 2,
            env_size: params.envelope.to_array(),
            inlet_size: params.inlet,
            outlet_size: params.outlet,
            occupancy_ratio: params.occupancy_ratio,
            white_walls: params.white_walls,
            wall_headroom: params.wall_headroom,
            seed: None,
            recipe_dir: PathBuf::from(DEFAULT_RECIPE_DIR),
            assets: AssetCatalog::industrial_pack(
                Path::new(DEFAULT_ASSET_ROOT),
                Path::new(DEFAULT_PROPS_ROOT),
                Path::new(DEFAULT_MOCKUP_ROOT),
            ),
        }
    }
}

impl GeneratorConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LayoutError::io(path, e))?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Facility parameters shared by every instance of the batch.
    pub fn facility_params(&self) -> FacilityParams {
        FacilityParams {
            facility_type: self.env_type,
            envelope: Vec3::from(self.env_size),
            inlet: self.inlet_size,
            outlet: self.outlet_size,
            occupancy_ratio: self.occupancy_ratio,
            white_walls: self.white_walls,
            wall_headroom: self.wall_headroom,
        }
    }

    /// Check the batch size, then build the facility. Building it validates
    /// the parameters and the asset catalog once.
    pub fn facility(&self) -> Result<Facility<'_>> {
        if self.env_amount == 0 {
            return Err(LayoutError::invalid(
                "env_amount",
                self.env_amount,
                "at least one instance is required",
            ));
        }
        Facility::new(self.facility_params(), &self.assets)
    }

    pub fn validate(&self) -> Result<()> {
        self.facility().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCategory;
    use std::io::Write;

    #[test]
    fn defaults_match_reference_settings() {
        let config = GeneratorConfig::default();
        assert_eq!(config.env_type, FacilityType::Simple);
        assert_eq!(config.env_amount, 2);
        assert_eq!(config.env_size, [10.0, 16.0, 8.0]);
        assert_eq!(config.inlet_size, [1.2, 2.4]);
        assert_eq!(config.outlet_size, [1.5, 2.4]);
        assert_eq!(config.occupancy_ratio, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_document_keeps_defaults() {
        let config =
            GeneratorConfig::from_json(r#"{"env_amount": 5, "seed": 42, "white_walls": true}"#)
                .unwrap();
        assert_eq!(config.env_amount, 5);
        assert_eq!(config.seed, Some(42));
        assert!(config.white_walls);
        assert_eq!(config.env_size, [10.0, 16.0, 8.0]);
        assert_eq!(config.assets.pairs(AssetCategory::Walls).len(), 4);
    }

    #[test]
    fn legacy_ratio_key_is_accepted() {
        let config = GeneratorConfig::from_json(r#"{"emptyfullrackdiv": 0.25}"#).unwrap();
        assert_eq!(config.occupancy_ratio, 0.25);
    }

    #[test]
    fn zero_instances_rejected() {
        match GeneratorConfig::from_json(r#"{"env_amount": 0}"#) {
            Err(LayoutError::InvalidParameter { name, .. }) => assert_eq!(name, "env_amount"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn complex_outside_calibration_rejected() {
        let err = GeneratorConfig::from_json(r#"{"env_type": "wh_complex"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::UncalibratedComplexLayout { .. }));

        let ok = GeneratorConfig::from_json(
            r#"{"env_type": "wh_complex", "env_size": [15.0, 15.0, 8.0]}"#,
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn unknown_type_is_a_json_error() {
        let err = GeneratorConfig::from_json(r#"{"env_type": "wh_tiny"}"#).unwrap_err();
        assert!(matches!(err, LayoutError::Json(_)));
    }

    #[test]
    fn custom_catalog_must_cover_used_slots() {
        let json = r#"{
            "assets": {
                "floors": [{"asset": "floor.usd"}],
                "walls": [{"asset": "a.usd"}, {"asset": "b.usd"}],
                "lights": [{"asset": "off.usd"}, {"asset": "on.usd"}]
            }
        }"#;
        match GeneratorConfig::from_json(json) {
            Err(LayoutError::MissingAsset { category, .. }) => {
                assert_eq!(category, AssetCategory::Walls)
            }
            other => panic!("expected MissingAsset, got {other:?}"),
        }
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"env_size": [12.0, 20.0, 9.0]}}"#).unwrap();
        let config = GeneratorConfig::load(file.path()).unwrap();
        assert_eq!(config.facility_params().envelope, Vec3::new(12.0, 20.0, 9.0));

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            GeneratorConfig::load(&missing),
            Err(LayoutError::Io { .. })
        ));
    }
}
