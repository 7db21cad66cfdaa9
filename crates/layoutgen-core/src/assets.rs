//! Asset catalog - which renderable files and mockups each category may use.
//!
//! Every category maps to an ordered list of [`AssetPair`]s. Some generation
//! steps pick one at random (racks, piles), others index a fixed slot (the
//! four wall pieces, the lit ceiling lamp), so order is significant.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};

/// Entity categories that carry asset references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    FilledRacks,
    EmptyRacks,
    Floors,
    Walls,
    Lights,
    Forklift,
    Piles,
}

impl AssetCategory {
    pub fn all() -> &'static [AssetCategory] {
        &[
            AssetCategory::FilledRacks,
            AssetCategory::EmptyRacks,
            AssetCategory::Floors,
            AssetCategory::Walls,
            AssetCategory::Lights,
            AssetCategory::Forklift,
            AssetCategory::Piles,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetCategory::FilledRacks => "filled_racks",
            AssetCategory::EmptyRacks => "empty_racks",
            AssetCategory::Floors => "floors",
            AssetCategory::Walls => "walls",
            AssetCategory::Lights => "lights",
            AssetCategory::Forklift => "forklift",
            AssetCategory::Piles => "piles",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slots in the `walls` category.
pub mod wall_slots {
    pub const CORNER_PLAIN: usize = 0;
    pub const CORNER_ALT: usize = 1;
    pub const FLAT_PLAIN: usize = 2;
    pub const FLAT_ALT: usize = 3;
}

/// Slots in the `lights` category.
pub mod light_slots {
    pub const OFF: usize = 0;
    pub const ON: usize = 1;
}

/// A full-detail asset and its optional simplified counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPair {
    pub asset: PathBuf,
    #[serde(default)]
    pub mockup: Option<PathBuf>,
}

impl AssetPair {
    pub fn new(asset: impl Into<PathBuf>, mockup: Option<impl Into<PathBuf>>) -> Self {
        Self {
            asset: asset.into(),
            mockup: mockup.map(Into::into),
        }
    }

    pub fn asset_only(asset: impl Into<PathBuf>) -> Self {
        Self {
            asset: asset.into(),
            mockup: None,
        }
    }
}

/// Category → ordered asset pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetCatalog {
    entries: BTreeMap<AssetCategory, Vec<AssetPair>>,
}

const LONG_RACKS: &[&str] = &[
    "RackLong_A1.usd",
    "RackLong_A2.usd",
    "RackLong_A3.usd",
    "RackLong_A4.usd",
    "RackLong_A5.usd",
    "RackLong_A6.usd",
    "RackLong_A7.usd",
];
const LONG_RACK_MOCKUP: &str = "RackLong.obj";
const LONG_EMPTY_RACKS: &[(&str, &str)] = &[
    ("RackLongEmpty_A1.usd", "RackLongEmpty_A1.obj"),
    ("RackLongEmpty_A2.usd", "RackLongEmpty_A2.obj"),
];
const PILES: &[&str] = &[
    "WarehousePile_A1.usd",
    "WarehousePile_A2.usd",
    "WarehousePile_A3.usd",
    "WarehousePile_A4.usd",
    "WarehousePile_A5.usd",
    "WarehousePile_A6.usd",
    "WarehousePile_A7.usd",
];
const WALLS: &[&str] = &[
    "SM_WallA_InnerCorner.usd",
    "SM_WallB_InnerCorner.usd",
    "SM_WallA_6M.usd",
    "SM_WallB_6M.usd",
];
const LIGHTS: &[&str] = &["SM_LampCeilingA_04.usd", "SM_LampCeilingA_05.usd"];
const FLOOR: &str = "SM_floor02.usd";
const FORKLIFT: &str = "Forklift_A01_PR_V_NVD_01.usd";

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog for the industrial content pack layout.
    ///
    /// `asset_root` holds `Racks/`, `Shelves/`, `Piles/` and `Forklift/`,
    /// `props_root` the warehouse shell props (floor, walls, lamps), and
    /// `mockup_root` the simplified `Racks/` and `Shelves/` meshes.
    pub fn industrial_pack(asset_root: &Path, props_root: &Path, mockup_root: &Path) -> Self {
        let mut catalog = Self::new();

        let filled = LONG_RACKS
            .iter()
            .map(|name| {
                AssetPair::new(
                    asset_root.join("Racks").join(name),
                    Some(mockup_root.join("Racks").join(LONG_RACK_MOCKUP)),
                )
            })
            .collect();
        catalog.insert(AssetCategory::FilledRacks, filled);

        let empty = LONG_EMPTY_RACKS
            .iter()
            .map(|(asset, mockup)| {
                AssetPair::new(
                    asset_root.join("Shelves").join(asset),
                    Some(mockup_root.join("Shelves").join(mockup)),
                )
            })
            .collect();
        catalog.insert(AssetCategory::EmptyRacks, empty);

        catalog.insert(
            AssetCategory::Floors,
            vec![AssetPair::asset_only(props_root.join(FLOOR))],
        );
        catalog.insert(
            AssetCategory::Walls,
            WALLS
                .iter()
                .map(|name| AssetPair::asset_only(props_root.join(name)))
                .collect(),
        );
        catalog.insert(
            AssetCategory::Lights,
            LIGHTS
                .iter()
                .map(|name| AssetPair::asset_only(props_root.join(name)))
                .collect(),
        );
        catalog.insert(
            AssetCategory::Forklift,
            vec![AssetPair::asset_only(asset_root.join("Forklift").join(FORKLIFT))],
        );
        catalog.insert(
            AssetCategory::Piles,
            PILES
                .iter()
                .map(|name| AssetPair::asset_only(asset_root.join("Piles").join(name)))
                .collect(),
        );

        catalog
    }

    pub fn insert(&mut self, category: AssetCategory, pairs: Vec<AssetPair>) {
        self.entries.insert(category, pairs);
    }

    pub fn pairs(&self, category: AssetCategory) -> &[AssetPair] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Fixed slot lookup, e.g. the plain corner wall.
    pub fn get(&self, category: AssetCategory, index: usize) -> Result<&AssetPair> {
        let pairs = self.pairs(category);
        pairs.get(index).ok_or(LayoutError::MissingAsset {
            category,
            needed: index + 1,
            available: pairs.len(),
        })
    }

    /// Uniform random pick within a category.
    pub fn choose(&self, category: AssetCategory, rng: &mut impl Rng) -> Result<&AssetPair> {
        let pairs = self.pairs(category);
        pairs.choose(rng).ok_or(LayoutError::MissingAsset {
            category,
            needed: 1,
            available: 0,
        })
    }

    /// Check the category holds at least `needed` pairs.
    pub fn require(&self, category: AssetCategory, needed: usize) -> Result<()> {
        let available = self.pairs(category).len();
        if available < needed {
            return Err(LayoutError::MissingAsset {
                category,
                needed,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pack() -> AssetCatalog {
        AssetCatalog::industrial_pack(
            Path::new("/content/pack"),
            Path::new("/content/props"),
            Path::new("/mockup"),
        )
    }

    #[test]
    fn industrial_pack_fills_every_category() {
        let catalog = pack();
        for category in AssetCategory::all() {
            assert!(
                !catalog.pairs(*category).is_empty(),
                "{category} should not be empty"
            );
        }
        assert_eq!(catalog.pairs(AssetCategory::FilledRacks).len(), 7);
        assert_eq!(catalog.pairs(AssetCategory::Walls).len(), 4);
        assert_eq!(catalog.pairs(AssetCategory::Piles).len(), 7);
    }

    #[test]
    fn long_racks_share_one_mockup() {
        let catalog = pack();
        let mockups: Vec<_> = catalog
            .pairs(AssetCategory::FilledRacks)
            .iter()
            .map(|p| p.mockup.clone())
            .collect();
        assert!(mockups
            .iter()
            .all(|m| m.as_deref() == Some(Path::new("/mockup/Racks/RackLong.obj"))));
    }

    #[test]
    fn props_have_no_mockup() {
        let catalog = pack();
        assert!(catalog
            .pairs(AssetCategory::Walls)
            .iter()
            .all(|p| p.mockup.is_none()));
        assert_eq!(
            catalog.get(AssetCategory::Lights, light_slots::ON).unwrap().asset,
            PathBuf::from("/content/props/SM_LampCeilingA_05.usd")
        );
    }

    #[test]
    fn unlit_lamp_sits_before_the_lit_one() {
        let catalog = pack();
        let off = catalog.get(AssetCategory::Lights, light_slots::OFF).unwrap();
        let on = catalog.get(AssetCategory::Lights, light_slots::ON).unwrap();
        assert_eq!(off.asset, PathBuf::from("/content/props/SM_LampCeilingA_04.usd"));
        assert_ne!(off.asset, on.asset);
        assert!(off.mockup.is_none());
    }

    #[test]
    fn short_category_reports_missing_slot() {
        let mut catalog = AssetCatalog::new();
        catalog.insert(
            AssetCategory::Walls,
            vec![AssetPair::asset_only("a.usd"), AssetPair::asset_only("b.usd")],
        );
        match catalog.get(AssetCategory::Walls, wall_slots::FLAT_ALT) {
            Err(LayoutError::MissingAsset {
                needed, available, ..
            }) => {
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("expected MissingAsset, got {other:?}"),
        }
        assert!(catalog.require(AssetCategory::Walls, 2).is_ok());
        assert!(catalog.require(AssetCategory::Walls, 3).is_err());
    }

    #[test]
    fn choose_stays_in_category() {
        let catalog = pack();
        let mut rng = StdRng::seed_from_u64(7);
        let piles = catalog.pairs(AssetCategory::Piles);
        for _ in 0..20 {
            let pick = catalog.choose(AssetCategory::Piles, &mut rng).unwrap();
            assert!(piles.contains(pick));
        }
        assert!(catalog
            .choose(AssetCategory::Forklift, &mut rng)
            .is_ok());
        assert!(AssetCatalog::new()
            .choose(AssetCategory::Piles, &mut rng)
            .is_err());
    }

    #[test]
    fn catalog_reads_from_json_map() {
        let json = r#"{
            "floors": [{"asset": "/props/SM_floor02.usd", "mockup": null}],
            "filled_racks": [{"asset": "/racks/A1.usd", "mockup": "/mockup/RackLong.obj"}]
        }"#;
        let catalog: AssetCatalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.pairs(AssetCategory::Floors).len(), 1);
        assert_eq!(
            catalog.pairs(AssetCategory::FilledRacks)[0].mockup,
            Some(PathBuf::from("/mockup/RackLong.obj"))
        );
        assert!(catalog.pairs(AssetCategory::Piles).is_empty());
    }
}
