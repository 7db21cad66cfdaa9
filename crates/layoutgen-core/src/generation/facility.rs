//! Facility parameters and the category templates every placement is cloned from.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assets::{light_slots, wall_slots, AssetCatalog, AssetCategory};
use crate::components::{Entity, Vec3};
use crate::error::{LayoutError, Result};

/// Footprint (X, Y) the complex perimeter path was tuned for.
pub const COMPLEX_CALIBRATION_FOOTPRINT: (f64, f64) = (15.0, 15.0);

const FOOTPRINT_TOLERANCE: f64 = 1e-6;

/// Facility variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    /// Shell, solids and dressing only; no interior.
    #[serde(rename = "wh_empty")]
    Empty,
    /// Rack array.
    #[serde(rename = "wh_simple")]
    Simple,
    /// Rack array plus forklift and piles on a perimeter path.
    #[serde(rename = "wh_complex")]
    Complex,
}

impl FacilityType {
    pub fn tag(&self) -> &'static str {
        match self {
            FacilityType::Empty => "wh_empty",
            FacilityType::Simple => "wh_simple",
            FacilityType::Complex => "wh_complex",
        }
    }

    pub fn has_interior(&self) -> bool {
        !matches!(self, FacilityType::Empty)
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, FacilityType::Complex)
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Parameters for one facility instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FacilityParams {
    pub facility_type: FacilityType,
    /// Overall envelope `(X, Y, Z)`.
    pub envelope: Vec3,
    /// Inlet opening `[width along Y, height]`.
    pub inlet: [f64; 2],
    /// Outlet opening `[width along Y, height]`.
    pub outlet: [f64; 2],
    /// Minimum fraction of rack positions that are filled, in `[0, 1)`.
    pub occupancy_ratio: f64,
    pub white_walls: bool,
    /// Extra wall height above the envelope.
    pub wall_headroom: f64,
}

impl Default for FacilityParams {
    fn default() -> Self {
        Self {
            facility_type: FacilityType::Simple,
            envelope: Vec3::new(10.0, 16.0, 8.0),
            inlet: [1.2, 2.4],
            outlet: [1.5, 2.4],
            occupancy_ratio: 0.5,
            white_walls: false,
            wall_headroom: 0.0,
        }
    }
}

impl FacilityParams {
    /// Check every generation precondition. Generation itself assumes these hold.
    pub fn validate(&self) -> Result<()> {
        let min = CORNER_WALL_DIMS;
        let env = self.envelope;
        for (name, value, floor) in [
            ("env_size.x", env.x, min.x),
            ("env_size.y", env.y, min.y),
            ("env_size.z", env.z, min.z),
        ] {
            if !value.is_finite() || value < floor {
                return Err(LayoutError::invalid(
                    name,
                    value,
                    "envelope must be at least the corner wall unit (3.0)",
                ));
            }
        }

        for (name, opening) in [("inlet_size", self.inlet), ("outlet_size", self.outlet)] {
            let [w, h] = opening;
            if !(w > 0.0 && h > 0.0) {
                return Err(LayoutError::invalid(
                    name,
                    format!("{opening:?}"),
                    "opening sides must be positive",
                ));
            }
            if w > env.y || h > env.z {
                return Err(LayoutError::invalid(
                    name,
                    format!("{opening:?}"),
                    "opening must fit inside its side face",
                ));
            }
        }

        if !(0.0..1.0).contains(&self.occupancy_ratio) {
            return Err(LayoutError::invalid(
                "occupancy_ratio",
                self.occupancy_ratio,
                "must be in [0, 1)",
            ));
        }

        if !(self.wall_headroom >= 0.0 && self.wall_headroom.is_finite()) {
            return Err(LayoutError::invalid(
                "wall_headroom",
                self.wall_headroom,
                "must be a non-negative length",
            ));
        }

        if self.facility_type.is_complex() {
            let (cx, cy) = COMPLEX_CALIBRATION_FOOTPRINT;
            if (env.x - cx).abs() > FOOTPRINT_TOLERANCE || (env.y - cy).abs() > FOOTPRINT_TOLERANCE
            {
                return Err(LayoutError::UncalibratedComplexLayout {
                    width: env.x,
                    depth: env.y,
                });
            }
        }

        Ok(())
    }

    /// Check the catalog has every slot this facility type will index.
    pub fn check_catalog(&self, catalog: &AssetCatalog) -> Result<()> {
        catalog.require(AssetCategory::Floors, 1)?;
        catalog.require(AssetCategory::Walls, wall_slots::FLAT_ALT + 1)?;
        catalog.require(AssetCategory::Lights, light_slots::ON + 1)?;
        if self.facility_type.has_interior() {
            catalog.require(AssetCategory::FilledRacks, 1)?;
            catalog.require(AssetCategory::EmptyRacks, 1)?;
        }
        if self.facility_type.is_complex() {
            catalog.require(AssetCategory::Forklift, 1)?;
            catalog.require(AssetCategory::Piles, 1)?;
        }
        Ok(())
    }
}

// Nominal template extents.
pub(crate) const FLOOR_DIMS: Vec3 = Vec3::new(6.0, 6.0, 0.0);
pub(crate) const CORNER_WALL_DIMS: Vec3 = Vec3::new(3.0, 3.0, 3.0);
pub(crate) const FLAT_WALL_DIMS: Vec3 = Vec3::new(0.0, 6.0, 3.0);
pub(crate) const PROP_LIGHT_DIMS: Vec3 = Vec3::new(2.0, 0.3, 3.0);
pub(crate) const RACK_DIMS: Vec3 = Vec3::new(1.0, 4.0, 3.0);
pub(crate) const RACK_AISLE_DIMS: Vec3 = Vec3::new(3.0, 0.0, 0.0);
pub(crate) const FORKLIFT_DIMS: Vec3 = Vec3::new(0.8, 1.0, 2.0);
/// Clearance kept free at both Y ends of the rack array beyond the larger opening.
pub(crate) const END_AISLE_MARGIN: f64 = 2.0;

/// Category templates for one facility instance.
#[derive(Debug, Clone)]
pub struct Templates {
    pub shell: Entity,
    pub floor: Entity,
    pub corner_wall: Entity,
    pub flat_wall: Entity,
    pub prop_light: Entity,
    pub rack: Entity,
    pub rack_aisle: Entity,
    pub end_aisle: Entity,
    pub forklift: Entity,
    pub pile: Entity,
    pub inlet: Entity,
    pub outlet: Entity,
}

impl Templates {
    fn new(params: &FacilityParams) -> Self {
        let [inlet_y, inlet_z] = params.inlet;
        let [outlet_y, outlet_z] = params.outlet;
        Self {
            shell: Entity::new("warehouse_shell", params.envelope),
            floor: Entity::new("floor", FLOOR_DIMS),
            corner_wall: Entity::new("cornerwall", CORNER_WALL_DIMS),
            flat_wall: Entity::new("wall", FLAT_WALL_DIMS),
            prop_light: Entity::new("prop_light", PROP_LIGHT_DIMS),
            rack: Entity::new("rack", RACK_DIMS),
            rack_aisle: Entity::new("rack_aisle", RACK_AISLE_DIMS),
            end_aisle: Entity::new(
                "end_aisle",
                Vec3::new(0.0, inlet_y.max(outlet_y) + END_AISLE_MARGIN, 0.0),
            ),
            forklift: Entity::new("forklift", FORKLIFT_DIMS),
            pile: Entity::new("pile", Vec3::ZERO),
            inlet: Entity::new("inlet", Vec3::new(0.0, inlet_y, inlet_z)),
            outlet: Entity::new("outlet", Vec3::new(0.0, outlet_y, outlet_z)),
        }
    }
}

/// One facility instance: validated parameters, templates and asset catalog.
///
/// The generation steps live in sibling modules as `impl Facility` blocks.
#[derive(Debug, Clone)]
pub struct Facility<'a> {
    pub params: FacilityParams,
    pub templates: Templates,
    pub catalog: &'a AssetCatalog,
}

impl<'a> Facility<'a> {
    pub fn new(params: FacilityParams, catalog: &'a AssetCatalog) -> Result<Self> {
        params.validate()?;
        params.check_catalog(catalog)?;
        Ok(Self {
            templates: Templates::new(&params),
            params,
            catalog,
        })
    }

    pub fn envelope(&self) -> Vec3 {
        self.params.envelope
    }

    /// Height the wall stack must reach.
    pub fn ceiling_height(&self) -> f64 {
        self.params.envelope.z + self.params.wall_headroom
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::Path;

    pub(crate) fn catalog() -> AssetCatalog {
        AssetCatalog::industrial_pack(
            Path::new("/content/pack"),
            Path::new("/content/props"),
            Path::new("/mockup"),
        )
    }

    #[test]
    fn defaults_validate() {
        assert!(FacilityParams::default().validate().is_ok());
    }

    #[test]
    fn end_aisle_follows_larger_opening() {
        let catalog = catalog();
        let f = Facility::new(FacilityParams::default(), &catalog).unwrap();
        assert!((f.templates.end_aisle.dy() - 3.5).abs() < 1e-12);
        assert_eq!(f.templates.inlet.dimensions(), Vec3::new(0.0, 1.2, 2.4));
        assert_eq!(f.templates.outlet.dimensions(), Vec3::new(0.0, 1.5, 2.4));
    }

    #[test]
    fn envelope_below_corner_unit_is_rejected() {
        let params = FacilityParams {
            envelope: Vec3::new(10.0, 16.0, 2.0),
            ..Default::default()
        };
        match params.validate() {
            Err(LayoutError::InvalidParameter { name, .. }) => assert_eq!(name, "env_size.z"),
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn opening_larger_than_face_is_rejected() {
        let params = FacilityParams {
            outlet: [20.0, 2.4],
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(LayoutError::InvalidParameter {
                name: "outlet_size",
                ..
            })
        ));
    }

    #[test]
    fn full_occupancy_ratio_is_rejected() {
        let params = FacilityParams {
            occupancy_ratio: 1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn complex_requires_calibration_footprint() {
        let params = FacilityParams {
            facility_type: FacilityType::Complex,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(LayoutError::UncalibratedComplexLayout { .. })
        ));

        let calibrated = FacilityParams {
            facility_type: FacilityType::Complex,
            envelope: Vec3::new(15.0, 15.0, 8.0),
            ..Default::default()
        };
        assert!(calibrated.validate().is_ok());
    }

    #[test]
    fn empty_type_does_not_need_racks() {
        let mut catalog = catalog();
        catalog.insert(AssetCategory::FilledRacks, Vec::new());
        let empty = FacilityParams {
            facility_type: FacilityType::Empty,
            ..Default::default()
        };
        assert!(Facility::new(empty, &catalog).is_ok());
        assert!(Facility::new(FacilityParams::default(), &catalog).is_err());
    }

    #[test]
    fn type_tags_round_trip_through_serde() {
        for t in [FacilityType::Empty, FacilityType::Simple, FacilityType::Complex] {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.tag()));
            let back: FacilityType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, t);
        }
    }
}
