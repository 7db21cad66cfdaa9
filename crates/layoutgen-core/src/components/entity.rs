//! Placed geometric entities - the unit every recipe group is made of.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::common::Vec3;
use crate::assets::AssetPair;

/// A named geometric placeholder with placement and optional asset references.
///
/// `center` is always half of `dimensions`; it can only change through
/// [`Entity::set_dimensions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "EntityRecord", into = "EntityRecord")]
pub struct Entity {
    pub id: String,
    /// Full-detail renderable resource.
    pub asset_reference: Option<PathBuf>,
    /// Simplified geometry substituted during meshing.
    pub mockup_reference: Option<PathBuf>,
    dimensions: Vec3,
    center: Vec3,
    pub location: Vec3,
    /// Degrees, intrinsic XYZ.
    pub orientation: Vec3,
    pub scale: Vec3,
}

impl Entity {
    /// Unplaced entity with the given extent. Location and orientation are
    /// zero, scale is one, no asset references.
    pub fn new(id: impl Into<String>, dimensions: Vec3) -> Self {
        Self {
            id: id.into(),
            asset_reference: None,
            mockup_reference: None,
            dimensions,
            center: dimensions * 0.5,
            location: Vec3::ZERO,
            orientation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Fresh copy of a template under a new id.
    pub fn instance_of(template: &Entity, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..template.clone()
        }
    }

    pub fn at(mut self, location: Vec3) -> Self {
        self.location = location;
        self
    }

    pub fn oriented(mut self, orientation: Vec3) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn scaled(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_assets(mut self, pair: &AssetPair) -> Self {
        self.asset_reference = Some(pair.asset.clone());
        self.mockup_reference = pair.mockup.clone();
        self
    }

    pub fn dimensions(&self) -> Vec3 {
        self.dimensions
    }

    pub fn set_dimensions(&mut self, dimensions: Vec3) {
        self.dimensions = dimensions;
        self.center = dimensions * 0.5;
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn dx(&self) -> f64 {
        self.dimensions.x
    }

    pub fn dy(&self) -> f64 {
        self.dimensions.y
    }

    pub fn dz(&self) -> f64 {
        self.dimensions.z
    }

    pub fn cx(&self) -> f64 {
        self.center.x
    }

    pub fn cy(&self) -> f64 {
        self.center.y
    }

    pub fn cz(&self) -> f64 {
        self.center.z
    }
}

/// Wire form of an [`Entity`]. Field names and order are part of the recipe
/// contract read by the exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntityRecord {
    asset_id: String,
    filename: Option<PathBuf>,
    mockup_file: Option<PathBuf>,
    dimensions: Vec3,
    location: Vec3,
    orientation: Vec3,
    scale: Vec3,
}

impl From<Entity> for EntityRecord {
    fn from(e: Entity) -> Self {
        Self {
            asset_id: e.id,
            filename: e.asset_reference,
            mockup_file: e.mockup_reference,
            dimensions: e.dimensions,
            location: e.location,
            orientation: e.orientation,
            scale: e.scale,
        }
    }
}

impl From<EntityRecord> for Entity {
    fn from(r: EntityRecord) -> Self {
        let mut e = Entity::new(r.asset_id, r.dimensions)
            .at(r.location)
            .oriented(r.orientation)
            .scaled(r.scale);
        e.asset_reference = r.filename;
        e.mockup_reference = r.mockup_file;
        e
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_follows_dimensions() {
        let mut e = Entity::new("rack", Vec3::new(1.0, 4.0, 3.0));
        assert_eq!(e.center(), Vec3::new(0.5, 2.0, 1.5));

        e.set_dimensions(Vec3::new(2.0, 2.0, 0.0));
        assert_eq!(e.center(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn defaults_are_zero_and_unit_scale() {
        let e = Entity::new("pile", Vec3::ZERO);
        assert_eq!(e.location, Vec3::ZERO);
        assert_eq!(e.orientation, Vec3::ZERO);
        assert_eq!(e.scale, Vec3::ONE);
        assert!(e.asset_reference.is_none());
        assert!(e.mockup_reference.is_none());
    }

    #[test]
    fn instance_keeps_template_fields_under_new_id() {
        let template = Entity::new("floor", Vec3::new(6.0, 6.0, 0.0)).scaled(Vec3::splat(2.0));
        let tile = Entity::instance_of(&template, "floor_tile_000").at(Vec3::new(3.0, 3.0, 0.0));
        assert_eq!(tile.id, "floor_tile_000");
        assert_eq!(tile.dimensions(), template.dimensions());
        assert_eq!(tile.scale, Vec3::splat(2.0));
        assert_eq!(template.location, Vec3::ZERO);
    }

    #[test]
    fn record_uses_exporter_field_names() {
        let pair = AssetPair::new("/assets/RackLong_A1.usd", Some("/mockup/RackLong.obj"));
        let e = Entity::new("filled_rack_000", Vec3::new(1.0, 4.0, 3.0))
            .with_assets(&pair)
            .at(Vec3::new(0.5, 5.5, 0.0));
        let json = serde_json::to_value(&e).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in [
            "asset_id",
            "filename",
            "mockup_file",
            "dimensions",
            "location",
            "orientation",
            "scale",
        ] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(keys.len(), 7);
        assert_eq!(json["filename"], "/assets/RackLong_A1.usd");
        assert_eq!(json["location"], serde_json::json!([0.5, 5.5, 0.0]));
    }

    #[test]
    fn missing_references_serialize_as_null() {
        let e = Entity::new("bottom", Vec3::new(10.0, 16.0, 0.0));
        let json = serde_json::to_value(&e).unwrap();
        assert!(json["filename"].is_null());
        assert!(json["mockup_file"].is_null());
    }

    #[test]
    fn reading_a_record_restores_center() {
        let e = Entity::new("walls", Vec3::new(10.4, 16.4, 8.0)).at(Vec3::new(5.0, 8.0, 4.0));
        let text = serde_json::to_string(&e).unwrap();
        let back: Entity = serde_json::from_str(&text).unwrap();
        assert_eq!(back, e);
        assert_eq!(back.center(), Vec3::new(5.2, 8.2, 4.0));
    }
}
