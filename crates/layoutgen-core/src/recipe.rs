//! Recipe assembly - one fully placed facility document per instance.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::value::SeqAccessDeserializer;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::components::Entity;
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::generation::{BooleanProgram, BooleanRecord, Facility, FacilityType};

/// Serialized layout of one facility instance. Field order is part of the
/// document contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub env_type: FacilityType,
    /// Zero-padded instance index.
    pub env_id: String,
    pub env_size: [f64; 3],
    pub inlet_size: [f64; 2],
    pub outlet_size: [f64; 2],
    pub sides: Vec<Entity>,
    pub inlets: Vec<Entity>,
    pub outlets: Vec<Entity>,
    /// Absent, `null` and `{}` all read back as an empty interior.
    #[serde(default, deserialize_with = "interior_group")]
    pub interior: Vec<Entity>,
    pub gaden_geom: Vec<Entity>,
    pub gaden_bools: Vec<BooleanRecord>,
    pub isaac_floor: Vec<Entity>,
    pub isaac_walls: Vec<Entity>,
    pub isaac_lights: Vec<Entity>,
}

impl Recipe {
    /// `{env_type}_{env_id}`, the stem shared by every artifact of this instance.
    pub fn name(&self) -> String {
        format!("{}_{}", self.env_type, self.env_id)
    }

    /// The carving program rebuilt from `gaden_bools`.
    pub fn boolean_program(&self) -> Option<BooleanProgram> {
        BooleanProgram::from_records(&self.gaden_bools)
    }

    pub fn entity_count(&self) -> usize {
        self.groups().iter().map(|(_, g)| g.len()).sum()
    }

    /// Every entity group with its document key.
    pub fn groups(&self) -> [(&'static str, &[Entity]); 8] {
        [
            ("sides", self.sides.as_slice()),
            ("inlets", self.inlets.as_slice()),
            ("outlets", self.outlets.as_slice()),
            ("interior", self.interior.as_slice()),
            ("gaden_geom", self.gaden_geom.as_slice()),
            ("isaac_floor", self.isaac_floor.as_slice()),
            ("isaac_walls", self.isaac_walls.as_slice()),
            ("isaac_lights", self.isaac_lights.as_slice()),
        ]
    }
}

fn interior_group<'de, D>(deserializer: D) -> std::result::Result<Vec<Entity>, D::Error>
where
    D: Deserializer<'de>,
{
    struct InteriorVisitor;

    impl<'de> Visitor<'de> for InteriorVisitor {
        type Value = Vec<Entity>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a list of entities or an empty map")
        }

        fn visit_seq<A>(self, seq: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            Vec::deserialize(SeqAccessDeserializer::new(seq))
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            match map.next_key::<IgnoredAny>()? {
                None => Ok(Vec::new()),
                Some(_) => Err(de::Error::invalid_value(de::Unexpected::Map, &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(InteriorVisitor)
}

pub fn env_id(index: usize) -> String {
    format!("{index:04}")
}

/// Run every generation step for one instance, in fixed order: boundaries,
/// interior, auxiliary solids, dressing.
pub fn generate_recipe(
    facility: &Facility<'_>,
    index: usize,
    rng: &mut impl Rng,
) -> Result<Recipe> {
    let params = &facility.params;

    let sides = facility.sides();
    let inlets = facility.inlets();
    let outlets = facility.outlets();
    let interior = facility.interior(rng)?;
    let aux = facility.auxiliary_solids();
    let isaac_floor = facility.floor_tiles()?;
    let isaac_walls = facility.walls()?;
    let isaac_lights = facility.lights()?;

    let recipe = Recipe {
        env_type: params.facility_type,
        env_id: env_id(index),
        env_size: params.envelope.to_array(),
        inlet_size: params.inlet,
        outlet_size: params.outlet,
        sides,
        inlets,
        outlets,
        interior,
        gaden_bools: aux.program.records(),
        gaden_geom: aux.geometry,
        isaac_floor,
        isaac_walls,
        isaac_lights,
    };

    log::info!(
        "generated {}: {} interior, {} floor, {} walls, {} lights",
        recipe.name(),
        recipe.interior.len(),
        recipe.isaac_floor.len(),
        recipe.isaac_walls.len(),
        recipe.isaac_lights.len()
    );

    Ok(recipe)
}

/// Random stream for instance `index`.
pub fn instance_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(index as u64)),
        None => StdRng::from_entropy(),
    }
}

/// Build the facility from the config, then generate `env_amount` recipes.
/// Each instance has its own random stream, so instances do not depend on
/// each other.
pub fn generate_batch(config: &GeneratorConfig) -> Result<Vec<Recipe>> {
    let facility = config.facility()?;

    log::info!(
        "generating {} {} recipes (seed {:?})",
        config.env_amount,
        config.env_type,
        config.seed
    );

    (0..config.env_amount)
        .map(|i| {
            let mut rng = instance_rng(config.seed, i);
            generate_recipe(&facility, i, &mut rng)
        })
        .collect()
}
