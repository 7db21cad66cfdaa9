//! Auxiliary solids for the gas-dispersal geometry and the boolean program
//! that carves the openings out of the wall solid.
//!
//! The program is replayed as a small state machine:
//! `Initial(walls)` → `Carving { applied }` → `Terminal`. Every operand must
//! resolve against the solid group before it is applied.

use serde::{Deserialize, Serialize};

use super::facility::Facility;
use crate::components::{Entity, Vec3};
use crate::error::{LayoutError, Result};

pub const WALL_THICKNESS: f64 = 0.2;
/// Extra height of the interior void so it fully pierces the wall solid.
const INSIDE_OVERSHOOT: f64 = 1.0;
/// Extra depth of opening cutters beyond the wall thickness.
const OPENING_OVERCUT: f64 = 0.2;

pub const WALLS_ID: &str = "walls";

/// Boolean operation applied by the mesh exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOp {
    #[serde(rename = "DIFFERENCE")]
    Difference,
    #[serde(rename = "UNION")]
    Union,
    #[serde(rename = "INTERSECT")]
    Intersect,
}

/// One `[target, operand, operation]` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BooleanRecord(pub Entity, pub Entity, pub BooleanOp);

impl BooleanRecord {
    pub fn target(&self) -> &Entity {
        &self.0
    }

    pub fn operand(&self) -> &Entity {
        &self.1
    }

    pub fn op(&self) -> BooleanOp {
        self.2
    }
}

/// Progress of a boolean program against its target solid.
#[derive(Debug, Clone, PartialEq)]
pub enum CarveState {
    Initial {
        solid: String,
    },
    Carving {
        solid: String,
        applied: Vec<(BooleanOp, String)>,
    },
    Terminal {
        solid: String,
        applied: Vec<(BooleanOp, String)>,
    },
}

impl CarveState {
    pub fn start(solid: impl Into<String>) -> Self {
        CarveState::Initial {
            solid: solid.into(),
        }
    }

    /// Record `op` against `operand`. A terminal state is sealed and comes
    /// back unchanged.
    pub fn apply(self, op: BooleanOp, operand: &str) -> Self {
        match self {
            CarveState::Initial { solid } => CarveState::Carving {
                solid,
                applied: vec![(op, operand.to_string())],
            },
            CarveState::Carving { solid, mut applied } => {
                applied.push((op, operand.to_string()));
                CarveState::Carving { solid, applied }
            }
            terminal @ CarveState::Terminal { .. } => terminal,
        }
    }

    pub fn finish(self) -> Self {
        match self {
            CarveState::Initial { solid } => CarveState::Terminal {
                solid,
                applied: Vec::new(),
            },
            CarveState::Carving { solid, applied } => CarveState::Terminal { solid, applied },
            terminal @ CarveState::Terminal { .. } => terminal,
        }
    }

    pub fn solid(&self) -> &str {
        match self {
            CarveState::Initial { solid }
            | CarveState::Carving { solid, .. }
            | CarveState::Terminal { solid, .. } => solid,
        }
    }

    pub fn applied(&self) -> &[(BooleanOp, String)] {
        match self {
            CarveState::Initial { .. } => &[],
            CarveState::Carving { applied, .. } | CarveState::Terminal { applied, .. } => applied,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, CarveState::Terminal { .. })
    }
}

/// Ordered operations against a single target solid.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanProgram {
    target: Entity,
    steps: Vec<(BooleanOp, Entity)>,
}

impl BooleanProgram {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            steps: Vec::new(),
        }
    }

    pub fn then(mut self, op: BooleanOp, operand: Entity) -> Self {
        self.steps.push((op, operand));
        self
    }

    pub fn target(&self) -> &Entity {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Rebuild a program from serialized records. All records must share
    /// one target id.
    pub fn from_records(records: &[BooleanRecord]) -> Option<Self> {
        let first = records.first()?;
        let mut program = Self::new(first.target().clone());
        for r in records {
            if r.target().id != program.target.id {
                return None;
            }
            program = program.then(r.op(), r.operand().clone());
        }
        Some(program)
    }

    pub fn records(&self) -> Vec<BooleanRecord> {
        self.steps
            .iter()
            .map(|(op, operand)| BooleanRecord(self.target.clone(), operand.clone(), *op))
            .collect()
    }

    /// Walk the program against `solids`, resolving every id by lookup.
    pub fn replay(&self, solids: &[Entity]) -> Result<CarveState> {
        let resolve = |id: &str| solids.iter().any(|e| e.id == id);

        if !resolve(&self.target.id) {
            return Err(LayoutError::UnresolvedBooleanOperand {
                target: self.target.id.clone(),
                operand: self.target.id.clone(),
            });
        }

        let mut state = CarveState::start(self.target.id.clone());
        for (op, operand) in &self.steps {
            if !resolve(&operand.id) {
                return Err(LayoutError::UnresolvedBooleanOperand {
                    target: self.target.id.clone(),
                    operand: operand.id.clone(),
                });
            }
            state = state.apply(*op, &operand.id);
        }
        Ok(state.finish())
    }
}

/// Solids plus the program that carves them.
#[derive(Debug, Clone, PartialEq)]
pub struct AuxiliarySolids {
    /// `walls`, `inside`, `inlet`, `outlet`, in that order.
    pub geometry: Vec<Entity>,
    pub program: BooleanProgram,
}

impl Facility<'_> {
    /// Thickened walls, interior void and opening cutters, with the
    /// `walls - inside - inlet - outlet` program.
    pub fn auxiliary_solids(&self) -> AuxiliarySolids {
        let env = self.envelope();
        let center = self.templates.shell.center();
        let inlet = self.templates.inlet.dimensions();
        let outlet = self.templates.outlet.dimensions();
        let t = WALL_THICKNESS;

        let walls = Entity::new(
            WALLS_ID,
            Vec3::new(env.x + 2.0 * t, env.y + 2.0 * t, env.z),
        )
        .at(center);
        let inside = Entity::new("inside", Vec3::new(env.x, env.y, env.z + INSIDE_OVERSHOOT))
            .at(center);
        let inlet_cut = Entity::new("inlet", Vec3::new(t + OPENING_OVERCUT, inlet.y, inlet.z))
            .at(Vec3::new(-0.5 * t, 0.5 * inlet.y, 0.5 * inlet.z));
        let outlet_cut = Entity::new("outlet", Vec3::new(t + OPENING_OVERCUT, outlet.y, outlet.z))
            .at(Vec3::new(
                env.x + 0.5 * t,
                env.y - 0.5 * outlet.y,
                0.5 * outlet.z,
            ));

        let program = BooleanProgram::new(walls.clone())
            .then(BooleanOp::Difference, inside.clone())
            .then(BooleanOp::Difference, inlet_cut.clone())
            .then(BooleanOp::Difference, outlet_cut.clone());

        AuxiliarySolids {
            geometry: vec![walls, inside, inlet_cut, outlet_cut],
            program,
        }
    }
}
