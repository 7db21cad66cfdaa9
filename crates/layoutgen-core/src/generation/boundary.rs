//! Boundary planes of the envelope and the inlet/outlet openings.
//!
//! Planes carry their extent in the first two dimension components and are
//! rotated so their normal points into the facility. The two side faces are
//! pierced by the openings; each is split into a full-height strip beside the
//! opening and a strip above it, computed on face rectangles first.

use super::facility::Facility;
use crate::components::{Entity, Rect, Vec3};

const TOP_ORIENTATION: Vec3 = Vec3::new(180.0, 0.0, 0.0);
const FRONT_ORIENTATION: Vec3 = Vec3::new(-90.0, 0.0, 0.0);
const BACK_ORIENTATION: Vec3 = Vec3::new(90.0, 0.0, 0.0);
/// Side face at `x = 0`.
const INLET_FACE_ORIENTATION: Vec3 = Vec3::new(0.0, 90.0, 0.0);
/// Side face at `x = X`.
const OUTLET_FACE_ORIENTATION: Vec3 = Vec3::new(0.0, -90.0, 0.0);

/// Which end of a side face (along Y) an opening touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpeningAnchor {
    LowEnd,
    HighEnd,
}

/// A side face split around a floor-level opening, in face coordinates
/// (`u` along Y, `v` along Z).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceSplit {
    pub face: Rect,
    pub opening: Rect,
    /// Full-height strip next to the opening.
    pub beside: Rect,
    /// Strip between the top of the opening and the ceiling.
    pub above: Rect,
}

impl FaceSplit {
    /// Area of the two wall strips.
    pub fn wall_area(&self) -> f64 {
        self.beside.area() + self.above.area()
    }
}

/// Split a `width × height` face around an `opening_width × opening_height`
/// opening standing on the floor at one end of the face.
pub fn split_face(
    width: f64,
    height: f64,
    opening_width: f64,
    opening_height: f64,
    anchor: OpeningAnchor,
) -> FaceSplit {
    let face = Rect::new(0.0, 0.0, width, height);
    let (opening, beside) = match anchor {
        OpeningAnchor::LowEnd => (
            Rect::new(0.0, 0.0, opening_width, opening_height),
            Rect::new(opening_width, 0.0, width, height),
        ),
        OpeningAnchor::HighEnd => (
            Rect::new(width - opening_width, 0.0, width, opening_height),
            Rect::new(0.0, 0.0, width - opening_width, height),
        ),
    };
    let above = Rect::new(opening.u0, opening_height, opening.u1, height);
    FaceSplit {
        face,
        opening,
        beside,
        above,
    }
}

/// Plane on a side face at `x` covering `rect`.
fn side_plane(id: &str, x: f64, rect: &Rect, orientation: Vec3) -> Entity {
    Entity::new(id, Vec3::new(rect.height(), rect.width(), 0.0))
        .at(Vec3::new(x, rect.center_u(), rect.center_v()))
        .oriented(orientation)
}

/// Face rectangle covered by a plane on a side face; inverse of the side
/// plane placement.
pub fn side_face_rect(plane: &Entity) -> Rect {
    let d = plane.dimensions();
    let l = plane.location;
    Rect::new(
        l.y - 0.5 * d.y,
        l.z - 0.5 * d.x,
        l.y + 0.5 * d.y,
        l.z + 0.5 * d.x,
    )
}

impl Facility<'_> {
    pub fn inlet_face_split(&self) -> FaceSplit {
        let env = self.envelope();
        let inlet = self.templates.inlet.dimensions();
        split_face(env.y, env.z, inlet.y, inlet.z, OpeningAnchor::LowEnd)
    }

    pub fn outlet_face_split(&self) -> FaceSplit {
        let env = self.envelope();
        let outlet = self.templates.outlet.dimensions();
        split_face(env.y, env.z, outlet.y, outlet.z, OpeningAnchor::HighEnd)
    }

    /// The eight boundary planes: bottom, top, front, back, and the two
    /// split side faces.
    pub fn sides(&self) -> Vec<Entity> {
        let env = self.envelope();
        let inlet_face = self.inlet_face_split();
        let outlet_face = self.outlet_face_split();

        vec![
            Entity::new("bottom", Vec3::new(env.x, env.y, 0.0))
                .at(Vec3::new(0.5 * env.x, 0.5 * env.y, 0.0)),
            Entity::new("top", Vec3::new(env.x, env.y, 0.0))
                .at(Vec3::new(0.5 * env.x, 0.5 * env.y, env.z))
                .oriented(TOP_ORIENTATION),
            Entity::new("front", Vec3::new(env.x, env.z, 0.0))
                .at(Vec3::new(0.5 * env.x, 0.0, 0.5 * env.z))
                .oriented(FRONT_ORIENTATION),
            Entity::new("back", Vec3::new(env.x, env.z, 0.0))
                .at(Vec3::new(0.5 * env.x, env.y, 0.5 * env.z))
                .oriented(BACK_ORIENTATION),
            side_plane("side_001", 0.0, &inlet_face.beside, INLET_FACE_ORIENTATION),
            side_plane("side_002", 0.0, &inlet_face.above, INLET_FACE_ORIENTATION),
            side_plane("side_003", env.x, &outlet_face.beside, OUTLET_FACE_ORIENTATION),
            side_plane("side_004", env.x, &outlet_face.above, OUTLET_FACE_ORIENTATION),
        ]
    }

    pub fn inlets(&self) -> Vec<Entity> {
        let split = self.inlet_face_split();
        vec![side_plane(
            "inlet001",
            0.0,
            &split.opening,
            INLET_FACE_ORIENTATION,
        )]
    }

    pub fn outlets(&self) -> Vec<Entity> {
        let split = self.outlet_face_split();
        vec![side_plane(
            "outlet001",
            self.envelope().x,
            &split.opening,
            OUTLET_FACE_ORIENTATION,
        )]
    }
}
