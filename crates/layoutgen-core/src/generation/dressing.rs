//! Simulation-scene dressing: floor tiles, stacked wall pieces, ceiling lights.

use super::facility::Facility;
use super::grid::{cover_count, grid2, linspace, pinned_layers, stepped};
use crate::assets::{light_slots, wall_slots, AssetCategory};
use crate::components::{Entity, Vec3};
use crate::error::Result;

/// Corner yaws for corners `(0,0)`, `(X,0)`, `(0,Y)`, `(X,Y)`.
const CORNER_YAWS: [f64; 4] = [90.0, 180.0, 0.0, 270.0];
/// Flat walls along X on `y = 0` and `y = Y`.
const X_WALL_YAWS: [f64; 2] = [90.0, -90.0];
/// Flat walls along Y on `x = 0` and `x = X`.
const Y_WALL_YAWS: [f64; 2] = [0.0, 180.0];

const LIGHT_MARGIN_X: f64 = 2.5;
const LIGHT_MARGIN_Y: f64 = 4.0;
const LIGHT_YAW: f64 = 90.0;

/// Wall variant for a layer: plain at floor level, alternate above unless
/// every layer is forced plain.
fn layer_slot(layer: usize, white_walls: bool, plain: usize, alt: usize) -> usize {
    if white_walls || layer == 0 {
        plain
    } else {
        alt
    }
}

impl Facility<'_> {
    /// Floor tiles covering the footprint; the far row and column may
    /// overhang the envelope.
    pub fn floor_tiles(&self) -> Result<Vec<Entity>> {
        let env = self.envelope();
        let floor = &self.templates.floor;
        let pair = self.catalog.get(AssetCategory::Floors, 0)?;

        let rows = cover_count(env.x, floor.dx());
        let cols = cover_count(env.y, floor.dy());
        let xs = stepped(floor.cx(), floor.dx(), rows);
        let ys = stepped(floor.cy(), floor.dy(), cols);

        Ok(grid2(&xs, &ys, 0.0)
            .into_iter()
            .enumerate()
            .map(|(i, loc)| {
                Entity::instance_of(floor, format!("floor_tile_{i:03}"))
                    .with_assets(pair)
                    .at(loc)
            })
            .collect())
    }

    /// Corner pieces, then flat pieces along X, then along Y.
    pub fn walls(&self) -> Result<Vec<Entity>> {
        let mut out = self.corner_walls()?;
        out.extend(self.flat_walls()?);
        Ok(out)
    }

    pub fn corner_walls(&self) -> Result<Vec<Entity>> {
        let env = self.envelope();
        let corner = &self.templates.corner_wall;
        let white = self.params.white_walls;
        let layers = pinned_layers(self.ceiling_height(), corner.dz());

        let corners = [
            (0.0, 0.0),
            (env.x, 0.0),
            (0.0, env.y),
            (env.x, env.y),
        ];

        let mut out = Vec::with_capacity(layers.len() * corners.len());
        for (i, &z) in layers.iter().enumerate() {
            let slot = layer_slot(i, white, wall_slots::CORNER_PLAIN, wall_slots::CORNER_ALT);
            let pair = self.catalog.get(AssetCategory::Walls, slot)?;
            for (j, (&(x, y), &yaw)) in corners.iter().zip(&CORNER_YAWS).enumerate() {
                out.push(
                    Entity::instance_of(corner, format!("wall_corner_{i}_{j}"))
                        .with_assets(pair)
                        .at(Vec3::new(x, y, z))
                        .oriented(Vec3::yaw(yaw)),
                );
            }
        }
        Ok(out)
    }

    /// Flat pieces filling the span between corners, per side and layer.
    pub fn flat_walls(&self) -> Result<Vec<Entity>> {
        let env = self.envelope();
        let corner = &self.templates.corner_wall;
        let wall = &self.templates.flat_wall;
        let white = self.params.white_walls;
        let layers = pinned_layers(self.ceiling_height(), wall.dz());

        let mut out = Vec::new();

        let span_x = env.x - 2.0 * corner.dx();
        if span_x > 0.0 {
            let n = cover_count(span_x, wall.dy());
            let xs = linspace(
                corner.dx() + wall.cy(),
                env.x - (corner.dx() + wall.cy()),
                n,
            );
            let sides = [(0.0, X_WALL_YAWS[0]), (env.y, X_WALL_YAWS[1])];
            for (i, &z) in layers.iter().enumerate() {
                let slot = layer_slot(i, white, wall_slots::FLAT_PLAIN, wall_slots::FLAT_ALT);
                let pair = self.catalog.get(AssetCategory::Walls, slot)?;
                for (j, &(y, yaw)) in sides.iter().enumerate() {
                    for (k, &x) in xs.iter().enumerate() {
                        out.push(
                            Entity::instance_of(wall, format!("wallX_{i}_{k}_{j}"))
                                .with_assets(pair)
                                .at(Vec3::new(x, y, z))
                                .oriented(Vec3::yaw(yaw)),
                        );
                    }
                }
            }
        }

        let span_y = env.y - 2.0 * corner.dy();
        if span_y > 0.0 {
            let n = cover_count(span_y, wall.dy());
            let ys = linspace(
                corner.dy() + wall.cy(),
                env.y - (corner.dy() + wall.cy()),
                n,
            );
            let sides = [(0.0, Y_WALL_YAWS[0]), (env.x, Y_WALL_YAWS[1])];
            for (i, &z) in layers.iter().enumerate() {
                let slot = layer_slot(i, white, wall_slots::FLAT_PLAIN, wall_slots::FLAT_ALT);
                let pair = self.catalog.get(AssetCategory::Walls, slot)?;
                for (j, &(x, yaw)) in sides.iter().enumerate() {
                    for (k, &y) in ys.iter().enumerate() {
                        out.push(
                            Entity::instance_of(wall, format!("wallY_{i}_{k}_{j}"))
                                .with_assets(pair)
                                .at(Vec3::new(x, y, z))
                                .oriented(Vec3::yaw(yaw)),
                        );
                    }
                }
            }
        }

        Ok(out)
    }

    /// Decorative light grid hung above the envelope.
    pub fn lights(&self) -> Result<Vec<Entity>> {
        let env = self.envelope();
        let light = &self.templates.prop_light;
        let pair = self.catalog.get(AssetCategory::Lights, light_slots::ON)?;

        let nx = cover_count(env.x - 2.0 * LIGHT_MARGIN_X, LIGHT_MARGIN_X);
        let ny = cover_count(env.y - 2.0 * LIGHT_MARGIN_Y, LIGHT_MARGIN_Y);
        let xs = linspace(LIGHT_MARGIN_X, env.x - LIGHT_MARGIN_X, nx);
        let ys = linspace(LIGHT_MARGIN_Y, env.y - LIGHT_MARGIN_Y, ny);
        let z = env.z + light.dz();

        if nx == 0 || ny == 0 {
            log::warn!(
                "envelope {:?} too small for the light grid margins; no lights placed",
                env.to_array()
            );
        }

        Ok(grid2(&xs, &ys, z)
            .into_iter()
            .enumerate()
            .map(|(i, loc)| {
                Entity::instance_of(light, format!("light_{i:03}"))
                    .with_assets(pair)
                    .at(loc)
                    .oriented(Vec3::yaw(LIGHT_YAW))
            })
            .collect())
    }
}
