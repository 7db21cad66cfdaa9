//! Interior contents: rack array, filled/empty split, forklift and piles.

use rand::seq::index;
use rand::Rng;

use super::facility::{Facility, COMPLEX_CALIBRATION_FOOTPRINT};
use super::grid::{fit_count, grid3, linspace, stepped};
use crate::assets::AssetCategory;
use crate::components::{Entity, Vec3};
use crate::error::Result;

/// Scale applied to interior assets, which are authored in centimetres.
pub const INTERIOR_SCALE: Vec3 = Vec3::splat(0.01);

/// Racks whose X falls strictly inside this band are turned to face the
/// aisles of the complex layout.
const AISLE_YAW_BAND: (f64, f64) = (1.0, 14.0);
const AISLE_YAW: f64 = 90.0;

const COMPLEX_EDGE_X: f64 = 2.0;
const COMPLEX_EDGE_Y: f64 = 1.5;
const COMPLEX_POINTS_PER_SIDE: usize = 4;
const MAX_PILES: usize = 5;

/// Rack grid dimensions and the flattened position list.
#[derive(Debug, Clone, PartialEq)]
pub struct RackGrid {
    pub rows: usize,
    pub segments: usize,
    pub stacks: usize,
    pub positions: Vec<Vec3>,
}

impl RackGrid {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Partition of rack positions into filled and empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Occupancy {
    pub filled: Vec<Vec3>,
    pub empty: Vec<Vec3>,
}

impl Occupancy {
    pub fn total(&self) -> usize {
        self.filled.len() + self.empty.len()
    }
}

/// Smallest filled count allowed for `n` positions at `ratio`.
pub fn min_filled(n: usize, ratio: f64) -> usize {
    (n as f64 * ratio).floor() as usize
}

/// Randomly split `positions` so at least `floor(n * ratio)` are filled and
/// at least one stays empty.
///
/// Filled positions come back in draw order, empty ones in grid order.
pub fn split_occupancy(positions: &[Vec3], ratio: f64, rng: &mut impl Rng) -> Occupancy {
    let n = positions.len();
    if n == 0 {
        return Occupancy::default();
    }

    let low = min_filled(n, ratio).min(n - 1);
    let sample_size = rng.gen_range(low..n);
    let picked = index::sample(rng, n, sample_size).into_vec();

    let mut is_filled = vec![false; n];
    for &i in &picked {
        is_filled[i] = true;
    }

    log::debug!(
        "occupancy split: {} of {} positions filled (min {})",
        sample_size,
        n,
        low
    );

    Occupancy {
        filled: picked.iter().map(|&i| positions[i]).collect(),
        empty: positions
            .iter()
            .zip(&is_filled)
            .filter(|(_, &f)| !f)
            .map(|(p, _)| *p)
            .collect(),
    }
}

/// Fixed 12-point perimeter path of the complex layout.
///
/// Walks up the low-X column, across the high-Y row, down the high-X column
/// and back along the low-Y row; corners are shared. Only meaningful for
/// [`COMPLEX_CALIBRATION_FOOTPRINT`].
pub fn complex_path() -> Vec<Vec3> {
    let (width, depth) = COMPLEX_CALIBRATION_FOOTPRINT;
    let n = COMPLEX_POINTS_PER_SIDE;
    let x = linspace(COMPLEX_EDGE_X, width - COMPLEX_EDGE_X, n);
    let y = linspace(COMPLEX_EDGE_Y, depth - COMPLEX_EDGE_Y, n);
    let (lo, hi) = (0, n - 1);

    let mut path = Vec::with_capacity(4 * (n - 1));
    for &yj in &y {
        path.push(Vec3::new(x[lo], yj, 0.0));
    }
    for &xi in &x[1..] {
        path.push(Vec3::new(xi, y[hi], 0.0));
    }
    for &yj in y[..hi].iter().rev() {
        path.push(Vec3::new(x[hi], yj, 0.0));
    }
    for &xi in x[1..hi].iter().rev() {
        path.push(Vec3::new(xi, y[lo], 0.0));
    }
    path
}

fn random_yaw(rng: &mut impl Rng) -> Vec3 {
    Vec3::yaw(rng.gen_range(0..360) as f64)
}

impl Facility<'_> {
    /// Rack grid fitted to the envelope, clear of the end aisles.
    pub fn rack_grid(&self) -> RackGrid {
        let env = self.envelope();
        let rack = &self.templates.rack;
        let aisle = self.templates.rack_aisle.dx();
        let end_aisle = self.templates.end_aisle.dy();

        let origin = Vec3::new(rack.cx(), rack.cy() + end_aisle, 0.0);
        let rows = if env.x >= rack.dx() {
            1 + fit_count(env.x - rack.dx(), rack.dx() + aisle)
        } else {
            0
        };
        let segments = fit_count(env.y - 2.0 * end_aisle, rack.dy());
        let stacks = fit_count(env.z, rack.dz());

        let xs = linspace(origin.x, env.x - rack.cx(), rows);
        let ys = stepped(origin.y, rack.dy(), segments);
        let zs = stepped(origin.z, rack.dz(), stacks);

        log::debug!(
            "rack grid: {} rows x {} segments x {} stacks",
            rows,
            segments,
            stacks
        );

        RackGrid {
            rows,
            segments,
            stacks,
            positions: grid3(&xs, &ys, &zs),
        }
    }

    fn rack_orientation(&self, location: Vec3, turned: bool) -> Vec3 {
        let (lo, hi) = AISLE_YAW_BAND;
        if turned && location.x > lo && location.x < hi {
            Vec3::yaw(AISLE_YAW)
        } else {
            Vec3::ZERO
        }
    }

    /// Rack entities for an occupancy split, followed by the forklift and
    /// piles when a complex path is given.
    pub fn assemble_interior(
        &self,
        occupancy: &Occupancy,
        path: Option<&[Vec3]>,
        rng: &mut impl Rng,
    ) -> Result<Vec<Entity>> {
        let mut out = Vec::with_capacity(occupancy.total() + 1 + MAX_PILES);
        let turned = path.is_some();
        let rack = &self.templates.rack;

        for (prefix, category, positions) in [
            ("filled_rack", AssetCategory::FilledRacks, &occupancy.filled),
            ("empty_rack", AssetCategory::EmptyRacks, &occupancy.empty),
        ] {
            for (i, &loc) in positions.iter().enumerate() {
                let pair = self.catalog.choose(category, rng)?;
                out.push(
                    Entity::instance_of(rack, format!("{prefix}_{i:03}"))
                        .with_assets(pair)
                        .at(loc)
                        .oriented(self.rack_orientation(loc, turned))
                        .scaled(INTERIOR_SCALE),
                );
            }
        }

        if let Some(path) = path {
            let picks = index::sample(rng, path.len(), (1 + MAX_PILES).min(path.len())).into_vec();
            let Some((forklift_idx, pile_idx)) = picks.split_first() else {
                return Ok(out);
            };

            let forklift_assets = self.catalog.get(AssetCategory::Forklift, 0)?;
            out.push(
                Entity::instance_of(&self.templates.forklift, "forklift")
                    .with_assets(forklift_assets)
                    .at(path[*forklift_idx])
                    .oriented(random_yaw(rng))
                    .scaled(INTERIOR_SCALE),
            );

            for (i, &idx) in pile_idx.iter().enumerate() {
                let pair = self.catalog.choose(AssetCategory::Piles, rng)?;
                out.push(
                    Entity::instance_of(&self.templates.pile, format!("pile_{i:03}"))
                        .with_assets(pair)
                        .at(path[idx])
                        .oriented(random_yaw(rng))
                        .scaled(INTERIOR_SCALE),
                );
            }
        }

        Ok(out)
    }

    /// Full interior step: grid, occupancy split, optional complex path,
    /// assembly. Facilities without an interior yield an empty group.
    pub fn interior(&self, rng: &mut impl Rng) -> Result<Vec<Entity>> {
        if !self.params.facility_type.has_interior() {
            return Ok(Vec::new());
        }

        let grid = self.rack_grid();
        if grid.is_empty() {
            log::warn!(
                "rack grid is empty for envelope {:?}; interior left empty",
                self.envelope().to_array()
            );
        }
        let occupancy = split_occupancy(&grid.positions, self.params.occupancy_ratio, rng);
        let path = self.params.facility_type.is_complex().then(complex_path);
        self.assemble_interior(&occupancy, path.as_deref(), rng)
    }
}
