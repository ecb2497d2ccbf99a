//! Carve requests and their clipped grid footprints.
//!
//! Carving is erase-only: a footprint lists cells to clear, never cells to fill.
//! Requests that reach past the grid are clipped; non-finite requests carve nothing.

use crate::occupancy_grid::OccupancyGrid;

/// A 2D cell position on the terrain (XZ plane), already clipped to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellXZ {
    pub x: usize,
    pub z: usize,
}

impl CellXZ {
    pub fn new(x: usize, z: usize) -> Self {
        Self { x, z }
    }
}

/// Shape of a carve request, in grid units on the XZ plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CarveRequest {
    /// Axis-aligned rectangle given by its center and full extent.
    Rectangle { center: [f32; 2], size: [f32; 2] },
    /// Disc given by its center and diameter.
    Circle { center: [f32; 2], diameter: f32 },
}

impl CarveRequest {
    pub fn rectangle(center: [f32; 2], size: [f32; 2]) -> Self {
        CarveRequest::Rectangle { center, size }
    }

    pub fn circle(center: [f32; 2], diameter: f32) -> Self {
        CarveRequest::Circle { center, diameter }
    }

    pub fn is_finite(&self) -> bool {
        match *self {
            CarveRequest::Rectangle { center, size } => {
                center.iter().chain(size.iter()).all(|v| v.is_finite())
            }
            CarveRequest::Circle { center, diameter } => {
                center.iter().all(|v| v.is_finite()) && diameter.is_finite()
            }
        }
    }

    /// Cells of a `width` x `height` grid this request would clear, row-major.
    pub fn footprint(&self, width: usize, height: usize) -> CarveFootprint {
        let mut footprint = CarveFootprint::default();
        if !self.is_finite() {
            return footprint;
        }

        match *self {
            CarveRequest::Rectangle { center, size } => {
                let range = CellRange::rectangle(center, size, width, height);
                for z in range.min_z..range.max_z {
                    for x in range.min_x..range.max_x {
                        footprint.cells.push(CellXZ::new(x, z));
                    }
                }
            }
            CarveRequest::Circle { center, diameter } => {
                let radius = diameter / 2.0;
                if radius <= 0.0 {
                    return footprint;
                }
                let radius_sq = radius * radius;
                let range = CellRange::bounding_square(center, radius, width, height);
                for z in range.min_z..range.max_z {
                    for x in range.min_x..range.max_x {
                        let dx = x as f32 - center[0];
                        let dz = z as f32 - center[1];
                        if dx * dx + dz * dz < radius_sq {
                            footprint.cells.push(CellXZ::new(x, z));
                        }
                    }
                }
            }
        }
        footprint
    }
}

/// Half-open cell range `[min, max)` on both axes, clipped to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CellRange {
    pub min_x: usize,
    pub max_x: usize,
    pub min_z: usize,
    pub max_z: usize,
}

impl CellRange {
    /// `center ± size/2` clipped to the grid, both ends truncated to whole cells.
    pub fn rectangle(center: [f32; 2], size: [f32; 2], width: usize, height: usize) -> Self {
        let (min_x, max_x) = clip_span(
            center[0] - size[0] / 2.0,
            center[0] + size[0] / 2.0,
            width,
        );
        let (min_z, max_z) = clip_span(
            center[1] - size[1] / 2.0,
            center[1] + size[1] / 2.0,
            height,
        );
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Every cell that could lie within `radius` of `center`.
    pub fn bounding_square(center: [f32; 2], radius: f32, width: usize, height: usize) -> Self {
        let (min_x, max_x) = clip_span(
            (center[0] - radius).floor(),
            (center[0] + radius).floor() + 1.0,
            width,
        );
        let (min_z, max_z) = clip_span(
            (center[1] - radius).floor(),
            (center[1] + radius).floor() + 1.0,
            height,
        );
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_z >= self.max_z
    }

    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.max_x - self.min_x) * (self.max_z - self.min_z)
    }
}

/// Clip `[lo, hi)` to `[0, limit)` and truncate to whole cells.
fn clip_span(lo: f32, hi: f32, limit: usize) -> (usize, usize) {
    let limit_f = limit as f32;
    let start = lo.max(0.0).min(limit_f).floor() as usize;
    let end = hi.max(0.0).min(limit_f).floor() as usize;
    (start, end.max(start))
}

/// Clipped set of cells affected by one carve.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarveFootprint {
    pub cells: Vec<CellXZ>,
}

impl CarveFootprint {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &CellXZ) -> bool {
        self.cells.contains(cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellXZ> {
        self.cells.iter()
    }

    /// Clear every cell in the footprint.
    pub fn apply(&self, grid: &mut OccupancyGrid) -> CarveOutcome {
        let mut cleared = 0;
        for cell in &self.cells {
            if grid.clear_at(cell.x, cell.z) {
                cleared += 1;
            }
        }
        CarveOutcome {
            cells_visited: self.cells.len(),
            cells_cleared: cleared,
        }
    }
}

/// What a carve actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CarveOutcome {
    /// Cells inside the clipped footprint.
    pub cells_visited: usize,
    /// Cells that went from solid to empty.
    pub cells_cleared: usize,
}
