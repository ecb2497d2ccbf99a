//! Full-grid mesh regeneration into the two renderer sections.

use std::time::{Duration, Instant};

use crate::marching_squares::{
    add_front_face, generate_cell, CellContext, MeshSection, CELL_SIZE, WALL_HEIGHT,
};
use crate::occupancy_grid::OccupancyGrid;

/// Renderer section slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    /// Contour walls; the only section hosts should build collision from.
    Walls = 0,
    /// Background plane covering the whole grid.
    Front = 1,
}

impl SectionId {
    pub const ALL: [SectionId; 2] = [SectionId::Walls, SectionId::Front];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_collision(self) -> bool {
        matches!(self, SectionId::Walls)
    }

    pub fn name(self) -> &'static str {
        match self {
            SectionId::Walls => "walls",
            SectionId::Front => "front",
        }
    }
}

/// Axis-aligned bounding box hint passed along with each section.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Aabb {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Counters collected during one regeneration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegenerationStats {
    pub cells_scanned: usize,
    pub quads_emitted: usize,
    /// How many cells fell into each configuration code.
    pub case_histogram: [usize; 16],
    pub wall_vertices: usize,
    pub wall_triangles: usize,
    pub front_vertices: usize,
    pub front_triangles: usize,
    pub elapsed: Duration,
}

impl RegenerationStats {
    pub fn saddle_cells(&self) -> usize {
        self.case_histogram[0b0101] + self.case_histogram[0b1010]
    }
}

/// Owns the reusable section buffers and rebuilds them from an occupancy grid.
#[derive(Clone, Debug, Default)]
pub struct MeshBuilder {
    walls: MeshSection,
    front: MeshSection,
    bounds: Aabb,
    stats: RegenerationStats,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both sections from scratch. Buffers are cleared, not reallocated.
    pub fn regenerate(&mut self, grid: &OccupancyGrid) -> &RegenerationStats {
        let started = Instant::now();
        let mut stats = RegenerationStats::default();

        self.walls.clear();
        self.front.clear();

        for map_z in 0..grid.height() - 1 {
            for map_x in 0..grid.width() - 1 {
                let ctx = CellContext::from_grid(grid, map_x, map_z);
                stats.case_histogram[ctx.case_index() as usize] += 1;
                stats.quads_emitted += generate_cell(&ctx, &mut self.walls);
                stats.cells_scanned += 1;
            }
        }

        let width = grid.width() as f32 * CELL_SIZE;
        let height = grid.height() as f32 * CELL_SIZE;
        add_front_face(&mut self.front, width, height, WALL_HEIGHT);

        self.bounds = Aabb {
            min: [0.0, 0.0, 0.0],
            max: [width, 0.0, height],
        };

        stats.wall_vertices = self.walls.vertices.len();
        stats.wall_triangles = self.walls.triangle_count();
        stats.front_vertices = self.front.vertices.len();
        stats.front_triangles = self.front.triangle_count();
        stats.elapsed = started.elapsed();
        self.stats = stats;
        &self.stats
    }

    pub fn section(&self, id: SectionId) -> &MeshSection {
        match id {
            SectionId::Walls => &self.walls,
            SectionId::Front => &self.front,
        }
    }

    pub fn walls(&self) -> &MeshSection {
        &self.walls
    }

    pub fn front(&self) -> &MeshSection {
        &self.front
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn stats(&self) -> &RegenerationStats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching_squares::validate_wall_contours;

    #[test]
    fn test_section_ids() {
        assert_eq!(SectionId::Walls.index(), 0);
        assert_eq!(SectionId::Front.index(), 1);
        assert!(SectionId::Walls.is_collision());
        assert!(!SectionId::Front.is_collision());
    }

    #[test]
    fn test_fresh_grid_has_one_quad_per_ring_cell() {
        let grid = OccupancyGrid::new(10, 10).unwrap();
        let mut builder = MeshBuilder::new();
        let stats = builder.regenerate(&grid).clone();

        // 9x9 cells, of which the outer ring of 32 touches the border.
        assert_eq!(stats.cells_scanned, 81);
        assert_eq!(stats.quads_emitted, 32);
        assert_eq!(stats.case_histogram[15], 49);
        assert_eq!(builder.walls().quad_count(), 32);
        assert_eq!(stats.wall_triangles, 64);
        assert!(validate_wall_contours(builder.walls()).is_closed());
    }

    #[test]
    fn test_front_section_is_single_quad() {
        let grid = OccupancyGrid::new(7, 4).unwrap();
        let mut builder = MeshBuilder::new();
        builder.regenerate(&grid);

        let front = builder.section(SectionId::Front);
        assert_eq!(front.vertices.len(), 4);
        assert_eq!(front.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(front.vertices[2].position, [7.0, WALL_HEIGHT, 4.0]);
        assert_eq!(
            builder.bounds(),
            Aabb {
                min: [0.0, 0.0, 0.0],
                max: [7.0, 0.0, 4.0]
            }
        );
    }

    #[test]
    fn test_regeneration_is_idempotent() {
        let mut grid = OccupancyGrid::new(12, 9).unwrap();
        grid.set_solid(4, 4, false).unwrap();
        grid.set_solid(5, 5, false).unwrap();

        let mut builder = MeshBuilder::new();
        builder.regenerate(&grid);
        let walls = builder.walls().clone();
        let front = builder.front().clone();

        builder.regenerate(&grid);
        assert_eq!(builder.walls(), &walls);
        assert_eq!(builder.front(), &front);
    }

    #[test]
    fn test_smallest_grid_is_empty() {
        let grid = OccupancyGrid::new(2, 2).unwrap();
        let mut builder = MeshBuilder::new();
        let stats = builder.regenerate(&grid);
        assert_eq!(stats.cells_scanned, 1);
        assert_eq!(stats.quads_emitted, 0);
        assert!(builder.walls().is_empty());
        assert_eq!(builder.front().quad_count(), 1);
    }

    #[test]
    fn test_saddle_cells_counted() {
        let mut grid = OccupancyGrid::new(5, 5).unwrap();
        // Interior 3x3; clear two opposite cells to form diagonals.
        grid.set_solid(2, 1, false).unwrap();
        grid.set_solid(1, 2, false).unwrap();
        let mut builder = MeshBuilder::new();
        let stats = builder.regenerate(&grid);
        assert!(stats.saddle_cells() > 0);
        assert!(validate_wall_contours(builder.walls()).is_closed());
    }
}
