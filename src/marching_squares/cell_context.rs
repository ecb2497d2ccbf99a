use super::types::*;
use crate::occupancy_grid::OccupancyGrid;

// =====================
// ===== Corners  ======
// =====================

/// Cell corners in counter-clockwise order (x right, z up).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    BottomLeft = 0,
    BottomRight = 1,
    TopRight = 2,
    TopLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::BottomRight,
        Corner::TopRight,
        Corner::TopLeft,
    ];

    /// Weight of this corner in the 4-bit configuration code.
    pub fn bit(self) -> u8 {
        1 << self as u8
    }

    pub fn from_index(idx: usize) -> Self {
        Self::ALL[idx % 4]
    }

    pub fn ccw_next(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    /// Grid offset of this corner from the cell origin.
    pub fn offset(self) -> (usize, usize) {
        match self {
            Corner::BottomLeft => (0, 0),
            Corner::BottomRight => (1, 0),
            Corner::TopRight => (1, 1),
            Corner::TopLeft => (0, 1),
        }
    }

    /// Edge reached just before this corner when walking counter-clockwise.
    pub fn entry_edge(self) -> Edge {
        Edge::from_index(self as usize + 3)
    }

    /// Edge reached just after this corner when walking counter-clockwise.
    pub fn exit_edge(self) -> Edge {
        Edge::from_index(self as usize)
    }
}

// =====================
// ===== Edges  ========
// =====================

/// Cell edges in counter-clockwise order; edge `i` joins corner `i` and corner `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Bottom = 0,
    Right = 1,
    Top = 2,
    Left = 3,
}

impl Edge {
    pub fn from_index(idx: usize) -> Self {
        match idx % 4 {
            0 => Edge::Bottom,
            1 => Edge::Right,
            2 => Edge::Top,
            _ => Edge::Left,
        }
    }

    /// Offset of the edge midpoint from the cell origin, in world units on the XZ plane.
    pub fn midpoint_offset(self) -> (f32, f32) {
        match self {
            Edge::Bottom => (WALL_INSET, 0.0),
            Edge::Right => (CELL_SIZE, WALL_INSET),
            Edge::Top => (WALL_INSET, CELL_SIZE),
            Edge::Left => (0.0, WALL_INSET),
        }
    }
}

// ================================
// ===== CellContext  =============
// ================================

/// The 2x2 neighborhood read for one cell during contour extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellContext {
    /// Grid coordinates of the bottom-left corner sample.
    pub cell_coords: (usize, usize),
    /// Solid flags indexed by `Corner as usize`.
    pub corners: [bool; 4],
}

impl CellContext {
    /// Sample the four corners of the cell whose bottom-left sample is `(map_x, map_z)`.
    /// The caller guarantees `map_x + 1 < width` and `map_z + 1 < height`.
    pub fn from_grid(grid: &OccupancyGrid, map_x: usize, map_z: usize) -> Self {
        let mut corners = [false; 4];
        for corner in Corner::ALL {
            let (dx, dz) = corner.offset();
            corners[corner as usize] = grid.solid_at(map_x + dx, map_z + dz);
        }
        Self {
            cell_coords: (map_x, map_z),
            corners,
        }
    }

    /// Build a context directly from a configuration code.
    pub fn from_case(map_x: usize, map_z: usize, case: u8) -> Self {
        let mut corners = [false; 4];
        for corner in Corner::ALL {
            corners[corner as usize] = case & corner.bit() != 0;
        }
        Self {
            cell_coords: (map_x, map_z),
            corners,
        }
    }

    /// 4-bit configuration code: BL=1, BR=2, TR=4, TL=8.
    pub fn case_index(&self) -> u8 {
        Corner::ALL
            .iter()
            .filter(|&&c| self.is_solid(c))
            .fold(0, |acc, &c| acc | c.bit())
    }

    pub fn is_solid(&self, corner: Corner) -> bool {
        self.corners[corner as usize]
    }

    pub fn solid_count(&self) -> usize {
        self.corners.iter().filter(|&&s| s).count()
    }

    pub fn origin(&self) -> (f32, f32) {
        (
            self.cell_coords.0 as f32 * CELL_SIZE,
            self.cell_coords.1 as f32 * CELL_SIZE,
        )
    }

    /// World position of an edge midpoint at the given height.
    pub fn edge_point(&self, edge: Edge, y: f32) -> [f32; 3] {
        let (ox, oz) = self.origin();
        let (dx, dz) = edge.midpoint_offset();
        [ox + dx, y, oz + dz]
    }

    /// Raised end of a wall.
    pub fn inner(&self, edge: Edge) -> [f32; 3] {
        self.edge_point(edge, WALL_HEIGHT)
    }

    /// Base end of a wall.
    pub fn outer(&self, edge: Edge) -> [f32; 3] {
        self.edge_point(edge, FLOOR_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_bits_match_configuration_weights() {
        assert_eq!(Corner::BottomLeft.bit(), 1);
        assert_eq!(Corner::BottomRight.bit(), 2);
        assert_eq!(Corner::TopRight.bit(), 4);
        assert_eq!(Corner::TopLeft.bit(), 8);
    }

    #[test]
    fn test_entry_and_exit_edges_touch_corner() {
        assert_eq!(Corner::BottomLeft.entry_edge(), Edge::Left);
        assert_eq!(Corner::BottomLeft.exit_edge(), Edge::Bottom);
        assert_eq!(Corner::BottomRight.entry_edge(), Edge::Bottom);
        assert_eq!(Corner::BottomRight.exit_edge(), Edge::Right);
        assert_eq!(Corner::TopRight.entry_edge(), Edge::Right);
        assert_eq!(Corner::TopRight.exit_edge(), Edge::Top);
        assert_eq!(Corner::TopLeft.entry_edge(), Edge::Top);
        assert_eq!(Corner::TopLeft.exit_edge(), Edge::Left);
        assert_eq!(Corner::TopLeft.ccw_next(), Corner::BottomLeft);
    }

    #[test]
    fn test_case_index_round_trips_through_corners() {
        for case in 0..16u8 {
            assert_eq!(CellContext::from_case(0, 0, case).case_index(), case);
        }
    }

    #[test]
    fn test_from_grid_reads_neighborhood() {
        let mut grid = OccupancyGrid::new(5, 5).unwrap();
        grid.set_solid(2, 2, false).unwrap();

        // Cell (1, 1): BL(1,1) BR(2,1) TR(2,2) TL(1,2) -> TR empty.
        let ctx = CellContext::from_grid(&grid, 1, 1);
        assert_eq!(ctx.case_index(), 1 | 2 | 8);

        // Cell (0, 0): only TR(1,1) solid.
        let ctx = CellContext::from_grid(&grid, 0, 0);
        assert_eq!(ctx.case_index(), 4);
    }

    #[test]
    fn test_edge_points_are_cell_midpoints() {
        let ctx = CellContext::from_case(3, 7, 0);
        assert_eq!(ctx.inner(Edge::Bottom), [3.5, WALL_HEIGHT, 7.0]);
        assert_eq!(ctx.outer(Edge::Right), [4.0, FLOOR_HEIGHT, 7.5]);
        assert_eq!(ctx.inner(Edge::Top), [3.5, WALL_HEIGHT, 8.0]);
        assert_eq!(ctx.outer(Edge::Left), [3.0, FLOOR_HEIGHT, 7.5]);
    }
}
