use std::collections::HashMap;

use super::types::MeshSection;

/// Result of checking a section's index buffer and, for walls, contour closure.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Indices that reference a vertex outside the section.
    pub out_of_range_indices: Vec<u32>,
    /// True if the index buffer length is not a multiple of 3.
    pub dangling_indices: bool,
    /// Wall endpoints (x, z) where the number of walls arriving differs from the number leaving.
    pub open_endpoints: Vec<[f32; 2]>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.out_of_range_indices.is_empty() && !self.dangling_indices
    }

    pub fn is_closed(&self) -> bool {
        self.open_endpoints.is_empty()
    }
}

/// Bit-exact key for a point on the XZ plane.
#[derive(Hash, Eq, PartialEq, Clone, Copy)]
struct PointKey([u32; 2]);

fn point_key(p: [f32; 2]) -> PointKey {
    PointKey([p[0].to_bits(), p[1].to_bits()])
}

/// Check that every index references a vertex in the same section.
pub fn validate_indices(section: &MeshSection) -> ValidationResult {
    let vertex_count = section.vertices.len() as u32;
    ValidationResult {
        out_of_range_indices: section
            .indices
            .iter()
            .copied()
            .filter(|&i| i >= vertex_count)
            .collect(),
        dangling_indices: section.indices.len() % 3 != 0,
        open_endpoints: Vec::new(),
    }
}

/// Validate that the wall section forms closed contours.
///
/// Each wall quad runs from its first vertex (start) to its fourth vertex (end).
/// On a closed contour every endpoint is left exactly as often as it is reached.
pub fn validate_wall_contours(walls: &MeshSection) -> ValidationResult {
    let mut result = validate_indices(walls);

    let mut balance: HashMap<PointKey, ([f32; 2], i32)> = HashMap::new();
    for quad in walls.vertices.chunks_exact(4) {
        let start = [quad[0].position[0], quad[0].position[2]];
        let end = [quad[3].position[0], quad[3].position[2]];
        balance.entry(point_key(start)).or_insert((start, 0)).1 -= 1;
        balance.entry(point_key(end)).or_insert((end, 0)).1 += 1;
    }

    result.open_endpoints = balance
        .values()
        .filter(|(_, count)| *count != 0)
        .map(|(p, _)| *p)
        .collect();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching_squares::cases::generate_cell;
    use crate::marching_squares::cell_context::CellContext;
    use crate::occupancy_grid::OccupancyGrid;

    fn extract(grid: &OccupancyGrid) -> MeshSection {
        let mut section = MeshSection::new();
        for z in 0..grid.height() - 1 {
            for x in 0..grid.width() - 1 {
                generate_cell(&CellContext::from_grid(grid, x, z), &mut section);
            }
        }
        section
    }

    #[test]
    fn test_fresh_grid_contour_is_closed() {
        let grid = OccupancyGrid::new(8, 5).unwrap();
        let result = validate_wall_contours(&extract(&grid));
        assert!(result.is_valid());
        assert!(result.is_closed(), "open: {:?}", result.open_endpoints);
    }

    #[test]
    fn test_saddles_keep_contours_closed() {
        // Checkerboard interior produces saddle cells everywhere.
        let mut grid = OccupancyGrid::new(8, 8).unwrap();
        for z in 1..7 {
            for x in 1..7 {
                if (x + z) % 2 == 0 {
                    grid.set_solid(x, z, false).unwrap();
                }
            }
        }
        let walls = extract(&grid);
        let result = validate_wall_contours(&walls);
        assert!(result.is_valid());
        assert!(result.is_closed(), "open: {:?}", result.open_endpoints);
    }

    #[test]
    fn test_detects_open_contour() {
        let mut walls = MeshSection::new();
        generate_cell(&CellContext::from_case(0, 0, 0b0011), &mut walls);
        let result = validate_wall_contours(&walls);
        assert!(result.is_valid());
        assert_eq!(result.open_endpoints.len(), 2);
    }

    #[test]
    fn test_detects_bad_indices() {
        let mut section = MeshSection::new();
        generate_cell(&CellContext::from_case(0, 0, 1), &mut section);
        section.indices.push(99);
        let result = validate_indices(&section);
        assert_eq!(result.out_of_range_indices, vec![99]);
        assert!(result.dangling_indices);
        assert!(!result.is_valid());
    }
}
