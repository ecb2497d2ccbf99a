use super::cell_context::{CellContext, Corner, Edge};
use super::types::{MeshSection, ZERO_TANGENT};

/// Vertical wall from the midpoint of `from` to the midpoint of `to`.
///
/// Walls are always walked with the solid side on the right, so the
/// left-hand perpendicular of `from -> to` faces the empty side.
pub fn add_wall(ctx: &CellContext, section: &mut MeshSection, from: Edge, to: Edge) {
    let a_inner = ctx.inner(from);
    let a_outer = ctx.outer(from);
    let b_inner = ctx.inner(to);
    let b_outer = ctx.outer(to);

    let dx = b_inner[0] - a_inner[0];
    let dz = b_inner[2] - a_inner[2];
    let len = (dx * dx + dz * dz).sqrt();
    let normal = [-dz / len, 0.0, dx / len];

    section.add_quad(a_inner, a_outer, b_outer, b_inner, normal, ZERO_TANGENT);
}

/// Cases 1, 2, 4, 8: a single solid corner cut off diagonally.
pub fn add_outer_corner(ctx: &CellContext, section: &mut MeshSection, solid: Corner) {
    add_wall(ctx, section, solid.entry_edge(), solid.exit_edge());
}

/// Cases 3, 6, 9, 12: `first` and its counter-clockwise neighbour are solid.
pub fn add_straight_wall(ctx: &CellContext, section: &mut MeshSection, first: Corner) {
    add_wall(ctx, section, first.entry_edge(), first.ccw_next().exit_edge());
}

/// Cases 7, 11, 13, 14: the wall wraps the one empty corner.
pub fn add_inner_corner(ctx: &CellContext, section: &mut MeshSection, empty: Corner) {
    add_wall(ctx, section, empty.exit_edge(), empty.entry_edge());
}

/// Cases 5 and 10: two diagonal solid corners, always treated as separate.
pub fn add_saddle(ctx: &CellContext, section: &mut MeshSection, first: Corner) {
    add_outer_corner(ctx, section, first);
    add_outer_corner(ctx, section, first.ccw_next().ccw_next());
}

/// Background plane covering the whole grid rectangle at wall height, facing +Y.
///
/// Corners go origin, +Z, far, +X so the triangles wind around +Y like the walls
/// wind around theirs. UV (u, v) follows (x / width, z / height).
pub fn add_front_face(section: &mut MeshSection, width: f32, height: f32, y: f32) {
    let (left, bottom, right, top) = (0.0, 0.0, width, height);
    section.add_quad_with_uvs(
        [
            [left, y, bottom],
            [left, y, top],
            [right, y, top],
            [right, y, bottom],
        ],
        [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]],
        [0.0, 1.0, 0.0],
        ZERO_TANGENT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marching_squares::types::{FLOOR_HEIGHT, WALL_HEIGHT};

    fn assert_close(a: [f32; 3], b: [f32; 3]) {
        for i in 0..3 {
            assert!((a[i] - b[i]).abs() < 1e-6, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_wall_quad_corner_order() {
        let ctx = CellContext::from_case(0, 0, 0b0011);
        let mut section = MeshSection::new();
        add_straight_wall(&ctx, &mut section, Corner::BottomLeft);

        let p: Vec<[f32; 3]> = section.positions().collect();
        assert_eq!(p[0], [0.0, WALL_HEIGHT, 0.5]);
        assert_eq!(p[1], [0.0, FLOOR_HEIGHT, 0.5]);
        assert_eq!(p[2], [1.0, FLOOR_HEIGHT, 0.5]);
        assert_eq!(p[3], [1.0, WALL_HEIGHT, 0.5]);
    }

    #[test]
    fn test_wall_normal_faces_empty_side() {
        // Bottom row solid: wall runs left to right, empty side is +Z.
        let ctx = CellContext::from_case(0, 0, 0b0011);
        let mut section = MeshSection::new();
        add_straight_wall(&ctx, &mut section, Corner::BottomLeft);
        assert_close(section.vertices[0].normal, [0.0, 0.0, 1.0]);

        // Only the bottom-left corner solid: normal points away from it.
        let ctx = CellContext::from_case(0, 0, 0b0001);
        let mut section = MeshSection::new();
        add_outer_corner(&ctx, &mut section, Corner::BottomLeft);
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert_close(section.vertices[0].normal, [h, 0.0, h]);

        // Only the bottom-left corner empty: normal points toward it.
        let ctx = CellContext::from_case(0, 0, 0b1110);
        let mut section = MeshSection::new();
        add_inner_corner(&ctx, &mut section, Corner::BottomLeft);
        assert_close(section.vertices[0].normal, [-h, 0.0, -h]);
    }

    #[test]
    fn test_saddle_emits_walls_around_both_solid_corners() {
        let ctx = CellContext::from_case(0, 0, 0b0101);
        let mut section = MeshSection::new();
        add_saddle(&ctx, &mut section, Corner::BottomLeft);

        assert_eq!(section.quad_count(), 2);
        // First wall cuts the bottom-left corner, second the top-right corner.
        assert_eq!(section.vertices[0].position, [0.0, WALL_HEIGHT, 0.5]);
        assert_eq!(section.vertices[3].position, [0.5, WALL_HEIGHT, 0.0]);
        assert_eq!(section.vertices[4].position, [1.0, WALL_HEIGHT, 0.5]);
        assert_eq!(section.vertices[7].position, [0.5, WALL_HEIGHT, 1.0]);
    }

    /// Unit normal of a triangle, counter-clockwise, right-handed.
    fn winding_normal(section: &MeshSection, tri: [u32; 3]) -> [f32; 3] {
        let [a, b, c] = tri.map(|i| section.vertices[i as usize].position);
        let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
        let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
        let n = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        [n[0] / len, n[1] / len, n[2] / len]
    }

    #[test]
    fn test_front_face_spans_grid() {
        let mut section = MeshSection::new();
        add_front_face(&mut section, 10.0, 6.0, WALL_HEIGHT);
        let p: Vec<[f32; 3]> = section.positions().collect();
        assert_eq!(
            p,
            vec![
                [0.0, 1.0, 0.0],
                [0.0, 1.0, 6.0],
                [10.0, 1.0, 6.0],
                [10.0, 1.0, 0.0]
            ]
        );
        assert!(section.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));

        // u runs along X, v along Z
        for v in &section.vertices {
            assert_eq!(v.uv, [v.position[0] / 10.0, v.position[2] / 6.0]);
        }
    }

    #[test]
    fn test_winding_matches_stored_normal() {
        let mut section = MeshSection::new();
        add_front_face(&mut section, 10.0, 6.0, WALL_HEIGHT);
        for case in 1..15u8 {
            let ctx = CellContext::from_case(0, 0, case);
            crate::marching_squares::cases::generate_cell(&ctx, &mut section);
        }
        assert!(section.triangle_count() > 2);

        for tri in section.triangles() {
            let stored = section.vertices[tri[0] as usize].normal;
            assert_close(winding_normal(&section, tri), stored);
        }
    }
}
