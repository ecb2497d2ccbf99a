// =====================
// ===== Constants =====
// =====================

/// Width of one grid cell in world units.
pub const CELL_SIZE: f32 = 1.0;
/// Distance from a cell corner to the wall endpoint on each adjacent edge.
pub const WALL_INSET: f32 = 0.5;
/// Height of the raised (inner) edge of every wall quad.
pub const WALL_HEIGHT: f32 = 1.0;
/// Height of the base (outer) edge of every wall quad.
pub const FLOOR_HEIGHT: f32 = 0.0;

pub const ZERO_TANGENT: [f32; 3] = [0.0, 0.0, 0.0];

/// UVs assigned to the BL, BR, TR, TL corners of every quad.
const QUAD_UVS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

// =====================
// ===== Types  ========
// =====================

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Placeholder; the renderer expects the slot but walls carry no tangent frame.
    pub tangent: [f32; 3],
    pub uv: [f32; 2],
}

/// Vertex and triangle-index buffers for one renderer section.
///
/// Indices are local to the section and grouped in triples.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSection {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all geometry but keep the allocations for the next rebuild.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Every quad adds 4 vertices, so this holds as long as only `add_quad` writes here.
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / 4
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Append a quad as two triangles: (BL, BR, TR) and (BL, TR, TL).
    ///
    /// The corners wind counter-clockwise around `normal` (right-handed).
    pub fn add_quad(
        &mut self,
        bottom_left: [f32; 3],
        bottom_right: [f32; 3],
        top_right: [f32; 3],
        top_left: [f32; 3],
        normal: [f32; 3],
        tangent: [f32; 3],
    ) {
        self.add_quad_with_uvs(
            [bottom_left, bottom_right, top_right, top_left],
            QUAD_UVS,
            normal,
            tangent,
        );
    }

    /// Same triangulation as `add_quad`, with explicit per-corner UVs.
    pub fn add_quad_with_uvs(
        &mut self,
        corners: [[f32; 3]; 4],
        uvs: [[f32; 2]; 4],
        normal: [f32; 3],
        tangent: [f32; 3],
    ) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(corners.iter().zip(uvs.iter()).map(|(&position, &uv)| Vertex {
                position,
                normal,
                tangent,
                uv,
            }));
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_quad_layout() {
        let mut section = MeshSection::new();
        section.add_quad(
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            ZERO_TANGENT,
        );
        section.add_quad(
            [2.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
            [3.0, 1.0, 0.0],
            [2.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            ZERO_TANGENT,
        );

        assert_eq!(section.vertices.len(), 8);
        assert_eq!(section.quad_count(), 2);
        assert_eq!(section.triangle_count(), 4);
        assert_eq!(section.indices, vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);

        let uvs: Vec<[f32; 2]> = section.vertices[4..].iter().map(|v| v.uv).collect();
        assert_eq!(uvs, QUAD_UVS.to_vec());
        assert!(section
            .vertices
            .iter()
            .all(|v| v.normal == [0.0, 0.0, 1.0] && v.tangent == ZERO_TANGENT));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut section = MeshSection::new();
        for i in 0..16 {
            let x = i as f32;
            section.add_quad(
                [x, 0.0, 0.0],
                [x, 0.0, 1.0],
                [x, 1.0, 1.0],
                [x, 1.0, 0.0],
                [1.0, 0.0, 0.0],
                ZERO_TANGENT,
            );
        }
        let vertex_capacity = section.vertices.capacity();
        let index_capacity = section.indices.capacity();

        section.clear();
        assert!(section.is_empty());
        assert_eq!(section.triangle_count(), 0);
        assert_eq!(section.vertices.capacity(), vertex_capacity);
        assert_eq!(section.indices.capacity(), index_capacity);
    }
}
