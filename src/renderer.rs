//! Boundary between the terrain core and whatever renders it.

use crate::marching_squares::Vertex;
use crate::mesh_builder::{Aabb, SectionId};
use crate::texture_sync::TextureRegion;

/// One section's buffers as handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct SectionUpload<'a> {
    pub id: SectionId,
    pub vertices: &'a [Vertex],
    /// Triangle indices, grouped in threes, local to `vertices`.
    pub indices: &'a [u32],
    pub bounds: Aabb,
    /// Whether the host should build collision from this section.
    pub collision: bool,
}

/// Consumer of regenerated terrain output.
///
/// Implementors own the GPU/engine resources; the core only pushes finished buffers.
pub trait TerrainRenderer {
    /// Drop every previously created section.
    fn clear_sections(&mut self);

    fn create_section(&mut self, upload: SectionUpload<'_>);

    /// Upload `pixels` (RGBA8, `region.row_stride()` bytes per row) into the map texture.
    fn update_texture(&mut self, pixels: &[u8], region: TextureRegion);
}
