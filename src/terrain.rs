//! Owning context for one destructible terrain.
//!
//! Holds the occupancy grid, the reusable mesh buffers and the map texture, and
//! keeps them consistent: every mutation runs a full regeneration before it
//! returns. All mutation goes through `&mut self`; hosts that share a terrain
//! across threads must wrap it in their own lock.

use crate::brush::{CarveOutcome, CarveRequest};
use crate::config::TerrainConfig;
use crate::debug_log::{
    compute_normal_stats, count_duplicate_positions, debug_log, init_debug_log,
    is_debug_log_enabled,
};
use crate::error::Result;
use crate::mesh_builder::{MeshBuilder, RegenerationStats, SectionId};
use crate::occupancy_grid::OccupancyGrid;
use crate::renderer::{SectionUpload, TerrainRenderer};
use crate::texture_sync::MapTexture;

/// Epsilon used when counting coincident vertices for the debug log.
const DUPLICATE_POSITION_EPSILON: f32 = 1e-4;

#[derive(Clone, Debug)]
pub struct DestructibleTerrain {
    config: TerrainConfig,
    grid: OccupancyGrid,
    mesh: MeshBuilder,
    texture: MapTexture,
}

impl DestructibleTerrain {
    /// Configure the grid from `config` and run the initial generation.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        config.validate()?;
        if let Some(path) = &config.debug_log_path {
            init_debug_log(path);
        }

        let grid = OccupancyGrid::new(config.width, config.height)?;
        let mut terrain = Self {
            texture: MapTexture::new(config.palette),
            mesh: MeshBuilder::new(),
            grid,
            config,
        };
        terrain.regenerate();
        Ok(terrain)
    }

    pub fn with_dimensions(width: usize, height: usize) -> Result<Self> {
        Self::new(TerrainConfig::with_dimensions(width, height))
    }

    /// Host hook for spawn, load and dimension changes: reinitialize the grid
    /// and regenerate. On error nothing changes.
    pub fn on_configure(&mut self, width: usize, height: usize) -> Result<()> {
        self.grid.configure(width, height)?;
        self.config.width = width;
        self.config.height = height;
        tracing::info!(width, height, "terrain configured");
        self.regenerate();
        Ok(())
    }

    /// Host hook for edits made outside the carve API.
    pub fn on_edit(&mut self) {
        self.regenerate();
    }

    /// Rebuild both mesh sections and the map texture from the grid.
    pub fn regenerate(&mut self) -> &RegenerationStats {
        self.mesh.regenerate(&self.grid);
        self.texture.refresh(&self.grid);

        let stats = self.mesh.stats();
        tracing::debug!(
            cells = stats.cells_scanned,
            quads = stats.quads_emitted,
            saddles = stats.saddle_cells(),
            elapsed_us = stats.elapsed.as_micros() as u64,
            "terrain mesh regenerated"
        );
        if is_debug_log_enabled() {
            self.log_mesh_stats();
        }
        self.mesh.stats()
    }

    /// Clear every cell in the clipped rectangle, then regenerate.
    pub fn carve_rectangle(&mut self, center: [f32; 2], size: [f32; 2]) -> CarveOutcome {
        self.carve(&CarveRequest::rectangle(center, size))
    }

    /// Clear every cell strictly within `diameter / 2` of `center`, then regenerate.
    pub fn carve_circle(&mut self, center: [f32; 2], diameter: f32) -> CarveOutcome {
        self.carve(&CarveRequest::circle(center, diameter))
    }

    pub fn carve(&mut self, request: &CarveRequest) -> CarveOutcome {
        if !request.is_finite() {
            tracing::warn!(?request, "ignoring non-finite carve request");
        }

        let footprint = request.footprint(self.grid.width(), self.grid.height());
        let outcome = footprint.apply(&mut self.grid);
        tracing::info!(
            ?request,
            visited = outcome.cells_visited,
            cleared = outcome.cells_cleared,
            "terrain carved"
        );

        self.regenerate();
        outcome
    }

    /// Push both sections and the map texture to `renderer`.
    pub fn publish<R: TerrainRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear_sections();
        for id in SectionId::ALL {
            let section = self.mesh.section(id);
            renderer.create_section(SectionUpload {
                id,
                vertices: &section.vertices,
                indices: &section.indices,
                bounds: self.mesh.bounds(),
                collision: id.is_collision(),
            });
        }
        renderer.update_texture(self.texture.as_bytes(), self.texture.region());
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn mesh(&self) -> &MeshBuilder {
        &self.mesh
    }

    pub fn map_texture(&self) -> &MapTexture {
        &self.texture
    }

    pub fn stats(&self) -> &RegenerationStats {
        self.mesh.stats()
    }

    fn log_mesh_stats(&self) {
        let stats = self.mesh.stats();
        let walls = self.mesh.walls();
        let normals = compute_normal_stats(&walls.vertices);
        debug_log(&format!(
            "[regenerate] {}x{}: cells={}, quads={}, saddles={}, wall_verts={}, wall_tris={}, elapsed={:?}",
            self.grid.width(),
            self.grid.height(),
            stats.cells_scanned,
            stats.quads_emitted,
            stats.saddle_cells(),
            stats.wall_vertices,
            stats.wall_triangles,
            stats.elapsed
        ));
        debug_log(&format!(
            "[regenerate] normals: min_len={:.3}, max_len={:.3}, degenerate={}, shared_positions={}",
            normals.min_len,
            normals.max_len,
            normals.degenerate_count,
            count_duplicate_positions(&walls.vertices, DUPLICATE_POSITION_EPSILON)
        ));
    }
}
