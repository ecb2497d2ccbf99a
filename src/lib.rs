pub mod brush;
pub mod config;
pub mod debug_log;
pub mod error;
pub mod marching_squares;
pub mod mesh_builder;
pub mod occupancy_grid;
pub mod renderer;
pub mod terrain;
pub mod texture_sync;

#[cfg(feature = "godot")]
mod terrain_node;

pub use brush::{CarveOutcome, CarveRequest};
pub use config::TerrainConfig;
pub use error::{Result, TerrainError};
pub use mesh_builder::{Aabb, MeshBuilder, RegenerationStats, SectionId};
pub use occupancy_grid::OccupancyGrid;
pub use renderer::{SectionUpload, TerrainRenderer};
pub use terrain::DestructibleTerrain;
pub use texture_sync::{MapPalette, MapTexture, TextureRegion};

#[cfg(feature = "godot")]
struct CarveTerrainExtension;

#[cfg(feature = "godot")]
#[godot::prelude::gdextension]
unsafe impl godot::prelude::ExtensionLibrary for CarveTerrainExtension {}
