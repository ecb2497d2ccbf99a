//! Occupancy-to-pixel sync for the map visualization texture.
//!
//! One RGBA8 pixel per grid cell, uploaded as a single full-size region.

use serde::{Deserialize, Serialize};

use crate::occupancy_grid::OccupancyGrid;

/// Material parameter the map texture is bound to.
pub const MAP_TEXTURE_PARAMETER: &str = "Texture";

pub const BYTES_PER_PIXEL: usize = 4;

pub type Rgba8 = [u8; 4];

/// Two-value palette used to colour the map texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapPalette {
    pub solid: Rgba8,
    pub empty: Rgba8,
}

impl Default for MapPalette {
    fn default() -> Self {
        Self {
            solid: [0, 0, 255, 255],
            empty: [0, 0, 0, 0],
        }
    }
}

impl MapPalette {
    #[inline]
    pub fn color(&self, solid: bool) -> Rgba8 {
        if solid {
            self.solid
        } else {
            self.empty
        }
    }
}

/// Region descriptor handed to the texture boundary with every upload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureRegion {
    pub dest_x: u32,
    pub dest_y: u32,
    pub src_x: u32,
    pub src_y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            dest_x: 0,
            dest_y: 0,
            src_x: 0,
            src_y: 0,
            width: width as u32,
            height: height as u32,
        }
    }

    /// Bytes between the starts of consecutive rows.
    pub fn row_stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    pub fn byte_len(&self) -> usize {
        self.row_stride() * self.height as usize
    }
}

/// Build a fresh pixel buffer for the grid.
pub fn snapshot(grid: &OccupancyGrid, palette: &MapPalette) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(grid.len() * BYTES_PER_PIXEL);
    write_pixels(grid, palette, &mut pixels);
    pixels
}

fn write_pixels(grid: &OccupancyGrid, palette: &MapPalette, out: &mut Vec<u8>) {
    out.clear();
    out.extend(grid.cells().iter().flat_map(|&solid| palette.color(solid)));
}

/// Reusable CPU-side copy of the map texture.
#[derive(Clone, Debug, Default)]
pub struct MapTexture {
    width: usize,
    height: usize,
    palette: MapPalette,
    pixels: Vec<u8>,
}

impl MapTexture {
    pub fn new(palette: MapPalette) -> Self {
        Self {
            palette,
            ..Default::default()
        }
    }

    /// Recolour every pixel from the current grid state.
    pub fn refresh(&mut self, grid: &OccupancyGrid) {
        self.width = grid.width();
        self.height = grid.height();
        write_pixels(grid, &self.palette, &mut self.pixels);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn palette(&self) -> &MapPalette {
        &self.palette
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, z: usize) -> Option<Rgba8> {
        if x >= self.width || z >= self.height {
            return None;
        }
        let start = (z * self.width + x) * BYTES_PER_PIXEL;
        let mut rgba = [0; BYTES_PER_PIXEL];
        rgba.copy_from_slice(&self.pixels[start..start + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    pub fn region(&self) -> TextureRegion {
        TextureRegion::full(self.width, self.height)
    }
}
