//! Boolean occupancy raster backing the destructible terrain.
//!
//! Cells are stored row-major (`z * width + x`). The outermost ring of cells is
//! always empty so contours never touch the edge of the grid.

use crate::error::{Result, TerrainError, MIN_GRID_DIMENSION};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create a fully solid grid with an empty border ring.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let mut grid = Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        };
        grid.configure(width, height)?;
        Ok(grid)
    }

    /// Reinitialize the grid for new dimensions.
    ///
    /// Every cell becomes solid, then the border is cleared. On error the
    /// previous contents are left untouched.
    pub fn configure(&mut self, width: usize, height: usize) -> Result<()> {
        if width < MIN_GRID_DIMENSION || height < MIN_GRID_DIMENSION {
            return Err(TerrainError::InvalidDimension { width, height });
        }

        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, true);

        for x in 0..width {
            self.cells[x] = false;
            self.cells[(height - 1) * width + x] = false;
        }
        for z in 0..height {
            self.cells[z * width] = false;
            self.cells[z * width + width - 1] = false;
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat row-major view of every cell.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    pub fn is_border(&self, x: usize, z: usize) -> bool {
        x == 0 || z == 0 || x + 1 == self.width || z + 1 == self.height
    }

    pub fn contains(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.height
    }

    pub fn is_solid(&self, x: i32, z: i32) -> Result<bool> {
        let index = self.checked_index(x, z)?;
        Ok(self.cells[index])
    }

    pub fn set_solid(&mut self, x: i32, z: i32, value: bool) -> Result<()> {
        let index = self.checked_index(x, z)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Read a cell the caller has already bounds-checked.
    #[inline]
    pub(crate) fn solid_at(&self, x: usize, z: usize) -> bool {
        self.cells[z * self.width + x]
    }

    /// Clear a cell the caller has already clipped to the grid.
    /// Returns whether the cell was solid before.
    #[inline]
    pub(crate) fn clear_at(&mut self, x: usize, z: usize) -> bool {
        let index = z * self.width + x;
        std::mem::replace(&mut self.cells[index], false)
    }

    fn checked_index(&self, x: i32, z: i32) -> Result<usize> {
        if !self.contains(x, z) {
            return Err(TerrainError::OutOfBounds {
                x,
                z,
                width: self.width,
                height: self.height,
            });
        }
        Ok(z as usize * self.width + x as usize)
    }
}
