//! Boolean solid/fluid field

use ndarray::Array2;

/// Solid/fluid flag for every lattice cell
///
/// `true` marks a solid cell. Solid cells never collide, always report
/// density 1 and zero velocity, and reflect the populations of adjacent fluid
/// cells (bounce-back).
///
/// Stored as a row-major `(height, width)` array, so the flat index of
/// `(x, y)` is `y * width + x`, the same convention as the solver fields.
///
/// # Example
///
/// ```rust
/// use lattice_flow::obstacle::ObstacleMask;
///
/// let mut mask = ObstacleMask::empty(40, 20);
/// mask.fill_circle(10.0, 10.0, 3.0);
///
/// assert!(mask.is_solid(10, 10));
/// assert!(!mask.is_solid(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObstacleMask {
    cells: Array2<bool>,
}

impl ObstacleMask {
    /// All-fluid mask
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), false),
        }
    }

    /// Build from a flat row-major vector of flags
    ///
    /// # Errors
    ///
    /// Fails when `cells.len() != width * height`.
    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self, String> {
        let expected = width * height;
        if cells.len() != expected {
            return Err(format!(
                "Obstacle mask length mismatch: {} cells for a {}x{} grid ({} expected)",
                cells.len(),
                width,
                height,
                expected
            ));
        }

        let cells = Array2::from_shape_vec((height, width), cells)
            .map_err(|e| format!("Invalid obstacle mask shape: {}", e))?;

        Ok(Self { cells })
    }

    /// Threshold a grayscale intensity buffer
    ///
    /// Cells strictly darker than `threshold` become solid, so dark shapes on
    /// a light background turn into obstacles.
    ///
    /// # Errors
    ///
    /// Fails when `intensity.len() != width * height`.
    pub fn from_intensity(
        width: usize,
        height: usize,
        intensity: &[f64],
        threshold: f64,
    ) -> Result<Self, String> {
        Self::from_cells(
            width,
            height,
            intensity.iter().map(|&value| value < threshold).collect(),
        )
    }

    /// Threshold an 8-bit grayscale pixel buffer (row-major, one byte per cell)
    ///
    /// # Errors
    ///
    /// Fails when `pixels.len() != width * height`.
    pub fn from_grayscale(
        width: usize,
        height: usize,
        pixels: &[u8],
        threshold: u8,
    ) -> Result<Self, String> {
        Self::from_cells(
            width,
            height,
            pixels.iter().map(|&value| value < threshold).collect(),
        )
    }

    // ========================================== Queries ==========================================

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check emptiness (zero cells, not zero obstacles)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Solid flag of `(x, y)`; cells outside the grid count as fluid
    #[inline]
    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        self.cells.get((y, x)).copied().unwrap_or(false)
    }

    /// Number of solid cells
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&solid| solid).count()
    }

    /// Underlying `(height, width)` array
    pub fn cells(&self) -> &Array2<bool> {
        &self.cells
    }

    // ========================================== Editing ==========================================

    /// Set one cell; out-of-range coordinates are ignored
    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        if let Some(cell) = self.cells.get_mut((y, x)) {
            *cell = solid;
        }
    }

    /// Mark an axis-aligned rectangle as solid, clipped to the grid
    pub fn fill_rect(&mut self, x0: usize, y0: usize, width: usize, height: usize) {
        let x1 = x0.saturating_add(width).min(self.width());
        let y1 = y0.saturating_add(height).min(self.height());

        for y in y0..y1 {
            for x in x0..x1 {
                self.cells[[y, x]] = true;
            }
        }
    }

    /// Mark every cell whose center lies within `radius` of `(cx, cy)` as solid
    ///
    /// Cell `(x, y)` has its center at `(x + 0.5, y + 0.5)`.
    pub fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64) {
        let r2 = radius * radius;
        for ((y, x), cell) in self.cells.indexed_iter_mut() {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                *cell = true;
            }
        }
    }

    /// Swap solid and fluid
    pub fn invert(&mut self) {
        self.cells.mapv_inplace(|solid| !solid);
    }

    /// Make every cell fluid
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }
}

// =================================================================================================
// Tests
// =================================================================================================
