//! Bilinear sampling of lattice fields at continuous positions

use ndarray::Array2;

/// Bilinearly interpolate `field` (indexed `[[y, x]]`) at `(x, y)`
///
/// Horizontally the position is clamped into the grid, so samples left of
/// the inlet or right of the outlet repeat the edge columns. Vertically there
/// is no clamping: when either of the two surrounding rows is outside the
/// grid the sample is 0.
///
/// # Example
///
/// ```rust
/// use lattice_flow::streamline::sampling::bilinear;
/// use ndarray::array;
///
/// let field = array![[0.0, 1.0], [2.0, 3.0]];
///
/// assert_eq!(bilinear(&field, 0.5, 0.5), 1.5);
/// assert_eq!(bilinear(&field, -4.0, 0.5), 1.0);
/// assert_eq!(bilinear(&field, 0.0, 1.0), 0.0);
/// ```
pub fn bilinear(field: &Array2<f64>, x: f64, y: f64) -> f64 {
    let (height, width) = field.dim();
    if width == 0 || height == 0 || !x.is_finite() {
        return 0.0;
    }
    // Checked in floating point so huge or infinite `y` never reaches a cast
    if !(y >= 0.0) || y >= (height - 1) as f64 {
        return 0.0;
    }

    let x = x.clamp(0.0, (width - 1) as f64);
    let x0 = (x.floor() as usize).min(width.saturating_sub(2));
    let x1 = (x0 + 1).min(width - 1);
    let fx = x - x0 as f64;

    let y0 = y.floor() as usize;
    let y1 = y0 + 1;
    let fy = y - y0 as f64;

    let bottom = field[[y0, x0]] * (1.0 - fx) + field[[y0, x1]] * fx;
    let top = field[[y1, x0]] * (1.0 - fx) + field[[y1, x1]] * fx;

    bottom * (1.0 - fy) + top * fy
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_grid_points_are_exact() {
        let field = Array2::from_shape_fn((4, 5), |(y, x)| (10 * y + x) as f64);

        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(bilinear(&field, x as f64, y as f64), field[[y, x]]);
            }
        }
    }

    #[test]
    fn test_linear_field_is_reproduced() {
        // f = 2x + 3y is reproduced exactly by bilinear interpolation
        let field = Array2::from_shape_fn((5, 6), |(y, x)| 2.0 * x as f64 + 3.0 * y as f64);

        let value = bilinear(&field, 2.25, 1.75);
        assert!((value - (4.5 + 5.25)).abs() < 1e-12);
    }

    #[test]
    fn test_horizontal_clamp() {
        let field = array![[1.0, 2.0, 3.0], [1.0, 2.0, 3.0]];

        assert_eq!(bilinear(&field, -2.0, 0.5), 1.0);
        assert_eq!(bilinear(&field, 2.0, 0.5), 3.0);
        assert_eq!(bilinear(&field, 9.5, 0.5), 3.0);
    }

    #[test]
    fn test_vertical_out_of_range_is_zero() {
        let field = Array2::from_elem((3, 3), 1.0);

        assert_eq!(bilinear(&field, 1.0, -0.1), 0.0);
        // Last row has no row above it
        assert_eq!(bilinear(&field, 1.0, 2.0), 0.0);
        assert!((bilinear(&field, 1.0, 1.99) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_huge_or_infinite_y_is_zero() {
        let field = Array2::from_elem((4, 4), 1.0);

        assert_eq!(bilinear(&field, 1.0, f64::INFINITY), 0.0);
        assert_eq!(bilinear(&field, 1.0, 1e300), 0.0);
        assert_eq!(bilinear(&field, 1.0, f64::NEG_INFINITY), 0.0);
        assert_eq!(bilinear(&field, 1.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_single_column_grid() {
        let field = array![[1.0], [3.0]];
        assert_eq!(bilinear(&field, 0.7, 0.5), 2.0);
    }
}
