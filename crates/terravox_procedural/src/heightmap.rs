//! # Heightmap Generation
//!
//! Turns [`GradientNoise`] into a dense grid of terrain column heights.
//!
//! ## Octave Weighting
//!
//! Every octave samples the noise at `(x / quality, z / quality, offset)`
//! and adds `sample * quality` to the cell. `quality` starts at 2 and is
//! multiplied by 4 after each octave, so later octaves are broader AND
//! louder: the heavy octaves shape hills, the first one adds surface grain.
//!
//! ## Seed Offset
//!
//! The only non-deterministic input is a single offset along the noise's
//! third axis, shared by every cell of one grid. It is passed in explicitly
//! as a [`SeedOffset`], so tests inject a fixed value.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{ProceduralError, ProceduralResult};
use crate::noise::{GradientNoise, TerrainSeed};

/// Stream id for seed offsets derived from a [`TerrainSeed`].
const OFFSET_STREAM: u64 = 0x4f46_4653;

/// Upper bound (exclusive) of randomly drawn seed offsets.
pub const SEED_OFFSET_RANGE: f64 = 100.0;

/// Validated grid dimensions (both strictly positive).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridDimensions {
    width: usize,
    depth: usize,
}

impl GridDimensions {
    /// Creates grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ProceduralError::InvalidDimensions`] if either side is zero
    /// or `width * depth` does not fit in `usize`.
    pub const fn new(width: usize, depth: usize) -> ProceduralResult<Self> {
        if width == 0 || depth == 0 || width.checked_mul(depth).is_none() {
            return Err(ProceduralError::InvalidDimensions { width, depth });
        }
        Ok(Self { width, depth })
    }

    /// Number of columns along X.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        self.width
    }

    /// Number of columns along Z.
    #[inline]
    #[must_use]
    pub const fn depth(self) -> usize {
        self.depth
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.width * self.depth
    }

    /// Half the width in cells (fractional for odd widths).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn half_width(self) -> f64 {
        self.width as f64 / 2.0
    }

    /// Half the depth in cells (fractional for odd depths).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn half_depth(self) -> f64 {
        self.depth as f64 / 2.0
    }

    /// Row-major index of `(x, z)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn index(self, x: i64, z: i64) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let z = usize::try_from(z).ok()?;
        (x < self.width && z < self.depth).then_some(x + z * self.width)
    }
}

/// Offset along the noise field's third axis, constant for a whole grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedOffset(f64);

impl SeedOffset {
    /// Wraps a fixed offset.
    #[inline]
    #[must_use]
    pub const fn new(offset: f64) -> Self {
        Self(offset)
    }

    /// Draws an offset uniformly from `[0, 100)` with the given RNG.
    #[must_use]
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(0.0..SEED_OFFSET_RANGE))
    }

    /// Draws a fresh offset from thread-local entropy.
    #[must_use]
    pub fn random() -> Self {
        Self::from_rng(&mut rand::thread_rng())
    }

    /// Derives an offset deterministically from a terrain seed.
    #[must_use]
    pub fn from_seed(seed: TerrainSeed) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.derive(OFFSET_STREAM).value());
        Self::from_rng(&mut rng)
    }

    /// Returns the raw offset.
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Octave and quantisation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeightmapParams {
    /// Number of octaves to accumulate.
    pub octaves: u32,
    /// Divisor (and weight) of the first octave.
    pub initial_quality: f64,
    /// Factor applied to `quality` after each octave.
    pub quality_multiplier: f64,
    /// Scale applied to raw values before truncation to column heights.
    pub height_scale: f64,
}

impl Default for HeightmapParams {
    fn default() -> Self {
        Self {
            octaves: 4,
            initial_quality: 2.0,
            quality_multiplier: 4.0,
            height_scale: 0.15,
        }
    }
}

/// Raw accumulated noise values, one per cell, row-major (`x + z * width`).
#[derive(Clone, Debug, PartialEq)]
pub struct Heightmap {
    dimensions: GridDimensions,
    values: Vec<f64>,
}

impl Heightmap {
    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// All raw values in row-major order.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Raw value at `(x, z)`, or `None` outside the grid.
    #[must_use]
    pub fn value(&self, x: i64, z: i64) -> Option<f64> {
        self.dimensions.index(x, z).map(|i| self.values[i])
    }

    /// Quantises raw values into column heights.
    ///
    /// Each level is `value * height_scale` truncated toward zero. If any
    /// level is negative, the whole grid is raised so the lowest column sits
    /// at 0; [`HeightGrid::base`] records the level that 0 stands for.
    #[must_use]
    pub fn quantize(&self, height_scale: f64) -> HeightGrid {
        let levels: Vec<i64> = self
            .values
            .iter()
            .map(|&value| quantize_value(value, height_scale))
            .collect();
        let base = levels.iter().copied().min().unwrap_or(0).min(0);
        let heights = levels
            .into_iter()
            .map(|level| u32::try_from(level.saturating_sub(base)).unwrap_or(u32::MAX))
            .collect();

        HeightGrid {
            dimensions: self.dimensions,
            heights,
            base,
        }
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn quantize_value(value: f64, height_scale: f64) -> i64 {
    // `as` saturates and maps NaN to 0
    (value * height_scale).trunc() as i64
}

/// Immutable grid of integer column heights.
///
/// Heights are non-negative. A grid quantised from a field that dips below
/// zero is shifted up as a whole, which keeps every height difference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightGrid {
    dimensions: GridDimensions,
    heights: Vec<u32>,
    base: i64,
}

impl HeightGrid {
    /// Builds a grid from row-major heights.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid or `heights` does not
    /// hold exactly `width * depth` values.
    pub fn from_heights(width: usize, depth: usize, heights: Vec<u32>) -> ProceduralResult<Self> {
        let dimensions = GridDimensions::new(width, depth)?;
        if heights.len() != dimensions.cell_count() {
            return Err(ProceduralError::GridSizeMismatch {
                expected: dimensions.cell_count(),
                actual: heights.len(),
            });
        }
        Ok(Self {
            dimensions,
            heights,
            base: 0,
        })
    }

    /// A grid where every column has the same height.
    #[must_use]
    pub fn flat(dimensions: GridDimensions, height: u32) -> Self {
        Self {
            dimensions,
            heights: vec![height; dimensions.cell_count()],
            base: 0,
        }
    }

    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of columns along X.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.dimensions.width
    }

    /// Number of columns along Z.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.dimensions.depth
    }

    /// All heights in row-major order.
    #[inline]
    #[must_use]
    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    /// Height at `(x, z)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: i64, z: i64) -> Option<u32> {
        self.dimensions.index(x, z).map(|i| self.heights[i])
    }

    /// Height of an in-grid column.
    ///
    /// # Panics
    ///
    /// Panics if `(x, z)` lies outside the grid.
    #[inline]
    #[must_use]
    pub fn height(&self, x: usize, z: usize) -> u32 {
        assert!(
            x < self.dimensions.width && z < self.dimensions.depth,
            "column ({x}, {z}) outside {}x{} grid",
            self.dimensions.width,
            self.dimensions.depth
        );
        self.heights[x + z * self.dimensions.width]
    }

    /// Unshifted level of height 0: the lowest truncated level when it was
    /// negative, otherwise 0.
    #[inline]
    #[must_use]
    pub const fn base(&self) -> i64 {
        self.base
    }

    /// Truncated level of column `(x, z)` before the shift.
    ///
    /// # Panics
    ///
    /// Panics if `(x, z)` lies outside the grid.
    #[must_use]
    pub fn level(&self, x: usize, z: usize) -> i64 {
        i64::from(self.height(x, z)) + self.base
    }

    /// Tallest column in the grid.
    #[must_use]
    pub fn max_height(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    /// Lowest column in the grid.
    #[must_use]
    pub fn min_height(&self) -> u32 {
        self.heights.iter().copied().min().unwrap_or(0)
    }
}

/// Composes octaves of gradient noise into heightmaps.
///
/// # Example
///
/// ```rust
/// use terravox_procedural::{GridDimensions, HeightmapGenerator, SeedOffset};
///
/// let generator = HeightmapGenerator::default();
/// let dims = GridDimensions::new(16, 8).unwrap();
/// let grid = generator.generate_grid(dims, SeedOffset::new(12.5));
///
/// assert_eq!(grid.heights().len(), 16 * 8);
/// assert_eq!(grid, generator.generate_grid(dims, SeedOffset::new(12.5)));
/// ```
#[derive(Clone, Default)]
pub struct HeightmapGenerator {
    noise: GradientNoise,
    params: HeightmapParams,
}

impl HeightmapGenerator {
    /// Creates a generator from a noise field and parameters.
    #[must_use]
    pub fn new(noise: GradientNoise, params: HeightmapParams) -> Self {
        Self { noise, params }
    }

    /// Generator parameters.
    #[inline]
    #[must_use]
    pub const fn params(&self) -> &HeightmapParams {
        &self.params
    }

    /// Accumulates all octaves into a raw heightmap.
    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(width = dimensions.width(), depth = dimensions.depth())
    )]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn generate(&self, dimensions: GridDimensions, offset: SeedOffset) -> Heightmap {
        let width = dimensions.width();
        let mut values = vec![0.0_f64; dimensions.cell_count()];
        let mut quality = self.params.initial_quality;

        for _ in 0..self.params.octaves {
            for (i, value) in values.iter_mut().enumerate() {
                let x = (i % width) as f64;
                let z = (i / width) as f64;
                *value += self.noise.sample(x / quality, z / quality, offset.value()) * quality;
            }
            quality *= self.params.quality_multiplier;
        }

        tracing::debug!(
            octaves = self.params.octaves,
            offset = offset.value(),
            "heightmap accumulated"
        );

        Heightmap { dimensions, values }
    }

    /// Generates and quantises in one step using `params.height_scale`.
    #[must_use]
    pub fn generate_grid(&self, dimensions: GridDimensions, offset: SeedOffset) -> HeightGrid {
        let grid = self.generate(dimensions, offset).quantize(self.params.height_scale);
        tracing::debug!(
            min = grid.min_height(),
            max = grid.max_height(),
            "height grid quantised"
        );
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: usize, depth: usize) -> GridDimensions {
        GridDimensions::new(width, depth).unwrap()
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            GridDimensions::new(0, 4),
            Err(ProceduralError::InvalidDimensions { width: 0, depth: 4 })
        );
        assert!(GridDimensions::new(4, 0).is_err());
        assert!(GridDimensions::new(1, 1).is_ok());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        assert_eq!(
            GridDimensions::new(usize::MAX, 2),
            Err(ProceduralError::InvalidDimensions {
                width: usize::MAX,
                depth: 2
            })
        );
        assert!(GridDimensions::new(usize::MAX, 1).is_ok());
    }

    #[test]
    fn test_half_extents_are_fractional() {
        let d = dims(3, 128);
        assert_eq!(d.half_width(), 1.5);
        assert_eq!(d.half_depth(), 64.0);
    }

    #[test]
    fn test_index_out_of_range() {
        let d = dims(4, 3);
        assert_eq!(d.index(0, 0), Some(0));
        assert_eq!(d.index(3, 2), Some(11));
        assert_eq!(d.index(-1, 0), None);
        assert_eq!(d.index(4, 0), None);
        assert_eq!(d.index(0, 3), None);
    }

    #[test]
    fn test_cell_count() {
        let generator = HeightmapGenerator::default();
        for (w, d) in [(1, 1), (7, 3), (32, 32)] {
            let map = generator.generate(dims(w, d), SeedOffset::new(3.0));
            assert_eq!(map.values().len(), w * d);
            assert!(map.values().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_fixed_offset_is_deterministic() {
        let generator = HeightmapGenerator::default();
        let a = generator.generate(dims(24, 16), SeedOffset::new(57.125));
        let b = generator.generate(dims(24, 16), SeedOffset::new(57.125));
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_octave_matches_noise() {
        let noise = GradientNoise::reference();
        let params = HeightmapParams {
            octaves: 1,
            ..HeightmapParams::default()
        };
        let generator = HeightmapGenerator::new(noise.clone(), params);
        let map = generator.generate(dims(5, 4), SeedOffset::new(10.5));

        let expected = noise.sample(3.0 / 2.0, 2.0 / 2.0, 10.5) * 2.0;
        assert_eq!(map.value(3, 2), Some(expected));
    }

    #[test]
    fn test_octave_weights_grow() {
        let noise = GradientNoise::reference();
        let generator = HeightmapGenerator::new(noise.clone(), HeightmapParams::default());
        let map = generator.generate(dims(9, 9), SeedOffset::new(33.3));

        let (x, z) = (7.0, 5.0);
        let expected = noise.sample(x / 2.0, z / 2.0, 33.3) * 2.0
            + noise.sample(x / 8.0, z / 8.0, 33.3) * 8.0
            + noise.sample(x / 32.0, z / 32.0, 33.3) * 32.0
            + noise.sample(x / 128.0, z / 128.0, 33.3) * 128.0;
        let actual = map.value(7, 5).unwrap();
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let params = HeightmapParams {
            octaves: 0,
            ..HeightmapParams::default()
        };
        let generator = HeightmapGenerator::new(GradientNoise::reference(), params);
        let grid = generator.generate_grid(dims(4, 4), SeedOffset::new(1.0));
        assert!(grid.heights().iter().all(|&h| h == 0));
    }

    #[test]
    fn test_quantize_truncates_toward_zero() {
        assert_eq!(quantize_value(20.0, 0.15), 3);
        assert_eq!(quantize_value(19.9, 0.15), 2);
        assert_eq!(quantize_value(6.0, 0.15), 0);
        assert_eq!(quantize_value(-6.0, 0.15), 0);
        assert_eq!(quantize_value(-20.0, 0.15), -3);
        assert_eq!(quantize_value(f64::NAN, 0.15), 0);
    }

    #[test]
    fn test_negative_levels_shift_grid() {
        let map = Heightmap {
            dimensions: dims(4, 1),
            values: vec![-20.0, -6.67, 0.0, 14.0],
        };
        let grid = map.quantize(0.15);

        // Levels -3, -1, 0, 2
        assert_eq!(grid.base(), -3);
        assert_eq!(grid.heights(), &[0, 2, 3, 5]);
        assert_eq!(grid.level(1, 0), -1);
        assert_eq!(grid.level(3, 0), 2);
        assert_eq!(grid.min_height(), 0);
    }

    #[test]
    fn test_positive_levels_unshifted() {
        let map = Heightmap {
            dimensions: dims(2, 1),
            values: vec![7.0, 20.0],
        };
        let grid = map.quantize(0.15);
        assert_eq!(grid.base(), 0);
        assert_eq!(grid.heights(), &[1, 3]);
    }

    #[test]
    fn test_heights_non_negative_and_bounded() {
        // |noise| <= 1.1, total weight 2 + 8 + 32 + 128 = 170, both signs
        let bound = 2 * ((1.1 * 170.0 * 0.15) as u32 + 1);
        let generator = HeightmapGenerator::default();
        for offset in [0.0, 12.5, 99.9] {
            let grid = generator.generate_grid(dims(64, 64), SeedOffset::new(offset));
            assert!(grid.max_height() <= bound);
        }
    }

    #[test]
    fn test_from_heights_validates_length() {
        assert_eq!(
            HeightGrid::from_heights(3, 2, vec![0; 5]),
            Err(ProceduralError::GridSizeMismatch {
                expected: 6,
                actual: 5
            })
        );
        let grid = HeightGrid::from_heights(3, 1, vec![0, 0, 2]).unwrap();
        assert_eq!(grid.height(2, 0), 2);
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(-1, 0), None);
    }

    #[test]
    fn test_seed_offset_sources() {
        let seed = TerrainSeed::new(42);
        assert_eq!(SeedOffset::from_seed(seed), SeedOffset::from_seed(seed));
        assert_ne!(
            SeedOffset::from_seed(seed),
            SeedOffset::from_seed(TerrainSeed::new(43))
        );

        for _ in 0..100 {
            let offset = SeedOffset::random().value();
            assert!((0.0..SEED_OFFSET_RANGE).contains(&offset));
        }
    }
}
