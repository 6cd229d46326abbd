//! Fixed-format RGB rasters captured from the camera.

use thiserror::Error;

/// Width in pixels of a camera capture frame.
pub const CAPTURE_WIDTH: u32 = 595;
/// Height in pixels of a camera capture frame.
pub const CAPTURE_HEIGHT: u32 = 742;

/// Errors raised when constructing a raster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    PixelLengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Quarter-turn rotations applied during page editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// 90 degrees clockwise.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Deg270,
}

/// Row-major RGB8 pixel grid.
///
/// ## Invariants
/// - `pixels.len() == width * height * 3`, enforced by the constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    const BYTES_PER_PIXEL: usize = 3;

    /// Construct a black raster of the given dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyDimensions { width, height });
        }
        let pixels = vec![0; width as usize * height as usize * Self::BYTES_PER_PIXEL];
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Construct a raster over an existing RGB8 buffer.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::EmptyDimensions { width, height });
        }
        let expected = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RasterError::PixelLengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Construct a capture-frame-sized raster (595x742).
    pub fn capture_frame(pixels: Vec<u8>) -> Result<Self, RasterError> {
        Self::from_pixels(CAPTURE_WIDTH, CAPTURE_HEIGHT, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row-major RGB8 pixel bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Return a copy rotated clockwise by the given quarter turns.
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut pixels = vec![0; self.pixels.len()];
        for y in 0..height {
            for x in 0..width {
                let source = (y * width + x) * Self::BYTES_PER_PIXEL;
                let target = match rotation {
                    Rotation::Deg90 => (x * height + (height - 1 - y)) * Self::BYTES_PER_PIXEL,
                    Rotation::Deg180 => {
                        ((height - 1 - y) * width + (width - 1 - x)) * Self::BYTES_PER_PIXEL
                    }
                    Rotation::Deg270 => ((width - 1 - x) * height + y) * Self::BYTES_PER_PIXEL,
                };
                pixels[target..target + Self::BYTES_PER_PIXEL]
                    .copy_from_slice(&self.pixels[source..source + Self::BYTES_PER_PIXEL]);
            }
        }
        let (width, height) = match rotation {
            Rotation::Deg90 | Rotation::Deg270 => (self.height, self.width),
            Rotation::Deg180 => (self.width, self.height),
        };
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Return a copy with the flat brightness boost applied to every channel.
    ///
    /// Each channel maps to `min(255, value * 1.1 + 10)`, so enhancement never
    /// darkens a pixel and saturates at white.
    pub fn enhanced(&self) -> Self {
        let pixels = self.pixels.iter().copied().map(enhance_channel).collect();
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// `min(255, value * 1.1 + 10)` rounded to the nearest integer.
fn enhance_channel(value: u8) -> u8 {
    let boosted = (u16::from(value) * 11 + 105) / 10;
    boosted.min(255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// 2x2 raster with one marker colour per pixel.
    fn marked_square() -> Raster {
        #[rustfmt::skip]
        let pixels = vec![
            1, 1, 1,   2, 2, 2,
            3, 3, 3,   4, 4, 4,
        ];
        Raster::from_pixels(2, 2, pixels).expect("valid raster")
    }

    fn pixel_markers(raster: &Raster) -> Vec<u8> {
        raster.pixels().iter().copied().step_by(3).collect()
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(
            Raster::new(0, 10),
            Err(RasterError::EmptyDimensions {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn from_pixels_rejects_length_mismatch() {
        let result = Raster::from_pixels(2, 2, vec![0; 11]);
        assert_eq!(
            result,
            Err(RasterError::PixelLengthMismatch {
                width: 2,
                height: 2,
                expected: 12,
                actual: 11,
            })
        );
    }

    #[test]
    fn capture_frame_has_fixed_dimensions() {
        let pixels = vec![0; CAPTURE_WIDTH as usize * CAPTURE_HEIGHT as usize * 3];
        let frame = Raster::capture_frame(pixels).expect("valid frame");
        assert_eq!((frame.width(), frame.height()), (595, 742));
    }

    #[rstest]
    #[case::quarter(Rotation::Deg90, vec![3, 1, 4, 2])]
    #[case::half(Rotation::Deg180, vec![4, 3, 2, 1])]
    #[case::three_quarters(Rotation::Deg270, vec![2, 4, 1, 3])]
    fn rotation_moves_pixels(#[case] rotation: Rotation, #[case] expected: Vec<u8>) {
        let rotated = marked_square().rotated(rotation);
        assert_eq!(pixel_markers(&rotated), expected);
    }

    #[test]
    fn quarter_turn_swaps_dimensions() {
        let raster = Raster::new(3, 5).expect("valid raster");
        let rotated = raster.rotated(Rotation::Deg90);
        assert_eq!((rotated.width(), rotated.height()), (5, 3));
    }

    #[test]
    fn opposite_turns_cancel_out() {
        let original = marked_square();
        let round_trip = original.rotated(Rotation::Deg90).rotated(Rotation::Deg270);
        assert_eq!(round_trip, original);
    }

    #[rstest]
    #[case(0, 10)]
    #[case(5, 16)]
    #[case(100, 120)]
    #[case(222, 254)]
    #[case(223, 255)]
    #[case(255, 255)]
    fn enhancement_boosts_and_saturates(#[case] value: u8, #[case] expected: u8) {
        assert_eq!(enhance_channel(value), expected);
    }

    #[test]
    fn enhancement_never_darkens() {
        for value in 0..=u8::MAX {
            assert!(enhance_channel(value) >= value, "channel {value} darkened");
        }
    }

    #[test]
    fn enhanced_keeps_dimensions() {
        let enhanced = marked_square().enhanced();
        assert_eq!((enhanced.width(), enhanced.height()), (2, 2));
        assert_eq!(pixel_markers(&enhanced), vec![11, 12, 13, 14]);
    }
}
