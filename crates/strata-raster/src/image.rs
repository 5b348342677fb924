//! Raster image data handed over by the host rasterizer.

/// Decoded RGBA pixel data for a rasterized fragment.
///
/// The host's rasterization service converts a markup fragment plus its
/// captured style into one of these; the compositor only ever blits it.
#[derive(Clone)]
pub struct RasterImage {
    /// Intrinsic width of the image in pixels.
    width: u32,
    /// Intrinsic height of the image in pixels.
    height: u32,
    /// Raw RGBA pixel data (width * height * 4 bytes).
    rgba_data: Vec<u8>,
}

impl RasterImage {
    /// Create a new `RasterImage` from decoded RGBA pixel data.
    ///
    /// # Arguments
    ///
    /// * `width` - Intrinsic width of the image in pixels
    /// * `height` - Intrinsic height of the image in pixels
    /// * `rgba_data` - Raw RGBA pixel data (must be `width * height * 4` bytes)
    #[must_use]
    pub fn new(width: u32, height: u32, rgba_data: Vec<u8>) -> Self {
        debug_assert_eq!(rgba_data.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            rgba_data,
        }
    }

    /// A solid-color image, handy for tests and placeholder fills.
    #[must_use]
    pub fn solid(width: u32, height: u32, color: crate::color::Rgba) -> Self {
        let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            rgba_data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self::new(width, height, rgba_data)
    }

    /// Intrinsic width of the image in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Intrinsic height of the image in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data.
    #[must_use]
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }
}
