//! The compositing surface the screen redraws every frame.
//!
//! The surface is a software RGBA buffer. It carries two sizes: the layout
//! size (what the rest of the pipeline positions against) and the backing
//! size (layout multiplied by the device pixel ratio). Every drawing
//! operation takes layout coordinates and scales them uniformly, so callers
//! never see the density correction.
//!
//! Drawing here is last-stage: the surface knows nothing about scrolling,
//! depth, or fragments. It executes clear, blit, circle, and radial-gradient
//! commands, in the order the screen issues them (back to front).

use anyhow::Result;
use image::{ImageBuffer, Rgba as ImgRgba, RgbaImage};
use std::path::Path;

use crate::color::Rgba;
use crate::image::RasterImage;
use strata_geom::{Point, Rect};

/// Software compositing surface with device pixel-density correction.
pub struct Surface {
    /// RGBA pixel buffer at backing (device) resolution.
    buffer: RgbaImage,
    /// Layout width in CSS-like units.
    width: f32,
    /// Layout height in CSS-like units.
    height: f32,
    /// Device pixel ratio (backing pixels per layout unit, >= 1 in practice).
    pixel_ratio: f32,
}

impl Surface {
    /// Create a surface with the given layout size and pixel ratio.
    ///
    /// The backing store is `layout * ratio`, rounded; layout dimensions stay
    /// unscaled and all drawing coordinates are multiplied by the ratio.
    #[must_use]
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let mut surface = Self {
            buffer: ImageBuffer::new(0, 0),
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
        };
        surface.resize(width, height, pixel_ratio);
        surface
    }

    /// Resize the surface, reallocating the backing store.
    ///
    /// The previous contents are discarded; the caller is expected to redraw
    /// the full surface afterwards.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f32) {
        let width = width.max(0.0);
        let height = height.max(0.0);
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        let device_w = (width * pixel_ratio).round() as u32;
        let device_h = (height * pixel_ratio).round() as u32;
        self.buffer = ImageBuffer::new(device_w, device_h);
        self.width = width;
        self.height = height;
        self.pixel_ratio = pixel_ratio;
    }

    /// Layout width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Layout height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Device pixel ratio currently applied to the backing store.
    #[must_use]
    pub const fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Backing-store dimensions in device pixels.
    #[must_use]
    pub fn device_dimensions(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Read a single backing-store pixel (device coordinates).
    ///
    /// Out-of-range coordinates read as fully transparent.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let (w, h) = self.buffer.dimensions();
        if x >= w || y >= h {
            return Rgba::new(0, 0, 0, 0);
        }
        let p = self.buffer.get_pixel(x, y);
        Rgba::new(p[0], p[1], p[2], p[3])
    }

    /// Clear the full surface to transparent.
    pub fn clear(&mut self) {
        for pixel in self.buffer.pixels_mut() {
            *pixel = ImgRgba([0, 0, 0, 0]);
        }
    }

    /// Blit a raster image scaled into `dest`, modulated by `opacity`.
    ///
    /// Non-positive destination extents are a defined no-op, not an error.
    /// Uses nearest-neighbor sampling to scale the source RGBA data to the
    /// destination size, then alpha-blends onto the buffer.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub fn blit(&mut self, img: &RasterImage, dest: &Rect, opacity: f32) {
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let src_w = img.width();
        let src_h = img.height();
        if src_w == 0 || src_h == 0 {
            return;
        }

        let ratio = self.pixel_ratio;
        let dest_x = (dest.left * ratio).round() as i32;
        let dest_y = (dest.top * ratio).round() as i32;
        let dest_w = (dest.width * ratio).round() as u32;
        let dest_h = (dest.height * ratio).round() as u32;
        if dest_w == 0 || dest_h == 0 {
            return;
        }

        let opacity = opacity.clamp(0.0, 1.0);
        let (buf_w, buf_h) = self.buffer.dimensions();

        for dy in 0..dest_h {
            for dx in 0..dest_w {
                let px = dest_x + dx as i32;
                let py = dest_y + dy as i32;
                if px < 0 || py < 0 || (px as u32) >= buf_w || (py as u32) >= buf_h {
                    continue;
                }

                // Nearest-neighbor sampling
                let sx = ((u64::from(dx) * u64::from(src_w)) / u64::from(dest_w))
                    .min(u64::from(src_w) - 1) as u32;
                let sy = ((u64::from(dy) * u64::from(src_h)) / u64::from(dest_h))
                    .min(u64::from(src_h) - 1) as u32;
                let src_idx = ((sy * src_w + sx) * 4) as usize;

                let data = img.rgba_data();
                let sa = (f32::from(data[src_idx + 3]) * opacity) as u8;
                if sa == 0 {
                    continue;
                }
                let fg = ImgRgba([data[src_idx], data[src_idx + 1], data[src_idx + 2], sa]);

                let bg = *self.buffer.get_pixel(px as u32, py as u32);
                let blended = alpha_blend(fg, bg, sa);
                self.buffer.put_pixel(px as u32, py as u32, blended);
            }
        }
    }

    /// Fill a circle of `radius` centered at `center`.
    ///
    /// A non-positive radius is a no-op. The circle's alpha channel is
    /// blended onto the existing contents.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap
    )]
    pub fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let ratio = self.pixel_ratio;
        let cx = center.x * ratio;
        let cy = center.y * ratio;
        let r = radius * ratio;

        let (buf_w, buf_h) = self.buffer.dimensions();
        let x0 = (cx - r).floor().max(0.0) as u32;
        let y0 = (cy - r).floor().max(0.0) as u32;
        let x1 = ((cx + r).ceil() as i64).clamp(0, i64::from(buf_w)) as u32;
        let y1 = ((cy + r).ceil() as i64).clamp(0, i64::from(buf_h)) as u32;

        let fg = ImgRgba([color.r, color.g, color.b, color.a]);
        for py in y0..y1 {
            for px in x0..x1 {
                let dx = (px as f32 + 0.5) - cx;
                let dy = (py as f32 + 0.5) - cy;
                if dx * dx + dy * dy <= r * r {
                    let bg = *self.buffer.get_pixel(px, py);
                    let blended = alpha_blend(fg, bg, color.a);
                    self.buffer.put_pixel(px, py, blended);
                }
            }
        }
    }

    /// Fill `rect` with a radial gradient.
    ///
    /// The gradient runs from `inner_radius` (stop offset 0) to
    /// `outer_radius` (stop offset 1) around `center`; pixels inside the
    /// inner circle take the first stop color, pixels beyond the outer
    /// circle the last. Stops must be ordered by ascending offset.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fill_radial_gradient(
        &mut self,
        rect: &Rect,
        center: Point,
        inner_radius: f32,
        outer_radius: f32,
        stops: &[(f32, Rgba)],
    ) {
        if rect.width <= 0.0 || rect.height <= 0.0 || stops.is_empty() {
            return;
        }
        let ratio = self.pixel_ratio;
        let cx = center.x * ratio;
        let cy = center.y * ratio;
        let inner = inner_radius * ratio;
        let outer = outer_radius * ratio;

        let (buf_w, buf_h) = self.buffer.dimensions();
        let x0 = (rect.left * ratio).round().max(0.0) as u32;
        let y0 = (rect.top * ratio).round().max(0.0) as u32;
        let x1 = ((rect.right() * ratio).round() as i64).clamp(0, i64::from(buf_w)) as u32;
        let y1 = ((rect.bottom() * ratio).round() as i64).clamp(0, i64::from(buf_h)) as u32;

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = (px as f32 + 0.5) - cx;
                let dy = (py as f32 + 0.5) - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let t = if outer > inner {
                    ((dist - inner) / (outer - inner)).clamp(0.0, 1.0)
                } else if dist < inner {
                    0.0
                } else {
                    1.0
                };
                let color = sample_stops(stops, t);
                let fg = ImgRgba([color.r, color.g, color.b, color.a]);
                let bg = *self.buffer.get_pixel(px, py);
                self.buffer.put_pixel(px, py, alpha_blend(fg, bg, color.a));
            }
        }
    }

    /// Save the current composite to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be saved to the given path.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.buffer
            .save(path)
            .map_err(|e| anyhow::anyhow!("failed to save snapshot to '{}': {e}", path.display()))?;
        Ok(())
    }
}

/// Interpolate a gradient color at offset `t` from an ordered stop list.
fn sample_stops(stops: &[(f32, Rgba)], t: f32) -> Rgba {
    let first = stops[0];
    if t <= first.0 {
        return first.1;
    }
    for pair in stops.windows(2) {
        let (o0, c0) = pair[0];
        let (o1, c1) = pair[1];
        if t <= o1 {
            let span = o1 - o0;
            let local = if span > 0.0 { (t - o0) / span } else { 1.0 };
            return c0.lerp(c1, local);
        }
    }
    stops[stops.len() - 1].1
}

/// Alpha blend a foreground color onto a background color.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn alpha_blend(fg: ImgRgba<u8>, bg: ImgRgba<u8>, alpha: u8) -> ImgRgba<u8> {
    let a = f32::from(alpha) / 255.0;
    let inv_a = 1.0 - a;

    ImgRgba([
        f32::from(fg[0]).mul_add(a, f32::from(bg[0]) * inv_a) as u8,
        f32::from(fg[1]).mul_add(a, f32::from(bg[1]) * inv_a) as u8,
        f32::from(fg[2]).mul_add(a, f32::from(bg[2]) * inv_a) as u8,
        bg[3].max(alpha),
    ])
}
