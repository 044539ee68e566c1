//! Raster drawing surface backed by a `tiny-skia` pixmap.
//!
//! Drawables paint in figure coordinates (points). The surface maps a region
//! of the figure onto device pixels with a uniform scale, so the same
//! drawable paints identically at any resolution.

use thiserror::Error;
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, Pixmap, PremultipliedColorU8, Stroke, StrokeDash,
    Transform,
};

use crate::{
    color::Color,
    draw::{StrokeCap, StrokeDefinition, StrokeJoin},
    geometry::{Bounds, Point},
};

/// Largest pixel width or height a surface may have.
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// Errors raised while creating a raster surface.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("surface of {width}x{height} px exceeds the {MAX_SURFACE_DIMENSION} px limit")]
    TooLarge { width: u64, height: u64 },

    #[error("failed to allocate a {width}x{height} px surface")]
    Allocation { width: u32, height: u32 },

    #[error("invalid raster scale {0}")]
    InvalidScale(f32),
}

/// A pixel surface covering a region of the figure.
#[derive(Debug)]
pub struct Surface {
    pixmap: Pixmap,
    region: Bounds,
    scale: f32,
}

impl Surface {
    /// Creates a surface for `region` (in points) at `scale` pixels per
    /// point, filled with `background`.
    ///
    /// The pixel size is the region size times the scale, rounded up.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidScale`] for a non-finite or non-positive
    /// scale, [`RasterError::TooLarge`] when either side exceeds
    /// [`MAX_SURFACE_DIMENSION`], and [`RasterError::Allocation`] when the
    /// pixmap cannot be allocated.
    pub fn new(region: Bounds, scale: f32, background: Color) -> Result<Self, RasterError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(RasterError::InvalidScale(scale));
        }

        let width = pixel_extent(region.width(), scale);
        let height = pixel_extent(region.height(), scale);
        if width > u64::from(MAX_SURFACE_DIMENSION) || height > u64::from(MAX_SURFACE_DIMENSION) {
            return Err(RasterError::TooLarge { width, height });
        }

        // Both sides fit in u32 after the limit check
        let (width, height) = (width as u32, height as u32);
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RasterError::Allocation { width, height })?;

        let [r, g, b, a] = background.to_rgba8();
        pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));

        log::debug!(width, height, scale; "Raster surface created");

        Ok(Self {
            pixmap,
            region,
            scale,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Pixels per point.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// The figure region this surface covers, in points.
    pub fn region(&self) -> Bounds {
        self.region
    }

    /// The underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Converts a figure point to device pixel coordinates.
    pub fn to_device(&self, point: Point) -> Point {
        point.sub_point(self.region.min_point()).scale(self.scale)
    }

    fn transform(&self) -> Transform {
        let origin = self.region.min_point();
        Transform::from_row(
            self.scale,
            0.0,
            0.0,
            self.scale,
            -origin.x() * self.scale,
            -origin.y() * self.scale,
        )
    }

    /// Fills a path given in figure coordinates.
    pub fn fill_path(&mut self, path: &Path, color: Color) {
        let paint = paint_for(color);
        let transform = self.transform();
        self.pixmap
            .fill_path(path, &paint, FillRule::Winding, transform, None);
    }

    /// Strokes a path given in figure coordinates.
    ///
    /// Width and dash lengths are in points and scale with the surface.
    pub fn stroke_path(&mut self, path: &Path, stroke: &StrokeDefinition) {
        let paint = paint_for(stroke.color());
        let dash = stroke.dash_array().and_then(|mut lengths| {
            // An odd pattern repeats to become even, as in SVG
            if lengths.len() % 2 == 1 {
                lengths.extend_from_within(..);
            }
            StrokeDash::new(lengths, 0.0)
        });
        let tiny_stroke = Stroke {
            width: stroke.width(),
            line_cap: match stroke.cap() {
                StrokeCap::Butt => LineCap::Butt,
                StrokeCap::Round => LineCap::Round,
                StrokeCap::Square => LineCap::Square,
            },
            line_join: match stroke.join() {
                StrokeJoin::Miter => LineJoin::Miter,
                StrokeJoin::Round => LineJoin::Round,
                StrokeJoin::Bevel => LineJoin::Bevel,
            },
            dash,
            ..Default::default()
        };
        let transform = self.transform();
        self.pixmap
            .stroke_path(path, &paint, &tiny_stroke, transform, None);
    }

    /// Blends a solid RGBA (straight alpha) rectangle given in device pixels.
    ///
    /// Used for glyph coverage, where rasterized text arrives per pixel.
    /// Parts outside the surface are clipped.
    pub fn blend_device_rect(&mut self, x: i32, y: i32, w: u32, h: u32, rgba: [u8; 4]) {
        let [r, g, b, a] = rgba;
        if a == 0 {
            return;
        }
        let premultiply = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        let Some(src) =
            PremultipliedColorU8::from_rgba(premultiply(r), premultiply(g), premultiply(b), a)
        else {
            return;
        };

        let surface_width = self.pixmap.width() as i64;
        let surface_height = self.pixmap.height() as i64;
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(surface_width);
        let y1 = (i64::from(y) + i64::from(h)).min(surface_height);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let pixels = self.pixmap.pixels_mut();
        let inverse = 255 - u16::from(a);
        let over =
            |s: u8, d: u8| (u16::from(s) + (u16::from(d) * inverse + 127) / 255).min(255) as u8;
        for row in y0..y1 {
            for column in x0..x1 {
                let index = (row * surface_width + column) as usize;
                let dst = pixels[index];
                let blended = PremultipliedColorU8::from_rgba(
                    over(src.red(), dst.red()),
                    over(src.green(), dst.green()),
                    over(src.blue(), dst.blue()),
                    over(src.alpha(), dst.alpha()),
                );
                if let Some(blended) = blended {
                    pixels[index] = blended;
                }
            }
        }
    }

    /// Returns the pixel at device coordinates as straight-alpha RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let color = self.pixmap.pixel(x, y)?.demultiply();
        Some([color.red(), color.green(), color.blue(), color.alpha()])
    }

    /// Returns all pixels row-major as straight-alpha RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|pixel| {
                let color = pixel.demultiply();
                [color.red(), color.green(), color.blue(), color.alpha()]
            })
            .collect()
    }
}

fn pixel_extent(length: f32, scale: f32) -> u64 {
    let extent = (f64::from(length) * f64::from(scale)).ceil();
    if extent.is_finite() && extent >= 1.0 {
        extent as u64
    } else {
        1
    }
}

fn paint_for(color: Color) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}
