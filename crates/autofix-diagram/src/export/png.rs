//! PNG export backend.

use log::{debug, info};

use autofix_diagram_core::draw::Surface;

use super::{Error, Exporter};
use crate::{config::POINTS_PER_INCH, layout::Figure};

const METERS_PER_INCH: f32 = 0.0254;

/// Rasterizes a [`Figure`] and encodes it as an 8-bit RGBA PNG.
///
/// The figure's tight bounds are scaled by `dpi / 72`, and the resolution
/// is recorded in the PNG `pHYs` chunk.
#[derive(Debug, Clone, Copy)]
pub struct PngExporter {
    dpi: f32,
}

impl PngExporter {
    pub fn new(dpi: f32) -> Self {
        Self { dpi }
    }

    pub fn dpi(&self) -> f32 {
        self.dpi
    }

    /// Paints the figure onto a fresh surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Raster`] if the surface is too large or cannot be allocated.
    pub fn rasterize(&self, figure: &Figure) -> Result<Surface, Error> {
        let scale = self.dpi / POINTS_PER_INCH;
        let mut surface = Surface::new(figure.bounds(), scale, figure.background())?;
        debug!(
            width = surface.width(),
            height = surface.height(),
            scale;
            "Raster surface allocated"
        );

        figure.paint(&mut surface);
        Ok(surface)
    }

    fn pixels_per_meter(&self) -> u32 {
        (self.dpi / METERS_PER_INCH).round() as u32
    }
}

impl Exporter for PngExporter {
    fn export(&self, figure: &Figure) -> Result<Vec<u8>, Error> {
        let surface = self.rasterize(figure)?;

        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, surface.width(), surface.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            let ppm = self.pixels_per_meter();
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&surface.to_rgba8())?;
            writer.finish()?;
        }

        info!(
            width = surface.width(),
            height = surface.height(),
            dpi = self.dpi,
            bytes = bytes.len();
            "PNG encoded"
        );
        Ok(bytes)
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new(300.0)
    }
}
