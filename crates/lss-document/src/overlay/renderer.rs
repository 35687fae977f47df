// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Overlay renderer — strokes original and simplified geometry over a page
// image using `imageproc` drawing primitives.

use std::path::Path;

use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};
use lss_core::Point;
use lss_core::config::OverlayStyle;
use lss_core::error::{LssError, Result};
use tracing::{debug, info, instrument};

use crate::page::{PageXml, Shape};

/// Draws documents over one background image.
///
/// The background is decoded once and copied for every render, so a single
/// renderer serves a whole sweep and can be shared between threads.
///
/// ```ignore
/// let renderer = OverlayRenderer::open("page.png", OverlayStyle::default())?;
/// let image = renderer.render(&original, Some(&simplified));
/// OverlayRenderer::save(&image, "page.line0.1-mask0.1.png")?;
/// ```
#[derive(Debug, Clone)]
pub struct OverlayRenderer {
    background: RgbaImage,
    style: OverlayStyle,
}

impl OverlayRenderer {
    // -- Construction ---------------------------------------------------------

    /// Load the background image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, style: OverlayStyle) -> Result<Self> {
        let img = image::open(path.as_ref()).map_err(|err| {
            LssError::Image(format!(
                "failed to open {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        info!(width = img.width(), height = img.height(), "Background loaded");
        Ok(Self::from_dynamic(img, style))
    }

    /// Wrap an already-decoded image. Grayscale and RGB scans are converted
    /// to RGBA so the overlay colours show.
    pub fn from_dynamic(image: DynamicImage, style: OverlayStyle) -> Self {
        Self {
            background: image.to_rgba8(),
            style,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.background.width()
    }

    pub fn height(&self) -> u32 {
        self.background.height()
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    // -- Rendering ------------------------------------------------------------

    /// Render `original` over the background and, if given, `simplified` on
    /// top of it.
    ///
    /// Vertices are dotted on the topmost layer: the simplified geometry when
    /// there is one, otherwise the original.
    pub fn render(&self, original: &PageXml, simplified: Option<&PageXml>) -> RgbaImage {
        let mut canvas = self.background.clone();
        let original_color = Rgba(self.style.original_color);
        let simplified_color = Rgba(self.style.simplified_color);

        let original_shapes = original.shapes();
        for shape in &original_shapes {
            self.stroke(&mut canvas, shape, original_color);
        }

        match simplified {
            Some(simplified) => {
                let shapes = simplified.shapes();
                for shape in &shapes {
                    self.stroke(&mut canvas, shape, simplified_color);
                }
                for shape in &shapes {
                    self.dot_vertices(&mut canvas, shape, simplified_color);
                }
                debug!(
                    original = original_shapes.len(),
                    simplified = shapes.len(),
                    "Overlay rendered"
                );
            }
            None => {
                for shape in &original_shapes {
                    self.dot_vertices(&mut canvas, shape, original_color);
                }
                debug!(original = original_shapes.len(), "Reference overlay rendered");
            }
        }
        canvas
    }

    /// Encode `image` to a file; the format follows the extension.
    pub fn save(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
        image.save(path.as_ref()).map_err(|err| {
            LssError::Image(format!(
                "failed to save image to {}: {}",
                path.as_ref().display(),
                err
            ))
        })?;
        debug!(path = %path.as_ref().display(), "Overlay saved");
        Ok(())
    }

    // -- Internal helpers -----------------------------------------------------

    fn stroke(&self, canvas: &mut RgbaImage, shape: &Shape<'_>, color: Rgba<u8>) {
        let points = shape.points;
        if points.len() < 2 {
            return;
        }
        for pair in points.windows(2) {
            self.segment(canvas, pair[0], pair[1], color);
        }
        if shape.is_closed() && points.len() > 2 {
            self.segment(canvas, points[points.len() - 1], points[0], color);
        }
    }

    /// A segment `stroke_width` pixels wide, drawn as parallel one-pixel
    /// lines shifted along both axes.
    fn segment(&self, canvas: &mut RgbaImage, a: Point, b: Point, color: Rgba<u8>) {
        let width = self.style.stroke_width.max(1) as i32;
        let start = (a.x as f32, a.y as f32);
        let end = (b.x as f32, b.y as f32);
        for step in 0..width {
            let offset = (step - (width - 1) / 2) as f32;
            draw_line_segment_mut(
                canvas,
                (start.0 + offset, start.1),
                (end.0 + offset, end.1),
                color,
            );
            if offset != 0.0 {
                draw_line_segment_mut(
                    canvas,
                    (start.0, start.1 + offset),
                    (end.0, end.1 + offset),
                    color,
                );
            }
        }
    }

    fn dot_vertices(&self, canvas: &mut RgbaImage, shape: &Shape<'_>, color: Rgba<u8>) {
        let radius = self.style.vertex_radius as i32;
        if radius == 0 {
            return;
        }
        for point in shape.points {
            let center = (point.x.round() as i32, point.y.round() as i32);
            draw_filled_circle_mut(canvas, center, radius, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{SIMPLE_PAGE, write_background};

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn renderer() -> OverlayRenderer {
        let blank = DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 200, WHITE));
        OverlayRenderer::from_dynamic(blank, OverlayStyle::default())
    }

    fn simplified() -> PageXml {
        let mut page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        page.simplify_lines(0.10).unwrap();
        page.simplify_masks(0.20).unwrap();
        page
    }

    #[test]
    fn reference_render_strokes_original_geometry() {
        let renderer = renderer();
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        let image = renderer.render(&page, None);
        let original = Rgba(renderer.style().original_color);

        assert_eq!(image.dimensions(), (200, 200));
        // Left edge of the region mask.
        assert_eq!(*image.get_pixel(5, 100), original);
        // Inside the region, away from every line.
        assert_eq!(*image.get_pixel(150, 150), WHITE);
    }

    #[test]
    fn simplified_geometry_is_drawn_on_top() {
        let renderer = renderer();
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        let image = renderer.render(&page, Some(&simplified()));
        // The region mask is unchanged, so the simplified stroke covers it.
        assert_eq!(
            *image.get_pixel(5, 100),
            Rgba(renderer.style().simplified_color)
        );
    }

    #[test]
    fn removed_vertices_stay_in_original_colour() {
        let renderer = renderer();
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        let image = renderer.render(&page, Some(&simplified()));
        // The bottom edge of the line mask survives simplification; the
        // dropped vertex at (100,30) is still visible underneath.
        let simplified_color = Rgba(renderer.style().simplified_color);
        assert_eq!(*image.get_pixel(55, 50), simplified_color);
        assert_ne!(*image.get_pixel(100, 30), WHITE);
    }

    #[test]
    fn zero_radius_draws_no_dots() {
        let style = OverlayStyle {
            stroke_width: 1,
            vertex_radius: 0,
            ..OverlayStyle::default()
        };
        let blank = DynamicImage::ImageRgba8(RgbaImage::from_pixel(200, 200, WHITE));
        let renderer = OverlayRenderer::from_dynamic(blank, style);
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        let image = renderer.render(&page, None);
        // Diagonally next to the region corner (5,5): only a dot would reach it.
        assert_eq!(*image.get_pixel(7, 7), WHITE);
    }

    #[test]
    fn open_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let background = write_background(dir.path(), 200, 200);
        let renderer = OverlayRenderer::open(&background, OverlayStyle::default()).unwrap();
        assert_eq!((renderer.width(), renderer.height()), (200, 200));

        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        let out = dir.path().join("overlay.png");
        OverlayRenderer::save(&renderer.render(&page, None), &out).unwrap();
        let reloaded = image::open(&out).unwrap().to_rgba8();
        assert_eq!(
            *reloaded.get_pixel(5, 100),
            Rgba(renderer.style().original_color)
        );
    }

    #[test]
    fn missing_background_is_image_error() {
        let err = OverlayRenderer::open("/no/such/page.png", OverlayStyle::default()).unwrap_err();
        assert!(matches!(err, LssError::Image(msg) if msg.contains("page.png")));
    }
}
