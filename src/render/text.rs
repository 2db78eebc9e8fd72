/// Text line renderer.
/// Rasterizes an ordered list of text lines onto a transparent RGBA pixmap
/// using rusttype for font layout and coverage.
use tiny_skia::Pixmap;
use tracing::debug;

use crate::config::Rgba;
use crate::error::RenderError;

/// Left anchor as a fraction of canvas width (3/11).
const ANCHOR_NUM: u32 = 3;
const ANCHOR_DEN: u32 = 11;

/// Font size as a fraction of canvas width (1/30).
const FONT_SIZE_DIV: u32 = 30;

pub struct TextRenderer {
    font: rusttype::Font<'static>,
}

impl TextRenderer {
    /// Parse the embedded font once. The bytes are static, so a parse
    /// failure means a broken build and is fatal.
    pub fn new() -> Result<Self, RenderError> {
        let font_data = include_bytes!("../../assets/DejaVuSans.ttf");
        let font = rusttype::Font::try_from_bytes(font_data as &[u8])
            .ok_or(RenderError::FontParse)?;
        Ok(Self { font })
    }

    /// Render `lines` in order onto a fresh `width` x `height` pixmap.
    ///
    /// Line `i` gets its baseline at `height * (i + 1) / (lines + 1)` so the
    /// lines are equally spaced; every line is left-anchored at
    /// `width * 3 / 11`. Font size scales with canvas width.
    pub fn render(
        &self,
        width: u32,
        height: u32,
        color: Rgba,
        lines: &[&str],
    ) -> Result<Pixmap, RenderError> {
        let mut pixmap = Pixmap::new(width, height)
            .ok_or(RenderError::InvalidCanvas { width, height })?;

        let scale = rusttype::Scale::uniform((width / FONT_SIZE_DIV) as f32);
        let anchor_x = (width * ANCHOR_NUM / ANCHOR_DEN) as f32;
        let rows = lines.len() as u32 + 1;

        let tw = pixmap.width() as i32;
        let th = pixmap.height() as i32;
        let data = pixmap.data_mut();

        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }

            let baseline_y = (height * (i as u32 + 1) / rows) as f32;
            let glyphs: Vec<_> = self
                .font
                .layout(line, scale, rusttype::point(anchor_x, baseline_y))
                .collect();

            for glyph in &glyphs {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    glyph.draw(|gx, gy, v| {
                        let px = bb.min.x + gx as i32;
                        let py = bb.min.y + gy as i32;

                        if px >= 0 && px < tw && py >= 0 && py < th {
                            let alpha = v * color.a as f32 / 255.0;
                            if alpha > 0.0 {
                                let idx = ((py * tw + px) * 4) as usize;
                                let dst_a = data[idx + 3] as f32 / 255.0;
                                let out_a = alpha + dst_a * (1.0 - alpha);
                                if out_a > 0.0 {
                                    data[idx] = ((color.r as f32 * alpha
                                        + data[idx] as f32 * dst_a * (1.0 - alpha))
                                        / out_a) as u8;
                                    data[idx + 1] = ((color.g as f32 * alpha
                                        + data[idx + 1] as f32 * dst_a * (1.0 - alpha))
                                        / out_a) as u8;
                                    data[idx + 2] = ((color.b as f32 * alpha
                                        + data[idx + 2] as f32 * dst_a * (1.0 - alpha))
                                        / out_a) as u8;
                                    data[idx + 3] = (out_a * 255.0) as u8;
                                }
                            }
                        }
                    });
                }
            }
        }

        debug!("Rendered {} line(s) onto {}x{} canvas", lines.len(), width, height);
        Ok(pixmap)
    }
}
