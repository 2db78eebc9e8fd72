/// ClockDrawer — owns the render configuration and produces one composed
/// frame per invocation. The only mutable field after construction is the
/// render counter, so concurrent renders need no locking.
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};
use tiny_skia::Pixmap;

use crate::config::{canvas_size, ImageFormat, Rgba, SizeTier};
use crate::error::RenderError;
use crate::render::TextRenderer;

pub struct ClockDrawer {
    label: String,
    color: Rgba,
    format: ImageFormat,
    size: SizeTier,
    width: u32,
    height: u32,
    start_time: DateTime<Local>,
    count: AtomicU64,
    renderer: TextRenderer,
}

impl ClockDrawer {
    /// Build a drawer for the given configuration. The embedded font is
    /// parsed eagerly so a packaging problem fails here, not mid-stream.
    pub fn new(
        label: impl Into<String>,
        color: Rgba,
        format: ImageFormat,
        size: SizeTier,
    ) -> Result<Self, RenderError> {
        let (width, height) = canvas_size(format, size);
        let renderer = TextRenderer::new()?;

        Ok(Self {
            label: label.into(),
            color,
            format,
            size,
            width,
            height,
            start_time: Local::now(),
            count: AtomicU64::new(0),
            renderer,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// File extension for frames produced by this drawer.
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    /// Renders of this drawer so far.
    pub fn render_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// The four text lines for a frame with the given counter value.
    fn lines(&self, count: u64, time_label: &str) -> [String; 4] {
        [
            self.label.clone(),
            format!(
                "start_time: {}, size: {}, image_type: {}",
                self.start_time.timestamp(),
                self.size.as_str(),
                self.format.as_str()
            ),
            time_label.to_string(),
            format!("count: {count}"),
        ]
    }

    /// Compose one frame: label, start-time metadata, the caller's time
    /// label and the count line on the configured canvas. The counter is
    /// claimed up front so concurrent renders get unique values, and given
    /// back if the draw fails so only successful renders consume a count.
    pub fn render(&self, time_label: &str) -> Result<Pixmap, RenderError> {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        let lines = self.lines(count, time_label);
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        self.renderer
            .render(self.width, self.height, self.color, &refs)
            .map_err(|e| {
                self.count.fetch_sub(1, Ordering::Relaxed);
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drawer(format: ImageFormat, size: SizeTier) -> ClockDrawer {
        ClockDrawer::new("cam1", Rgba::new(0, 255, 0, 255), format, size)
            .expect("drawer construction should succeed")
    }

    #[test]
    fn test_dimensions_per_tier() {
        let cases = [
            (ImageFormat::Jpeg, SizeTier::Small, 2560, 1440),
            (ImageFormat::Png, SizeTier::Small, 2560, 1440),
            (ImageFormat::Jpeg, SizeTier::Big, 7680, 4320),
            (ImageFormat::Png, SizeTier::Big, 20480, 11520),
        ];
        for (format, size, w, h) in cases {
            let d = drawer(format, size);
            assert_eq!((d.width(), d.height()), (w, h));
        }
    }

    #[test]
    fn test_extension() {
        assert_eq!(drawer(ImageFormat::Jpeg, SizeTier::Small).extension(), ".jpg");
        assert_eq!(drawer(ImageFormat::Png, SizeTier::Small).extension(), ".png");
    }

    #[test]
    fn test_count_monotonic() {
        let d = drawer(ImageFormat::Png, SizeTier::Small);
        assert_eq!(d.render_count(), 0);
        for n in 1..=3u64 {
            let lines = d.lines(n, "time: t");
            assert_eq!(lines[3], format!("count: {n}"));
            d.render("time: t").unwrap();
            assert_eq!(d.render_count(), n);
        }
    }

    #[test]
    fn test_line_content_and_order() {
        let d = drawer(ImageFormat::Png, SizeTier::Small);
        let lines = d.lines(7, "time: 2024-01-01T00:00:00Z");

        assert_eq!(lines[0], "cam1");
        assert_eq!(
            lines[1],
            format!(
                "start_time: {}, size: small, image_type: png",
                d.start_time.timestamp()
            )
        );
        assert_eq!(lines[2], "time: 2024-01-01T00:00:00Z");
        assert_eq!(lines[3], "count: 7");
    }

    #[test]
    fn test_start_time_fixed_across_renders() {
        let d = drawer(ImageFormat::Jpeg, SizeTier::Small);
        let first = d.lines(1, "t")[1].clone();
        d.render("t").unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        d.render("t").unwrap();
        assert_eq!(d.lines(3, "t")[1], first);
    }

    #[test]
    fn test_render_produces_full_canvas() {
        let d = drawer(ImageFormat::Png, SizeTier::Small);
        let pm = d.render("time: 2024-01-01T00:00:00Z").unwrap();
        assert_eq!(pm.width(), 2560);
        assert_eq!(pm.height(), 1440);
        assert!(pm.data().iter().any(|&b| b != 0), "frame should contain text");
    }

    #[test]
    fn test_canvas_size_independent_of_label() {
        let long_label = "x".repeat(500);
        let d = ClockDrawer::new(
            long_label,
            Rgba::new(255, 255, 255, 255),
            ImageFormat::Png,
            SizeTier::Small,
        )
        .unwrap();
        let pm = d.render("t").unwrap();
        assert_eq!((pm.width(), pm.height()), (2560, 1440));
    }

    #[test]
    fn test_failed_render_consumes_no_count() {
        // Force the draw to fail by degrading the canvas to zero size.
        let d = ClockDrawer {
            width: 0,
            height: 0,
            ..drawer(ImageFormat::Png, SizeTier::Small)
        };
        assert!(d.render("t").is_err());
        assert_eq!(d.render_count(), 0);
        assert!(d.render("t").is_err());
        assert_eq!(d.render_count(), 0);
    }

    #[test]
    fn test_concurrent_renders_unique_counts() {
        use std::sync::Arc;

        let d = Arc::new(drawer(ImageFormat::Png, SizeTier::Small));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let d = Arc::clone(&d);
            handles.push(std::thread::spawn(move || {
                for _ in 0..5 {
                    d.render("t").unwrap();
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(d.render_count(), 20);
    }
}
