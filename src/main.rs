use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

mod config;
mod core;
mod error;
mod render;

use crate::core::drawer::ClockDrawer;
use crate::core::output;

#[derive(Parser, Debug)]
#[command(name = "imageclock", about = "Periodic heartbeat image generator")]
struct Args {
    /// Output directory for generated frames
    #[arg(long, default_value = "frames")]
    basepath: String,

    /// Label rendered as the first line of every frame
    #[arg(long, default_value = "imageclock")]
    label: String,

    /// Text color: white, red, green, blue, or #rrggbb[aa]
    #[arg(long, default_value = "white")]
    color: String,

    /// Interval between frames, e.g. 500ms, 2s, 1m
    #[arg(long, default_value = "1s")]
    interval: String,

    /// Output format: jpeg or png
    #[arg(long, default_value = "jpeg")]
    format: String,

    /// Size tier: small or big
    #[arg(long, default_value = "small")]
    size: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.parse().unwrap_or_default()),
        )
        .init();

    let color = config::parse_color(&args.color)?;
    let format: config::ImageFormat = args.format.parse()?;
    let size: config::SizeTier = args.size.parse()?;
    let interval = config::parse_interval(&args.interval)?;

    let basepath = std::path::PathBuf::from(&args.basepath);
    std::fs::create_dir_all(&basepath)
        .with_context(|| format!("Failed to create basepath directory: {}", basepath.display()))?;

    let drawer = ClockDrawer::new(args.label.clone(), color, format, size)?;

    info!(
        "imageclock v{} writing {} {}x{} frames to {} every {:?}",
        env!("CARGO_PKG_VERSION"),
        format.as_str(),
        drawer.width(),
        drawer.height(),
        basepath.display(),
        interval
    );

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let stamp = output::timestamp_now();
                let frame = drawer.render(&format!("time: {stamp}"))?;
                let path = output::write_frame(&frame, format, &basepath, &stamp)?;
                debug!("Wrote frame {} to {}", drawer.render_count(), path.display());
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    info!("imageclock shutdown after {} frame(s)", drawer.render_count());
    Ok(())
}
