//! DrishtiReplay - offline replay driver.
//!
//! Opens the frame stores of a recording directory, steps through the
//! recorded time span, renders every enabled layer into one canvas per
//! step and exports the composed frames as PNG files.
//!
//! # Usage
//!
//! ```bash
//! # With default config
//! cargo run --release
//!
//! # With custom config file
//! cargo run --release -- --config drishti-replay.toml
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use image::RgbImage;
use serde::Deserialize;

use drishti_replay::io::map_loader::load_map;
use drishti_replay::io::store::FrameStore;
use drishti_replay::render::decoders::{
    BgraColorDecoder, BodyIndexDecoder, DepthToneConfig, GammaDepthDecoder, InfraredConfig,
    InfraredDecoder, LinearDepthDecoder, StreamDecoder, YuyvColorDecoder, COLOR_HEIGHT,
    COLOR_WIDTH, DEPTH_HEIGHT, DEPTH_WIDTH, LEGACY_HEIGHT, LEGACY_WIDTH,
};
use drishti_replay::render::overlays::{
    DrawingMode, LaserOverlay, LaserOverlayConfig, MapOverlay, PoseOverlay, PoseOverlayConfig,
};
use drishti_replay::render::project::ProjectorConfig;
use drishti_replay::render::subframe::MarkerRenderer;
use drishti_replay::replay::{EntityStream, LaserStream, MapStream, PoseStream, VideoStream};

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct Config {
    #[serde(default)]
    replay: ReplayConfig,
    #[serde(default)]
    canvas: CanvasConfig,
    #[serde(default)]
    projector: ProjectorConfig,
    #[serde(default)]
    depth: DepthConfig,
    #[serde(default)]
    color: ColorConfig,
    #[serde(default)]
    infrared: InfraredConfig,
    #[serde(default)]
    laser: LaserConfig,
    #[serde(default)]
    pose: PoseOverlayConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ReplayConfig {
    /// Directory holding the recorded stream stores
    data_dir: String,
    /// Directory receiving the exported PNG frames
    output_dir: String,
    /// Render step in milliseconds
    step_ms: u64,
    /// Stop after this many frames (0 = whole recording)
    max_frames: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            data_dir: "recording".to_string(),
            output_dir: "frames".to_string(),
            step_ms: 100,
            max_frames: 0,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CanvasConfig {
    width: u32,
    height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DepthConfig {
    /// Depth rendering variant: "gamma" (current sensor) or "linear"
    /// (legacy sensor)
    variant: String,
    amplification: f32,
    gamma: f32,
}

impl Default for DepthConfig {
    fn default() -> Self {
        let tone = DepthToneConfig::default();
        Self {
            variant: "gamma".to_string(),
            amplification: tone.amplification,
            gamma: tone.gamma,
        }
    }
}

impl DepthConfig {
    fn build_decoder(&self) -> Box<dyn StreamDecoder> {
        match self.variant.to_lowercase().as_str() {
            "linear" => Box::new(LinearDepthDecoder::new(LEGACY_WIDTH, LEGACY_HEIGHT)),
            _ => Box::new(GammaDepthDecoder::new(
                DEPTH_WIDTH,
                DEPTH_HEIGHT,
                DepthToneConfig {
                    amplification: self.amplification,
                    gamma: self.gamma,
                },
            )),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ColorConfig {
    /// Color frame format: "yuyv" (current sensor) or "bgra" (legacy
    /// sensor)
    format: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            format: "yuyv".to_string(),
        }
    }
}

impl ColorConfig {
    fn build_decoder(&self) -> Box<dyn StreamDecoder> {
        match self.format.to_lowercase().as_str() {
            "bgra" => Box::new(BgraColorDecoder::new(LEGACY_WIDTH, LEGACY_HEIGHT)),
            _ => Box::new(YuyvColorDecoder::new(COLOR_WIDTH, COLOR_HEIGHT)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LaserConfig {
    /// Drawing mode: "point_to_line" or "point_cloud"
    mode: String,
    /// Draw camera field-of-view rays
    draw_fov: bool,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            mode: "point_to_line".to_string(),
            draw_fov: false,
        }
    }
}

impl LaserConfig {
    fn drawing_mode(&self) -> DrawingMode {
        match self.mode.to_lowercase().as_str() {
            "point_cloud" => DrawingMode::PointCloud,
            _ => DrawingMode::PointToLine,
        }
    }
}

// ============================================================================
// Argument parsing
// ============================================================================

struct Args {
    config_path: Option<String>,
}

fn print_help() {
    println!("drishti-replay - render recorded sensor logs to PNG frames");
    println!();
    println!("Usage: drishti-replay [--config <path>]");
    println!();
    println!("Options:");
    println!("  -c, --config <path>   Config file (default: drishti-replay.toml)");
    println!("  -h, --help            Show this help");
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut result = Args { config_path: None };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    result.config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    result
}

fn load_config(args: &Args) -> Config {
    match &args.config_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(contents) => match basic_toml::from_str(&contents) {
                Ok(cfg) => {
                    log::info!("Loaded config from {}", path);
                    cfg
                }
                Err(e) => {
                    log::warn!("Failed to parse config {}: {}", path, e);
                    Config::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path, e);
                Config::default()
            }
        },
        None => {
            if let Ok(contents) = fs::read_to_string("drishti-replay.toml") {
                if let Ok(cfg) = basic_toml::from_str(&contents) {
                    log::info!("Loaded config from drishti-replay.toml");
                    return cfg;
                }
            }
            Config::default()
        }
    }
}

// ============================================================================
// Replay driver
// ============================================================================

fn open_store(data_dir: &Path, file: &str) -> Option<FrameStore> {
    let path = data_dir.join(file);
    if !path.exists() {
        log::info!("  {} absent, stream disabled", file);
        return None;
    }
    match FrameStore::open(&path) {
        Ok(store) => {
            log::info!("  {} ({} frames)", file, store.len());
            Some(store)
        }
        Err(e) => {
            log::warn!("  {} unreadable, stream disabled: {}", file, e);
            None
        }
    }
}

fn run_replay(config: &Config) -> drishti_replay::Result<()> {
    let data_dir = PathBuf::from(&config.replay.data_dir);
    let output_dir = PathBuf::from(&config.replay.output_dir);
    fs::create_dir_all(&output_dir)?;

    let projector = ProjectorConfig {
        half_distance: config.projector.half_distance,
        forward_offset: config.projector.forward_offset,
    };

    log::info!("Opening streams in {}", data_dir.display());

    // Base pixel layer: prefer color, fall back through the other cameras.
    let mut video: Option<VideoStream> = None;
    if let Some(store) = open_store(&data_dir, "color.drsh") {
        video = Some(VideoStream::new("color", store, config.color.build_decoder()));
    } else if let Some(store) = open_store(&data_dir, "depth.drsh") {
        video = Some(VideoStream::new("depth", store, config.depth.build_decoder()));
    } else if let Some(store) = open_store(&data_dir, "infrared.drsh") {
        let decoder = InfraredDecoder::new(DEPTH_WIDTH, DEPTH_HEIGHT, config.infrared);
        video = Some(VideoStream::new("infrared", store, Box::new(decoder)));
    } else if let Some(store) = open_store(&data_dir, "body_index.drsh") {
        let decoder = BodyIndexDecoder::new(DEPTH_WIDTH, DEPTH_HEIGHT);
        video = Some(VideoStream::new("body_index", store, Box::new(decoder)));
    }

    let mut skeleton = open_store(&data_dir, "skeleton.drsh")
        .map(|store| EntityStream::new("skeleton", store, MarkerRenderer));

    let mut laser = open_store(&data_dir, "laser.drsh").map(|store| {
        LaserStream::new(
            store,
            LaserOverlay::new(LaserOverlayConfig {
                mode: config.laser.drawing_mode(),
                draw_fov: config.laser.draw_fov,
                projector,
            }),
        )
    });

    let mut map_stream = None;
    let mut pose_stream = None;
    if let Some(store) = open_store(&data_dir, "localization.drsh") {
        let map_path = data_dir.join("recording.map");
        let map = if map_path.exists() {
            load_map(&map_path)?
        } else {
            log::info!("  recording.map absent, map overlay disabled");
            drishti_replay::GeometricMap::new()
        };
        map_stream = Some(MapStream::new(map, store, MapOverlay::new(projector)));

        // Second reader on the same store: the pose label consumes the
        // localization stream independently of the map overlay.
        let pose_store = FrameStore::open(data_dir.join("localization.drsh"))?;
        pose_stream = Some(PoseStream::new(pose_store, PoseOverlay::new(&config.pose)?));
    }

    // Time span: union of whatever streams are present.
    let mut start = u64::MAX;
    let mut end = 0u64;
    let mut span = |store: &FrameStore| {
        if !store.is_empty() {
            start = start.min(store.start_time_us());
            end = end.max(store.end_time_us());
        }
    };
    if let Some(v) = &video {
        span(v.store());
    }
    if let Some(l) = &laser {
        span(l.store());
    }
    if start > end {
        log::warn!("No frames found in {}", data_dir.display());
        return Ok(());
    }

    let step_us = config.replay.step_ms.max(1) * 1000;
    let mut canvas = RgbImage::new(config.canvas.width, config.canvas.height);
    let mut frame_index = 0u64;
    let mut timestamp = start;

    log::info!(
        "Replaying {:.1}s at {}ms steps",
        (end - start) as f64 / 1_000_000.0,
        config.replay.step_ms
    );

    while timestamp <= end {
        if config.replay.max_frames > 0 && frame_index >= config.replay.max_frames {
            break;
        }

        // Compose: base pixels first, then the vector overlays, pose last
        // (it mirrors the finished frame).
        canvas.fill(0);
        if let Some(stream) = video.as_mut() {
            stream.render_at(timestamp, &mut canvas);
        }
        if let Some(stream) = skeleton.as_mut() {
            stream.render_at(timestamp, &mut canvas);
        }
        if let Some(stream) = map_stream.as_mut() {
            stream.render_at(timestamp, &mut canvas);
        }
        if let Some(stream) = laser.as_mut() {
            stream.render_at(timestamp, &mut canvas);
        }
        if let Some(stream) = pose_stream.as_mut() {
            stream.render_at(timestamp, &mut canvas);
        }

        let out = output_dir.join(format!("frame_{:06}.png", frame_index));
        canvas
            .save(&out)
            .map_err(|e| drishti_replay::Error::Config(format!("PNG export failed: {}", e)))?;

        frame_index += 1;
        timestamp += step_us;
    }

    log::info!("Exported {} frames to {}", frame_index, output_dir.display());
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    let args = parse_args();
    let config = load_config(&args);

    log::info!("drishti-replay starting");
    log::info!("  Data: {}", config.replay.data_dir);
    log::info!("  Output: {}", config.replay.output_dir);
    log::info!(
        "  Canvas: {}x{}",
        config.canvas.width,
        config.canvas.height
    );
    log::info!("  Depth variant: {}", config.depth.variant);
    log::info!("  Laser mode: {}", config.laser.mode);

    if let Err(e) = run_replay(&config) {
        log::error!("Replay error: {}", e);
        std::process::exit(1);
    }

    log::info!("drishti-replay shutdown complete");
}
