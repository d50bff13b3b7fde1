//! DrishtiReplay - Replay and rendering engine for recorded multi-modal
//! robot sensor logs
//!
//! # Architecture
//!
//! The crate is organized into 4 logical layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     replay                          │  ← Stream wiring
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                      io/                            │  ← Infrastructure
//! │          (frame store, records, map files)          │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                    render/                          │  ← Core engine
//! │   (decoders, projection, compositing, overlays)     │
//! └─────────────────────────────────────────────────────┘
//!                          │
//! ┌─────────────────────────────────────────────────────┐
//! │                     core/                           │  ← Foundation
//! │                 (types, math)                       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Rendering model
//!
//! A replay session owns one frame store per recorded modality. For a
//! requested timestamp, each stream fetches the nearest recorded sample and
//! renders it into the caller's canvas:
//!
//! - pixel streams (color, depth, infrared, body-index) decode the raw
//!   buffer at the sensor's native resolution and fit it into the canvas;
//! - multi-entity streams (skeleton, face) slice the buffer into fixed-size
//!   entity records and draw each one;
//! - vector overlays (laser sweep, static map, pose label) project
//!   robot/world geometry into canvas pixels with a shared convention.
//!
//! Rendering is strictly best-effort: a corrupt frame is logged and
//! skipped, never fatal to playback.

// ============================================================================
// Layer 1: Core foundation (no internal deps)
// ============================================================================
pub mod core;

// ============================================================================
// Layer 2: Rendering engine (depends on core)
// ============================================================================
pub mod render;

// ============================================================================
// Layer 3: I/O infrastructure (depends on core)
// ============================================================================
pub mod io;

// ============================================================================
// Layer 4: Replay wiring (depends on all layers)
// ============================================================================
pub mod replay;

mod error;

// ============================================================================
// Convenience re-exports (flat namespace for common use)
// ============================================================================

pub use crate::error::{Error, Result};

// Core types
pub use crate::core::math;
pub use crate::core::types::{GeometricMap, LaserScan, LineSegment, Point2D, Pose2D, Timestamped};

// Rendering - decoders
pub use crate::render::decoders::{
    BgraColorDecoder, BodyIndexDecoder, DepthToneConfig, GammaDepthDecoder, InfraredConfig,
    InfraredDecoder, InfraredStyle, LinearDepthDecoder, StreamDecoder, YuyvColorDecoder,
};

// Rendering - geometry and compositing
pub use crate::render::composite::blit_fitted;
pub use crate::render::palette::{body_color, BODY_PALETTE};
pub use crate::render::project::{Projector, ProjectorConfig};
pub use crate::render::subframe::{render_entities, EntityRenderer, MarkerRenderer, SubFrames};

// Rendering - overlays
pub use crate::render::overlays::{
    format_pose_label, DrawingMode, LaserOverlay, LaserOverlayConfig, MapOverlay, PoseOverlay,
    PoseOverlayConfig,
};

// I/O
pub use crate::io::map_loader::load_map;
pub use crate::io::records::{parse_laser_record, parse_pose_record};
pub use crate::io::store::{FrameRef, FrameStore, StoreWriter};

// Replay
pub use crate::replay::{EntityStream, LaserStream, MapStream, PoseStream, VideoStream};
