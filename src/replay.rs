//! Replay wiring: one stream per modality, rendered at requested
//! timestamps.
//!
//! Each stream pairs a frame store with a renderer and exposes a single
//! `render_at(timestamp, canvas) -> bool` entry point. The boolean follows
//! the playback contract: `false` means the frame was skipped (no data, or
//! a malformed textual record) and the canvas is untouched; decode and
//! drawing failures are logged and suppressed so one corrupt frame never
//! stops playback.

use image::RgbImage;

use crate::core::types::GeometricMap;
use crate::error::Error;
use crate::io::records::{parse_laser_record, parse_pose_record};
use crate::io::store::{FrameRef, FrameStore};
use crate::render::decoders::StreamDecoder;
use crate::render::overlays::{LaserOverlay, MapOverlay, PoseOverlay};
use crate::render::subframe::{render_entities, EntityRenderer};

fn fetch(store: &mut FrameStore, timestamp_us: u64, stream: &str) -> Option<FrameRef> {
    match store.nearest(timestamp_us) {
        Ok(Some(frame)) => Some(frame),
        Ok(None) => {
            log::debug!("{}: no frame recorded near {} us", stream, timestamp_us);
            None
        }
        Err(e) => {
            log::warn!("{}: frame lookup failed: {}", stream, e);
            None
        }
    }
}

/// Map a render result onto the playback contract: suppress draw/decode
/// failures, surface record failures as a skipped frame.
fn best_effort(result: crate::error::Result<()>, stream: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(Error::MalformedRecord(reason)) => {
            log::warn!("{}: skipping frame: {}", stream, reason);
            false
        }
        Err(e) => {
            log::warn!("{}: suppressed draw error: {}", stream, e);
            true
        }
    }
}

/// A pixel stream: raw frames decoded through a [`StreamDecoder`].
pub struct VideoStream {
    name: &'static str,
    store: FrameStore,
    decoder: Box<dyn StreamDecoder>,
}

impl VideoStream {
    /// Pair a store with a decoder.
    pub fn new(name: &'static str, store: FrameStore, decoder: Box<dyn StreamDecoder>) -> Self {
        Self {
            name,
            store,
            decoder,
        }
    }

    /// Stream name used in log output.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Access the underlying store (timestamp iteration).
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Render the frame nearest to the requested timestamp.
    pub fn render_at(&mut self, timestamp_us: u64, canvas: &mut RgbImage) -> bool {
        let frame = match fetch(&mut self.store, timestamp_us, self.name) {
            Some(frame) => frame,
            None => return false,
        };
        best_effort(self.decoder.decode(&frame.bytes, canvas), self.name)
    }
}

/// A multi-entity stream: fixed-size records drawn per entity.
pub struct EntityStream<R: EntityRenderer> {
    name: &'static str,
    store: FrameStore,
    renderer: R,
}

impl<R: EntityRenderer> EntityStream<R> {
    /// Pair a store with an entity renderer.
    pub fn new(name: &'static str, store: FrameStore, renderer: R) -> Self {
        Self {
            name,
            store,
            renderer,
        }
    }

    /// Render all entities of the frame nearest to the requested timestamp.
    ///
    /// A frame with zero entities is a successful empty render.
    pub fn render_at(&mut self, timestamp_us: u64, canvas: &mut RgbImage) -> bool {
        let frame = match fetch(&mut self.store, timestamp_us, self.name) {
            Some(frame) => frame,
            None => return false,
        };
        best_effort(
            render_entities(
                &self.renderer,
                &frame.bytes,
                frame.subframes as usize,
                canvas,
            ),
            self.name,
        )
    }
}

/// The laser range-finder stream: JSON sweep records drawn as an overlay.
pub struct LaserStream {
    store: FrameStore,
    overlay: LaserOverlay,
}

impl LaserStream {
    /// Pair a store with a laser overlay.
    pub fn new(store: FrameStore, overlay: LaserOverlay) -> Self {
        Self { store, overlay }
    }

    /// Access the underlying store (timestamp iteration).
    pub fn store(&self) -> &FrameStore {
        &self.store
    }

    /// Render the sweep nearest to the requested timestamp.
    pub fn render_at(&mut self, timestamp_us: u64, canvas: &mut RgbImage) -> bool {
        let frame = match fetch(&mut self.store, timestamp_us, "laser") {
            Some(frame) => frame,
            None => return false,
        };
        let scan = match std::str::from_utf8(&frame.bytes)
            .map_err(|e| Error::MalformedRecord(format!("laser record: {}", e)))
            .and_then(parse_laser_record)
        {
            Ok(scan) => scan,
            Err(e) => return best_effort(Err(e), "laser"),
        };
        best_effort(self.overlay.render(&scan, canvas), "laser")
    }
}

/// The static map overlay, driven by the localization stream.
pub struct MapStream {
    map: GeometricMap,
    store: FrameStore,
    overlay: MapOverlay,
}

impl MapStream {
    /// Pair the loaded map with the localization store.
    pub fn new(map: GeometricMap, store: FrameStore, overlay: MapOverlay) -> Self {
        Self {
            map,
            store,
            overlay,
        }
    }

    /// Render the map as seen from the pose nearest to the timestamp.
    pub fn render_at(&mut self, timestamp_us: u64, canvas: &mut RgbImage) -> bool {
        if self.map.is_empty() {
            // Nothing to draw is still a successful draw.
            return true;
        }
        let frame = match fetch(&mut self.store, timestamp_us, "map") {
            Some(frame) => frame,
            None => return false,
        };
        let pose = match std::str::from_utf8(&frame.bytes)
            .map_err(|e| Error::MalformedRecord(format!("pose record: {}", e)))
            .and_then(parse_pose_record)
        {
            Ok(pose) => pose,
            Err(e) => return best_effort(Err(e), "map"),
        };
        best_effort(self.overlay.render(&self.map, &pose, canvas), "map")
    }
}

/// The localization stream: pose label plus the canvas mirror step.
pub struct PoseStream {
    store: FrameStore,
    overlay: PoseOverlay,
}

impl PoseStream {
    /// Pair the localization store with the pose overlay.
    pub fn new(store: FrameStore, overlay: PoseOverlay) -> Self {
        Self { store, overlay }
    }

    /// Render the pose nearest to the requested timestamp.
    pub fn render_at(&mut self, timestamp_us: u64, canvas: &mut RgbImage) -> bool {
        let frame = match fetch(&mut self.store, timestamp_us, "pose") {
            Some(frame) => frame,
            None => return false,
        };
        let pose = match std::str::from_utf8(&frame.bytes)
            .map_err(|e| Error::MalformedRecord(format!("pose record: {}", e)))
            .and_then(parse_pose_record)
        {
            Ok(pose) => pose,
            Err(e) => return best_effort(Err(e), "pose"),
        };
        best_effort(self.overlay.render(&pose, canvas), "pose")
    }
}
