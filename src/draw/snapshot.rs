//! Full-buffer snapshots for preview-then-commit drawing.
//!
//! A shape gesture captures the canvas once on entry, restores it before
//! every preview redraw so previews never stack, and discards the copy on
//! exit. At most one snapshot is live at a time.

use super::pixels::PixelBuffer;
use super::surface::CanvasSurface;
use log::{debug, warn};

/// Opaque captured copy of the canvas buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pixels: PixelBuffer,
}

impl Snapshot {
    pub fn size_px(&self) -> (u32, u32) {
        (self.pixels.width(), self.pixels.height())
    }
}

/// Holds the single live snapshot, if any.
#[derive(Debug, Default)]
pub struct SnapshotManager {
    stored: Option<Snapshot>,
}

impl SnapshotManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the current buffer, replacing any previously stored snapshot.
    ///
    /// Returns `false` if the surface has no buffer to copy.
    pub fn capture(&mut self, surface: &CanvasSurface) -> bool {
        match surface.get_buffer() {
            Some(pixels) => {
                if self.stored.is_some() {
                    debug!("Replacing stale snapshot");
                }
                self.stored = Some(Snapshot { pixels });
                true
            }
            None => {
                self.stored = None;
                false
            }
        }
    }

    /// Writes the stored snapshot back over the live buffer.
    ///
    /// No-op when nothing is stored. A snapshot taken before a resize no
    /// longer fits the buffer and is left unapplied.
    pub fn restore(&self, surface: &mut CanvasSurface) -> bool {
        let Some(snapshot) = &self.stored else {
            return false;
        };
        match surface.put_buffer(&snapshot.pixels) {
            Ok(()) => true,
            Err(err) => {
                warn!("Snapshot restore skipped: {err}");
                false
            }
        }
    }

    /// Releases the stored copy.
    pub fn discard(&mut self) {
        self.stored = None;
    }

    pub fn is_live(&self) -> bool {
        self.stored.is_some()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.stored.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};
    use crate::draw::shape::{ShapeKind, ShapeStyle};

    fn surface() -> CanvasSurface {
        let mut surface = CanvasSurface::new();
        surface.resize(64.0, 48.0, 1.0);
        surface
    }

    #[test]
    fn restore_is_bit_identical_after_arbitrary_mutation() {
        let mut canvas = surface();
        canvas.draw_segment(3.0, 3.0, 40.0, 30.0, RED, 4.0, false);
        let before = canvas.get_buffer().unwrap();

        let mut snapshots = SnapshotManager::new();
        assert!(snapshots.capture(&canvas));

        canvas.draw_segment(0.0, 47.0, 63.0, 0.0, BLACK, 9.0, false);
        let style = ShapeStyle {
            fill: BLACK,
            stroke: RED,
            stroke_width: 3.0,
        };
        canvas.commit_shape(ShapeKind::Circle, 10.0, 10.0, 50.0, 40.0, &style);
        assert_ne!(canvas.get_buffer().unwrap(), before);

        assert!(snapshots.restore(&mut canvas));
        assert_eq!(canvas.get_buffer().unwrap(), before);
    }

    #[test]
    fn restore_without_snapshot_is_noop() {
        let mut canvas = surface();
        canvas.draw_segment(1.0, 1.0, 20.0, 1.0, RED, 2.0, false);
        let before = canvas.get_buffer().unwrap();

        let snapshots = SnapshotManager::new();
        assert!(!snapshots.restore(&mut canvas));
        assert_eq!(canvas.get_buffer().unwrap(), before);
    }

    #[test]
    fn capture_replaces_previous_snapshot() {
        let mut canvas = surface();
        let mut snapshots = SnapshotManager::new();
        snapshots.capture(&canvas);
        canvas.draw_segment(1.0, 1.0, 20.0, 1.0, RED, 2.0, false);
        let second = canvas.get_buffer().unwrap();
        snapshots.capture(&canvas);

        canvas.clear();
        snapshots.restore(&mut canvas);
        assert_eq!(canvas.get_buffer().unwrap(), second);
    }

    #[test]
    fn discard_releases_snapshot() {
        let canvas = surface();
        let mut snapshots = SnapshotManager::new();
        snapshots.capture(&canvas);
        assert!(snapshots.is_live());
        snapshots.discard();
        assert!(!snapshots.is_live());
    }

    #[test]
    fn capture_on_unready_surface_stores_nothing() {
        let mut snapshots = SnapshotManager::new();
        assert!(!snapshots.capture(&CanvasSurface::new()));
        assert!(!snapshots.is_live());
    }

    #[test]
    fn snapshot_from_before_resize_is_not_applied() {
        let mut canvas = surface();
        let mut snapshots = SnapshotManager::new();
        snapshots.capture(&canvas);
        canvas.resize(10.0, 10.0, 1.0);
        assert!(!snapshots.restore(&mut canvas));
        assert_eq!(snapshots.snapshot().unwrap().size_px(), (64, 48));
    }
}
