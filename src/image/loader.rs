use tokio::sync::mpsc;

use super::data_uri::decode_png_data_uri;
use super::types::ImageError;
use crate::draw::PixelBuffer;

/// Identifies one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadId(pub u64);

/// Completion of a load request.
#[derive(Debug)]
pub struct LoadOutcome {
    pub id: LoadId,
    pub result: Result<PixelBuffer, ImageError>,
}

/// Decodes data URIs off the drawing thread.
///
/// This structure bridges tokio's blocking pool with the synchronous editor:
/// requests return immediately, and finished decodes queue up until the
/// editor drains them. Nothing here touches the canvas, so a completion
/// must be validated against the canvas as it is when it gets applied.
pub struct ImageLoader {
    runtime: tokio::runtime::Handle,
    outcome_tx: mpsc::UnboundedSender<LoadOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<LoadOutcome>,
    next_id: u64,
    in_flight: usize,
}

impl ImageLoader {
    /// Create a loader that decodes on the given runtime's blocking pool.
    pub fn new(runtime_handle: &tokio::runtime::Handle) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            runtime: runtime_handle.clone(),
            outcome_tx,
            outcome_rx,
            next_id: 0,
            in_flight: 0,
        }
    }

    /// Create a loader on the ambient tokio runtime, if there is one.
    pub fn from_current() -> Option<Self> {
        tokio::runtime::Handle::try_current()
            .ok()
            .map(|handle| Self::new(&handle))
    }

    /// Queue a decode. Non-blocking.
    pub fn request(&mut self, data_uri: impl Into<String>) -> LoadId {
        self.next_id += 1;
        let id = LoadId(self.next_id);
        let uri = data_uri.into();
        let tx = self.outcome_tx.clone();

        self.in_flight += 1;
        self.runtime.spawn_blocking(move || {
            log::debug!("Decoding image {:?} ({} bytes of URI)", id, uri.len());
            let result = decode_png_data_uri(&uri);
            // The receiver lives as long as the loader; a send error only means
            // the loader was dropped and nobody wants the result.
            let _ = tx.send(LoadOutcome { id, result });
        });

        id
    }

    /// Number of requests whose outcome has not been taken yet.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Take a finished outcome without waiting.
    pub fn try_next(&mut self) -> Option<LoadOutcome> {
        let outcome = self.outcome_rx.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }

    /// Wait for the next outcome; `None` when nothing is in flight.
    pub async fn next(&mut self) -> Option<LoadOutcome> {
        if self.in_flight == 0 {
            return None;
        }
        let outcome = self.outcome_rx.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(outcome)
    }
}
