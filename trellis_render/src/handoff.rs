// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-thread hand-off of sync batches.
//!
//! The control thread owns the [`Controller`] and sends one [`SyncBatch`] per
//! sync pass. The render thread owns a [`Renderer`] (usually a
//! [`RenderCache`](crate::RenderCache)) and applies every pending batch, in
//! order, at the start of its frame. The channel is unbounded: a slow render
//! thread delays updates but never loses them.
//!
//! ```rust
//! use trellis_core::controller::{Controller, ControllerConfig};
//! use trellis_render::RenderCache;
//! use trellis_render::handoff;
//!
//! let (sender, receiver) = handoff::channel();
//! let mut controller = Controller::new(ControllerConfig::bars());
//! controller.set_zoom_level(250);
//! sender.sync(&mut controller).unwrap();
//!
//! let mut cache = RenderCache::new();
//! assert_eq!(receiver.apply_pending(&mut cache).unwrap(), 1);
//! assert_eq!(cache.zoom_level(), 250);
//! ```

use core::fmt;

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::debug;
use trellis_core::controller::Controller;
use trellis_core::renderer::{Renderer, SyncBatch};

/// Errors reported by the hand-off channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandoffError {
    /// The other end of the channel was dropped.
    Disconnected,
}

impl fmt::Display for HandoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "sync hand-off peer disconnected"),
        }
    }
}

impl core::error::Error for HandoffError {}

/// A batch that could not be sent because the receiver was dropped.
///
/// The batch is handed back so that no update is lost: apply it to a local
/// renderer or send it again over a new channel.
#[derive(Clone, Debug)]
pub struct SendError(pub SyncBatch);

impl SendError {
    /// Returns the undelivered batch.
    #[must_use]
    pub fn into_inner(self) -> SyncBatch {
        self.0
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sync hand-off receiver disconnected, pass {} undelivered",
            self.0.pass_index()
        )
    }
}

impl core::error::Error for SendError {}

/// Creates a connected sender/receiver pair.
#[must_use]
pub fn channel() -> (BatchSender, BatchReceiver) {
    let (tx, rx) = unbounded();
    (BatchSender { tx }, BatchReceiver { rx })
}

/// Control-thread end of the hand-off.
#[derive(Clone, Debug)]
pub struct BatchSender {
    tx: Sender<SyncBatch>,
}

impl BatchSender {
    /// Sends a batch. Empty batches are dropped without touching the channel.
    ///
    /// If the receiver is gone the batch comes back inside the error.
    pub fn send(&self, batch: SyncBatch) -> Result<(), SendError> {
        if batch.is_empty() {
            return Ok(());
        }
        self.tx.send(batch).map_err(|err| SendError(err.into_inner()))
    }

    /// Runs a sync pass on `controller` and sends the resulting batch.
    ///
    /// The controller's dirty state is drained either way; on failure the
    /// drained updates are returned in the [`SendError`].
    pub fn sync(&self, controller: &mut Controller) -> Result<(), SendError> {
        self.send(controller.take_sync_batch())
    }
}

/// Render-thread end of the hand-off.
#[derive(Debug)]
pub struct BatchReceiver {
    rx: Receiver<SyncBatch>,
}

impl BatchReceiver {
    /// Applies every pending batch to `renderer`, oldest first, and returns
    /// how many were applied.
    ///
    /// Returns [`HandoffError::Disconnected`] only once the sender is gone
    /// and no batch is left.
    pub fn apply_pending<R: Renderer + ?Sized>(
        &self,
        renderer: &mut R,
    ) -> Result<usize, HandoffError> {
        let mut applied = 0;
        loop {
            match self.rx.try_recv() {
                Ok(batch) => {
                    debug!(
                        pass_index = batch.pass_index(),
                        updates = batch.len(),
                        "applying sync batch"
                    );
                    batch.apply_to(renderer);
                    applied += 1;
                }
                Err(TryRecvError::Empty) => return Ok(applied),
                Err(TryRecvError::Disconnected) if applied > 0 => return Ok(applied),
                Err(TryRecvError::Disconnected) => return Err(HandoffError::Disconnected),
            }
        }
    }

    /// Number of batches waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use trellis_core::axis::AxisOrientation;
    use trellis_core::controller::ControllerConfig;

    use super::*;
    use crate::RenderCache;

    #[test]
    fn batches_arrive_in_order_across_threads() {
        let (sender, receiver) = channel();
        let control = thread::spawn(move || {
            let mut controller = Controller::new(ControllerConfig::bars());
            sender.sync(&mut controller).unwrap();
            for zoom in [120, 140, 160] {
                controller.set_zoom_level(zoom);
                if let Some(mut y) = controller.axis_mut(AxisOrientation::Y) {
                    y.set_title(std::format!("zoom {zoom}"));
                }
                sender.sync(&mut controller).unwrap();
            }
            controller.pass_index()
        });
        let passes = control.join().unwrap();
        assert_eq!(passes, 4);
        assert_eq!(receiver.pending(), 4);

        let mut cache = RenderCache::new();
        assert_eq!(receiver.apply_pending(&mut cache).unwrap(), 4);
        assert_eq!(cache.zoom_level(), 160);
        assert_eq!(cache.axis(AxisOrientation::Y).unwrap().title, "zoom 160");
        assert_eq!(
            receiver.apply_pending(&mut cache),
            Err(HandoffError::Disconnected)
        );
    }

    #[test]
    fn empty_batches_are_not_sent() {
        let (sender, receiver) = channel();
        let mut controller = Controller::new(ControllerConfig::scatter());
        sender.sync(&mut controller).unwrap();
        sender.sync(&mut controller).unwrap();
        assert_eq!(receiver.pending(), 1);

        let mut cache = RenderCache::new();
        assert_eq!(receiver.apply_pending(&mut cache).unwrap(), 1);
        assert_eq!(receiver.apply_pending(&mut cache).unwrap(), 0);
    }

    #[test]
    fn undelivered_batch_is_returned() {
        let (sender, receiver) = channel();
        drop(receiver);
        let mut controller = Controller::new(ControllerConfig::bars());
        sender.sync(&mut controller).unwrap_err();

        controller.set_zoom_level(320);
        let batch = sender.sync(&mut controller).unwrap_err().into_inner();
        assert_eq!(batch.pass_index(), 1);
        assert!(!controller.has_pending_changes());

        let mut cache = RenderCache::new();
        batch.apply_to(&mut cache);
        assert_eq!(cache.zoom_level(), 320);
    }
}
