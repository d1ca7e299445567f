//! Handoff of the merged course list to the viewer.
//!
//! The flow mirrors the portal's cross-window handshake: the list is staged
//! in a write-once session store, the viewer context is opened, and a
//! one-shot listener waits for the viewer to signal readiness before
//! forwarding the data and clearing the store. The listener is modeled as a
//! cancellable session — with the token never cancelled it waits unboundedly,
//! matching the original behavior, but the caller always holds a disposal
//! hook.

pub mod process;

use crate::errors::HandoffError;
use crate::model::CourseSection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use ts_rs::TS;

/// Session-store key under which the serialized course list is staged.
pub const STORAGE_KEY: &str = "jadwalCourseList";

/// Exact payload the viewer sends to request the course list.
pub const READY_SENTINEL: &str = "jadwalViewerReady";

/// Message-type discriminator on the delivered payload.
pub const MESSAGE_TYPE: &str = "jadwalCourses";

/// The payload delivered to the viewer once it signals readiness.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HandoffMessage {
    /// Always [`MESSAGE_TYPE`].
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<CourseSection>,
}

/// A message observed from the viewer context, tagged with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSignal {
    pub origin: String,
    pub payload: String,
}

/// The viewer context seam: where signals come from and where the course
/// list goes. Production uses [`process::ProcessViewer`]; tests use
/// channel-backed fakes.
pub trait Viewer {
    /// Origin the session accepts signals from and delivers to.
    fn origin(&self) -> &str;
    /// Next message from the viewer, `None` once the viewer is gone.
    async fn next_signal(&mut self) -> Option<ViewerSignal>;
    /// Deliver the course list to the viewer.
    async fn deliver(&mut self, message: &HandoffMessage) -> anyhow::Result<()>;
}

/// Transient storage slot for the staged course list. Write-once-then-cleared
/// within a single extraction flow; only this flow ever touches it.
#[derive(Debug, Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<String, String>>,
}

impl SessionStore {
    pub fn set(&self, key: &str, value: String) {
        self.slots.lock().unwrap().insert(key.to_owned(), value);
    }

    /// Read and clear in one step.
    pub fn take(&self, key: &str) -> Option<String> {
        self.slots.lock().unwrap().remove(key)
    }

    pub fn remove(&self, key: &str) {
        self.slots.lock().unwrap().remove(key);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.lock().unwrap().contains_key(key)
    }
}

/// Wait for the viewer's readiness sentinel, then deliver exactly once.
///
/// Signals from another origin or with a different payload are ignored
/// without consuming the one shot. On delivery the store is cleared and the
/// session ends — a later sentinel has no listener to reach. A sentinel that
/// arrives when the store is already empty ends the session without
/// delivering.
pub async fn run_session<V: Viewer>(
    store: &SessionStore,
    viewer: &mut V,
    cancel: &CancellationToken,
) -> Result<(), HandoffError> {
    let expected_origin = viewer.origin().to_owned();

    loop {
        let signal = tokio::select! {
            _ = cancel.cancelled() => return Err(HandoffError::Cancelled),
            signal = viewer.next_signal() => signal.ok_or(HandoffError::ViewerClosed)?,
        };

        if signal.origin != expected_origin || signal.payload != READY_SENTINEL {
            debug!(
                origin = signal.origin.as_str(),
                payload = signal.payload.as_str(),
                "ignoring unrelated viewer message"
            );
            continue;
        }

        let Some(json) = store.take(STORAGE_KEY) else {
            debug!("readiness signal with empty store, nothing to deliver");
            return Ok(());
        };
        let data: Vec<CourseSection> =
            serde_json::from_str(&json).map_err(|e| HandoffError::DeliveryFailed(e.into()))?;

        let message = HandoffMessage {
            kind: MESSAGE_TYPE.to_owned(),
            data,
        };
        viewer
            .deliver(&message)
            .await
            .map_err(HandoffError::DeliveryFailed)?;
        info!(count = message.data.len(), "course list delivered to viewer");
        return Ok(());
    }
}
