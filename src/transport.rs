//! Message contract with the controller device
//!
//! The peer link itself lives outside the crate. Whatever owns it decodes
//! controller messages and pushes them into an [`InboxSender`]; the frame
//! driver drains the matching [`Inbox`] once per frame. Host-to-controller
//! messages go the other way as plain values for the link to encode.

use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError, TrySendError};

use serde::{Deserialize, Serialize};

use crate::input::TiltVector;

/// Controller → host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControllerMessage {
    Tilt(TiltVector),
    Jump,
    Restart,
}

/// Host → controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HostMessage {
    /// Haptic pulse, milliseconds
    Vibrate { duration: u32 },
    /// Run ended; the controller shows its restart button
    GameOver { score: u64 },
}

impl HostMessage {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Everything the controller sent since the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Last tilt received (last write wins), if any
    pub tilt: Option<TiltVector>,
    pub jumps: u32,
    pub restarts: u32,
}

/// Create a bounded controller queue
pub fn inbox(capacity: usize) -> (InboxSender, Inbox) {
    let (tx, rx) = mpsc::sync_channel(capacity.max(1));
    (InboxSender { tx }, Inbox { rx })
}

/// Producer half, held by the transport adapter
#[derive(Debug, Clone)]
pub struct InboxSender {
    tx: SyncSender<ControllerMessage>,
}

impl InboxSender {
    /// Queue a message; returns false if it was dropped
    pub fn push(&self, message: ControllerMessage) -> bool {
        match self.tx.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                log::warn!("Controller inbox full, dropping {:?}", message);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Decode a wire message and queue it
    pub fn push_json(&self, json: &str) -> serde_json::Result<bool> {
        let message: ControllerMessage = serde_json::from_str(json)?;
        Ok(self.push(message))
    }
}

/// Consumer half, owned by the frame driver
#[derive(Debug)]
pub struct Inbox {
    rx: Receiver<ControllerMessage>,
}

impl Inbox {
    /// Take everything queued so far
    pub fn drain(&self) -> FrameInput {
        let mut input = FrameInput::default();
        loop {
            match self.rx.try_recv() {
                Ok(ControllerMessage::Tilt(tilt)) => input.tilt = Some(tilt.sanitized()),
                Ok(ControllerMessage::Jump) => input.jumps += 1,
                Ok(ControllerMessage::Restart) => input.restarts += 1,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        input
    }
}
