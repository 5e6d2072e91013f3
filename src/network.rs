//! Zoom control packets and the network-to-tick-thread bridge.
//!
//! The network thread never touches policy state. It pushes raw packets into a
//! [`PolicySender`]; the controller drains the matching [`PolicyInbox`] at the
//! start of each tick and decodes them there.

use crate::constants::*;
use crate::policy::DivisorRange;
use std::sync::mpsc;
use thiserror::Error;

/// Errors from decoding or delivering control packets
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    /// Channel is not one of the zoom control channels
    #[error("Unknown zoom channel {0}")]
    UnknownChannel(String),
    /// Payload length does not match any accepted arity
    #[error("Malformed payload on {channel}: expected 8 or 16 bytes, got {len}")]
    MalformedPayload { channel: String, len: usize },
    /// Divisors must be finite, positive and ordered (min <= max)
    #[error("Invalid divisor range on {channel}: min {min}, max {max}")]
    InvalidDivisor { channel: String, min: f64, max: f64 },
    /// The controller owning the inbox has been dropped
    #[error("Policy inbox is closed")]
    InboxClosed,
}

/// A decoded server policy message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyMessage {
    DisableZoom,
    DisableZoomScrolling,
    ForceClassicMode,
    ForceZoomDivisor(DivisorRange),
}

/// Full channel id (`okzoomer:<path>`)
pub fn channel_id(path: &str) -> String {
    format!("{CHANNEL_NAMESPACE}:{path}")
}

fn channel_path(channel: &str) -> &str {
    match channel.split_once(':') {
        Some((namespace, path)) if namespace == CHANNEL_NAMESPACE => path,
        _ => channel,
    }
}

fn read_f64(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    f64::from_be_bytes(buf)
}

impl PolicyMessage {
    /// Decode a packet. Accepts both namespaced and bare channel ids.
    ///
    /// `force_zoom_divisor` carries one big-endian f64 (min = max) or two
    /// (max first, then min); any other length is malformed. Non-finite,
    /// non-positive or inverted divisors are rejected.
    pub fn decode(channel: &str, payload: &[u8]) -> Result<Self, NetworkError> {
        match channel_path(channel) {
            DISABLE_ZOOM_CHANNEL => Ok(Self::DisableZoom),
            DISABLE_ZOOM_SCROLLING_CHANNEL => Ok(Self::DisableZoomScrolling),
            FORCE_CLASSIC_MODE_CHANNEL => Ok(Self::ForceClassicMode),
            FORCE_ZOOM_DIVISOR_CHANNEL => {
                let range = match payload.len() {
                    SINGLE_DIVISOR_PAYLOAD_LEN => DivisorRange::single(read_f64(payload)),
                    DIVISOR_PAIR_PAYLOAD_LEN => {
                        let max = read_f64(&payload[..8]);
                        let min = read_f64(&payload[8..]);
                        DivisorRange::new(min, max)
                    }
                    len => {
                        return Err(NetworkError::MalformedPayload {
                            channel: channel.to_string(),
                            len,
                        })
                    }
                };
                if !range.is_valid() {
                    return Err(NetworkError::InvalidDivisor {
                        channel: channel.to_string(),
                        min: range.min,
                        max: range.max,
                    });
                }
                Ok(Self::ForceZoomDivisor(range))
            }
            _ => Err(NetworkError::UnknownChannel(channel.to_string())),
        }
    }

    /// Channel id and payload for sending this message from a server
    pub fn encode(&self) -> (String, Vec<u8>) {
        match self {
            Self::DisableZoom => (channel_id(DISABLE_ZOOM_CHANNEL), Vec::new()),
            Self::DisableZoomScrolling => (channel_id(DISABLE_ZOOM_SCROLLING_CHANNEL), Vec::new()),
            Self::ForceClassicMode => (channel_id(FORCE_CLASSIC_MODE_CHANNEL), Vec::new()),
            Self::ForceZoomDivisor(range) => {
                let mut payload = Vec::with_capacity(DIVISOR_PAIR_PAYLOAD_LEN);
                payload.extend_from_slice(&range.max.to_be_bytes());
                if range.min != range.max {
                    payload.extend_from_slice(&range.min.to_be_bytes());
                }
                (channel_id(FORCE_ZOOM_DIVISOR_CHANNEL), payload)
            }
        }
    }
}

/// Packets a server sends to a client as it joins: pin the divisor.
pub fn join_packets(default_divisor: f64) -> Vec<(String, Vec<u8>)> {
    vec![PolicyMessage::ForceZoomDivisor(DivisorRange::single(default_divisor)).encode()]
}

/// Something the network thread observed
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkSignal {
    Packet { channel: String, payload: Vec<u8> },
    Disconnected,
}

/// Network-thread handle for queueing signals onto the tick thread
#[derive(Debug, Clone)]
pub struct PolicySender {
    tx: mpsc::Sender<NetworkSignal>,
}

impl PolicySender {
    pub fn send_packet(
        &self,
        channel: impl Into<String>,
        payload: impl Into<Vec<u8>>,
    ) -> Result<(), NetworkError> {
        self.send(NetworkSignal::Packet {
            channel: channel.into(),
            payload: payload.into(),
        })
    }

    pub fn send_disconnect(&self) -> Result<(), NetworkError> {
        self.send(NetworkSignal::Disconnected)
    }

    fn send(&self, signal: NetworkSignal) -> Result<(), NetworkError> {
        self.tx.send(signal).map_err(|_| NetworkError::InboxClosed)
    }
}

/// Tick-thread end of the network bridge
#[derive(Debug)]
pub struct PolicyInbox {
    rx: mpsc::Receiver<NetworkSignal>,
}

impl PolicyInbox {
    /// Drain every signal queued so far without blocking
    pub fn drain(&self) -> impl Iterator<Item = NetworkSignal> + '_ {
        self.rx.try_iter()
    }
}

pub fn policy_channel() -> (PolicySender, PolicyInbox) {
    let (tx, rx) = mpsc::channel();
    (PolicySender { tx }, PolicyInbox { rx })
}
