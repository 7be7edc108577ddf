use std::fmt;

use bytes::Bytes;

use crate::ethertype::EtherType;

/// A 48-bit IEEE 802 MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// The all-ones broadcast address.
    pub const BROADCAST: Self = Self([0xFF; 6]);

    /// Returns true for the broadcast address.
    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// Returns true for group (multicast) addresses.
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

/// Source and destination addresses from a frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAddressing {
    pub source: MacAddr,
    pub destination: MacAddr,
}

/// A received link-layer frame.
///
/// Produced fully-formed by the network-interface layer; the demultiplexer
/// never mutates one. Payloads are `Bytes`, so cloning a frame to hand it to
/// a handler task is cheap.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Protocol identifier, or legacy payload length.
    pub ether_type: EtherType,
    /// The encapsulated payload.
    pub payload: Bytes,
    /// Link-layer addressing, when the interface exposes it.
    pub addressing: Option<LinkAddressing>,
}

impl Frame {
    /// Create a frame without addressing metadata.
    pub fn new(ether_type: EtherType, payload: impl Into<Bytes>) -> Self {
        Self {
            ether_type,
            payload: payload.into(),
            addressing: None,
        }
    }

    /// Attach source/destination addressing.
    pub fn with_addressing(mut self, source: MacAddr, destination: MacAddr) -> Self {
        self.addressing = Some(LinkAddressing {
            source,
            destination,
        });
        self
    }
}
