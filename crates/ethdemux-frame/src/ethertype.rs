//! EtherType values and the legacy length range.
//!
//! Values 0x0000-0x05FF are reserved for 802.3 payload lengths.
//! Values 0x0600-0xFFFF identify true encapsulated protocols.

use std::fmt;

/// First true protocol identifier. Everything below is an 802.3 length.
pub const ETHERTYPE_START: u16 = 0x0600;

/// A 16-bit EtherType field from an Ethernet frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EtherType(u16);

impl EtherType {
    /// Internet Protocol version 4.
    pub const IPV4: Self = Self(0x0800);

    /// Address Resolution Protocol.
    pub const ARP: Self = Self(0x0806);

    /// Reverse Address Resolution Protocol.
    pub const RARP: Self = Self(0x8035);

    /// IEEE 802.1Q VLAN tagging.
    pub const VLAN: Self = Self(0x8100);

    /// Internet Protocol version 6.
    pub const IPV6: Self = Self(0x86DD);

    /// Wrap a raw 16-bit field value.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// The raw 16-bit field value.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// Returns true if this value encodes a legacy 802.3 payload length
    /// rather than a protocol identifier.
    pub const fn is_length(self) -> bool {
        self.0 < ETHERTYPE_START
    }

    /// Returns a human-readable name for this EtherType.
    pub fn name(self) -> &'static str {
        match self {
            Self::IPV4 => "IPv4",
            Self::ARP => "ARP",
            Self::RARP => "RARP",
            Self::VLAN => "VLAN",
            Self::IPV6 => "IPv6",
            _ if self.is_length() => "LENGTH",
            _ => "UNKNOWN",
        }
    }
}

impl From<u16> for EtherType {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<EtherType> for u16 {
    fn from(ether_type: EtherType) -> Self {
        ether_type.0
    }
}

impl fmt::Display for EtherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}
