//! Ethernet frame and EtherType value types.
//!
//! These are the value types the demultiplexer routes on. A frame carries:
//! - A 16-bit EtherType identifying the encapsulated protocol, or, in legacy
//!   802.3 frames, the payload length
//! - The raw payload
//! - Optional source/destination MAC addressing
//!
//! No parsing or wire encoding here; frames are produced fully-formed by the
//! network-interface layer.

pub mod ethertype;
pub mod frame;

pub use ethertype::{EtherType, ETHERTYPE_START};
pub use frame::{Frame, LinkAddressing, MacAddr};
