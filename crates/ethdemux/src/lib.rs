//! EtherType-keyed link-layer frame demultiplexer.
//!
//! A [`Demux`] pulls frames from a [`FrameSource`] on a background task and
//! routes each one to the handler registered for its EtherType. Frames whose
//! EtherType is unregistered, or is a legacy 802.3 payload length rather than
//! a protocol identifier, go to the default handler. Protocol modules (ARP,
//! IP, ...) attach themselves at runtime with [`Demux::set_handler`],
//! concurrently with dispatch.
//!
//! ```no_run
//! use ethdemux::Demux;
//! use ethdemux_frame::{EtherType, Frame};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), ethdemux::DemuxError> {
//! let (tx, rx) = mpsc::channel::<Frame>(64);
//!
//! let demux = Demux::new(rx, |frame: Frame| {
//!     tracing::debug!(ether_type = %frame.ether_type, "unhandled frame");
//! });
//! demux.set_handler(EtherType::IPV4, |frame: Frame| {
//!     // hand off to the IP layer
//!     tracing::trace!(len = frame.payload.len(), "ipv4 frame");
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod demux;
pub mod error;
pub mod handler;
pub mod source;

mod registry;

pub use demux::{Demux, DemuxConfig, DEFAULT_MAX_IN_FLIGHT};
pub use error::{DemuxError, Result};
pub use handler::{FrameHandler, Handler};
pub use source::{FrameSource, StreamSource};
