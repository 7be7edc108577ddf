use ethdemux_frame::EtherType;

/// Errors that can occur when configuring the demultiplexer.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum DemuxError {
    /// The value encodes an 802.3 payload length, so it can never identify
    /// a protocol and cannot key a handler.
    #[error("{0} is in the length range (below 0x0600); handlers require a true EtherType")]
    LengthEtherType(EtherType),
}

pub type Result<T> = std::result::Result<T, DemuxError>;
