use std::sync::Arc;

use ethdemux_frame::Frame;

/// A capability to consume one frame.
///
/// Handlers are invoked from spawned tasks, so they must be shareable across
/// threads. The demultiplexer holds only an `Arc` reference; handler state
/// stays owned by the protocol module that registered it.
pub trait FrameHandler: Send + Sync {
    fn handle(&self, frame: Frame);
}

impl<F> FrameHandler for F
where
    F: Fn(Frame) + Send + Sync,
{
    fn handle(&self, frame: Frame) {
        self(frame)
    }
}

/// Shared handler reference as stored in the registry.
pub type Handler = Arc<dyn FrameHandler>;
