use std::future::Future;
use std::pin::Pin;

use ethdemux_frame::Frame;
use futures_core::Stream;
use tokio::sync::mpsc;

/// An external producer of the incoming frame stream.
///
/// `recv` resolves to `None` when the underlying interface is closed; that is
/// the clean end-of-stream signal, not an error. The sequence may be
/// unbounded.
pub trait FrameSource: Send + 'static {
    /// Receive the next frame, or `None` at end-of-stream.
    fn recv(&mut self) -> impl Future<Output = Option<Frame>> + Send;
}

impl FrameSource for mpsc::Receiver<Frame> {
    fn recv(&mut self) -> impl Future<Output = Option<Frame>> + Send {
        mpsc::Receiver::recv(self)
    }
}

impl FrameSource for mpsc::UnboundedReceiver<Frame> {
    fn recv(&mut self) -> impl Future<Output = Option<Frame>> + Send {
        mpsc::UnboundedReceiver::recv(self)
    }
}

/// Adapts any `Stream` of frames into a [`FrameSource`].
pub struct StreamSource<S> {
    inner: S,
}

impl<S> StreamSource<S>
where
    S: Stream<Item = Frame> + Unpin + Send + 'static,
{
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S> FrameSource for StreamSource<S>
where
    S: Stream<Item = Frame> + Unpin + Send + 'static,
{
    fn recv(&mut self) -> impl Future<Output = Option<Frame>> + Send {
        let inner = &mut self.inner;
        std::future::poll_fn(move |cx| Pin::new(&mut *inner).poll_next(cx))
    }
}
