use std::sync::Arc;

use ethdemux_frame::EtherType;
use tokio::sync::Semaphore;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, trace};

use crate::error::Result;
use crate::handler::FrameHandler;
use crate::registry::HandlerRegistry;
use crate::source::FrameSource;

/// Default cap on concurrently running handler invocations.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 64;

/// Configuration for the demultiplexer.
#[derive(Debug, Clone)]
pub struct DemuxConfig {
    /// Maximum number of handler invocations running at once. When the pool
    /// is saturated the dispatch loop stops pulling frames until a slot
    /// frees up. Default: 64.
    pub max_in_flight: usize,
}

impl Default for DemuxConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
        }
    }
}

/// Routes incoming frames to handlers keyed by EtherType.
///
/// Construction spawns a background dispatch loop that pulls frames from the
/// source until it ends or [`shutdown`](Demux::shutdown) is called. Each
/// frame's handler runs in its own task, capped by
/// [`DemuxConfig::max_in_flight`]; frames enter the pool in receive order but
/// handler completions are unordered.
///
/// The handle is cheap to clone; protocol modules keep a clone to register
/// themselves, and handlers may register further handlers from inside an
/// invocation.
#[derive(Clone)]
pub struct Demux {
    registry: Arc<HandlerRegistry>,
    shutdown: CancellationToken,
    stopped: CancellationToken,
}

impl Demux {
    /// Start a demultiplexer with default configuration.
    ///
    /// Must be called from within a tokio runtime. Returns immediately; the
    /// dispatch loop never blocks construction.
    pub fn new<S>(source: S, default_handler: impl FrameHandler + 'static) -> Self
    where
        S: FrameSource,
    {
        Self::with_config(source, default_handler, DemuxConfig::default())
    }

    /// Start a demultiplexer with explicit configuration.
    pub fn with_config<S>(
        source: S,
        default_handler: impl FrameHandler + 'static,
        config: DemuxConfig,
    ) -> Self
    where
        S: FrameSource,
    {
        let registry = Arc::new(HandlerRegistry::new(Arc::new(default_handler)));
        let shutdown = CancellationToken::new();
        let stopped = CancellationToken::new();

        tokio::spawn(dispatch_loop(
            source,
            Arc::clone(&registry),
            shutdown.clone(),
            config,
            stopped.clone().drop_guard(),
        ));

        Self {
            registry,
            shutdown,
            stopped,
        }
    }

    /// Register or replace the handler for `ether_type`.
    ///
    /// Fails with [`DemuxError::LengthEtherType`](crate::DemuxError) if the
    /// value is in the legacy length range; the registry is left unchanged.
    /// Safe to call concurrently with dispatch and with other registrations.
    pub fn set_handler(
        &self,
        ether_type: EtherType,
        handler: impl FrameHandler + 'static,
    ) -> Result<()> {
        self.registry.set(ether_type, Arc::new(handler))
    }

    /// Replace the default handler for unmatched and length-range frames.
    pub fn set_default_handler(&self, handler: impl FrameHandler + 'static) {
        self.registry.set_default(Arc::new(handler));
    }

    /// Signal the dispatch loop to stop without waiting for end-of-stream.
    ///
    /// Already-spawned handler invocations run to completion; no further
    /// frames are dispatched.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    /// Resolves once the dispatch loop has terminated, whether by
    /// end-of-stream or by [`shutdown`](Demux::shutdown).
    pub async fn closed(&self) {
        self.stopped.cancelled().await;
    }

    /// Returns true once the dispatch loop has terminated.
    pub fn is_closed(&self) -> bool {
        self.stopped.is_cancelled()
    }
}

async fn dispatch_loop<S>(
    mut source: S,
    registry: Arc<HandlerRegistry>,
    shutdown: CancellationToken,
    config: DemuxConfig,
    _stopped: DropGuard,
) where
    S: FrameSource,
{
    let in_flight = Arc::new(Semaphore::new(config.max_in_flight));
    debug!(max_in_flight = config.max_in_flight, "dispatch loop started");

    loop {
        let frame = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("dispatch loop shut down");
                break;
            }
            frame = source.recv() => match frame {
                Some(frame) => frame,
                None => {
                    debug!("frame source ended");
                    break;
                }
            },
        };

        // Resolution clones the handler Arc and drops the registry guard, so
        // the invocation below runs lock-free and handlers may re-enter
        // set_handler.
        let handler = registry.resolve(frame.ether_type);
        trace!(ether_type = %frame.ether_type, "dispatching frame");

        let permit = tokio::select! {
            _ = shutdown.cancelled() => {
                debug!("dispatch loop shut down while pool saturated");
                break;
            }
            permit = Arc::clone(&in_flight).acquire_owned() => match permit {
                Ok(permit) => permit,
                Err(_) => break,
            },
        };

        tokio::spawn(async move {
            handler.handle(frame);
            drop(permit);
        });
    }
}
