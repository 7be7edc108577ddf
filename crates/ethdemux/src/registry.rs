use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use ethdemux_frame::EtherType;
use tracing::debug;

use crate::error::{DemuxError, Result};
use crate::handler::Handler;

/// EtherType-keyed handler table with a distinct default-handler slot.
///
/// Reads run concurrently with each other; writes are exclusive. A lookup
/// clones the `Arc` handler and releases the guard before returning, so no
/// lock is ever held across a handler invocation.
///
/// The default handler is a separate slot, not a reserved map key, so it can
/// never collide with a real EtherType. It always holds exactly one handler.
pub(crate) struct HandlerRegistry {
    handlers: RwLock<HashMap<EtherType, Handler>>,
    default: RwLock<Handler>,
}

impl HandlerRegistry {
    pub(crate) fn new(default: Handler) -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            default: RwLock::new(default),
        }
    }

    /// Register or replace the handler for a true EtherType.
    ///
    /// Length-range values are rejected before the map is touched, so a
    /// failed call leaves the registry exactly as it was.
    pub(crate) fn set(&self, ether_type: EtherType, handler: Handler) -> Result<()> {
        if ether_type.is_length() {
            debug!(%ether_type, "rejecting handler registration for length value");
            return Err(DemuxError::LengthEtherType(ether_type));
        }

        self.write_handlers().insert(ether_type, handler);
        debug!(%ether_type, "handler registered");
        Ok(())
    }

    /// Swap the default handler. The slot is never empty.
    pub(crate) fn set_default(&self, handler: Handler) {
        *self
            .default
            .write()
            .unwrap_or_else(PoisonError::into_inner) = handler;
        debug!("default handler replaced");
    }

    /// Resolve the handler for a frame's EtherType.
    ///
    /// A keyed entry is used only when one exists and the value is a true
    /// EtherType; length-range values always resolve to the default, even if
    /// an entry for them somehow exists. Never fails.
    pub(crate) fn resolve(&self, ether_type: EtherType) -> Handler {
        if !ether_type.is_length() {
            if let Some(handler) = self.read_handlers().get(&ether_type) {
                return handler.clone();
            }
        }
        self.default
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // Registrations are single map operations, so a guard recovered from a
    // poisoned lock still sees a consistent map.
    fn read_handlers(&self) -> std::sync::RwLockReadGuard<'_, HashMap<EtherType, Handler>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_handlers(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<EtherType, Handler>> {
        self.handlers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
