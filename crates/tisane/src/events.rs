//! # TISANE Event System
//!
//! Notifications published by the host loop for HUD and audio
//! collaborators.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │  HostLoop   │─────>│   Event     │─────>│    HUD /    │
//! │  (sweep)    │      │   Channel   │      │   Layouts   │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Channels are bounded: a full channel drops the event instead of stalling
//! the frame.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Events emitted while driving the game.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectEvent {
    /// A cooldown was swept; the action can be performed again.
    CooldownExpired {
        /// Cooldown name (the action name).
        name: String,
    },

    /// A buff was swept.
    BuffExpired {
        /// Buff name.
        name: String,
    },

    /// An action was bought and performed.
    ActionPerformed {
        /// Action name.
        name: String,
    },

    /// The wallet balance changed.
    PointsChanged {
        /// New balance.
        points: f64,
    },
}

/// Event bus between the host loop and its collaborators.
pub struct EventBus {
    /// Sender end - held by producers.
    sender: Sender<EffectEvent>,
    /// Receiver end - held by consumers.
    receiver: Receiver<EffectEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a paired sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<EffectEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped.
    #[inline]
    pub fn send(&self, event: EffectEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(?event, "event channel full, dropping");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<EffectEvent>,
}

impl EventReceiver {
    /// Receives every pending event without blocking.
    #[inline]
    pub fn drain(&self) -> Vec<EffectEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event, or `None` if nothing is pending.
    #[inline]
    pub fn try_recv(&self) -> Option<EffectEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
