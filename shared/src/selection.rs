use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Handle for a selection-expiry timer. Carries the mount generation so a
/// timer from an earlier screen instance can never match a current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId {
    pub mount: u64,
    pub seq: u64,
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.mount, self.seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_name: Option<String>,
    pub expiry: Option<TimerId>,
}

impl SelectionState {
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected_name.is_some()
    }
}

/// Result of a selection transition: the new state plus the timer work
/// the shell has to carry out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionChange {
    pub state: SelectionState,
    pub start_timer: Option<TimerId>,
    pub cancel_timer: Option<TimerId>,
}

impl SelectionChange {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.start_timer.is_none() && self.cancel_timer.is_none()
    }
}

/// Owns the highlighted place. At most one place is selected and exactly
/// one expiry timer is live while it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionController {
    mount: u64,
    next_seq: u64,
    selected: Option<String>,
    timer: Option<TimerId>,
}

impl SelectionController {
    #[must_use]
    pub const fn new(mount: u64) -> Self {
        Self {
            mount,
            next_seq: 0,
            selected: None,
            timer: None,
        }
    }

    pub fn select_or_toggle(&mut self, place_name: &str) -> SelectionChange {
        if self.selected.as_deref() == Some(place_name) {
            debug!(place = place_name, "selection toggled off");
            return self.clear();
        }

        let cancel_timer = self.timer.take();
        self.next_seq += 1;
        let timer = TimerId {
            mount: self.mount,
            seq: self.next_seq,
        };
        self.selected = Some(place_name.to_string());
        self.timer = Some(timer);
        debug!(place = place_name, %timer, "place selected");

        SelectionChange {
            state: self.state(),
            start_timer: Some(timer),
            cancel_timer,
        }
    }

    /// Idempotent: clearing an empty selection cancels nothing.
    pub fn clear(&mut self) -> SelectionChange {
        self.selected = None;
        SelectionChange {
            state: SelectionState::default(),
            start_timer: None,
            cancel_timer: self.timer.take(),
        }
    }

    /// Expiry of `timer`. Returns `None` when the timer is no longer the
    /// live one (superseded or already cleared).
    pub fn expire(&mut self, timer: TimerId) -> Option<SelectionState> {
        if self.timer != Some(timer) {
            warn!(%timer, "stale selection timer ignored");
            return None;
        }
        debug!(%timer, place = ?self.selected, "selection expired");
        self.timer = None;
        self.selected = None;
        Some(SelectionState::default())
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        SelectionState {
            selected_name: self.selected.clone(),
            expiry: self.timer,
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub const fn live_timer(&self) -> Option<TimerId> {
        self.timer
    }
}
