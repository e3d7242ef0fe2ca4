//! Side effects that can be declared in the config file.
//!
//! A side effect is a zero-argument closure, so effects that need to reach the
//! application (ringing the bell, quitting) raise a flag in a shared
//! [`EffectSignals`] which the application drains after each dispatch.

use super::definitions::SideEffect;
use crate::config::EffectConfig;
use std::cell::Cell;
use std::rc::Rc;
use tracing::info;

/// Requests raised by side effects for the application to act on.
#[derive(Debug, Default)]
pub struct EffectSignals {
    pending_bells: Cell<u32>,
    exit_requested: Cell<bool>,
}

impl EffectSignals {
    /// Creates a signal set with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the application to ring the terminal bell.
    pub fn ring_bell(&self) {
        self.pending_bells.set(self.pending_bells.get() + 1);
    }

    /// Consumes one pending bell request.
    pub fn take_bell_request(&self) -> bool {
        let pending = self.pending_bells.get();
        if pending == 0 {
            return false;
        }
        self.pending_bells.set(pending - 1);
        true
    }

    /// Asks the application to quit once the current dispatch returns.
    pub fn request_exit(&self) {
        self.exit_requested.set(true);
    }

    /// Returns true if a side effect asked the application to quit.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested.get()
    }
}

/// Builds the closure for a configured side effect.
pub fn build_side_effect(effect: &EffectConfig, signals: &Rc<EffectSignals>) -> SideEffect {
    match effect {
        EffectConfig::Bell => {
            let signals = Rc::clone(signals);
            Box::new(move || {
                signals.ring_bell();
                Ok(())
            })
        }
        EffectConfig::Exit => {
            let signals = Rc::clone(signals);
            Box::new(move || {
                signals.request_exit();
                Ok(())
            })
        }
        EffectConfig::Log(message) => {
            let message = message.clone();
            Box::new(move || {
                info!("{}", message);
                Ok(())
            })
        }
    }
}
