//! Edge-triggered input latch
//!
//! Hosts forward raw press/release events here; the simulation consumes at
//! most one trigger per tick. Auto-repeat presses while the button is held
//! do not fire again.

#[derive(Debug, Clone, Default)]
pub struct TriggerLatch {
    held: bool,
    pending: bool,
}

impl TriggerLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self) {
        if !self.held {
            self.pending = true;
        }
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Consume the pending trigger, if any
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
