//! Demo State Machine
//!
//! Tracks what the page is doing with the steering model. Gameplay itself is
//! started and stopped separately: training leaves a running game alone.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Demo states
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoState {
    Collecting,
    Training,
    Predicting,
}

/// Actions that trigger state transitions
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoAction {
    Train,
    Predict,
    Reset,
}

/// Result of a state transition
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
#[derive(Debug, Clone)]
pub struct TransitionResult {
    success: bool,
    from_state: DemoState,
    to_state: DemoState,
    action: DemoAction,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl TransitionResult {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn success(&self) -> bool {
        self.success
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    #[allow(clippy::wrong_self_convention)]
    pub fn from_state(&self) -> DemoState {
        self.from_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn to_state(&self) -> DemoState {
        self.to_state
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn action(&self) -> DemoAction {
        self.action
    }
}

/// Demo Finite State Machine
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct DemoFsm {
    state: DemoState,
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl DemoFsm {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new() -> Self {
        Self {
            state: DemoState::Collecting,
        }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn state(&self) -> DemoState {
        self.state
    }

    pub fn state_string(&self) -> String {
        format!("{:?}", self.state)
    }

    pub fn can_transition(&self, action: DemoAction) -> bool {
        self.get_next_state(action).is_some()
    }

    pub fn transition(&mut self, action: DemoAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    fn get_next_state(&self, action: DemoAction) -> Option<DemoState> {
        match (self.state, action) {
            // Training can be (re)started at any time and ends prediction
            (_, DemoAction::Train) => Some(DemoState::Training),

            // Predicting needs a model that is training or trained
            (DemoState::Training, DemoAction::Predict) => Some(DemoState::Predicting),

            // Reset from anywhere
            (_, DemoAction::Reset) => Some(DemoState::Collecting),

            // Invalid transition
            _ => None,
        }
    }

    pub fn is_predicting(&self) -> bool {
        self.state == DemoState::Predicting
    }
}

impl Default for DemoFsm {
    fn default() -> Self {
        Self::new()
    }
}
