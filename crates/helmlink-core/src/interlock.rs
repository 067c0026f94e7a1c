// ── Safety interlock gate ──
//
// One cap per control, closed at construction. Caps are flipped only
// by direct user toggles — never by sync responses, so a remote state
// change cannot silently arm a control.

use dashmap::DashMap;
use tracing::debug;

use crate::error::CoreError;
use crate::model::Control;

/// Per-control safety-cap state.
///
/// Purely local: nothing in here talks to the bridge. The console
/// checks [`is_open`](Self::is_open) before any command dispatch.
pub struct InterlockGate {
    caps: DashMap<String, bool>,
}

impl InterlockGate {
    /// Register every control with a closed cap.
    pub fn new(controls: &[Control]) -> Self {
        let caps = DashMap::with_capacity(controls.len());
        for control in controls {
            caps.insert(control.name.clone(), false);
        }
        Self { caps }
    }

    /// Flip one control's cap. Returns the new state (`true` = open).
    pub fn toggle(&self, control: &str) -> Result<bool, CoreError> {
        let mut cap = self
            .caps
            .get_mut(control)
            .ok_or_else(|| CoreError::UnknownControl(control.to_owned()))?;
        *cap = !*cap;
        debug!(control, open = *cap, "safety cap toggled");
        Ok(*cap)
    }

    /// Whether a control's cap is open. Unknown controls read as closed.
    pub fn is_open(&self, control: &str) -> bool {
        self.caps.get(control).is_some_and(|cap| *cap)
    }

    /// Force one cap closed.
    pub fn close(&self, control: &str) {
        if let Some(mut cap) = self.caps.get_mut(control) {
            *cap = false;
        }
    }
}
