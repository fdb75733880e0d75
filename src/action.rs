use serde::{Deserialize, Serialize};

/// Whether a mutating component operation commits its result
///
/// `Simulate` answers "what would happen" and must leave the component and
/// everything observing it untouched. `Execute` applies the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Simulate,
    Execute,
}

impl ActionType {
    /// Translate a boolean `simulate` flag used by some frameworks
    pub fn from_simulate(simulate: bool) -> Self {
        if simulate {
            ActionType::Simulate
        } else {
            ActionType::Execute
        }
    }

    pub fn should_execute(self) -> bool {
        self == ActionType::Execute
    }

    pub fn is_simulation(self) -> bool {
        self == ActionType::Simulate
    }
}
