//! Serializable state snapshot for IPC/UI broadcast.

use crate::types::AppLockState;
use serde::{Deserialize, Serialize};

/// Payload describing the current lock state, suitable for pushing over
/// an IPC channel or into a UI layer that cannot hold the coordinator
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateChangedPayload {
    /// The state after the transition.
    #[serde(flatten)]
    pub state: AppLockState,
    /// Whether content may be shown in this state.
    pub is_unlocked: bool,
}

impl From<&AppLockState> for StateChangedPayload {
    fn from(state: &AppLockState) -> Self {
        Self {
            is_unlocked: state.is_unlocked(),
            state: state.clone(),
        }
    }
}
