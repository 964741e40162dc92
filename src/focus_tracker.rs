use crate::event::WmEvent;
use crate::tree::WorkspaceId;
use tracing::debug;

/// Which workspace currently holds focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FocusState {
    /// No workspace is focused. This is a normal state, e.g. while outputs
    /// are still coming back after resume.
    #[default]
    Unfocused,
    FocusedOn(WorkspaceId),
}

impl FocusState {
    pub fn workspace(self) -> Option<WorkspaceId> {
        match self {
            FocusState::Unfocused => None,
            FocusState::FocusedOn(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusTracker {
    state: FocusState,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event and return the resulting state. Never fails.
    pub fn on_event(&mut self, event: &WmEvent) -> FocusState {
        let next = match event {
            WmEvent::WorkspaceFocused(ws) => FocusState::FocusedOn(ws.id),
            WmEvent::WorkspaceFocusAbsent => FocusState::Unfocused,
            WmEvent::WorkspaceEmpty(ws) if self.state == FocusState::FocusedOn(ws.id) => {
                FocusState::Unfocused
            }
            _ => self.state,
        };
        if next != self.state {
            debug!("Focus changed: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        self.state
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn focused(&self) -> Option<WorkspaceId> {
        self.state.workspace()
    }
}
