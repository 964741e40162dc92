//! Typed window manager events decoded from Sway's IPC events.
use crate::tree::{self, WindowId, WorkspaceSnapshot};
use crate::{SwayFocusError, SwayFocusResult};
use swayipc::{Event, Node, WindowChange, WindowEvent, WorkspaceChange, WorkspaceEvent};

/// The window an event refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub id: WindowId,
    pub app_name: Option<String>,
}

impl WindowInfo {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id,
            app_name: tree::app_name(node).map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WmEvent {
    /// A workspace gained focus.
    WorkspaceFocused(WorkspaceSnapshot),
    /// Focus moved but no workspace holds it (e.g. right after resume).
    WorkspaceFocusAbsent,
    /// The workspace became empty and is about to be destroyed.
    WorkspaceEmpty(WorkspaceSnapshot),
    WindowAdded(WindowInfo),
    WindowRemoved(WindowInfo),
    WindowMoved(WindowInfo),
    WindowFocused(WindowInfo),
    /// The window manager is exiting.
    Shutdown,
}

impl WmEvent {
    /// Whether the event can change how many windows a workspace holds.
    pub fn changes_window_count(&self) -> bool {
        matches!(
            self,
            WmEvent::WindowAdded(_) | WmEvent::WindowRemoved(_) | WmEvent::WindowMoved(_)
        )
    }
}

/// Translate an IPC event.
///
/// Returns `Ok(None)` for events nothing here reacts to, and
/// `Err(MalformedEvent)` when a needed workspace is missing.
pub fn decode_event(event: Event) -> SwayFocusResult<Option<WmEvent>> {
    match event {
        Event::Workspace(event) => decode_workspace_event(&event),
        Event::Window(event) => Ok(decode_window_event(&event)),
        Event::Shutdown(_) => Ok(Some(WmEvent::Shutdown)),
        _ => Ok(None),
    }
}

pub fn decode_workspace_event(event: &WorkspaceEvent) -> SwayFocusResult<Option<WmEvent>> {
    let decoded = match event.change {
        WorkspaceChange::Focus => match &event.current {
            Some(ws) => WmEvent::WorkspaceFocused(WorkspaceSnapshot::from_node(ws)),
            None => WmEvent::WorkspaceFocusAbsent,
        },
        WorkspaceChange::Empty => {
            let ws = event.current.as_ref().ok_or_else(|| {
                SwayFocusError::MalformedEvent("workspace empty event without workspace".into())
            })?;
            WmEvent::WorkspaceEmpty(WorkspaceSnapshot::from_node(ws))
        }
        _ => return Ok(None),
    };
    Ok(Some(decoded))
}

pub fn decode_window_event(event: &WindowEvent) -> Option<WmEvent> {
    let window = WindowInfo::from_node(&event.container);
    match event.change {
        WindowChange::New => Some(WmEvent::WindowAdded(window)),
        WindowChange::Close => Some(WmEvent::WindowRemoved(window)),
        WindowChange::Move => Some(WmEvent::WindowMoved(window)),
        WindowChange::Focus => Some(WmEvent::WindowFocused(window)),
        _ => None,
    }
}
