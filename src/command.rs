use crate::tree::{WindowId, WorkspaceId};
use std::fmt;

/// A command issued back to the window manager.
#[derive(Debug, Clone, PartialEq)]
pub enum WmCommand {
    RenameWorkspace { id: WorkspaceId, name: String },
    SetOpacity { window: WindowId, value: f64 },
    /// A user supplied command, passed through verbatim.
    Raw(String),
}

impl WmCommand {
    pub fn rename_workspace<S: Into<String>>(id: WorkspaceId, name: S) -> Self {
        WmCommand::RenameWorkspace {
            id,
            name: name.into(),
        }
    }

    pub fn set_opacity(window: WindowId, value: f64) -> Self {
        WmCommand::SetOpacity { window, value }
    }

    /// Run `command` with its criteria limited to the given window.
    pub fn for_window(window: WindowId, command: &str) -> Self {
        WmCommand::Raw(format!("[con_id={window}] {command}"))
    }
}

impl fmt::Display for WmCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WmCommand::RenameWorkspace { id, name } => {
                write!(f, "rename workspace number {id} to \"{}\"", escape(name))
            }
            WmCommand::SetOpacity { window, value } => {
                write!(f, "[con_id={window}] opacity {value}")
            }
            WmCommand::Raw(command) => f.write_str(command),
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
