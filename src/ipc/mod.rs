//! Talking to the window manager over its IPC socket.
pub mod connection;
pub mod listener;

pub use connection::{SwayConnection, WorkspaceReply};
pub use listener::{Listener, ShutdownHandle, subscribe_events};

#[cfg(feature = "async")]
pub use listener::subscribe_events_async;

use crate::command::WmCommand;
use crate::{SwayFocusError, SwayFocusResult};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use swayipc::Node;

/// Request side of a window manager connection.
///
/// [`SwayConnection`] is the real implementation. The daemon only needs
/// these calls, so tests can substitute a recording implementation.
pub trait WmConnection {
    /// Run a command and fail if the window manager rejects it.
    fn run_command(&mut self, command: &WmCommand) -> SwayFocusResult<()>;
    /// Fetch the full layout tree.
    fn get_tree(&mut self) -> SwayFocusResult<Node>;
    /// Fetch the workspace list.
    fn get_workspaces(&mut self) -> SwayFocusResult<Vec<WorkspaceReply>>;
}

impl<C: WmConnection + ?Sized> WmConnection for &mut C {
    fn run_command(&mut self, command: &WmCommand) -> SwayFocusResult<()> {
        (**self).run_command(command)
    }

    fn get_tree(&mut self) -> SwayFocusResult<Node> {
        (**self).get_tree()
    }

    fn get_workspaces(&mut self) -> SwayFocusResult<Vec<WorkspaceReply>> {
        (**self).get_workspaces()
    }
}

/// Locate the IPC socket: an explicit path wins, then `$SWAYSOCK`, then `$I3SOCK`.
pub fn resolve_socket_path(explicit: Option<&Path>) -> SwayFocusResult<PathBuf> {
    resolve_socket_path_with(explicit, |key| std::env::var_os(key))
}

fn resolve_socket_path_with<F>(explicit: Option<&Path>, lookup: F) -> SwayFocusResult<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    ["SWAYSOCK", "I3SOCK"]
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.is_empty())
        .map(PathBuf::from)
        .ok_or(SwayFocusError::NoSocket)
}
