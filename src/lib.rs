//! Workspace focus tracking and renaming for the Sway window manager.
mod config;
mod error;

pub mod command;
pub mod daemon;
pub mod event;
pub mod focus_tracker;
pub mod ipc;
pub mod layout;
pub mod opacity;
pub mod renamer;
pub mod tree;

#[cfg(test)]
mod testing;

pub use command::WmCommand;
pub use config::SwayFocusConfig;
pub use daemon::{Daemon, Session};
pub use error::{SwayFocusError, SwayFocusResult};
pub use event::{WindowInfo, WmEvent};
pub use focus_tracker::{FocusState, FocusTracker};
pub use ipc::{Listener, ShutdownHandle, SwayConnection, WmConnection, subscribe_events};
pub use opacity::{DEFAULT_OPACITY, OpacityController};
pub use renamer::{WorkspaceRecord, WorkspaceRenamer};
pub use tree::{WindowId, WorkspaceId, WorkspaceSnapshot};

#[cfg(feature = "async")]
pub use ipc::subscribe_events_async;

/// Connect to the window manager and react to its events until it exits
///
/// # Arguments
/// * `config` - Daemon configuration
///
/// # Returns
/// `Ok(())` when the window manager shuts down, or the error that broke the connection
pub fn run(config: SwayFocusConfig) -> SwayFocusResult<()> {
    Session::connect(config)?.run()
}
