//! Sequential dispatch of window manager events.
use crate::command::WmCommand;
use crate::event::{WindowInfo, WmEvent};
use crate::focus_tracker::{FocusState, FocusTracker};
use crate::ipc::{Listener, ShutdownHandle, SwayConnection, WmConnection, resolve_socket_path};
use crate::layout::autolayout_command;
use crate::opacity::OpacityController;
use crate::renamer::WorkspaceRenamer;
use crate::tree::{WindowId, WorkspaceSnapshot, workspace_snapshots};
use crate::{SwayFocusConfig, SwayFocusResult};
use tracing::{debug, info, warn};

pub struct Daemon<C: WmConnection> {
    conn: C,
    config: SwayFocusConfig,
    tracker: FocusTracker,
    renamer: WorkspaceRenamer,
    opacity: OpacityController,
    previous_window: Option<WindowId>,
    shut_down: bool,
}

impl<C: WmConnection> Daemon<C> {
    pub fn new(conn: C, config: SwayFocusConfig) -> Self {
        let opacity = OpacityController::new(config.unfocused_opacity);
        Self {
            conn,
            config,
            tracker: FocusTracker::new(),
            renamer: WorkspaceRenamer::new(),
            opacity,
            previous_window: None,
            shut_down: false,
        }
    }

    pub fn focus_state(&self) -> FocusState {
        self.tracker.state()
    }

    pub fn renamer(&self) -> &WorkspaceRenamer {
        &self.renamer
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Load the current focus and workspace contents without issuing commands.
    pub fn start(&mut self) -> SwayFocusResult<()> {
        let focused = self
            .conn
            .get_workspaces()?
            .into_iter()
            .find(|ws| ws.focused);
        let seed = match focused {
            Some(ws) => WmEvent::WorkspaceFocused(WorkspaceSnapshot {
                id: ws.num,
                name: ws.name,
                window_count: 0,
            }),
            None => WmEvent::WorkspaceFocusAbsent,
        };
        self.tracker.on_event(&seed);

        let snapshots = workspace_snapshots(&self.conn.get_tree()?);
        self.renamer.observe(&snapshots);
        for snapshot in &snapshots {
            self.renamer
                .on_window_count_changed(&mut self.conn, snapshot.id, snapshot.window_count)?;
        }
        info!(
            "Tracking {} workspaces, focus: {:?}",
            snapshots.len(),
            self.tracker.state()
        );
        Ok(())
    }

    /// Process `events` in order until the stream ends or the window
    /// manager exits, then run the exit actions.
    ///
    /// Only a broken connection ends the loop with an error.
    pub fn run<I>(&mut self, events: I) -> SwayFocusResult<()>
    where
        I: IntoIterator<Item = SwayFocusResult<WmEvent>>,
    {
        let result = self.start().and_then(|()| self.dispatch(events));
        self.shutdown();
        result
    }

    fn dispatch<I>(&mut self, events: I) -> SwayFocusResult<()>
    where
        I: IntoIterator<Item = SwayFocusResult<WmEvent>>,
    {
        for item in events {
            match item? {
                WmEvent::Shutdown => {
                    info!("Window manager is exiting");
                    break;
                }
                event => self.handle_event(&event)?,
            }
        }
        Ok(())
    }

    /// React to one event. Failed commands are logged; only errors that
    /// leave the connection unusable are returned.
    pub fn handle_event(&mut self, event: &WmEvent) -> SwayFocusResult<()> {
        let state = self.tracker.on_event(event);
        match event {
            WmEvent::WorkspaceEmpty(ws) => self.renamer.forget(ws.id),
            WmEvent::WindowRemoved(window) => self.on_window_closed(window)?,
            WmEvent::WindowFocused(window) => self.on_window_focused(window, state)?,
            _ => {}
        }
        if event.changes_window_count() {
            self.refresh_window_counts()?;
        }
        Ok(())
    }

    fn refresh_window_counts(&mut self) -> SwayFocusResult<()> {
        if !self.config.workspace_renaming {
            return Ok(());
        }
        let Some(tree) = tolerate("Tree refresh", self.conn.get_tree())? else {
            return Ok(());
        };
        let snapshots = workspace_snapshots(&tree);
        self.renamer.observe(&snapshots);
        for snapshot in &snapshots {
            let result = self.renamer.on_window_count_changed(
                &mut self.conn,
                snapshot.id,
                snapshot.window_count,
            );
            tolerate("Workspace rename", result)?;
        }
        Ok(())
    }

    fn on_window_closed(&mut self, window: &WindowInfo) -> SwayFocusResult<()> {
        self.opacity.forget(window.id);
        if let Some(previous) = self.previous_window.take()
            && previous != window.id
        {
            self.run_leave_hook(previous)?;
        }
        Ok(())
    }

    fn on_window_focused(&mut self, window: &WindowInfo, state: FocusState) -> SwayFocusResult<()> {
        if let Some(previous) = self.previous_window
            && previous != window.id
        {
            self.run_leave_hook(previous)?;
        }

        if let Some(command) = &self.config.on_window_focus {
            let result = self.conn.run_command(&WmCommand::Raw(command.clone()));
            tolerate("Focus hook", result)?;
        }

        let result = self
            .opacity
            .on_focus_change(&mut self.conn, self.previous_window, window.id);
        tolerate("Opacity change", result)?;

        if self.config.app_name_renaming {
            match (state.workspace(), window.app_name.as_deref()) {
                (Some(workspace), Some(app)) => {
                    let result = self
                        .renamer
                        .on_window_focused(&mut self.conn, workspace, app);
                    tolerate("Workspace rename", result)?;
                }
                (None, _) => debug!("No focused workspace, skipping workspace rename"),
                (Some(_), None) => debug!("Window {} has no app name", window.id),
            }
        }

        if self.config.autolayout
            && let Some(tree) = tolerate("Autolayout", self.conn.get_tree())?
            && let Some(command) = autolayout_command(&tree)
        {
            tolerate("Autolayout", self.conn.run_command(&command))?;
        }

        self.previous_window = Some(window.id);
        Ok(())
    }

    fn run_leave_hook(&mut self, window: WindowId) -> SwayFocusResult<()> {
        if let Some(command) = &self.config.on_window_focus_leave {
            let result = self.conn.run_command(&WmCommand::for_window(window, command));
            tolerate("Focus leave hook", result)?;
        }
        Ok(())
    }

    /// Undo dimming and run the exit hook. Only the first call does anything.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;

        if let Err(e) = self.opacity.restore_all(&mut self.conn) {
            warn!("Failed to restore opacity: {}", e);
        }
        if let Some(command) = &self.config.on_exit
            && let Err(e) = self.conn.run_command(&WmCommand::Raw(command.clone()))
        {
            warn!("Exit hook failed: {}", e);
        }
        info!("Daemon shut down");
    }
}

/// Log a failed reaction and carry on, unless the connection itself is gone.
///
/// Yields `None` when the reaction failed and should be skipped.
fn tolerate<T>(what: &str, result: SwayFocusResult<T>) -> SwayFocusResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!("{} failed: {}", what, e);
            Ok(None)
        }
    }
}

/// A daemon connected to a live window manager, ready to run.
pub struct Session {
    daemon: Daemon<SwayConnection>,
    listener: Listener,
}

impl Session {
    /// Subscribe to events and open the command connection.
    pub fn connect(config: SwayFocusConfig) -> SwayFocusResult<Self> {
        let path = resolve_socket_path(config.socket_path.as_deref())?;
        let listener = Listener::connect(&path)?;
        let conn = SwayConnection::connect(&path)?;
        Ok(Self {
            daemon: Daemon::new(conn, config),
            listener,
        })
    }

    /// Handle that makes [`Session::run`] return cleanly, from any thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.listener.shutdown_handle()
    }

    pub fn run(self) -> SwayFocusResult<()> {
        let Session {
            mut daemon,
            listener,
        } = self;
        daemon.run(listener)
    }
}
