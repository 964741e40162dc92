//! Dimming of unfocused windows.
use crate::command::WmCommand;
use crate::ipc::WmConnection;
use crate::tree::WindowId;
use crate::SwayFocusResult;
use std::collections::HashSet;
use tracing::debug;

/// Opacity at which no command is ever sent.
pub const DEFAULT_OPACITY: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct OpacityController {
    unfocused: f64,
    dimmed: HashSet<WindowId>,
}

impl Default for OpacityController {
    fn default() -> Self {
        Self::new(DEFAULT_OPACITY)
    }
}

impl OpacityController {
    /// Create a controller that dims unfocused windows to `unfocused`.
    pub fn new(unfocused: f64) -> Self {
        Self {
            unfocused,
            dimmed: HashSet::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !is_default(self.unfocused)
    }

    /// Set `window` to `value`.
    ///
    /// The default opacity is not "set to 1.0": it sends nothing at all.
    /// Returns whether a command was issued.
    pub fn apply_opacity<C: WmConnection>(
        &mut self,
        conn: &mut C,
        window: WindowId,
        value: f64,
    ) -> SwayFocusResult<bool> {
        if is_default(value) {
            return Ok(false);
        }
        conn.run_command(&WmCommand::set_opacity(window, value))?;
        self.dimmed.insert(window);
        Ok(true)
    }

    /// Dim the window losing focus and undo the dimming of the one gaining it.
    pub fn on_focus_change<C: WmConnection>(
        &mut self,
        conn: &mut C,
        previous: Option<WindowId>,
        current: WindowId,
    ) -> SwayFocusResult<()> {
        if !self.is_active() {
            return Ok(());
        }
        if let Some(previous) = previous.filter(|p| *p != current) {
            self.apply_opacity(conn, previous, self.unfocused)?;
        }
        self.restore(conn, current)?;
        Ok(())
    }

    /// Return `window` to full opacity if this controller dimmed it.
    pub fn restore<C: WmConnection>(
        &mut self,
        conn: &mut C,
        window: WindowId,
    ) -> SwayFocusResult<bool> {
        if !self.dimmed.remove(&window) {
            return Ok(false);
        }
        conn.run_command(&WmCommand::set_opacity(window, DEFAULT_OPACITY))?;
        Ok(true)
    }

    /// Restore every dimmed window. All are attempted; the first error is returned.
    pub fn restore_all<C: WmConnection>(&mut self, conn: &mut C) -> SwayFocusResult<()> {
        let mut windows: Vec<_> = self.dimmed.drain().collect();
        windows.sort_unstable();
        debug!("Restoring opacity of {} windows", windows.len());
        let mut result = Ok(());
        for window in windows {
            if let Err(e) = conn.run_command(&WmCommand::set_opacity(window, DEFAULT_OPACITY))
                && result.is_ok()
            {
                result = Err(e);
            }
        }
        result
    }

    /// Stop tracking a closed window.
    pub fn forget(&mut self, window: WindowId) {
        self.dimmed.remove(&window);
    }
}

fn is_default(value: f64) -> bool {
    value == DEFAULT_OPACITY
}
