//! Keeps workspace names in step with their contents.
use crate::command::WmCommand;
use crate::ipc::WmConnection;
use crate::tree::{WorkspaceId, WorkspaceSnapshot};
use crate::SwayFocusResult;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// What the renamer knows about one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRecord {
    pub id: WorkspaceId,
    /// Name as last seen or set. `None` until observed.
    pub display_name: Option<String>,
    pub window_count: usize,
    /// Name other than the bare number, dropped once the workspace empties.
    pub custom_name: Option<String>,
}

impl WorkspaceRecord {
    fn new(id: WorkspaceId) -> Self {
        Self {
            id,
            display_name: None,
            window_count: 0,
            custom_name: None,
        }
    }

    pub fn numeric_name(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WorkspaceRenamer {
    workspaces: BTreeMap<WorkspaceId, WorkspaceRecord>,
}

impl WorkspaceRenamer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workspace(&self, id: WorkspaceId) -> Option<&WorkspaceRecord> {
        self.workspaces.get(&id)
    }

    /// Sync names with the window manager's view. Workspaces missing from
    /// `snapshots` no longer exist and are dropped. Issues no commands.
    pub fn observe(&mut self, snapshots: &[WorkspaceSnapshot]) {
        self.workspaces
            .retain(|id, _| snapshots.iter().any(|s| s.id == *id));
        for snapshot in snapshots.iter().filter(|s| s.id >= 0) {
            let record = self
                .workspaces
                .entry(snapshot.id)
                .or_insert_with(|| WorkspaceRecord::new(snapshot.id));
            if snapshot.name != record.numeric_name() {
                record.custom_name = Some(snapshot.name.clone());
            }
            record.display_name = Some(snapshot.name.clone());
        }
    }

    pub fn forget(&mut self, id: WorkspaceId) {
        if self.workspaces.remove(&id).is_some() {
            debug!("Forgot workspace {}", id);
        }
    }

    /// Record a new window count for `id`.
    ///
    /// When the count drops to zero the workspace is renamed to its number,
    /// once per drop and only if it is not named that already. Returns
    /// whether a command was issued.
    pub fn on_window_count_changed<C: WmConnection>(
        &mut self,
        conn: &mut C,
        id: WorkspaceId,
        new_count: usize,
    ) -> SwayFocusResult<bool> {
        if id < 0 {
            return Ok(false);
        }
        let record = self
            .workspaces
            .entry(id)
            .or_insert_with(|| WorkspaceRecord::new(id));
        let previous = record.window_count;
        if new_count > 0 || previous == 0 {
            record.window_count = new_count;
            return Ok(false);
        }

        let numeric = record.numeric_name();
        let rename = record.display_name.as_deref() != Some(numeric.as_str());
        if rename {
            info!("Workspace {} emptied, renaming to its number", id);
            // The record keeps its old count on failure so the next refresh retries.
            conn.run_command(&WmCommand::rename_workspace(id, numeric.clone()))?;
        } else {
            debug!("Workspace {} emptied and already carries its number", id);
        }
        record.window_count = 0;
        record.custom_name = None;
        record.display_name = Some(numeric);
        Ok(rename)
    }

    /// Name workspace `id` after the application that just gained focus
    /// there, e.g. `"2: firefox"`. Returns whether a command was issued.
    pub fn on_window_focused<C: WmConnection>(
        &mut self,
        conn: &mut C,
        id: WorkspaceId,
        app_name: &str,
    ) -> SwayFocusResult<bool> {
        let app = app_name.trim_matches('-').to_lowercase();
        if id < 0 || app.is_empty() {
            return Ok(false);
        }
        let record = self
            .workspaces
            .entry(id)
            .or_insert_with(|| WorkspaceRecord::new(id));
        let name = format!("{id}: {app}");
        record.custom_name = Some(name.clone());
        if record.display_name.as_deref() == Some(name.as_str()) {
            return Ok(false);
        }

        conn.run_command(&WmCommand::rename_workspace(id, name.clone()))?;
        record.display_name = Some(name);
        Ok(true)
    }
}
