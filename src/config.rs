use crate::opacity::DEFAULT_OPACITY;
use std::path::PathBuf;

/// Configuration for the workspace daemon
#[derive(Debug, Clone)]
pub struct SwayFocusConfig {
    /// IPC socket to connect to
    /// Default: None (use $SWAYSOCK, then $I3SOCK)
    pub socket_path: Option<PathBuf>,
    /// Rename a workspace back to its number once its last window closes
    /// Default: true
    pub workspace_renaming: bool,
    /// Name the focused workspace after the focused application ("2: firefox")
    /// Default: false
    pub app_name_renaming: bool,
    /// Alternate horizontal and vertical splits based on the focused window's shape
    /// Default: false
    pub autolayout: bool,
    /// Opacity applied to windows when they lose focus
    /// Default: 1.0 (no opacity commands are sent)
    pub unfocused_opacity: f64,
    /// Command run whenever a window gains focus
    pub on_window_focus: Option<String>,
    /// Command run against the previously focused window when focus leaves it
    pub on_window_focus_leave: Option<String>,
    /// Command run when the daemon exits
    pub on_exit: Option<String>,
}

impl Default for SwayFocusConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            workspace_renaming: true,
            app_name_renaming: false,
            autolayout: false,
            unfocused_opacity: DEFAULT_OPACITY,
            on_window_focus: None,
            on_window_focus_leave: None,
            on_exit: None,
        }
    }
}

impl SwayFocusConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect to this socket instead of the one named in the environment
    pub fn with_socket_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.socket_path = Some(path.into());
        self
    }

    pub fn with_workspace_renaming(mut self, enabled: bool) -> Self {
        self.workspace_renaming = enabled;
        self
    }

    pub fn with_app_name_renaming(mut self, enabled: bool) -> Self {
        self.app_name_renaming = enabled;
        self
    }

    pub fn with_autolayout(mut self, enabled: bool) -> Self {
        self.autolayout = enabled;
        self
    }

    /// Set the opacity of unfocused windows
    ///
    /// # Arguments
    /// * `opacity` - Value between 0.0 (invisible) and 1.0 (opaque)
    ///
    /// # Panics
    /// Panics if the opacity is outside 0.0..=1.0 or not a number
    pub fn with_unfocused_opacity(mut self, opacity: f64) -> Self {
        self.validate_opacity(opacity);
        self.unfocused_opacity = opacity;
        self
    }

    /// Set the command run when a window gains focus
    ///
    /// For example `[tiling] opacity 0.8; opacity 1`
    pub fn with_on_window_focus<S: Into<String>>(mut self, command: S) -> Self {
        self.on_window_focus = Some(non_empty(command.into(), "Focus command"));
        self
    }

    /// Set the command run against a window when it loses focus
    ///
    /// For example `mark --add _prev`
    pub fn with_on_window_focus_leave<S: Into<String>>(mut self, command: S) -> Self {
        self.on_window_focus_leave = Some(non_empty(command.into(), "Focus leave command"));
        self
    }

    /// Set the command run on exit, e.g. `[tiling] opacity 1`
    pub fn with_on_exit<S: Into<String>>(mut self, command: S) -> Self {
        self.on_exit = Some(non_empty(command.into(), "Exit command"));
        self
    }

    /// Validate the opacity value
    fn validate_opacity(&self, opacity: f64) {
        if !(0.0..=1.0).contains(&opacity) {
            panic!("Opacity must be between 0.0 and 1.0");
        }
    }
}

fn non_empty(command: String, what: &str) -> String {
    if command.trim().is_empty() {
        panic!("{what} cannot be empty");
    }
    command
}
