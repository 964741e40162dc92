//! Run the workspace daemon against the current Sway session
//!
//! Empty workspaces go back to their number, the focused workspace is named
//! after the focused application, and unfocused windows are dimmed to 0.85.
//! Ctrl+C, SIGTERM or SIGHUP stop the daemon, restore every window's
//! opacity and run the exit hook.
//!
//! Usage: cargo run --example daemon

use sway_focus::{Session, SwayFocusConfig};
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config = SwayFocusConfig::new()
        .with_app_name_renaming(true)
        .with_unfocused_opacity(0.85)
        .with_on_window_focus_leave("mark --add _prev")
        .with_on_exit("[tiling] opacity 1");

    let session = Session::connect(config)?;

    let handle = session.shutdown_handle();
    ctrlc::set_handler(move || {
        info!("Received termination signal, shutting down...");
        handle.shutdown();
    })?;

    info!("Daemon running, press Ctrl+C to exit");
    if let Err(e) = session.run() {
        error!("Daemon stopped: {}", e);
        return Err(e.into());
    }

    info!("Goodbye!");
    Ok(())
}
