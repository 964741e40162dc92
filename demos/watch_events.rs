//! Print decoded window manager events and the resulting focus state
//!
//! Suspend and resume the machine, or unplug an output, to see focus
//! become absent without anything falling over.
//!
//! Usage: cargo run --example watch_events

use std::time::Duration;
use sway_focus::ipc::resolve_socket_path;
use sway_focus::{FocusTracker, WmEvent, subscribe_events};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = resolve_socket_path(None)?;
    let (receiver, handle) = subscribe_events(&path)?;

    let ctrlc_handle = handle.clone();
    ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down...");
        ctrlc_handle.shutdown();
    })?;

    let mut tracker = FocusTracker::new();
    let mut event_count = 0;
    loop {
        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(Ok(event)) => {
                event_count += 1;
                let state = tracker.on_event(&event);
                info!("Event #{}: {:?} -> {:?}", event_count, event, state);
                if event == WmEvent::Shutdown {
                    break;
                }
            }
            Ok(Err(e)) => {
                info!("Event stream ended: {}", e);
                break;
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                // Continue waiting
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                info!("Listener stopped");
                break;
            }
        }
    }

    handle.shutdown();
    info!("Captured {} events total", event_count);
    Ok(())
}
