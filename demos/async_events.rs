//! Consume window manager events from a tokio task
//!
//! To run this example:
//! ```bash
//! cargo run --example async_events --features async
//! ```

use sway_focus::ipc::resolve_socket_path;
use sway_focus::{FocusState, FocusTracker, subscribe_events_async};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = resolve_socket_path(None)?;
    let (mut receiver, handle) = subscribe_events_async(&path)?;

    let ctrlc_handle = handle.clone();
    ctrlc::set_handler(move || ctrlc_handle.shutdown())?;

    let mut tracker = FocusTracker::new();
    while let Some(item) = receiver.recv().await {
        let event = match item {
            Ok(event) => event,
            Err(e) => {
                println!("Event stream ended: {e}");
                break;
            }
        };
        match tracker.on_event(&event) {
            FocusState::FocusedOn(id) => println!("{event:?} (workspace {id} focused)"),
            FocusState::Unfocused => println!("{event:?} (no workspace focused)"),
        }
    }

    Ok(())
}
