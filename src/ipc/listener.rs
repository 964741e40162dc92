use super::connection::open_socket;
use crate::event::{WmEvent, decode_event};
use crate::{SwayFocusError, SwayFocusResult};
use std::io::ErrorKind;
use std::net::Shutdown;
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
    mpsc,
};
use swayipc::{Connection, EventStream, EventType};
use tracing::{info, trace, warn};

/// Event types the listener subscribes to.
pub const SUBSCRIPTIONS: [EventType; 3] =
    [EventType::Workspace, EventType::Window, EventType::Shutdown];

/// Stops a [`Listener`] from any thread, waking it if it is blocked on a read.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    stream: Arc<UnixStream>,
    stopping: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        if self.stopping.swap(true, Ordering::AcqRel) {
            return;
        }
        info!("Stopping event listener");
        if let Err(e) = self.stream.shutdown(Shutdown::Both)
            && e.kind() != ErrorKind::NotConnected
        {
            warn!("Failed to shut down event socket: {}", e);
        }
    }

    pub fn is_stopping(&self) -> bool {
        self.stopping.load(Ordering::Acquire)
    }
}

/// Decoded event stream from the window manager.
///
/// Yields events in arrival order. The stream ends either with `None` after
/// [`ShutdownHandle::shutdown`], or with a single `ConnectionLost` error,
/// after which it yields `None` forever.
pub struct Listener {
    events: EventStream,
    handle: ShutdownHandle,
    finished: bool,
}

impl Listener {
    /// Connect to the socket and subscribe to workspace, window and shutdown events.
    pub fn connect<P: AsRef<Path>>(path: P) -> SwayFocusResult<Self> {
        Self::from_stream(open_socket(path.as_ref())?)
    }

    /// Subscribe over an already connected stream.
    pub fn from_stream(stream: UnixStream) -> SwayFocusResult<Self> {
        let handle = ShutdownHandle {
            stream: Arc::new(stream.try_clone()?),
            stopping: Arc::new(AtomicBool::new(false)),
        };
        let events = Connection::from(stream).subscribe(SUBSCRIPTIONS)?;
        info!("Subscribed to workspace, window and shutdown events");
        Ok(Self {
            events,
            handle,
            finished: false,
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        self.handle.clone()
    }

    fn finish(&mut self, err: SwayFocusError) -> Option<SwayFocusResult<WmEvent>> {
        self.finished = true;
        if self.handle.is_stopping() {
            info!("Event listener stopped");
            return None;
        }
        warn!("Event stream ended: {}", err);
        Some(Err(err))
    }
}

impl Iterator for Listener {
    type Item = SwayFocusResult<WmEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let event = match self.events.next() {
                Some(Ok(event)) => event,
                // A frame that reads fine but does not decode leaves the stream usable.
                Some(Err(swayipc::Error::SerdeJson(e))) => {
                    warn!("Skipping malformed event: {}", e);
                    continue;
                }
                Some(Err(e)) => return self.finish(e.into()),
                None => {
                    return self.finish(SwayFocusError::ConnectionLost(
                        "event stream closed".to_string(),
                    ));
                }
            };

            match decode_event(event) {
                Ok(Some(event)) => {
                    trace!(?event, "Decoded event");
                    return Some(Ok(event));
                }
                Ok(None) => trace!("Ignoring event"),
                Err(e) => warn!("Skipping malformed event: {}", e),
            }
        }
    }
}

/// Run a listener on a background thread and receive its events over a channel.
///
/// The thread exits when the stream ends, when the handle is shut down, or
/// when the receiver is dropped and the next event arrives.
pub fn subscribe_events<P: AsRef<Path>>(
    path: P,
) -> SwayFocusResult<(mpsc::Receiver<SwayFocusResult<WmEvent>>, ShutdownHandle)> {
    let listener = Listener::connect(path)?;
    let handle = listener.shutdown_handle();
    let (sender, receiver) = mpsc::channel();
    spawn_forwarder(listener, move |item| sender.send(item).is_ok())?;
    Ok((receiver, handle))
}

/// Async variant of [`subscribe_events`] - requires the "async" feature
#[cfg(feature = "async")]
pub fn subscribe_events_async<P: AsRef<Path>>(
    path: P,
) -> SwayFocusResult<(
    tokio::sync::mpsc::UnboundedReceiver<SwayFocusResult<WmEvent>>,
    ShutdownHandle,
)> {
    let listener = Listener::connect(path)?;
    let handle = listener.shutdown_handle();
    let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();
    spawn_forwarder(listener, move |item| sender.send(item).is_ok())?;
    Ok((receiver, handle))
}

/// Drain `listener` on a dedicated thread, handing each item to `forward`
/// until it returns `false`.
pub(crate) fn spawn_forwarder<F>(listener: Listener, mut forward: F) -> SwayFocusResult<()>
where
    F: FnMut(SwayFocusResult<WmEvent>) -> bool + Send + 'static,
{
    std::thread::Builder::new()
        .name("sway-focus-listener".to_string())
        .spawn(move || {
            let handle = listener.shutdown_handle();
            for item in listener {
                if !forward(item) {
                    info!("Event receiver dropped, stopping listener");
                    handle.shutdown();
                    break;
                }
            }
        })?;
    Ok(())
}
