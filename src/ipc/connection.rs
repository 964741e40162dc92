use super::WmConnection;
use crate::command::WmCommand;
use crate::tree::WorkspaceId;
use crate::{SwayFocusError, SwayFocusResult};
use std::os::unix::net::UnixStream;
use std::path::Path;
use swayipc::{Connection, Node, Workspace};
use tracing::{debug, info};

/// The parts of a `GET_WORKSPACES` entry the daemon uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceReply {
    pub num: WorkspaceId,
    pub name: String,
    pub focused: bool,
}

impl From<Workspace> for WorkspaceReply {
    fn from(ws: Workspace) -> Self {
        Self {
            num: ws.num,
            name: ws.name,
            focused: ws.focused,
        }
    }
}

/// Open the socket, reporting failure as a lost connection.
pub(crate) fn open_socket(path: &Path) -> SwayFocusResult<UnixStream> {
    UnixStream::connect(path).map_err(|e| {
        SwayFocusError::ConnectionLost(format!("cannot connect to {}: {e}", path.display()))
    })
}

/// A blocking request/reply connection to Sway.
pub struct SwayConnection {
    conn: Connection,
}

impl SwayConnection {
    pub fn connect<P: AsRef<Path>>(path: P) -> SwayFocusResult<Self> {
        let path = path.as_ref();
        let stream = open_socket(path)?;
        info!("Connected to window manager at {}", path.display());
        Ok(Self::from_stream(stream))
    }

    pub fn from_stream(stream: UnixStream) -> Self {
        Self {
            conn: Connection::from(stream),
        }
    }
}

impl WmConnection for SwayConnection {
    fn run_command(&mut self, command: &WmCommand) -> SwayFocusResult<()> {
        let text = command.to_string();
        debug!("Running command: {}", text);
        for outcome in self.conn.run_command(&text)? {
            outcome.map_err(|e| SwayFocusError::CommandFailed(format!("{text}: {e}")))?;
        }
        Ok(())
    }

    fn get_tree(&mut self) -> SwayFocusResult<Node> {
        Ok(self.conn.get_tree()?)
    }

    fn get_workspaces(&mut self) -> SwayFocusResult<Vec<WorkspaceReply>> {
        let workspaces = self.conn.get_workspaces()?;
        Ok(workspaces.into_iter().map(WorkspaceReply::from).collect())
    }
}
