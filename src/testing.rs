use crate::command::WmCommand;
use crate::ipc::{WmConnection, WorkspaceReply};
use crate::{SwayFocusError, SwayFocusResult};
use serde_json::{Value, json};
use std::io::{self, Read, Write};
use std::os::unix::net::UnixStream;
use swayipc::Node;

pub const RUN_COMMAND: u32 = 0;
pub const GET_WORKSPACES: u32 = 1;
pub const SUBSCRIBE: u32 = 2;
pub const GET_TREE: u32 = 4;
pub const WORKSPACE_EVENT: u32 = 0x8000_0000;
pub const WINDOW_EVENT: u32 = 0x8000_0003;
pub const SHUTDOWN_EVENT: u32 = 0x8000_0006;

/// Write one i3-ipc message the way Sway does.
pub fn write_message(stream: &mut UnixStream, kind: u32, payload: &[u8]) -> io::Result<()> {
    let mut message = b"i3-ipc".to_vec();
    message.extend_from_slice(&(payload.len() as u32).to_ne_bytes());
    message.extend_from_slice(&kind.to_ne_bytes());
    message.extend_from_slice(payload);
    stream.write_all(&message)
}

pub fn read_message(stream: &mut UnixStream) -> io::Result<(u32, Vec<u8>)> {
    let mut header = [0u8; 14];
    stream.read_exact(&mut header)?;
    let len = u32::from_ne_bytes([header[6], header[7], header[8], header[9]]);
    let kind = u32::from_ne_bytes([header[10], header[11], header[12], header[13]]);
    let mut payload = vec![0u8; len as usize];
    stream.read_exact(&mut payload)?;
    Ok((kind, payload))
}

/// A socket pair whose client end will see a successful `SUBSCRIBE` reply.
pub fn subscribed_pair() -> (UnixStream, UnixStream) {
    let (client, mut server) = UnixStream::pair().unwrap();
    write_message(&mut server, SUBSCRIBE, br#"{"success":true}"#).unwrap();
    (client, server)
}

fn rect(width: i32, height: i32) -> Value {
    json!({ "x": 0, "y": 0, "width": width, "height": height })
}

fn container(id: i64, node_type: &str, name: &str, layout: &str) -> Value {
    json!({
        "id": id,
        "type": node_type,
        "name": name,
        "orientation": "none",
        "percent": null,
        "urgent": false,
        "marks": [],
        "focused": false,
        "layout": layout,
        "border": "none",
        "current_border_width": 0,
        "rect": rect(1920, 1080),
        "deco_rect": rect(0, 0),
        "window_rect": rect(0, 0),
        "geometry": rect(0, 0),
        "window": null,
        "nodes": [],
        "floating_nodes": [],
        "focus": [],
        "fullscreen_mode": 0,
        "sticky": false,
    })
}

fn holds_focus(node: &Value) -> bool {
    node["focused"] == true
        || ["nodes", "floating_nodes"]
            .into_iter()
            .filter_map(|key| node[key].as_array())
            .any(|children| children.iter().any(holds_focus))
}

/// Attach children, ordering `focus` so the branch holding focus comes first.
pub fn with_children(mut parent: Value, nodes: Vec<Value>, floating: Vec<Value>) -> Value {
    let mut focus: Vec<&Value> = nodes.iter().chain(&floating).collect();
    focus.sort_by_key(|child| !holds_focus(child));
    parent["focus"] = focus.iter().map(|child| child["id"].clone()).collect();
    parent["nodes"] = nodes.into();
    parent["floating_nodes"] = floating.into();
    parent
}

pub fn window(id: i64, app_id: &str) -> Value {
    let mut node = container(id, "con", app_id, "none");
    node["app_id"] = app_id.into();
    node["pid"] = (1000 + id).into();
    node["visible"] = true.into();
    node["shell"] = "xdg_shell".into();
    node["inhibit_idle"] = false.into();
    node["idle_inhibitors"] = json!({ "user": "none", "application": "none" });
    node
}

pub fn xwayland_window(id: i64, class: &str) -> Value {
    let mut node = window(id, class);
    node["app_id"] = Value::Null;
    node["shell"] = "xwayland".into();
    node["window"] = (4_000_000 + id).into();
    node["window_properties"] = json!({ "class": class, "instance": class, "title": class });
    node
}

pub fn sized(mut node: Value, width: i32, height: i32) -> Value {
    node["rect"] = rect(width, height);
    node
}

pub fn focused(mut node: Value) -> Value {
    node["focused"] = true.into();
    node
}

pub fn workspace(num: i32, name: &str, windows: Vec<Value>) -> Value {
    workspace_with_layout(num, name, "splith", windows, Vec::new())
}

pub fn workspace_with_layout(
    num: i32,
    name: &str,
    layout: &str,
    windows: Vec<Value>,
    floating: Vec<Value>,
) -> Value {
    let mut node = container(100 + num as i64, "workspace", name, layout);
    node["num"] = num.into();
    node["output"] = "eDP-1".into();
    with_children(node, windows, floating)
}

pub fn root(workspaces: Vec<Value>) -> Value {
    let output = with_children(
        container(2, "output", "eDP-1", "output"),
        workspaces,
        Vec::new(),
    );
    with_children(container(1, "root", "root", "splith"), vec![output], Vec::new())
}

pub fn node(value: Value) -> Node {
    serde_json::from_value(value).expect("fixture should decode as a sway node")
}

/// In-memory connection that records every command it is asked to run.
#[derive(Debug)]
pub(crate) struct RecordingConnection {
    pub commands: Vec<WmCommand>,
    pub tree: Value,
    pub workspaces: Vec<WorkspaceReply>,
    /// Make `get_tree` fail with a recoverable protocol error.
    pub fail_tree: bool,
    fail_commands: bool,
}

impl Default for RecordingConnection {
    fn default() -> Self {
        Self::with_tree(root(Vec::new()))
    }
}

impl RecordingConnection {
    pub fn with_tree(tree: Value) -> Self {
        Self {
            commands: Vec::new(),
            tree,
            workspaces: Vec::new(),
            fail_tree: false,
            fail_commands: false,
        }
    }

    pub fn failing_commands(mut self) -> Self {
        self.fail_commands = true;
        self
    }

    pub fn rendered(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }
}

impl WmConnection for RecordingConnection {
    fn run_command(&mut self, command: &WmCommand) -> SwayFocusResult<()> {
        self.commands.push(command.clone());
        if self.fail_commands {
            return Err(SwayFocusError::CommandFailed(command.to_string()));
        }
        Ok(())
    }

    fn get_tree(&mut self) -> SwayFocusResult<Node> {
        if self.fail_tree {
            return Err(SwayFocusError::Protocol("bad reply".to_string()));
        }
        Ok(serde_json::from_value(self.tree.clone())?)
    }

    fn get_workspaces(&mut self) -> SwayFocusResult<Vec<WorkspaceReply>> {
        Ok(self.workspaces.clone())
    }
}
