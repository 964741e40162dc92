//! Common test utilities for sway-focus integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{Value, json};
use sway_focus::ipc::WorkspaceReply;
use sway_focus::{SwayFocusResult, WmCommand, WmConnection};
use swayipc::Node;

pub const RUN_COMMAND: u32 = 0;
pub const GET_WORKSPACES: u32 = 1;
pub const SUBSCRIBE: u32 = 2;
pub const GET_TREE: u32 = 4;
pub const WORKSPACE_EVENT: u32 = 0x8000_0000;
pub const WINDOW_EVENT: u32 = 0x8000_0003;
pub const SHUTDOWN_EVENT: u32 = 0x8000_0006;

/// Connection double that records commands and serves a fixed tree.
#[derive(Debug)]
pub struct RecordingConnection {
    pub commands: Vec<WmCommand>,
    pub tree: Value,
    pub workspaces: Vec<WorkspaceReply>,
}

impl Default for RecordingConnection {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            tree: tree_of(Vec::new()),
            workspaces: Vec::new(),
        }
    }
}

impl RecordingConnection {
    pub fn rendered(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }
}

impl WmConnection for RecordingConnection {
    fn run_command(&mut self, command: &WmCommand) -> SwayFocusResult<()> {
        self.commands.push(command.clone());
        Ok(())
    }

    fn get_tree(&mut self) -> SwayFocusResult<Node> {
        Ok(serde_json::from_value(self.tree.clone())?)
    }

    fn get_workspaces(&mut self) -> SwayFocusResult<Vec<WorkspaceReply>> {
        Ok(self.workspaces.clone())
    }
}

fn rect(width: i32, height: i32) -> Value {
    json!({ "x": 0, "y": 0, "width": width, "height": height })
}

/// A container carrying every field Sway sends for one.
fn container(id: i64, node_type: &str, name: &str, nodes: Vec<Value>) -> Value {
    let focus: Vec<i64> = nodes.iter().filter_map(|n| n["id"].as_i64()).collect();
    json!({
        "id": id,
        "type": node_type,
        "name": name,
        "orientation": "horizontal",
        "percent": null,
        "urgent": false,
        "marks": [],
        "focused": false,
        "layout": "splith",
        "border": "none",
        "current_border_width": 0,
        "rect": rect(1920, 1080),
        "deco_rect": rect(0, 0),
        "window_rect": rect(0, 0),
        "geometry": rect(0, 0),
        "window": null,
        "nodes": nodes,
        "floating_nodes": [],
        "focus": focus,
        "fullscreen_mode": 0,
        "sticky": false,
    })
}

pub fn window_node(id: i64, app_id: &str) -> Value {
    let mut node = container(id, "con", app_id, Vec::new());
    node["layout"] = "none".into();
    node["app_id"] = app_id.into();
    node["pid"] = (1000 + id).into();
    node["visible"] = true.into();
    node["shell"] = "xdg_shell".into();
    node
}

pub fn workspace_node(num: i32, name: &str, windows: Vec<Value>) -> Value {
    let mut node = container(1000 + num as i64, "workspace", name, windows);
    node["num"] = num.into();
    node["output"] = "HEADLESS-1".into();
    node
}

pub fn tree_of(workspaces: Vec<Value>) -> Value {
    let output = container(2, "output", "HEADLESS-1", workspaces);
    container(1, "root", "root", vec![output])
}

/// A `GET_WORKSPACES` reply entry.
pub fn workspace_entry(num: i32, name: &str, focused: bool) -> Value {
    json!({
        "id": 1000 + num,
        "num": num,
        "name": name,
        "layout": "splith",
        "visible": true,
        "focused": focused,
        "urgent": false,
        "representation": null,
        "orientation": "horizontal",
        "rect": rect(1920, 1080),
        "output": "HEADLESS-1",
        "focus": [],
    })
}

pub fn window_event(change: &str, id: i64) -> (u32, String) {
    let payload = json!({ "change": change, "container": window_node(id, "foot") });
    (WINDOW_EVENT, payload.to_string())
}

pub fn workspace_event(change: &str, current: Value) -> (u32, String) {
    let payload = json!({ "change": change, "current": current, "old": null });
    (WORKSPACE_EVENT, payload.to_string())
}

/// Unique socket path under the system temp directory
pub fn socket_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "sway-focus-{}-{}.sock",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn write_message(stream: &mut UnixStream, kind: u32, payload: &[u8]) -> io::Result<()> {
    let mut message = b"i3-ipc".to_vec();
    message.extend_from_slice(&(payload.len() as u32).to_ne_bytes());
    message.extend_from_slice(&kind.to_ne_bytes());
    message.extend_from_slice(payload);
    stream.write_all(&message)
}

fn read_message(stream: &mut UnixStream) -> io::Result<(u32, Vec<u8>)> {
    let mut header = [0u8; 14];
    stream.read_exact(&mut header)?;
    let len = u32::from_ne_bytes([header[6], header[7], header[8], header[9]]);
    let kind = u32::from_ne_bytes([header[10], header[11], header[12], header[13]]);
    let mut payload = vec![0u8; len as usize];
    stream.read_exact(&mut payload)?;
    Ok((kind, payload))
}

/// Minimal stand-in for Sway's IPC server.
///
/// Each accepted connection is served on its own thread. A connection that
/// subscribes receives `events` and is then held open until `close_events`
/// is set; other connections answer requests. `GET_TREE` replies come from
/// `trees` in order, repeating the last one.
pub struct FakeSway {
    pub path: PathBuf,
    pub commands: Arc<Mutex<Vec<String>>>,
    pub subscriptions: Arc<Mutex<Vec<String>>>,
}

pub struct FakeSwayScript {
    pub events: Vec<(u32, String)>,
    pub trees: Vec<Value>,
    pub workspaces: Vec<Value>,
    pub close_events: bool,
}

struct Replies {
    events: Vec<(u32, String)>,
    workspaces: String,
    close_events: bool,
}

impl FakeSway {
    pub fn start(name: &str, script: FakeSwayScript) -> io::Result<Self> {
        let path = socket_path(name);
        let listener = UnixListener::bind(&path)?;
        let commands = Arc::new(Mutex::new(Vec::new()));
        let subscriptions = Arc::new(Mutex::new(Vec::new()));
        let trees: VecDeque<String> = script.trees.iter().map(Value::to_string).collect();
        let trees = Arc::new(Mutex::new(trees));
        let replies = Arc::new(Replies {
            events: script.events,
            workspaces: Value::from(script.workspaces).to_string(),
            close_events: script.close_events,
        });

        let server_commands = commands.clone();
        let server_subscriptions = subscriptions.clone();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let commands = server_commands.clone();
                let subscriptions = server_subscriptions.clone();
                let trees = trees.clone();
                let replies = replies.clone();
                thread::spawn(move || {
                    serve_connection(stream, commands, subscriptions, trees, &replies);
                });
            }
        });

        Ok(Self {
            path,
            commands,
            subscriptions,
        })
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Drop for FakeSway {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

fn serve_connection(
    mut stream: UnixStream,
    commands: Arc<Mutex<Vec<String>>>,
    subscriptions: Arc<Mutex<Vec<String>>>,
    trees: Arc<Mutex<VecDeque<String>>>,
    replies: &Replies,
) {
    while let Ok((kind, payload)) = read_message(&mut stream) {
        let body = String::from_utf8_lossy(&payload).to_string();
        let reply = match kind {
            RUN_COMMAND => {
                commands.lock().unwrap().push(body);
                r#"[{"success":true}]"#.to_string()
            }
            GET_TREE => {
                let mut trees = trees.lock().unwrap();
                if trees.len() > 1 {
                    trees.pop_front().unwrap()
                } else {
                    trees.front().cloned().unwrap_or_else(|| "{}".to_string())
                }
            }
            GET_WORKSPACES => replies.workspaces.clone(),
            SUBSCRIBE => {
                subscriptions.lock().unwrap().push(body);
                if write_message(&mut stream, kind, br#"{"success":true}"#).is_err() {
                    return;
                }
                for (event, payload) in &replies.events {
                    if write_message(&mut stream, *event, payload.as_bytes()).is_err() {
                        return;
                    }
                }
                if replies.close_events {
                    return;
                }
                continue;
            }
            _ => "{}".to_string(),
        };
        if write_message(&mut stream, kind, reply.as_bytes()).is_err() {
            return;
        }
    }
}
