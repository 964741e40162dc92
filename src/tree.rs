//! Workspace and window facts read out of Sway's layout tree.
use swayipc::{Node, NodeType};

/// Workspace number as reported by Sway. `-1` for workspaces without one.
pub type WorkspaceId = i32;
/// Container id of a window.
pub type WindowId = i64;

/// Sway puts the scratchpad on a hidden workspace with this name.
pub const SCRATCHPAD_WORKSPACE: &str = "__i3_scratch";

/// Direct children, tiled first, then floating.
fn children(node: &Node) -> impl Iterator<Item = &Node> {
    node.nodes.iter().chain(node.floating_nodes.iter())
}

/// Whether `node` is an application window rather than a split container.
pub fn is_window(node: &Node) -> bool {
    matches!(node.node_type, NodeType::Con | NodeType::FloatingCon)
        && (node.pid.is_some()
            || node.app_id.is_some()
            || node.window.is_some()
            || node.window_properties.is_some())
}

pub fn window_count(node: &Node) -> usize {
    children(node)
        .map(|c| if is_window(c) { 1 } else { window_count(c) })
        .sum()
}

/// The Wayland `app_id`, falling back to the X11 class for Xwayland windows.
pub fn app_name(node: &Node) -> Option<&str> {
    node.app_id.as_deref().or_else(|| {
        node.window_properties
            .as_ref()
            .and_then(|p| p.class.as_deref())
    })
}

pub fn is_floating(node: &Node) -> bool {
    node.node_type == NodeType::FloatingCon
}

pub fn is_fullscreen(node: &Node) -> bool {
    node.fullscreen_mode.is_some_and(|m| m > 0) || node.percent.unwrap_or(1.0) > 1.0
}

/// The focused node, following each container's focus order.
pub fn focused_node(tree: &Node) -> Option<&Node> {
    tree.find_focused_as_ref(|n| n.focused)
}

/// The container directly holding the focused node.
pub fn focused_parent(tree: &Node) -> Option<&Node> {
    tree.find_focused_as_ref(|n| children(n).any(|c| c.focused))
}

fn collect_workspaces<'a>(node: &'a Node, out: &mut Vec<&'a Node>) {
    if node.node_type == NodeType::Workspace {
        out.push(node);
        return;
    }
    for child in children(node) {
        collect_workspaces(child, out);
    }
}

/// Per-workspace summary derived from the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceSnapshot {
    pub id: WorkspaceId,
    pub name: String,
    pub window_count: usize,
}

impl WorkspaceSnapshot {
    pub fn from_node(node: &Node) -> Self {
        let name = node.name.clone().unwrap_or_default();
        Self {
            id: node.num.unwrap_or_else(|| leading_number(&name)),
            name,
            window_count: window_count(node),
        }
    }
}

/// Summaries of every real workspace in the tree, skipping the scratchpad.
pub fn workspace_snapshots(root: &Node) -> Vec<WorkspaceSnapshot> {
    let mut workspaces = Vec::new();
    collect_workspaces(root, &mut workspaces);
    workspaces
        .into_iter()
        .filter(|ws| ws.name.as_deref() != Some(SCRATCHPAD_WORKSPACE))
        .map(WorkspaceSnapshot::from_node)
        .collect()
}

/// Number prefix of a workspace name (`"3: web"` gives 3), or -1.
pub fn leading_number(name: &str) -> WorkspaceId {
    let digits: String = name.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(-1)
}
