use crate::command::WmCommand;
use crate::tree::{focused_node, focused_parent, is_floating, is_fullscreen};
use swayipc::{Node, NodeLayout};

/// Pick the split for the next window opened next to the focused one.
///
/// Tall windows split vertically, wide ones horizontally. Returns `None`
/// for floating or fullscreen windows and inside stacked or tabbed
/// containers, where a split would fight the user's layout.
pub fn autolayout_command(tree: &Node) -> Option<WmCommand> {
    let focused = focused_node(tree)?;
    let parent = focused_parent(tree)?;

    if is_floating(focused)
        || is_fullscreen(focused)
        || matches!(parent.layout, NodeLayout::Stacked | NodeLayout::Tabbed)
    {
        return None;
    }

    let split = if focused.rect.height > focused.rect.width {
        "split v"
    } else {
        "split h"
    };
    Some(WmCommand::Raw(split.to_string()))
}
