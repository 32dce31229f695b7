// src/models.rs

use crate::constants::{DEFAULT_PROFILE, DEFAULT_SHELL};
use serde::{Deserialize, Serialize};

// --- INPUT MODELS (what is read from the menu file) ---

/// One record of the menu file. A record with children is a submenu, any other
/// record is a command entry.
///
/// The children array is stored under the `item` key in both JSON and YAML.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, rename = "item", skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    /// Returns `true` if this record opens a submenu.
    pub fn is_branch(&self) -> bool {
        !self.children.is_empty()
    }
}

// --- RUNTIME MENU TREE ---

/// Handle of a node inside a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf { command: String },
    Branch { children: Vec<NodeId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub label: String,
    pub depth: usize,
    pub parent: Option<NodeId>,
    pub kind: NodeKind,
}

/// An immutable arena of menu nodes. The first node is always the root branch.
///
/// Children are listed by handle on their branch, and every node keeps the
/// handle of its parent, so navigation works in both directions without any
/// shared ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuTree {
    nodes: Vec<MenuNode>,
}

impl MenuTree {
    /// Creates a tree holding only an empty root branch.
    pub fn new(label: impl Into<String>, depth: usize) -> Self {
        Self {
            nodes: vec![MenuNode {
                label: label.into(),
                depth,
                parent: None,
                kind: NodeKind::Branch {
                    children: Vec::new(),
                },
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included. Never zero.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&MenuNode> {
        self.nodes.get(id.0)
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.get(id).map(|node| node.label.as_str()).unwrap_or("")
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.get(id).map(|node| node.depth).unwrap_or(0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// The children of a branch, in display order. Leaves have none.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Branch { children }) => children,
            _ => &[],
        }
    }

    pub fn is_branch(&self, id: NodeId) -> bool {
        matches!(
            self.get(id).map(|node| &node.kind),
            Some(NodeKind::Branch { .. })
        )
    }

    /// The command bound to a leaf, `None` for branches.
    pub fn command(&self, id: NodeId) -> Option<&str> {
        match self.get(id).map(|node| &node.kind) {
            Some(NodeKind::Leaf { command }) => Some(command),
            _ => None,
        }
    }

    /// The chain of branches above `id`, root first, not including `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain.reverse();
        chain
    }

    /// The offset of `id` among its parent's children.
    pub fn position_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    pub(crate) fn add_leaf(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        command: impl Into<String>,
    ) -> NodeId {
        self.attach(
            parent,
            label.into(),
            NodeKind::Leaf {
                command: command.into(),
            },
        )
    }

    pub(crate) fn add_branch(&mut self, parent: NodeId, label: impl Into<String>) -> NodeId {
        self.attach(
            parent,
            label.into(),
            NodeKind::Branch {
                children: Vec::new(),
            },
        )
    }

    fn attach(&mut self, parent: NodeId, label: String, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = self.depth(parent) + 1;
        if let Some(MenuNode {
            kind: NodeKind::Branch { children },
            ..
        }) = self.nodes.get_mut(parent.0)
        {
            children.push(id);
        }
        self.nodes.push(MenuNode {
            label,
            depth,
            parent: Some(parent),
            kind,
        });
        id
    }
}

// --- EXECUTION MODELS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// The command is split into words and run as a program, no shell involved.
    DirectExecutable,
    /// The command runs through the configured shell after sourcing the profile.
    ShellWrapped,
}

/// How a leaf's command string is going to be run. Built fresh for every execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionSpec {
    /// The command exactly as written in the menu file, sentinel included.
    pub raw_command: String,
    /// The command with its sentinel removed.
    pub command: String,
    pub mode: ExecutionMode,
    pub verbose: bool,
}

/// The concrete program and argument vector handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

// --- SETTINGS MODELS (settings.toml) ---

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub style: StyleConfig,
    pub shell: ShellSettings,
}

/// Menu appearance, as written in the settings file. Colors are still names here;
/// see [`MenuStyle`] for the resolved form.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub item_prompt: String,
    pub submenu_prompt: String,
    pub item_color: String,
    pub submenu_color: String,
    pub suffix: String,
    pub submenu_marker: String,
    pub indent: usize,
    pub back_exits_at_root: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            item_prompt: "❯".to_string(),
            submenu_prompt: "❯".to_string(),
            item_color: "yellow".to_string(),
            submenu_color: "cyan".to_string(),
            suffix: " ".to_string(),
            submenu_marker: "›".to_string(),
            indent: 2,
            back_exits_at_root: false,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ShellSettings {
    pub program: String,
    /// Sourced before each wrapped command. `None` disables sourcing.
    pub profile: Option<String>,
    pub pipefail: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            program: DEFAULT_SHELL.to_string(),
            profile: Some(DEFAULT_PROFILE.to_string()),
            pipefail: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Resolved, immutable menu appearance. Built once at startup and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuStyle {
    pub item_prompt: String,
    pub submenu_prompt: String,
    pub item_color: AnsiColor,
    pub submenu_color: AnsiColor,
    pub suffix: String,
    pub submenu_marker: String,
    pub indent: usize,
    pub back_exits_at_root: bool,
}
