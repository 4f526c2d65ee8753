//! Core types for the connectivity graph.

use std::fmt;

/// Identifier of a node, unique within one graph build.
/// Ids are handed out from 1 in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a node stands for in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A declared `.inputs` signal
    Input,
    /// A declared `.outputs` signal
    Output,
    /// A `.names` function
    BooleanFunction,
    /// A `.latch`
    Latch,
    /// A `.subckt` instance
    Subckt,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::BooleanFunction => "boolean_function",
            Self::Latch => "latch",
            Self::Subckt => "subckt",
        }
    }

    /// Drawing colour used by DOT export.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Input => "red",
            Self::Output => "blue",
            _ => "black",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A graph node with its typed pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Signals read by this node
    pub pin_inputs: Vec<String>,
    /// Signals driven by this node
    pub pin_outputs: Vec<String>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            pin_inputs: Vec::new(),
            pin_outputs: Vec::new(),
        }
    }

    pub fn with_pins(mut self, inputs: Vec<String>, outputs: Vec<String>) -> Self {
        self.pin_inputs = inputs;
        self.pin_outputs = outputs;
        self
    }

    /// Number of input pins.
    pub fn fan_in(&self) -> usize {
        self.pin_inputs.len()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Hands out node ids for a single graph build.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_sequential() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id(), NodeId(1));
        assert_eq!(ids.next_id(), NodeId(2));
        assert_eq!(IdAllocator::new().next_id(), NodeId(1));
    }

    #[test]
    fn test_node_display_is_id() {
        let node = Node::new(NodeId(7), NodeKind::Latch);
        assert_eq!(node.to_string(), "7");
        assert_eq!(node.kind.to_string(), "latch");
    }
}
