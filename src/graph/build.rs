//! Graph construction from a parsed document.

use std::collections::HashMap;

use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};

use super::loader::DocumentLoader;
use super::types::{IdAllocator, Node, NodeKind};
use crate::document::{Blif, Subckt};
use crate::error::Result;

/// Configuration for graph construction.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Classify sub-circuit pins through the imported model definitions.
    /// When off, sub-circuit nodes carry no pins.
    pub resolve_subcircuits: bool,
    /// Treat an unloadable import as fatal. When off it is logged and skipped.
    pub strict_imports: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            resolve_subcircuits: true,
            strict_imports: true,
        }
    }
}

impl GraphConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolve_subcircuits(mut self, resolve: bool) -> Self {
        self.resolve_subcircuits = resolve;
        self
    }

    pub fn with_strict_imports(mut self, strict: bool) -> Self {
        self.strict_imports = strict;
        self
    }
}

/// Directed connectivity graph of a BLIF document.
///
/// Edges run from the node driving a signal to every node reading it and are
/// labelled with the signal name. A pair of nodes sharing several signals
/// gets one edge per signal.
#[derive(Debug, Clone)]
pub struct Graph {
    graph: DiGraph<Node, String>,
    longest_label: usize,
    max_fan_in: usize,
}

impl Graph {
    /// Build the graph for `nodes`, inferring edges from pin names.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut graph = DiGraph::with_capacity(nodes.len(), 0);
        let indices: Vec<NodeIndex> = nodes.into_iter().map(|n| graph.add_node(n)).collect();

        let mut longest_label = 1;
        let mut max_fan_in = 1;
        let mut edges = Vec::new();

        for &from in &indices {
            let driver = &graph[from];
            max_fan_in = max_fan_in.max(driver.fan_in());

            for signal in &driver.pin_outputs {
                longest_label = longest_label.max(signal.chars().count());

                for &to in &indices {
                    let reader = &graph[to];
                    for pin in reader.pin_inputs.iter().filter(|pin| *pin == signal) {
                        edges.push((from, to, pin.clone()));
                    }
                }
            }
        }

        for (from, to, signal) in edges {
            graph.add_edge(from, to, signal);
        }

        Self {
            graph,
            longest_label,
            max_fan_in,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.graph.node_weights()
    }

    /// Edges as `(driver, reader, signal)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Node, &str)> {
        self.graph.raw_edges().iter().map(move |e| {
            (
                &self.graph[e.source()],
                &self.graph[e.target()],
                e.weight.as_str(),
            )
        })
    }

    /// Length of the longest signal name driven by any node (at least 1).
    pub fn longest_label(&self) -> usize {
        self.longest_label
    }

    /// Largest input pin count of any node (at least 1).
    pub fn max_fan_in(&self) -> usize {
        self.max_fan_in
    }

    /// Graphviz DOT rendering: nodes labelled by id, edges by signal.
    pub fn to_dot(&self) -> String {
        format!(
            "{}",
            Dot::with_attr_getters(
                &self.graph,
                &[],
                &|_, _| String::new(),
                &|_, (_, node)| format!("color = {}", node.kind.color()),
            )
        )
    }
}

/// Builds a [`Graph`] from a [`Blif`], loading imported documents on demand.
pub struct GraphBuilder<L: DocumentLoader> {
    loader: L,
    config: GraphConfig,
}

impl<L: DocumentLoader> GraphBuilder<L> {
    pub fn new(loader: L) -> Self {
        Self::with_config(loader, GraphConfig::default())
    }

    pub fn with_config(loader: L, config: GraphConfig) -> Self {
        Self { loader, config }
    }

    /// Build the graph. Ids restart at 1 on every call.
    pub fn build(&self, blif: &Blif) -> Result<Graph> {
        let mut ids = IdAllocator::new();
        let mut nodes = Vec::new();

        for signal in blif.input_signals() {
            nodes.push(Node::new(ids.next_id(), NodeKind::Input).with_pins(vec![], vec![signal.clone()]));
        }

        for signal in blif.output_signals() {
            nodes.push(Node::new(ids.next_id(), NodeKind::Output).with_pins(vec![signal.clone()], vec![]));
        }

        for function in &blif.boolean_functions {
            nodes.push(
                Node::new(ids.next_id(), NodeKind::BooleanFunction)
                    .with_pins(function.inputs.clone(), vec![function.output.clone()]),
            );
        }

        for latch in &blif.latches {
            nodes.push(
                Node::new(ids.next_id(), NodeKind::Latch)
                    .with_pins(vec![latch.input().to_string()], vec![latch.output().to_string()]),
            );
        }

        let imports = if self.config.resolve_subcircuits && !blif.subcircuits.is_empty() {
            self.load_imports(blif)?
        } else {
            Vec::new()
        };

        for subckt in &blif.subcircuits {
            let mut node = Node::new(ids.next_id(), NodeKind::Subckt);
            let mut resolved = false;

            for import in imports.iter().filter(|b| b.model_name() == Some(subckt.model_name.as_str())) {
                resolved = true;
                classify_pins(&mut node, subckt, import);
            }

            if self.config.resolve_subcircuits && !resolved {
                tracing::warn!(
                    model = %subckt.model_name,
                    "sub-circuit model not found in any imported file"
                );
            }
            nodes.push(node);
        }

        let graph = Graph::from_nodes(nodes);
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built connectivity graph"
        );
        Ok(graph)
    }

    /// Load every `.search` document once, in declaration order.
    fn load_imports(&self, blif: &Blif) -> Result<Vec<Blif>> {
        let mut cache: HashMap<&str, Blif> = HashMap::new();
        let mut order = Vec::new();

        for import in &blif.imports {
            let path = import.filepath.as_str();
            if cache.contains_key(path) {
                continue;
            }

            match self.loader.load(path) {
                Ok(document) => {
                    if document.has_problems() {
                        tracing::warn!(
                            path,
                            problems = document.problems.len(),
                            "imported file has problems"
                        );
                    }
                    cache.insert(path, document);
                    order.push(path);
                }
                Err(e) if !self.config.strict_imports => {
                    tracing::warn!(path, error = %e, "skipping unreadable import");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(order
            .into_iter()
            .filter_map(|path| cache.get(path).cloned())
            .collect())
    }
}

/// Add the signals of `subckt` bound to ports of `model` as pins of `node`,
/// following the model's declared port order. Unmatched bindings are dropped.
fn classify_pins(node: &mut Node, subckt: &Subckt, model: &Blif) {
    for port in model.input_signals() {
        node.pin_inputs.extend(
            subckt
                .bindings
                .iter()
                .filter(|b| &b.port == port)
                .map(|b| b.signal.clone()),
        );
    }

    for port in model.output_signals() {
        node.pin_outputs.extend(
            subckt
                .bindings
                .iter()
                .filter(|b| &b.port == port)
                .map(|b| b.signal.clone()),
        );
    }
}
