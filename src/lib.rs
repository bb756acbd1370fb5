//! Runtime data-structure visualization: walk an in-memory value graph and
//! emit a Graphviz DOT document describing it. Lists, nested lists, maps,
//! linked lists, binary trees, tensors and strings each get a dedicated
//! layout; linked-list shapes are detected and clustered automatically.

mod classes;
mod config;
mod error;
mod export;
mod graph;
mod pattern;
mod render;
mod value;

use std::collections::{HashMap, HashSet};
use std::fs;

use clap::Parser;
use log::{debug, info};
use petgraph::graph::NodeIndex;

pub use classes::{ClassDef, Method};
pub use config::{AppConfig, Options, Orientation, Prefs};
pub use error::VizError;
pub use value::json::from_json;
pub use value::{Composite, Shape, Value, ValueRef};

use export::dot;
use graph::{IdTable, ObjectGraph};
use pattern::RegionKind;
use value::json;

/// One render session. Owns the preferences and the identity→id table, so
/// the same value keeps the same node name across renders until
/// [`Visualizer::reset_ids`] is called.
pub struct Visualizer {
    prefs: Prefs,
    ids: IdTable,
}

impl Default for Visualizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Visualizer {
    pub fn new() -> Self {
        Self::with_prefs(Prefs::default())
    }

    pub fn with_prefs(prefs: Prefs) -> Self {
        Visualizer {
            prefs,
            ids: IdTable::new(),
        }
    }

    pub fn prefs(&self) -> &Prefs {
        &self.prefs
    }

    /// Forget all identity assignments; subsequent renders restart at
    /// `node1`.
    pub fn reset_ids(&mut self) {
        self.ids.reset();
    }

    // Stable name for composites, throwaway name for atoms.
    fn name_of(&mut self, v: &Value) -> String {
        match self.ids.node_name(v) {
            Some(name) => name,
            None => format!("node{}", self.ids.fresh()),
        }
    }

    /// Generic object-graph mode: every reachable composite becomes a node,
    /// linked-list shapes are clustered, tree shapes get the tree layout.
    pub fn objviz(&mut self, root: &Value, opts: &Options) -> String {
        let graph = ObjectGraph::from_root(root);
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count();
            "Object graph built",
        );

        let mut body = String::new();
        if graph.node_count() == 0 {
            // Atom root: nothing to traverse, draw the value itself.
            let name = self.name_of(root);
            body.push_str(&dot::node_stmt(
                &name,
                &render::obj_spec(root, &self.prefs),
                &self.prefs,
            ));
            return dot::digraph(&obj_graph_attrs(opts), &[], &body, &self.prefs);
        }

        let regions = pattern::detect_regions(&graph);
        debug!(regions = regions.len(); "Pattern regions detected");

        // Child-field names are a property of the whole tree region, not of
        // any one node: a lopsided node with only a `right` link must still
        // show both slots under their real names.
        let mut tree_fields: HashMap<NodeIndex, (String, String)> = HashMap::new();
        for region in regions.iter().filter(|r| r.kind == Some(RegionKind::Tree)) {
            if let Some(pair) = region_child_fields(&graph, region) {
                for &idx in &region.nodes {
                    tree_fields.insert(idx, pair.clone());
                }
            }
        }
        let chain_nodes: HashSet<NodeIndex> = regions
            .iter()
            .filter(|r| r.kind == Some(RegionKind::Chain))
            .flat_map(|r| r.nodes.iter().copied())
            .collect();

        // Chain regions first, each in its own invisible cluster.
        let mut cluster_n = 0;
        for region in regions
            .iter()
            .filter(|r| r.kind == Some(RegionKind::Chain))
        {
            cluster_n += 1;
            debug!(
                region_type = region.type_name.as_str(),
                members = region.nodes.len();
                "Clustering chain region",
            );
            let mut stmts = String::new();
            for &idx in &region.nodes {
                stmts.push_str(&self.obj_node_stmt(&graph, idx, &tree_fields, opts));
            }
            body.push_str(&dot::cluster(cluster_n, &stmts, &self.prefs));
        }

        for (idx, _) in graph.nodes_with_indices() {
            if !chain_nodes.contains(&idx) {
                body.push_str(&self.obj_node_stmt(&graph, idx, &tree_fields, opts));
            }
        }

        for (tail, label, head) in graph.edges() {
            let tail_name = self.name_of(graph.value(tail));
            let head_name = self.name_of(graph.value(head));
            let edge = if container_tail(graph.value(tail)) {
                dot::container_edge(&tail_name, label, &head_name, &self.prefs)
            } else {
                dot::field_edge(&tail_name, label, &head_name, &self.prefs)
            };
            body.push_str(&edge);
        }

        dot::digraph(&obj_graph_attrs(opts), &[], &body, &self.prefs)
    }

    // Node statement for one object-graph node. Members of tree regions use
    // the tree layout with the region's shared child-field pair.
    fn obj_node_stmt(
        &mut self,
        graph: &ObjectGraph,
        idx: NodeIndex,
        tree_fields: &HashMap<NodeIndex, (String, String)>,
        opts: &Options,
    ) -> String {
        let value = graph.value(idx);
        let name = self.name_of(value);

        let spec = if let Some((left, right)) = tree_fields.get(&idx) {
            let mut tree_opts = opts.clone();
            tree_opts.left_field = left.clone();
            tree_opts.right_field = right.clone();
            render::tree_spec(value, &tree_opts, &self.prefs)
                .unwrap_or_else(|| render::obj_spec(value, &self.prefs))
        } else {
            render::obj_spec(value, &self.prefs)
        };

        dot::node_stmt(&name, &spec, &self.prefs)
    }

    /// Single sequence node; association pairs render inline, shape
    /// metadata turns the node into a grid.
    pub fn listviz(&mut self, root: &Value, opts: &Options) -> Result<String, VizError> {
        let spec = match root.composite().as_deref() {
            Some(Composite::List(items)) | Some(Composite::Set(items)) => {
                let wrapped = render::wrap_assoc_elements(items, opts.show_assoc);
                render::list_spec(
                    &wrapped,
                    &opts.shape,
                    opts.resolved_show_indexes(),
                    opts.title.clone(),
                    &self.prefs,
                )?
            }
            _ => render::obj_spec(root, &self.prefs),
        };

        let name = self.name_of(root);
        let body = dot::node_stmt(&name, &spec, &self.prefs);
        Ok(dot::digraph(
            &[("nodesep", "0.5".to_string())],
            &[],
            &body,
            &self.prefs,
        ))
    }

    /// List-of-lists mode: a vertical index container pointing at one
    /// independently rendered node per inner sequence. Flat sequences with
    /// a >2-dimensional shape are chunked outer-dimension-first into 2-D
    /// grids; anything else falls back to [`Visualizer::listviz`].
    pub fn lolviz(&mut self, root: &Value, opts: &Options) -> Result<String, VizError> {
        let Some(elems) = sequence_elements(root) else {
            return self.listviz(root, opts);
        };

        let (outer, inner_shape) = if opts.shape.len() > 2 {
            let product: usize = opts.shape.iter().product();
            if product != elems.len() {
                return Err(VizError::Shape(format!(
                    "shape {:?} describes {product} elements but the sequence has {}",
                    opts.shape,
                    elems.len()
                )));
            }
            let outer_count: usize = opts.shape[..opts.shape.len() - 2].iter().product();
            let inner_shape = opts.shape[opts.shape.len() - 2..].to_vec();
            (render::chunk_outer(&elems, outer_count), inner_shape)
        } else if render::is_lol(&elems) {
            (elems, Vec::new())
        } else {
            return self.listviz(root, opts);
        };

        let show_indexes = opts.resolved_show_indexes();
        let outer_name = self.name_of(root);
        // The spine always numbers its rows; the shape switch only affects
        // the inner grids.
        let mut body = dot::node_stmt(
            &outer_name,
            &render::container_spec(
                outer.len(),
                opts.title.clone(),
                opts.show_indexes.unwrap_or(true),
            ),
            &self.prefs,
        );

        let mut emitted: HashSet<String> = HashSet::new();
        for (i, inner) in outer.iter().enumerate() {
            let inner_name = self.name_of(inner);
            if emitted.insert(inner_name.clone()) {
                let spec = match inner.composite().as_deref() {
                    Some(Composite::List(items)) | Some(Composite::Set(items)) => {
                        let wrapped = render::wrap_assoc_elements(items, opts.show_assoc);
                        render::list_spec(&wrapped, &inner_shape, show_indexes, None, &self.prefs)?
                    }
                    _ => render::obj_spec(inner, &self.prefs),
                };
                body.push_str(&dot::node_stmt(&inner_name, &spec, &self.prefs));
            }
            body.push_str(&dot::container_edge(
                &outer_name,
                &i.to_string(),
                &inner_name,
                &self.prefs,
            ));
        }

        let mut attrs = vec![
            ("nodesep", "0.05".to_string()),
            ("ranksep", "0.4".to_string()),
        ];
        attrs.push(("rankdir", opts.orientation.unwrap_or_default().to_string()));
        Ok(dot::digraph(&attrs, &[], &body, &self.prefs))
    }

    /// Binary-tree mode: every reachable record gets the tree layout with
    /// the configured child field names. A null or atomic root yields an
    /// empty digraph.
    pub fn treeviz(&mut self, root: &Value, opts: &Options) -> String {
        let graph = ObjectGraph::from_root(root);
        debug!(nodes = graph.node_count(); "Tree graph built");

        let mut body = String::new();
        for (_, value) in graph.nodes_with_indices() {
            let name = self.name_of(value);
            let spec = render::tree_spec(value, opts, &self.prefs)
                .unwrap_or_else(|| render::obj_spec(value, &self.prefs));
            body.push_str(&dot::node_stmt(&name, &spec, &self.prefs));
        }
        // Tree layouts anchor child edges at name ports, for mappings too,
        // so edges are derived per node rather than from the generic
        // extractor (which labels mapping edges positionally).
        for (_, value) in graph.nodes_with_indices() {
            let tail_name = self.name_of(value);
            for (port, child) in tree_edges(value) {
                let head_name = self.name_of(&child);
                body.push_str(&dot::field_edge(&tail_name, &port, &head_name, &self.prefs));
            }
        }

        let attrs = [
            ("nodesep", "0.1".to_string()),
            ("ranksep", "0.3".to_string()),
            (
                "rankdir",
                opts.orientation.unwrap_or(Orientation::Tb).to_string(),
            ),
        ];
        dot::digraph(&attrs, &[], &body, &self.prefs)
    }

    /// Per-character string layout.
    pub fn strviz(&mut self, s: &str) -> String {
        let name = format!("node{}", self.ids.fresh());
        let body = dot::node_stmt(&name, &render::string_spec(s), &self.prefs);
        dot::digraph(
            &[
                ("nodesep", "0.5".to_string()),
                ("rankdir", "LR".to_string()),
            ],
            &[],
            &body,
            &self.prefs,
        )
    }

    /// Class-hierarchy mode over pre-computed declarations. Parents that
    /// are not themselves declared get no edge.
    pub fn classviz(&mut self, classes: &[ClassDef]) -> String {
        let known: HashSet<&str> = classes.iter().map(|c| c.name.as_str()).collect();

        let mut body = dot::class_edge_defaults(&self.prefs);
        for class in classes {
            body.push_str(&dot::class_node(class, &self.prefs));
        }
        for class in classes {
            if let Some(parent) = &class.parent {
                if known.contains(parent.as_str()) {
                    body.push_str(&dot::class_edge(parent, &class.name));
                }
            }
        }

        dot::digraph(&[], &dot::class_node_overrides(&self.prefs), &body, &self.prefs)
    }
}

fn obj_graph_attrs(opts: &Options) -> Vec<(&'static str, String)> {
    vec![
        ("nodesep", "0.1".to_string()),
        ("ranksep", "0.3".to_string()),
        ("rankdir", opts.orientation.unwrap_or_default().to_string()),
    ]
}

// The two child-field names of a tree region: homogeneous link labels in
// field declaration order, first seen wins across members in discovery
// order. `None` if the region never shows two distinct names, in which case
// members keep the plain record layout.
fn region_child_fields(graph: &ObjectGraph, region: &pattern::Region) -> Option<(String, String)> {
    let mut labels: Vec<String> = Vec::new();
    for &idx in &region.nodes {
        let value = graph.value(idx);
        let type_name = value.type_name();
        let Some(composite) = value.composite() else {
            continue;
        };
        let Composite::Record { fields, .. } = &*composite else {
            continue;
        };
        for (name, child) in fields.iter() {
            if child.type_name() == type_name && !labels.contains(name) {
                labels.push(name.clone());
            }
        }
    }
    (labels.len() >= 2).then(|| (labels[0].clone(), labels[1].clone()))
}

// Container-style edges leave sequence and set spines; field-style edges
// leave record and mapping cells.
fn container_tail(v: &Value) -> bool {
    matches!(
        v.composite().as_deref(),
        Some(Composite::List(_)) | Some(Composite::Set(_))
    )
}

// Outgoing edges for tree mode: records and mappings link through their
// key names, everything else through the generic extractor.
fn tree_edges(v: &Value) -> Vec<(String, Value)> {
    match v.composite().as_deref() {
        Some(Composite::Record { fields, .. }) | Some(Composite::Map(fields)) => fields
            .iter()
            .filter(|(_, child)| child.is_composite())
            .map(|(k, child)| (k.clone(), child.clone()))
            .collect(),
        _ => graph::node_edges(v),
    }
}

fn sequence_elements(v: &Value) -> Option<Vec<Value>> {
    match v.composite().as_deref() {
        Some(Composite::List(items)) | Some(Composite::Set(items)) => Some(items.to_vec()),
        _ => None,
    }
}

/// Renders an object graph with a throwaway session.
pub fn objviz(root: &Value, opts: &Options) -> String {
    Visualizer::new().objviz(root, opts)
}

/// Renders one sequence node with a throwaway session.
pub fn listviz(root: &Value, opts: &Options) -> Result<String, VizError> {
    Visualizer::new().listviz(root, opts)
}

/// Renders a list of lists with a throwaway session.
pub fn lolviz(root: &Value, opts: &Options) -> Result<String, VizError> {
    Visualizer::new().lolviz(root, opts)
}

/// Renders a binary tree with a throwaway session.
pub fn treeviz(root: &Value, opts: &Options) -> String {
    Visualizer::new().treeviz(root, opts)
}

/// Renders a string with a throwaway session.
pub fn strviz(s: &str) -> String {
    Visualizer::new().strviz(s)
}

/// Renders a class hierarchy with a throwaway session.
pub fn classviz(classes: &[ClassDef]) -> String {
    Visualizer::new().classviz(classes)
}

/// Diagram mode selected on the command line.
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum Mode {
    /// Generic object graph.
    Obj,
    /// Single sequence node.
    List,
    /// List of lists.
    Lol,
    /// Binary tree.
    Tree,
    /// Per-character string.
    Str,
    /// Class hierarchy.
    Class,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Path to the JSON input file
    #[arg(help = "Path to the JSON input file")]
    pub file: String,

    /// Path to the output DOT file
    #[arg(short, long, default_value = "out.dot")]
    pub output: String,

    /// Diagram mode
    #[arg(short, long, value_enum, default_value_t = Mode::Obj)]
    pub mode: Mode,

    /// Diagram orientation (overrides the mode's default)
    #[arg(long, value_enum)]
    pub orientation: Option<Orientation>,

    /// Tensor shape as dimension sizes, outermost first
    #[arg(long)]
    pub shape: Vec<usize>,

    /// Lean tree display
    #[arg(long)]
    pub minimal: bool,

    /// Path to a TOML preferences file
    #[arg(short, long)]
    pub config: Option<String>,
}

pub fn run(cfg: &Config) -> Result<(), VizError> {
    info!(
        input_path = cfg.file,
        output_path = cfg.output;
        "Rendering diagram",
    );

    let content = fs::read_to_string(&cfg.file)?;

    let prefs = match &cfg.config {
        Some(path) => {
            info!(config_path = path.as_str(); "Loading preferences");
            AppConfig::load(path)?.prefs
        }
        None => Prefs::default(),
    };

    let opts = Options {
        orientation: cfg.orientation,
        minimal: cfg.minimal,
        shape: cfg.shape.clone(),
        ..Options::default()
    };
    let mut viz = Visualizer::with_prefs(prefs);

    info!(mode:? = cfg.mode; "Building DOT");
    let dot_text = match cfg.mode {
        Mode::Obj => viz.objviz(&parse_value(&content)?, &opts),
        Mode::List => viz.listviz(&parse_value(&content)?, &opts)?,
        Mode::Lol => viz.lolviz(&parse_value(&content)?, &opts)?,
        Mode::Tree => viz.treeviz(&parse_value(&content)?, &opts),
        Mode::Str => {
            let json: serde_json::Value = serde_json::from_str(&content)?;
            match json.as_str() {
                Some(s) => viz.strviz(s),
                None => viz.strviz(&json.to_string()),
            }
        }
        Mode::Class => {
            let classes: Vec<ClassDef> = serde_json::from_str(&content)?;
            debug!(classes = classes.len(); "Class declarations decoded");
            viz.classviz(&classes)
        }
    };

    fs::write(&cfg.output, &dot_text)?;
    info!(output_file = cfg.output; "DOT written successfully");

    Ok(())
}

fn parse_value(content: &str) -> Result<Value, VizError> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    let value = json::from_json(&json);
    debug!("Input decoded");
    Ok(value)
}
