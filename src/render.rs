//! Per-value layout decisions.
//!
//! The renderer turns one value into a [`NodeSpec`]: which layout the node
//! uses (horizontal table, vertical stack, row-per-field table, tree box,
//! index container, placeholder), which cells it contains, and which port
//! names the assembler can anchor edges to. All size trade-offs live here:
//!
//! - a sequence of atoms goes horizontal while the total abbreviated width
//!   stays within [`Prefs::max_horiz_array_len`] (or whenever explicit
//!   tensor shape metadata is present), vertical otherwise;
//! - sequences longer than [`Prefs::max_list_elems`] truncate to the first
//!   N-1 elements, an ellipsis, and the true last element; for 2-D grids
//!   the rule applies to rows and columns independently;
//! - any rendered text longer than [`Prefs::max_str_len`] is abbreviated to
//!   a prefix of length N-1 plus `...`.
//!
//! Emission of the actual DOT/HTML text happens downstream in
//! [`crate::export::dot`]; everything in this module is a pure decision.

use crate::{
    config::{Options, Prefs},
    error::VizError,
    value::{Composite, Value},
};
use indexmap::IndexMap;

/// Index labels on sequence cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLabel {
    Idx(usize),
    Ellipsis,
}

impl IndexLabel {
    pub fn text(&self) -> String {
        match self {
            IndexLabel::Idx(i) => i.to_string(),
            IndexLabel::Ellipsis => "...".to_string(),
        }
    }
}

/// One table cell: an optional edge port and the inline text, where `None`
/// text means a blank pointer placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub port: Option<String>,
    pub text: Option<String>,
}

/// One row of a field table: port names for the label and value cells, the
/// displayed key, and the inline value (`None` = pointer placeholder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldItem {
    pub port: String,
    pub key: String,
    pub value: Option<String>,
}

/// One row of a vertical index container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRow {
    pub port: String,
    pub label: String,
}

/// The chosen layout for one node.
#[derive(Debug, PartialEq)]
pub enum NodeSpec {
    /// Distinguished placeholder for an empty composite.
    Empty { caption: String },
    /// Bare italic text node (atom roots, unsupported fallback).
    Text { text: String },
    /// Horizontal table: optional column-index row, then value rows.
    HorizTable {
        title: Option<String>,
        index_row: Option<Vec<IndexLabel>>,
        rows: Vec<Vec<Cell>>,
    },
    /// Vertical stack: index column plus value column.
    VertList {
        title: Option<String>,
        rows: Vec<(IndexLabel, Cell)>,
        show_indexes: bool,
    },
    /// Row-per-field table for mappings and records.
    Fields {
        title: Option<String>,
        items: Vec<FieldItem>,
        repr_keys: bool,
    },
    /// Tree box: fields on top, two child-pointer slots at the bottom.
    Tree {
        title: Option<String>,
        items: Vec<FieldItem>,
        leaf: bool,
        minimal: bool,
        left_field: String,
        right_field: String,
    },
    /// Vertical container of index rows, one port per element.
    Container {
        title: Option<String>,
        rows: Vec<ContainerRow>,
    },
    /// One cell per character, with an index row.
    Chars { chars: Vec<String> },
}

/// Cuts `s` down to `max - 1` characters plus a trailing ellipsis.
pub fn abbrev(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let prefix: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{prefix}...")
    } else {
        s.to_string()
    }
}

// Inline text for an atom in a value cell. Strings are abbreviated before
// quoting so the quotes survive truncation; pre-rendered leaves pass
// through untouched apart from abbreviation.
fn atom_text(v: &Value, prefs: &Prefs) -> String {
    match v {
        Value::Str(s) if s.chars().count() > prefs.max_str_len => {
            format!("'{}'", abbrev(s, prefs.max_str_len))
        }
        Value::Rendered(s) => abbrev(s, prefs.max_str_len),
        _ => abbrev(&v.repr(), prefs.max_str_len),
    }
}

// Rendered width of one element as it would appear in a horizontal table;
// used only for the horizontal-vs-vertical decision.
fn cell_width(v: &Value, prefs: &Prefs) -> usize {
    if v.is_null() {
        2
    } else {
        abbrev(&v.to_string(), prefs.max_str_len).chars().count()
    }
}

// Positions kept after element-count truncation: all of them, or the first
// `max - 1` plus the last with a gap in between.
fn kept_positions(n: usize, max: usize) -> (Vec<usize>, bool) {
    if n > max {
        let mut kept: Vec<usize> = (0..max.saturating_sub(1)).collect();
        kept.push(n - 1);
        (kept, true)
    } else {
        ((0..n).collect(), false)
    }
}

// Resolves shape metadata into a (rows, cols) grid, failing fast when the
// dimension product does not match the element count.
fn resolve_grid(shape: &[usize], len: usize) -> Result<Option<(usize, usize)>, VizError> {
    let check = |product: usize| {
        if product == len {
            Ok(())
        } else {
            Err(VizError::Shape(format!(
                "shape {shape:?} describes {product} elements but the sequence has {len}"
            )))
        }
    };

    match shape {
        [] => Ok(None),
        [n] => {
            check(*n)?;
            Ok(Some((1, *n)))
        }
        [r, c] => {
            check(r * c)?;
            Ok(Some((*r, *c)))
        }
        _ => Err(VizError::Shape(format!(
            "shape {shape:?} has more than 2 dimensions; chunk it first (lolviz mode)"
        ))),
    }
}

/// Layout for a sequence node, honoring optional shape metadata.
pub fn list_spec(
    elems: &[Value],
    shape: &[usize],
    show_indexes: bool,
    title: Option<String>,
    prefs: &Prefs,
) -> Result<NodeSpec, VizError> {
    if elems.is_empty() {
        return Ok(NodeSpec::Empty {
            caption: "empty list".to_string(),
        });
    }
    let grid = resolve_grid(shape, elems.len())?;
    Ok(sequence_spec(elems, grid, show_indexes, title, prefs))
}

// The width-driven horizontal/vertical decision. `grid` present forces the
// horizontal table (tensor rendering).
fn sequence_spec(
    elems: &[Value],
    grid: Option<(usize, usize)>,
    show_indexes: bool,
    title: Option<String>,
    prefs: &Prefs,
) -> NodeSpec {
    let total_width: usize = elems.iter().map(|v| cell_width(v, prefs)).sum();

    if grid.is_some() || total_width <= prefs.max_horiz_array_len {
        let (rows, cols) = grid.unwrap_or((1, elems.len()));
        horizontal_spec(elems, rows, cols, show_indexes, title, prefs)
    } else {
        vertical_spec(elems, show_indexes, title, prefs)
    }
}

fn horizontal_spec(
    elems: &[Value],
    rows: usize,
    cols: usize,
    show_indexes: bool,
    title: Option<String>,
    prefs: &Prefs,
) -> NodeSpec {
    let max = prefs.max_list_elems;
    let (kept_cols, cols_truncated) = kept_positions(cols, max);
    let (kept_rows, rows_truncated) = kept_positions(rows, max);

    let cell_at = |row: usize, col: usize| {
        let flat = row * cols + col;
        Cell {
            port: Some(flat.to_string()),
            text: Some(atom_text(&elems[flat], prefs)),
        }
    };
    let ellipsis_cell = || Cell {
        port: None,
        text: Some("...".to_string()),
    };

    let row_cells = |row: usize| {
        let mut cells = Vec::new();
        for (k, &col) in kept_cols.iter().enumerate() {
            if cols_truncated && k == kept_cols.len() - 1 {
                cells.push(ellipsis_cell());
            }
            cells.push(cell_at(row, col));
        }
        cells
    };

    let mut table_rows = Vec::new();
    for (k, &row) in kept_rows.iter().enumerate() {
        if rows_truncated && k == kept_rows.len() - 1 {
            // Gap row of ellipsis cells matching the visible width.
            let width = kept_cols.len() + usize::from(cols_truncated);
            table_rows.push((0..width).map(|_| ellipsis_cell()).collect());
        }
        table_rows.push(row_cells(row));
    }

    let index_row = show_indexes.then(|| {
        let mut labels = Vec::new();
        for (k, &col) in kept_cols.iter().enumerate() {
            if cols_truncated && k == kept_cols.len() - 1 {
                labels.push(IndexLabel::Ellipsis);
            }
            labels.push(IndexLabel::Idx(col));
        }
        labels
    });

    NodeSpec::HorizTable {
        title,
        index_row,
        rows: table_rows,
    }
}

fn vertical_spec(
    elems: &[Value],
    show_indexes: bool,
    title: Option<String>,
    prefs: &Prefs,
) -> NodeSpec {
    let (kept, truncated) = kept_positions(elems.len(), prefs.max_list_elems);

    let mut rows = Vec::new();
    for (k, &i) in kept.iter().enumerate() {
        if truncated && k == kept.len() - 1 {
            rows.push((
                IndexLabel::Ellipsis,
                Cell {
                    port: None,
                    text: Some("...".to_string()),
                },
            ));
        }
        let text = elems[i].is_atom().then(|| atom_text(&elems[i], prefs));
        rows.push((
            IndexLabel::Idx(i),
            Cell {
                port: Some(i.to_string()),
                text,
            },
        ));
    }

    NodeSpec::VertList {
        title,
        rows,
        show_indexes,
    }
}

/// Layout for a vertical index container (list-of-lists spine, sequences
/// holding composites). One port per row; labels are indexes or blanks.
pub fn container_spec(len: usize, title: Option<String>, show_indexes: bool) -> NodeSpec {
    let rows = (0..len)
        .map(|i| ContainerRow {
            port: i.to_string(),
            label: if show_indexes {
                i.to_string()
            } else {
                " ".to_string()
            },
        })
        .collect();

    NodeSpec::Container { title, rows }
}

// Field rows with atoms listed before pointers; order within each group is
// declaration order. Ports are assigned per original position, before the
// reordering, so edges keep pointing at the right cells.
fn field_items<'a>(
    tagged: impl Iterator<Item = (String, String, &'a Value)>,
    prefs: &Prefs,
) -> Vec<FieldItem> {
    let tagged: Vec<(String, String, &Value)> = tagged.collect();

    let to_item = |(port, key, value): &(String, String, &Value)| FieldItem {
        port: port.clone(),
        key: key.clone(),
        value: match value {
            v if v.is_composite() || v.is_null() => None,
            v => Some(atom_text(v, prefs)),
        },
    };

    let (atoms, pointers): (Vec<_>, Vec<_>) =
        tagged.iter().partition(|(_, _, v)| v.is_atom());

    atoms
        .into_iter()
        .map(to_item)
        .chain(pointers.into_iter().map(to_item))
        .collect()
}

/// Layout for a keyed mapping: row per entry, positional ports, quoted keys.
pub fn mapping_spec(entries: &IndexMap<String, Value>, prefs: &Prefs) -> NodeSpec {
    NodeSpec::Fields {
        title: None,
        items: field_items(
            entries
                .iter()
                .enumerate()
                .map(|(i, (key, value))| (i.to_string(), key.clone(), value)),
            prefs,
        ),
        repr_keys: true,
    }
}

/// Layout for a record: row per field, field-name ports, type tag as title.
pub fn record_spec(
    type_name: &str,
    fields: &IndexMap<String, Value>,
    prefs: &Prefs,
) -> NodeSpec {
    NodeSpec::Fields {
        title: Some(type_name.to_string()),
        items: field_items(
            fields.iter().map(|(k, v)| (k.clone(), k.clone(), v)),
            prefs,
        ),
        repr_keys: false,
    }
}

/// Layout for a tree-shaped node: every field except the two child links
/// on top, the child-pointer slots at the bottom. Works on records and on
/// keyed mappings (the duck-typed case); anything else is not a tree node.
pub fn tree_spec(v: &Value, opts: &Options, prefs: &Prefs) -> Option<NodeSpec> {
    let composite = v.composite()?;
    let (type_name, fields) = match &*composite {
        Composite::Record { type_name, fields } => (Some(type_name.clone()), fields),
        Composite::Map(entries) => (None, entries),
        _ => return None,
    };

    let child_is_empty = |name: &str| {
        fields.get(name).map(Value::is_null).unwrap_or(true)
    };
    let leaf = child_is_empty(&opts.left_field) && child_is_empty(&opts.right_field);

    let named_fields = fields
        .iter()
        .filter(|(k, _)| *k != &opts.left_field && *k != &opts.right_field);

    // Minimal display drops the quotes around string values; the field
    // label disappears at emission time.
    let items = if opts.minimal {
        named_fields
            .map(|(k, v)| FieldItem {
                port: k.clone(),
                key: k.clone(),
                value: (v.is_atom() && !v.is_null())
                    .then(|| abbrev(&v.to_string(), prefs.max_str_len)),
            })
            .collect()
    } else {
        field_items(named_fields.map(|(k, v)| (k.clone(), k.clone(), v)), prefs)
    };

    Some(NodeSpec::Tree {
        title: opts.title.clone().or(type_name),
        items,
        leaf,
        minimal: opts.minimal,
        left_field: opts.left_field.clone(),
        right_field: opts.right_field.clone(),
    })
}

/// Per-character layout for a string.
pub fn string_spec(s: &str) -> NodeSpec {
    NodeSpec::Chars {
        chars: s.chars().map(String::from).collect(),
    }
}

/// Generic dispatch for the object-graph mode: one layout per value kind,
/// with a visible fallback for anything that renders inline elsewhere.
pub fn obj_spec(v: &Value, prefs: &Prefs) -> NodeSpec {
    let Some(composite) = v.composite() else {
        // Atom asked to stand alone: degrade to a visible text node.
        return NodeSpec::Text { text: v.repr() };
    };

    match &*composite {
        Composite::List(items) => {
            if items.is_empty() {
                NodeSpec::Empty {
                    caption: "empty list".to_string(),
                }
            } else if items.iter().all(Value::is_atom) {
                sequence_spec(items, None, true, None, prefs)
            } else {
                container_spec(items.len(), None, true)
            }
        }
        Composite::Set(items) => {
            if items.is_empty() {
                NodeSpec::Empty {
                    caption: "empty set".to_string(),
                }
            } else if items.iter().all(Value::is_atom) {
                sequence_spec(items, None, true, None, prefs)
            } else {
                container_spec(items.len(), Some("set".to_string()), true)
            }
        }
        Composite::Map(entries) => {
            if entries.is_empty() {
                NodeSpec::Empty {
                    caption: "empty map".to_string(),
                }
            } else {
                mapping_spec(entries, prefs)
            }
        }
        Composite::Record { type_name, fields } => {
            if fields.is_empty() {
                NodeSpec::Empty {
                    caption: "empty record".to_string(),
                }
            } else {
                record_spec(type_name, fields, prefs)
            }
        }
    }
}

/// Inline rendering for association pairs and small composites: a
/// 2-element set becomes `a→b` when `show_assoc` is set, sequences render
/// bracketed, records braced.
pub fn elviz(v: &Value, show_assoc: bool) -> String {
    elviz_depth(v, show_assoc, 0)
}

const ELVIZ_DEPTH: usize = 8;

fn elviz_depth(v: &Value, show_assoc: bool, depth: usize) -> String {
    if depth >= ELVIZ_DEPTH {
        return "...".to_string();
    }

    let Some(composite) = v.composite() else {
        return v.repr();
    };

    match &*composite {
        Composite::Set(items) if show_assoc && items.len() == 2 => format!(
            "{}→{}",
            elviz_depth(&items[0], show_assoc, depth + 1),
            elviz_depth(&items[1], false, depth + 1)
        ),
        Composite::List(items) | Composite::Set(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(|el| elviz_depth(el, show_assoc, depth + 1))
                .collect();
            format!("[{}]", parts.join(", "))
        }
        Composite::Map(entries) | Composite::Record { fields: entries, .. } => {
            let parts: Vec<String> = entries
                .iter()
                .map(|(k, el)| format!("{k}: {}", elviz_depth(el, show_assoc, depth + 1)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

/// Replaces 2-element sets with their inline association rendering.
pub fn wrap_assoc_elements(elems: &[Value], show_assoc: bool) -> Vec<Value> {
    elems
        .iter()
        .map(|el| {
            let is_pair = matches!(
                el.composite().as_deref(),
                Some(Composite::Set(items)) if items.len() == 2
            );
            if show_assoc && is_pair {
                Value::Rendered(elviz(el, true))
            } else {
                el.clone()
            }
        })
        .collect()
}

/// True when every element of a non-empty sequence is itself a sequence or
/// set (the list-of-lists test). Strings are atoms here, not iterables.
pub fn is_lol(elems: &[Value]) -> bool {
    !elems.is_empty()
        && elems.iter().all(|el| {
            matches!(
                el.composite().as_deref(),
                Some(Composite::List(_)) | Some(Composite::Set(_))
            )
        })
}

/// Splits a flat sequence into `dim` equal sublists (the outer dimension of
/// a tensor shape). The caller validates divisibility.
pub fn chunk_outer(elems: &[Value], dim: usize) -> Vec<Value> {
    let chunk_len = if dim == 0 { 0 } else { elems.len() / dim };
    elems
        .chunks(chunk_len.max(1))
        .map(|chunk| Value::list(chunk.iter().cloned()))
        .collect()
}
