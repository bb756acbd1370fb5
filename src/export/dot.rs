//! Graphviz DOT emission.
//!
//! Turns [`NodeSpec`]s into DOT node statements with HTML-like table
//! labels, plus the edge, cluster and digraph scaffolding around them. The
//! HTML builders follow Graphviz's restricted table subset: `border`,
//! `sides`, `port` and `bgcolor` on `<td>`, `<font>` for text styling.
//!
//! Two edge styles exist:
//!
//! - container edges leave a container row's port and land on the target's
//!   west side, weighted heavily so spines stay aligned;
//! - field edges leave the center of a field cell (`tailclip=false`) with
//!   a dot at the tail marking the pointer's origin.
//!
//! All user-controlled text is escaped exactly once, here.

use crate::classes::ClassDef;
use crate::config::Prefs;
use crate::render::{Cell, ContainerRow, FieldItem, IndexLabel, NodeSpec};
use indexmap::IndexMap;

/// Escapes text for HTML-like labels. `&` first, then the angle brackets.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Assembles a complete digraph: graph attributes, merged node defaults,
/// then the body statements.
pub fn digraph(
    graph_attrs: &[(&str, String)],
    node_overrides: &[(&str, String)],
    body: &str,
    prefs: &Prefs,
) -> String {
    let mut node_attrs: IndexMap<&str, String> = IndexMap::new();
    node_attrs.insert("shape", "box".to_string());
    node_attrs.insert("width", "0.1".to_string());
    node_attrs.insert("height", "0.1".to_string());
    node_attrs.insert("penwidth", prefs.penwidth.to_string());
    node_attrs.insert("color", prefs.color_black.clone());
    for (k, v) in node_overrides {
        node_attrs.insert(k, v.clone());
    }

    let mut out = String::from("digraph G {\n");
    for (k, v) in graph_attrs {
        out.push_str(&format!("    {k}={v};\n"));
    }
    let joined: Vec<String> = node_attrs
        .iter()
        .map(|(k, v)| format!("{k}=\"{v}\""))
        .collect();
    out.push_str(&format!("    node [{}];\n", joined.join(", ")));
    out.push_str(body);
    out.push_str("}\n");
    out
}

/// One node statement for the given layout.
pub fn node_stmt(name: &str, spec: &NodeSpec, prefs: &Prefs) -> String {
    match spec {
        NodeSpec::Empty { caption } => text_stmt(name, caption, prefs),
        NodeSpec::Text { text } => text_stmt(name, text, prefs),
        NodeSpec::HorizTable {
            title,
            index_row,
            rows,
        } => {
            let html = horiz_html(title.as_deref(), index_row.as_deref(), rows, prefs);
            format!(
                "{name} [shape=\"box\", space=\"0.0\", margin=\"0.01\", fontcolor=\"{}\", fontname=\"Helvetica\", label=<{html}>];\n",
                prefs.color_black
            )
        }
        NodeSpec::VertList {
            title,
            rows,
            show_indexes,
        } => {
            let html = vert_html(title.as_deref(), rows, *show_indexes, prefs);
            format!(
                "{name} [shape=\"box\", space=\"0.0\", margin=\"0.01\", fontcolor=\"{}\", fontname=\"Helvetica\", label=<{html}>];\n",
                prefs.color_black
            )
        }
        NodeSpec::Fields {
            title,
            items,
            repr_keys,
        } => {
            let html = fields_html(title.as_deref(), items, *repr_keys, prefs);
            filled_stmt(name, &html, "0.03", &prefs.color_yellow, prefs)
        }
        NodeSpec::Tree { .. } => {
            let html = tree_html(spec, prefs);
            filled_stmt(name, &html, "0.03", &prefs.color_yellow, prefs)
        }
        NodeSpec::Container { title, rows } => {
            let html = container_html(title.as_deref(), rows, prefs);
            filled_stmt(name, &html, "0.02", &prefs.color_green, prefs)
        }
        NodeSpec::Chars { chars } => {
            let html = chars_html(chars, prefs);
            format!(
                "{name} [width=0, height=0, color=\"{black}\", fontcolor=\"{black}\", fontname=\"Helvetica\", style=filled, fillcolor=\"{}\", label=<{html}>];\n",
                prefs.color_yellow,
                black = prefs.color_black
            )
        }
    }
}

// Shapeless italic caption, used for placeholders and atom fallbacks.
fn text_stmt(name: &str, text: &str, prefs: &Prefs) -> String {
    format!(
        "{name} [margin=\"0.03\", shape=none label=<<font face=\"Times-Italic\" color=\"{}\" point-size=\"9\">{}</font>>];\n",
        prefs.color_black,
        escape(text)
    )
}

fn filled_stmt(name: &str, html: &str, margin: &str, fill: &str, prefs: &Prefs) -> String {
    format!(
        "{name} [margin=\"{margin}\", color=\"{black}\", fontcolor=\"{black}\", fontname=\"Helvetica\", style=filled, fillcolor=\"{fill}\", label=<{html}>];\n",
        black = prefs.color_black
    )
}

/// Edge from a field cell's center to a node, dot at the tail.
pub fn field_edge(tail: &str, port: &str, head: &str, prefs: &Prefs) -> String {
    format!(
        "{tail}:{port}:c -> {head} [dir=both, tailclip=false, arrowtail=dot, penwidth=\"{}\", color=\"{}\", arrowsize=.4];\n",
        prefs.penwidth, prefs.color_black
    )
}

/// Edge from a container row to the target's west side, heavily weighted
/// so container spines keep their rank.
pub fn container_edge(tail: &str, port: &str, head: &str, prefs: &Prefs) -> String {
    format!(
        "{tail}:{port} -> {head}:w [arrowtail=dot, penwidth=\"{}\", color=\"{}\", arrowsize=.4, weight=100];\n",
        prefs.penwidth, prefs.color_black
    )
}

/// Invisible cluster keeping a chain's nodes on one rank.
pub fn cluster(n: usize, node_stmts: &str, prefs: &Prefs) -> String {
    format!(
        "subgraph cluster{n} {{\n    style=invis; penwidth=.7; pencolor=\"{}\";\n{node_stmts}}}\n",
        prefs.color_green
    )
}

// ---- HTML builders ----

const SEP_TD: &str = "<td cellspacing=\"0\" cellpadding=\"0\" border=\"0\"></td>";

fn blank_row(bg: &str) -> String {
    format!("<tr><td colspan=\"3\" cellpadding=\"1\" border=\"0\" bgcolor=\"{bg}\"></td></tr>\n")
}

fn title_row(title: &str, colspan: usize, bg: &str, prefs: &Prefs) -> String {
    format!(
        "<tr><td cellspacing=\"0\" colspan=\"{colspan}\" cellpadding=\"0\" bgcolor=\"{bg}\" border=\"1\" sides=\"b\" align=\"center\"><font color=\"{}\" face=\"Times-Italic\" point-size=\"11\">{}</font></td></tr>\n",
        prefs.color_black,
        escape(title)
    )
}

fn horiz_html(
    title: Option<&str>,
    index_row: Option<&[IndexLabel]>,
    rows: &[Vec<Cell>],
    prefs: &Prefs,
) -> String {
    let cols = rows.first().map(Vec::len).unwrap_or(0);
    let blue = &prefs.color_blue;

    let mut html = String::from("<table BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\">\n");
    if let Some(title) = title {
        html.push_str(&title_row(title, cols, blue, prefs));
    }

    if let Some(labels) = index_row {
        html.push_str("<tr>");
        for (c, label) in labels.iter().enumerate() {
            let sides = if c == labels.len() - 1 { "b" } else { "br" };
            html.push_str(&format!(
                "<td cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{blue}\" border=\"1\" sides=\"{sides}\" valign=\"top\"><font color=\"{}\" point-size=\"9\">{}</font></td>",
                prefs.color_black,
                label.text()
            ));
        }
        html.push_str("</tr>\n");
    }

    for (r, row) in rows.iter().enumerate() {
        html.push_str("<tr>");
        for (c, cell) in row.iter().enumerate() {
            let last_col = c == row.len() - 1;
            let last_row = r == rows.len() - 1;
            let border = if last_col && last_row { 0 } else { 1 };
            let mut sides = String::new();
            if !last_col {
                sides.push('r');
            }
            if !last_row {
                sides.push('b');
            }
            let sides_attr = if sides.is_empty() {
                String::new()
            } else {
                format!(" sides=\"{sides}\"")
            };
            let port_attr = cell
                .port
                .as_ref()
                .map(|p| format!(" port=\"{p}\""))
                .unwrap_or_default();
            let text = cell.text.as_deref().unwrap_or("   ");
            html.push_str(&format!(
                "<td{port_attr} bgcolor=\"{blue}\" border=\"{border}\"{sides_attr} align=\"center\"><font color=\"{}\" point-size=\"11\">{}</font></td>",
                prefs.color_black,
                escape(text)
            ));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
    html
}

fn vert_html(
    title: Option<&str>,
    rows: &[(IndexLabel, Cell)],
    show_indexes: bool,
    prefs: &Prefs,
) -> String {
    let blue = &prefs.color_blue;
    let black = &prefs.color_black;

    let mut html =
        String::from("<table BORDER=\"0\" CELLPADDING=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\">\n");
    if let Some(title) = title {
        html.push_str(&title_row(title, 3, blue, prefs));
    }

    for (i, (label, cell)) in rows.iter().enumerate() {
        if i > 0 {
            html.push_str(&blank_row(blue));
        }
        html.push_str("<tr>");
        if show_indexes {
            html.push_str(&format!(
                "<td cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{blue}\" border=\"1\" sides=\"r\" align=\"right\"><font color=\"{black}\" face=\"Helvetica\" point-size=\"11\">{}</font></td>{SEP_TD}",
                label.text()
            ));
        }
        let port_attr = cell
            .port
            .as_ref()
            .map(|p| format!(" port=\"{p}\""))
            .unwrap_or_default();
        let text = cell.text.as_deref().unwrap_or("   ");
        html.push_str(&format!(
            "<td{port_attr} bgcolor=\"{blue}\" border=\"1\" align=\"center\"><font color=\"{black}\" point-size=\"11\">{}</font></td>",
            escape(text)
        ));
        html.push_str("</tr>\n");
    }

    html.push_str("</table>");
    html
}

fn fields_html(title: Option<&str>, items: &[FieldItem], repr_keys: bool, prefs: &Prefs) -> String {
    let mut html =
        String::from("<table BORDER=\"0\" CELLBORDER=\"0\" CELLPADDING=\"0\" CELLSPACING=\"0\">\n");
    if let Some(title) = title {
        html.push_str(&title_row(title, 3, &prefs.color_yellow, prefs));
    }

    for item in items {
        let key = if repr_keys {
            format!("'{}'", item.key)
        } else {
            item.key.clone()
        };
        html.push_str(&field_row(
            &item.port,
            &escape(&key),
            item.value.as_deref(),
            prefs,
        ));
    }

    html.push_str("</table>");
    html
}

// Label cell, separator, value cell. `None` value leaves the pointer slot
// blank so an edge can land on the port.
fn field_row(port: &str, key_html: &str, value: Option<&str>, prefs: &Prefs) -> String {
    let yellow = &prefs.color_yellow;
    let black = &prefs.color_black;
    let value_html = match value {
        Some(v) => escape(v),
        None => "   ".to_string(),
    };
    format!(
        "<tr><td port=\"{port}_label\" cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"1\" sides=\"r\" align=\"right\"><font color=\"{black}\" face=\"Helvetica\" point-size=\"11\">{key_html} </font></td>{SEP_TD}<td port=\"{port}\" cellspacing=\"0\" cellpadding=\"1\" bgcolor=\"{yellow}\" border=\"0\" align=\"left\"><font color=\"{black}\" point-size=\"11\"> {value_html}</font></td></tr>\n"
    )
}

fn tree_html(spec: &NodeSpec, prefs: &Prefs) -> String {
    let NodeSpec::Tree {
        title,
        items,
        leaf,
        minimal,
        left_field,
        right_field,
    } = spec
    else {
        return String::new();
    };
    let yellow = &prefs.color_yellow;
    let black = &prefs.color_black;

    let mut html =
        String::from("<table BORDER=\"0\" CELLBORDER=\"0\" CELLPADDING=\"0\" CELLSPACING=\"0\">\n");
    if !minimal {
        if let Some(title) = title {
            html.push_str(&title_row(title, 3, yellow, prefs));
        }
    }

    if items.is_empty() {
        // A table needs at least one row even for a bare leaf.
        html.push_str(&blank_row(yellow));
    }
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            html.push_str(&blank_row(yellow));
        }
        let key_html = if *minimal {
            if *leaf {
                String::new()
            } else {
                "&nbsp;&nbsp;&nbsp;".to_string()
            }
        } else {
            escape(&item.key)
        };
        html.push_str(&field_row(&item.port, &key_html, item.value.as_deref(), prefs));
    }

    if !(*leaf && *minimal) {
        html.push_str(
            "<tr><td colspan=\"3\" cellpadding=\"0\" border=\"1\" sides=\"b\" height=\"3\"></td></tr>\n",
        );
        html.push_str(&blank_row(yellow));
        html.push_str(&format!(
            "<tr><td cellspacing=\"0\" cellpadding=\"1\" bgcolor=\"{yellow}\" border=\"1\" sides=\"r\" align=\"center\"><font color=\"{black}\" point-size=\"6\">{}</font></td>{SEP_TD}<td cellspacing=\"0\" cellpadding=\"1\" bgcolor=\"{yellow}\" border=\"0\" align=\"center\"><font color=\"{black}\" point-size=\"6\">{}</font></td></tr>\n",
            escape(left_field),
            escape(right_field)
        ));
        html.push_str(&format!(
            "<tr><td port=\"{}\" cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"1\" sides=\"r\"><font point-size=\"1\"> </font></td>{SEP_TD}<td port=\"{}\" cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"0\"><font point-size=\"1\"> </font></td></tr>\n",
            escape(left_field),
            escape(right_field)
        ));
        html.push_str(
            "<tr><td colspan=\"3\" cellpadding=\"0\" border=\"0\"><font point-size=\"3\"> </font></td></tr>\n",
        );
    }

    html.push_str("</table>");
    html
}

fn container_html(title: Option<&str>, rows: &[ContainerRow], prefs: &Prefs) -> String {
    let green = &prefs.color_green;
    let black = &prefs.color_black;

    let mut html = String::from("<table BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\">\n");
    if let Some(title) = title {
        html.push_str(&title_row(title, 1, green, prefs));
    }

    for (i, row) in rows.iter().enumerate() {
        let last = i == rows.len() - 1;
        let (border, padding) = if last { (0, 3) } else { (1, 2) };
        let sides_attr = if last { "" } else { " sides=\"b\"" };
        html.push_str(&format!(
            "<tr><td port=\"{}\" cellspacing=\"0\" cellpadding=\"{padding}\" bgcolor=\"{green}\" border=\"{border}\"{sides_attr} align=\"center\"><font color=\"{black}\" point-size=\"9\">{}</font></td></tr>\n",
            row.port,
            escape(&row.label)
        ));
    }

    html.push_str("</table>");
    html
}

fn chars_html(chars: &[String], prefs: &Prefs) -> String {
    let yellow = &prefs.color_yellow;
    let black = &prefs.color_black;

    let mut html = String::from("<table BORDER=\"0\" CELLBORDER=\"0\" CELLSPACING=\"0\">\n");

    // Index row, with blank cells above the surrounding quotes.
    let quote_spacer =
        format!("<td cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"0\"></td>");
    html.push_str("<tr>");
    html.push_str(&quote_spacer);
    for i in 0..chars.len() {
        let sides = if i == chars.len() - 1 { "b" } else { "br" };
        html.push_str(&format!(
            "<td cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"1\" sides=\"{sides}\" valign=\"top\"><font color=\"{black}\" point-size=\"9\">{i}</font></td>"
        ));
    }
    html.push_str(&quote_spacer);
    html.push_str("</tr>\n");

    let quote_td = format!(
        "<td cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"0\"><font face=\"Monaco\" color=\"{black}\" point-size=\"11\">'</font></td>"
    );
    html.push_str("<tr>");
    html.push_str(&quote_td);
    for (i, ch) in chars.iter().enumerate() {
        html.push_str(&format!(
            "<td port=\"{i}\" cellspacing=\"0\" cellpadding=\"0\" bgcolor=\"{yellow}\" border=\"0\" align=\"center\"><font face=\"Monaco\" color=\"{black}\" point-size=\"11\">{}</font></td>",
            escape(ch)
        ));
    }
    html.push_str(&quote_td);
    html.push_str("</tr>\n");

    html.push_str("</table>");
    html
}

// ---- class hierarchy ----

/// Node defaults for class-hierarchy digraphs.
pub fn class_node_overrides(prefs: &Prefs) -> Vec<(&'static str, String)> {
    vec![
        ("shape", "record".to_string()),
        ("style", "filled".to_string()),
        ("fontsize", "11".to_string()),
        ("fontname", "Helvetica".to_string()),
        ("fontcolor", prefs.color_black.clone()),
        ("fillcolor", prefs.color_yellow.clone()),
    ]
}

/// Edge defaults for class-hierarchy digraphs: arrows point from subclass
/// up to superclass, drawn back-to-front.
pub fn class_edge_defaults(prefs: &Prefs) -> String {
    format!(
        "edge [dir=back, color=\"{}\", penwidth=\"{}\", arrowsize=.6];\n",
        prefs.color_black, prefs.penwidth
    )
}

// Record labels have their own escaping rules on top of DOT strings.
fn record_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Record-shaped node for one class: name, fields, prefixed methods.
pub fn class_node(class: &ClassDef, prefs: &Prefs) -> String {
    let join = |lines: &[String]| {
        if lines.is_empty() {
            String::new()
        } else {
            let escaped: Vec<String> = lines.iter().map(|l| record_escape(l)).collect();
            format!("{}\\l", escaped.join("\\l"))
        }
    };
    let fields = join(&class.field_lines(prefs));
    let methods = join(&class.method_lines(prefs));
    format!(
        "\"{}\" [label=\"{{{}{}|{fields}|{methods}}}\"];\n",
        class.name,
        record_escape(&class.name),
        record_escape(&prefs.class_name_suffix)
    )
}

/// Superclass-to-subclass edge.
pub fn class_edge(parent: &str, child: &str) -> String {
    format!("\"{parent}\" -> \"{child}\";\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::Method;
    use crate::render;
    use crate::value::Value;

    fn prefs() -> Prefs {
        Prefs::default()
    }

    #[test]
    fn escape_handles_ampersand_first() {
        assert_eq!(escape("a<b&c>d"), "a&lt;b&amp;c&gt;d");
        assert_eq!(escape("&lt;"), "&amp;lt;", "pre-escaped text is escaped again");
    }

    #[test]
    fn digraph_merges_node_overrides() {
        let dot = digraph(
            &[("rankdir", "LR".to_string())],
            &[("shape", "record".to_string())],
            "",
            &prefs(),
        );
        assert!(dot.starts_with("digraph G {\n"));
        assert!(dot.contains("rankdir=LR;"));
        assert!(dot.contains("shape=\"record\""), "override replaces the default");
        assert!(!dot.contains("shape=\"box\""));
        assert!(dot.contains("penwidth=\"0.5\""));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn horizontal_node_carries_ports_and_indexes() {
        let elems: Vec<Value> = (0..3).map(Value::int).collect();
        let spec = render::list_spec(&elems, &[], true, None, &prefs()).unwrap();
        let stmt = node_stmt("node1", &spec, &prefs());

        assert!(stmt.starts_with("node1 ["));
        assert!(stmt.contains("port=\"0\""));
        assert!(stmt.contains("port=\"2\""));
        assert!(stmt.contains(&format!("bgcolor=\"{}\"", prefs().color_blue)));
        assert!(stmt.contains("point-size=\"9\">0</font>"), "index labels present");
    }

    #[test]
    fn cell_text_is_escaped_once() {
        let elems = [Value::str("a<b")];
        let spec = render::list_spec(&elems, &[], false, None, &prefs()).unwrap();
        let stmt = node_stmt("node1", &spec, &prefs());
        assert!(stmt.contains("a&lt;b"));
        assert!(!stmt.contains("a<b"));
    }

    #[test]
    fn empty_placeholder_renders_as_italic_caption() {
        let spec = NodeSpec::Empty {
            caption: "empty list".to_string(),
        };
        let stmt = node_stmt("node1", &spec, &prefs());
        assert!(stmt.contains("shape=none"));
        assert!(stmt.contains("Times-Italic"));
        assert!(stmt.contains("empty list"));
    }

    #[test]
    fn field_edge_leaves_cell_center() {
        let edge = field_edge("node1", "next", "node2", &prefs());
        assert!(edge.starts_with("node1:next:c -> node2 ["));
        assert!(edge.contains("dir=both"));
        assert!(edge.contains("tailclip=false"));
    }

    #[test]
    fn container_edge_lands_on_west_side() {
        let edge = container_edge("node1", "0", "node2", &prefs());
        assert!(edge.starts_with("node1:0 -> node2:w ["));
        assert!(edge.contains("weight=100"));
        assert!(!edge.contains("dir=both"));
    }

    #[test]
    fn cluster_is_invisible_and_numbered() {
        let body = cluster(2, "node1;\nnode2;\n", &prefs());
        assert!(body.starts_with("subgraph cluster2 {"));
        assert!(body.contains("style=invis"));
        assert!(body.contains("node1;"));
    }

    #[test]
    fn container_last_row_is_borderless() {
        let spec = render::container_spec(2, None, true);
        let stmt = node_stmt("node1", &spec, &prefs());
        assert!(stmt.contains("border=\"1\" sides=\"b\""), "inner rows keep a bottom rule");
        assert!(stmt.contains("cellpadding=\"3\""), "last row gets the wide padding");
    }

    #[test]
    fn string_node_is_monospaced_and_quoted() {
        let spec = render::string_spec("hi");
        let stmt = node_stmt("node1", &spec, &prefs());
        assert!(stmt.contains("Monaco"));
        assert_eq!(stmt.matches(">'</font>").count(), 2, "one quote cell per end");
        assert!(stmt.contains("port=\"1\""));
    }

    #[test]
    fn minimal_leaf_tree_has_no_child_slots() {
        let spec = NodeSpec::Tree {
            title: Some("Tree".to_string()),
            items: vec![],
            leaf: true,
            minimal: true,
            left_field: "left".to_string(),
            right_field: "right".to_string(),
        };
        let stmt = node_stmt("node1", &spec, &prefs());
        assert!(!stmt.contains("Tree"), "minimal display drops the title");
        assert!(!stmt.contains("port=\"left\""));

        let full = NodeSpec::Tree {
            title: Some("Tree".to_string()),
            items: vec![],
            leaf: false,
            minimal: false,
            left_field: "left".to_string(),
            right_field: "right".to_string(),
        };
        let stmt = node_stmt("node1", &full, &prefs());
        assert!(stmt.contains("Tree"));
        assert!(stmt.contains("port=\"left\""));
        assert!(stmt.contains("port=\"right\""));
    }

    #[test]
    fn class_node_builds_record_label() {
        let class = ClassDef::new("Animal")
            .with_fields(["name"])
            .with_static_fields(["population"])
            .with_methods([Method::public("speak"), Method::statik("count")]);
        let stmt = class_node(&class, &prefs());
        assert!(stmt.starts_with("\"Animal\" ["));
        assert!(stmt.contains("{Animal|+name\\l#population\\l|+speak()\\l#count()\\l}"));
    }

    #[test]
    fn class_edges_point_back_to_front() {
        assert_eq!(class_edge("Animal", "Dog"), "\"Animal\" -> \"Dog\";\n");
        let defaults = class_edge_defaults(&prefs());
        assert!(defaults.contains("dir=back"));
    }
}
