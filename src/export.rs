//! Diagram emission.
//!
//! - `dot`: Graphviz DOT text with HTML-like table labels. The only output
//!   format; everything upstream of this module is renderer-agnostic.

pub mod dot;
