//! Runtime value model.
//!
//! Diagrams are built over [`Value`], a closed tagged union covering the
//! shapes the renderer knows how to draw: atoms (numbers, booleans, strings,
//! null, pre-rendered leaves) and composites (sequences, sets, keyed
//! mappings, typed records). Composites live behind [`ValueRef`]
//! (`Rc<RefCell<Composite>>`) so that
//!
//! - sharing is observable: two fields pointing at the same list produce one
//!   diagram node with two incoming edges, and
//! - cyclic graphs can be built by mutating a composite after wrapping it.
//!
//! Identity is the `Rc` pointer; atoms compare by value and never become
//! diagram nodes of their own.
//!
//! - `json`: conversion from `serde_json::Value` for the CLI input path.

pub mod json;

use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::fmt::{self, Display, Write};
use std::rc::Rc;

/// Shared handle to a composite value.
pub type ValueRef = Rc<RefCell<Composite>>;

/// Any value the renderer can draw.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A leaf whose display text was rendered ahead of time, e.g. an
    /// association pair `a→b` or an ellipsis marker. Always atomic.
    Rendered(String),
    /// A shared composite: sequence, set, mapping or record.
    Ref(ValueRef),
}

/// A value with internal structure; becomes its own diagram node.
#[derive(Debug)]
pub enum Composite {
    /// Ordered, indexable sequence.
    List(Vec<Value>),
    /// Unordered collection of unique elements (stored in insertion order).
    Set(Vec<Value>),
    /// Insertion-ordered key→value pairs with unique keys.
    Map(IndexMap<String, Value>),
    /// Named-field composite carrying an explicit type tag.
    Record {
        type_name: String,
        fields: IndexMap<String, Value>,
    },
}

/// Shape category assigned by the classifier. Exactly one per value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Atom,
    Str,
    Sequence,
    SetLike,
    Mapping,
    Record,
}

impl Value {
    pub fn int(i: i64) -> Self {
        Value::Int(i)
    }

    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Builds a sequence value.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Ref(Rc::new(RefCell::new(Composite::List(
            items.into_iter().collect(),
        ))))
    }

    /// Builds a set value. Uniqueness is the caller's responsibility; the
    /// renderer draws whatever elements are present, in order.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Value::Ref(Rc::new(RefCell::new(Composite::Set(
            items.into_iter().collect(),
        ))))
    }

    /// Builds a keyed mapping, preserving entry order.
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Ref(Rc::new(RefCell::new(Composite::Map(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))))
    }

    /// Builds a record with an explicit type tag and named fields.
    pub fn record<K: Into<String>>(
        type_name: impl Into<String>,
        fields: impl IntoIterator<Item = (K, Value)>,
    ) -> Self {
        Value::Ref(Rc::new(RefCell::new(Composite::Record {
            type_name: type_name.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        })))
    }

    /// Classifies this value into exactly one shape category.
    pub fn shape(&self) -> Shape {
        match self {
            Value::Str(_) => Shape::Str,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) => Shape::Atom,
            Value::Rendered(_) => Shape::Atom,
            Value::Ref(r) => match &*r.borrow() {
                Composite::List(_) => Shape::Sequence,
                Composite::Set(_) => Shape::SetLike,
                Composite::Map(_) => Shape::Mapping,
                Composite::Record { .. } => Shape::Record,
            },
        }
    }

    /// Atoms render inline and never become separate diagram nodes.
    pub fn is_atom(&self) -> bool {
        !matches!(self, Value::Ref(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Value::Ref(_))
    }

    /// Borrow of the underlying composite, if any.
    pub fn composite(&self) -> Option<Ref<'_, Composite>> {
        match self {
            Value::Ref(r) => Some(r.borrow()),
            _ => None,
        }
    }

    /// Reference identity for composites; atoms have none.
    pub fn addr(&self) -> Option<usize> {
        match self {
            Value::Ref(r) => Some(Rc::as_ptr(r) as *const () as usize),
            _ => None,
        }
    }

    /// Number of elements/fields for composites.
    pub fn len(&self) -> usize {
        match self.composite().as_deref() {
            Some(Composite::List(items)) | Some(Composite::Set(items)) => items.len(),
            Some(Composite::Map(entries)) => entries.len(),
            Some(Composite::Record { fields, .. }) => fields.len(),
            None => 0,
        }
    }

    /// True for a composite with no elements or fields.
    pub fn is_empty(&self) -> bool {
        self.is_composite() && self.len() == 0
    }

    /// The record's type tag, if this is a record.
    pub fn type_name(&self) -> Option<String> {
        match self.composite().as_deref() {
            Some(Composite::Record { type_name, .. }) => Some(type_name.clone()),
            _ => None,
        }
    }

    /// Replaces (or inserts) a record field. Used to close cycles after
    /// construction, e.g. `a.set_field("next", a.clone())`.
    pub fn set_field(&self, name: &str, value: Value) -> Result<(), crate::VizError> {
        match self {
            Value::Ref(r) => match &mut *r.borrow_mut() {
                Composite::Record { fields, .. } => {
                    fields.insert(name.to_string(), value);
                    Ok(())
                }
                Composite::Map(entries) => {
                    entries.insert(name.to_string(), value);
                    Ok(())
                }
                _ => Err(crate::VizError::Unsupported(
                    "set_field requires a record or mapping".to_string(),
                )),
            },
            _ => Err(crate::VizError::Unsupported(
                "set_field requires a composite value".to_string(),
            )),
        }
    }

    /// Printable representation: strings quoted, everything else as
    /// [`Display`].
    pub fn repr(&self) -> String {
        match self {
            Value::Str(s) => format!("'{s}'"),
            Value::Rendered(s) => s.clone(),
            _ => self.to_string(),
        }
    }
}

// Inline display, bounded so that cyclic composites terminate. Beyond the
// cap, nested composites collapse to an ellipsis.
const INLINE_DEPTH: usize = 4;

fn write_inline(f: &mut fmt::Formatter<'_>, v: &Value, depth: usize) -> fmt::Result {
    match v {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Int(i) => write!(f, "{i}"),
        Value::Float(x) => write!(f, "{x}"),
        Value::Str(s) | Value::Rendered(s) => f.write_str(s),
        Value::Ref(r) => {
            if depth >= INLINE_DEPTH {
                return f.write_str("...");
            }
            match &*r.borrow() {
                Composite::List(items) => write_seq(f, items, ('[', ']'), depth),
                Composite::Set(items) => write_seq(f, items, ('{', '}'), depth),
                Composite::Map(entries) => write_entries(f, entries, depth),
                Composite::Record { fields, .. } => write_entries(f, fields, depth),
            }
        }
    }
}

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    items: &[Value],
    brackets: (char, char),
    depth: usize,
) -> fmt::Result {
    f.write_char(brackets.0)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        if let Value::Str(s) = item {
            write!(f, "'{s}'")?;
        } else {
            write_inline(f, item, depth + 1)?;
        }
    }
    f.write_char(brackets.1)
}

fn write_entries(
    f: &mut fmt::Formatter<'_>,
    entries: &IndexMap<String, Value>,
    depth: usize,
) -> fmt::Result {
    f.write_char('{')?;
    for (i, (k, v)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{k}: ")?;
        if let Value::Str(s) = v {
            write!(f, "'{s}'")?;
        } else {
            write_inline(f, v, depth + 1)?;
        }
    }
    f.write_char('}')
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_inline(f, self, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifier_assigns_one_shape_per_value() {
        assert_eq!(Value::Null.shape(), Shape::Atom);
        assert_eq!(Value::int(3).shape(), Shape::Atom);
        assert_eq!(Value::str("hi").shape(), Shape::Str);
        assert_eq!(Value::list([]).shape(), Shape::Sequence);
        assert_eq!(Value::set([]).shape(), Shape::SetLike);
        assert_eq!(Value::map::<String>([]).shape(), Shape::Mapping);
        assert_eq!(Value::record::<String>("Node", []).shape(), Shape::Record);
    }

    #[test]
    fn atoms_have_no_identity() {
        assert!(Value::int(3).addr().is_none());
        assert!(Value::str("hi").addr().is_none());
        assert!(Value::Rendered("3→4".to_string()).addr().is_none());
    }

    #[test]
    fn clones_share_identity() {
        let list = Value::list([Value::int(1)]);
        let alias = list.clone();
        assert_eq!(list.addr(), alias.addr(), "clone must alias, not copy");

        let other = Value::list([Value::int(1)]);
        assert_ne!(list.addr(), other.addr(), "equal contents, distinct identity");
    }

    #[test]
    fn empty_flag_covers_all_composite_kinds() {
        assert!(Value::list([]).is_empty());
        assert!(Value::map::<String>([]).is_empty());
        assert!(Value::record::<String>("T", []).is_empty());
        assert!(!Value::list([Value::int(1)]).is_empty());
        assert!(!Value::Null.is_empty(), "atoms are never 'empty'");
    }

    #[test]
    fn set_field_closes_cycles() {
        let node = Value::record("Node", [("value", Value::int(1)), ("next", Value::Null)]);
        node.set_field("next", node.clone()).unwrap();

        let composite = node.composite().unwrap();
        let Composite::Record { fields, .. } = &*composite else {
            panic!("expected record");
        };
        assert_eq!(fields["next"].addr(), node.addr());
    }

    #[test]
    fn inline_display_terminates_on_cycles() {
        let node = Value::record("Node", [("next", Value::Null)]);
        node.set_field("next", node.clone()).unwrap();
        // Must not hang; the exact text only needs to be finite.
        let text = node.to_string();
        assert!(text.contains("..."));
    }

    #[test]
    fn repr_quotes_strings_only() {
        assert_eq!(Value::str("abc").repr(), "'abc'");
        assert_eq!(Value::int(7).repr(), "7");
        assert_eq!(Value::list([Value::str("a"), Value::int(3)]).repr(), "['a', 3]");
    }
}
