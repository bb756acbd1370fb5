//! Class hierarchy model for `classviz`.
//!
//! Unlike the value modes, class diagrams are built from declarations the
//! caller supplies rather than from a runtime object graph: a flat list of
//! [`ClassDef`]s, each optionally naming its parent. The exporter draws one
//! record-shaped node per class and a back-edge from every parent to each
//! of its subclasses.

use crate::config::Prefs;
use serde::Deserialize;

/// One class declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClassDef {
    pub name: String,
    /// Name of the superclass, if any. Unresolved names are simply not
    /// drawn as edges.
    pub parent: Option<String>,
    /// Instance field names, in declaration order.
    pub fields: Vec<String>,
    /// Static field names, listed after the instance fields.
    pub static_fields: Vec<String>,
    pub methods: Vec<Method>,
}

/// One method declaration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Method {
    pub name: String,
    pub is_static: bool,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef {
            name: name.into(),
            ..ClassDef::default()
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_fields<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_static_fields<S: Into<String>>(
        mut self,
        fields: impl IntoIterator<Item = S>,
    ) -> Self {
        self.static_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    /// Field labels with their visibility prefix, `#` marking statics.
    pub fn field_lines(&self, prefs: &Prefs) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| format!("{}{f}", prefs.class_public_prefix))
            .chain(
                self.static_fields
                    .iter()
                    .map(|f| format!("{}{f}", prefs.class_static_prefix)),
            )
            .collect()
    }

    /// Method labels with their visibility prefix, `#` marking statics.
    pub fn method_lines(&self, prefs: &Prefs) -> Vec<String> {
        self.methods
            .iter()
            .map(|m| {
                let prefix = if m.is_static {
                    &prefs.class_static_prefix
                } else {
                    &prefs.class_public_prefix
                };
                format!("{prefix}{}()", m.name)
            })
            .collect()
    }
}

impl Method {
    pub fn public(name: impl Into<String>) -> Self {
        Method {
            name: name.into(),
            is_static: false,
        }
    }

    pub fn statik(name: impl Into<String>) -> Self {
        Method {
            name: name.into(),
            is_static: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_lines_prefix_by_visibility() {
        let class = ClassDef::new("Animal")
            .with_fields(["name"])
            .with_methods([Method::public("speak"), Method::statik("count")]);
        let lines = class.method_lines(&Prefs::default());
        assert_eq!(lines, ["+speak()", "#count()"]);
    }

    #[test]
    fn field_lines_list_statics_last_with_their_prefix() {
        let class = ClassDef::new("Animal")
            .with_fields(["name", "age"])
            .with_static_fields(["population"]);
        let lines = class.field_lines(&Prefs::default());
        assert_eq!(lines, ["+name", "+age", "#population"]);
    }

    #[test]
    fn class_defs_deserialize_with_defaults() {
        let json = r#"{"name": "Dog", "parent": "Animal", "methods": [{"name": "bark"}]}"#;
        let class: ClassDef = serde_json::from_str(json).unwrap();
        assert_eq!(class.name, "Dog");
        assert_eq!(class.parent.as_deref(), Some("Animal"));
        assert!(class.fields.is_empty());
        assert!(!class.methods[0].is_static);
    }
}
