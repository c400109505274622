//! Client-supplied selection trees
//!
//! The executor walks this structure and nothing else: whatever wire format a
//! transport adapter speaks (GraphQL documents, fixed REST projections), it is
//! converted to a `SelectionSet` before resolution.

use serde_json::Value;

/// Ordered set of requested fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    pub fields: Vec<FieldSelection>,
}

impl SelectionSet {
    pub fn new(fields: Vec<FieldSelection>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One requested field: a name, optional arguments (meaningful on root
/// fields), and the nested selection to apply to its result. Scalars carry an
/// empty nested selection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSelection {
    pub name: String,
    pub arguments: Arguments,
    pub selection: SelectionSet,
}

impl FieldSelection {
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Arguments::default(),
            selection: SelectionSet::default(),
        }
    }

    pub fn argument(mut self, name: impl Into<String>, value: Value) -> Self {
        self.arguments.push(name, value);
        self
    }

    pub fn select(mut self, child: FieldSelection) -> Self {
        self.selection.fields.push(child);
        self
    }
}

/// Arguments attached to a requested field, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Vec<(String, Value)>);

impl Arguments {
    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }
}
