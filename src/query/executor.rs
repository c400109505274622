//! Recursive resolution of selection trees against the schema and store
//!
//! Resolution is synchronous and CPU-bound: the store is in memory, nothing
//! suspends. Each request gets one [`Executor::execute`] call; any number may
//! run concurrently against the same shared store.
//!
//! Errors are partial: a request-shape error on one field is recorded with
//! its path and resolution of sibling fields continues. A root lookup miss is
//! not an error, it resolves to an explicit null.

use serde::Serialize;
use serde_json::{Map, Value};

use super::selection::{FieldSelection, SelectionSet};
use crate::core::error::QueryError;
use crate::schema::{Cardinality, FieldDef, Node, Schema, TypeDef};
use crate::store::Store;

/// One step of the path from the response root to a field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// A request-shape error recorded at a specific position in the response.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub path: Vec<PathSegment>,
    pub error: QueryError,
}

/// The resolved data tree plus any per-field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub data: Value,
    pub errors: Vec<FieldError>,
}

/// Walks a selection tree, dispatching fields through the schema registry
/// and relationship resolvers through the store.
pub struct Executor<'a> {
    schema: &'a Schema,
    store: &'a Store,
}

impl<'a> Executor<'a> {
    pub fn new(schema: &'a Schema, store: &'a Store) -> Self {
        Self { schema, store }
    }

    /// Resolve a top-level selection. Each field names a root operation and
    /// resolves independently of its siblings.
    pub fn execute(&self, selection: &SelectionSet) -> QueryResponse {
        let mut errors = Vec::new();
        let mut data = Map::new();

        for field in &selection.fields {
            let value = self.resolve_root(field, &mut errors);
            data.insert(field.name.clone(), value);
        }

        QueryResponse {
            data: Value::Object(data),
            errors,
        }
    }

    fn resolve_root(&self, field: &FieldSelection, errors: &mut Vec<FieldError>) -> Value {
        let mut path = vec![PathSegment::Field(field.name.clone())];

        let Some(root) = self.schema.root(&field.name) else {
            errors.push(FieldError {
                path,
                error: QueryError::UnknownOperation {
                    operation: field.name.clone(),
                },
            });
            return Value::Null;
        };

        let id = match field.arguments.get("id") {
            None => {
                errors.push(FieldError {
                    path,
                    error: QueryError::MissingArgument {
                        operation: field.name.clone(),
                        argument: "id",
                    },
                });
                return Value::Null;
            }
            Some(value) => match value.as_i64() {
                Some(id) => id,
                None => {
                    errors.push(FieldError {
                        path,
                        error: QueryError::InvalidArgumentType {
                            operation: field.name.clone(),
                            argument: "id",
                            expected: "Int",
                        },
                    });
                    return Value::Null;
                }
            },
        };

        match (root.lookup)(self.store, id) {
            // Not found is a legitimate, representable result.
            None => Value::Null,
            Some(node) => self.resolve_node(
                node,
                self.schema.type_of(root.target),
                &field.selection,
                &mut path,
                errors,
            ),
        }
    }

    /// Resolve one entity against a selection, recursing into relationship
    /// fields with the declared target type's table. Terminates because the
    /// client-supplied selection tree is finite.
    fn resolve_node(
        &self,
        node: Node<'_>,
        ty: &TypeDef,
        selection: &SelectionSet,
        path: &mut Vec<PathSegment>,
        errors: &mut Vec<FieldError>,
    ) -> Value {
        let mut out = Map::new();

        for sel in &selection.fields {
            path.push(PathSegment::Field(sel.name.clone()));

            match ty.field(&sel.name) {
                None => {
                    // Recorded for this field only; siblings keep resolving.
                    errors.push(FieldError {
                        path: path.clone(),
                        error: QueryError::UnknownField {
                            entity_type: ty.name(),
                            field: sel.name.clone(),
                        },
                    });
                }
                Some(FieldDef::Scalar(extract)) => {
                    // A nested selection under a scalar is ignored.
                    out.insert(sel.name.clone(), extract(node));
                }
                Some(FieldDef::Relation {
                    target,
                    cardinality,
                    resolve,
                }) => {
                    let related = resolve(self.store, node);
                    let child_ty = self.schema.type_of(*target);

                    let value = match cardinality {
                        Cardinality::Many => {
                            let mut items = Vec::with_capacity(related.len());
                            for (i, child) in related.into_iter().enumerate() {
                                path.push(PathSegment::Index(i));
                                items.push(self.resolve_node(
                                    child,
                                    child_ty,
                                    &sel.selection,
                                    path,
                                    errors,
                                ));
                                path.pop();
                            }
                            Value::Array(items)
                        }
                        Cardinality::One => match related.into_iter().next() {
                            Some(child) => {
                                self.resolve_node(child, child_ty, &sel.selection, path, errors)
                            }
                            None => Value::Null,
                        },
                    };

                    out.insert(sel.name.clone(), value);
                }
            }

            path.pop();
        }

        Value::Object(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn run(selection: SelectionSet) -> QueryResponse {
        let schema = Schema::build();
        let store = Store::seeded();
        Executor::new(&schema, &store).execute(&selection)
    }

    fn single(field: FieldSelection) -> SelectionSet {
        SelectionSet::new(vec![field])
    }

    #[test]
    fn test_scenario_user_posts_comments() {
        let response = run(single(
            FieldSelection::field("user")
                .argument("id", json!(1))
                .select(FieldSelection::field("name"))
                .select(
                    FieldSelection::field("posts")
                        .select(FieldSelection::field("title"))
                        .select(
                            FieldSelection::field("comments")
                                .select(FieldSelection::field("author")),
                        ),
                ),
        ));

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data,
            json!({
                "user": {
                    "name": "Alice",
                    "posts": [
                        {
                            "title": "My First Post",
                            "comments": [{"author": "Bob"}, {"author": "Carol"}]
                        },
                        {
                            "title": "A Day in the Life",
                            "comments": [{"author": "Dave"}]
                        }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_foreign_keys_match_exactly_in_insertion_order() {
        let response = run(single(
            FieldSelection::field("user").argument("id", json!(2)).select(
                FieldSelection::field("posts")
                    .select(FieldSelection::field("id"))
                    .select(FieldSelection::field("comments").select(FieldSelection::field("id"))),
            ),
        ));

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data["user"]["posts"],
            json!([
                {"id": 201, "comments": []},
                {"id": 202, "comments": [{"id": 2001}, {"id": 2002}]}
            ])
        );
    }

    #[test]
    fn test_missing_root_entity_is_null_not_error() {
        let response = run(single(
            FieldSelection::field("user")
                .argument("id", json!(999))
                .select(FieldSelection::field("name")),
        ));

        assert!(response.errors.is_empty());
        assert_eq!(response.data, json!({"user": null}));
    }

    #[test]
    fn test_unknown_operation_records_error_with_explicit_null() {
        let response = run(single(
            FieldSelection::field("account")
                .argument("id", json!(1))
                .select(FieldSelection::field("id")),
        ));

        assert_eq!(response.data, json!({"account": null}));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors[0].error,
            QueryError::UnknownOperation {
                operation: "account".to_string()
            }
        );
        assert_eq!(
            response.errors[0].path,
            vec![PathSegment::Field("account".to_string())]
        );
    }

    #[test]
    fn test_unknown_field_does_not_abort_siblings() {
        let response = run(single(
            FieldSelection::field("user")
                .argument("id", json!(1))
                .select(FieldSelection::field("name"))
                .select(FieldSelection::field("nickname"))
                .select(FieldSelection::field("email")),
        ));

        // Siblings resolved, offending field omitted and reported.
        assert_eq!(
            response.data["user"],
            json!({"name": "Alice", "email": "alice@example.com"})
        );
        assert_eq!(response.errors.len(), 1);
        assert_eq!(
            response.errors[0].error,
            QueryError::UnknownField {
                entity_type: "User",
                field: "nickname".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_field_path_inside_list_carries_indices() {
        let response = run(single(
            FieldSelection::field("user")
                .argument("id", json!(1))
                .select(FieldSelection::field("posts").select(FieldSelection::field("likes"))),
        ));

        // One error per list element, each addressable by index.
        assert_eq!(response.errors.len(), 2);
        assert_eq!(
            response.errors[0].path,
            vec![
                PathSegment::Field("user".to_string()),
                PathSegment::Field("posts".to_string()),
                PathSegment::Index(0),
                PathSegment::Field("likes".to_string()),
            ]
        );
        assert_eq!(response.errors[1].path[2], PathSegment::Index(1));
        assert_eq!(response.data["user"]["posts"], json!([{}, {}]));
    }

    #[test]
    fn test_missing_id_argument() {
        let response = run(single(
            FieldSelection::field("user").select(FieldSelection::field("name")),
        ));

        assert_eq!(response.data, json!({"user": null}));
        assert_eq!(
            response.errors[0].error,
            QueryError::MissingArgument {
                operation: "user".to_string(),
                argument: "id"
            }
        );
    }

    #[test]
    fn test_non_integer_id_argument() {
        let response = run(single(
            FieldSelection::field("user")
                .argument("id", json!("1"))
                .select(FieldSelection::field("name")),
        ));

        assert_eq!(response.data, json!({"user": null}));
        assert_eq!(
            response.errors[0].error,
            QueryError::InvalidArgumentType {
                operation: "user".to_string(),
                argument: "id",
                expected: "Int"
            }
        );
    }

    #[test]
    fn test_sibling_roots_resolve_despite_one_failure() {
        let response = run(SelectionSet::new(vec![
            FieldSelection::field("bogus")
                .argument("id", json!(1))
                .select(FieldSelection::field("id")),
            FieldSelection::field("comment")
                .argument("id", json!(1001))
                .select(FieldSelection::field("author")),
        ]));

        assert_eq!(response.data["bogus"], json!(null));
        assert_eq!(response.data["comment"], json!({"author": "Bob"}));
        assert_eq!(response.errors.len(), 1);
    }

    #[test]
    fn test_post_202_comments_in_seeded_order() {
        let response = run(single(
            FieldSelection::field("post")
                .argument("id", json!(202))
                .select(FieldSelection::field("comments").select(FieldSelection::field("text"))),
        ));

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data["post"]["comments"],
            json!([{"text": "Yum!"}, {"text": "Can I have a cookie?"}])
        );
    }

    #[test]
    fn test_created_at_serializes_as_iso8601() {
        let response = run(single(
            FieldSelection::field("post")
                .argument("id", json!(101))
                .select(FieldSelection::field("createdAt")),
        ));

        assert_eq!(
            response.data["post"]["createdAt"],
            json!("2025-05-20T10:00:00Z")
        );
    }

    #[test]
    fn test_empty_selection_yields_empty_object() {
        let response = run(single(FieldSelection::field("user").argument("id", json!(1))));

        assert!(response.errors.is_empty());
        assert_eq!(response.data, json!({"user": {}}));
    }

    #[test]
    fn test_identical_queries_are_idempotent() {
        let selection = single(
            FieldSelection::field("user")
                .argument("id", json!(1))
                .select(FieldSelection::field("posts").select(FieldSelection::field("title"))),
        );

        let first = run(selection.clone());
        let second = run(selection);
        assert_eq!(first, second);
    }
}
