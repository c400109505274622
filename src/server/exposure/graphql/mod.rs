//! Graph query exposure
//!
//! Accepts GraphQL query documents over `POST /graphql`. The parsed document
//! is converted into the core's own selection tree at this boundary; the
//! executor never sees the wire format. Responses use the conventional
//! `{"data", "errors"}` envelope at HTTP 200.
//!
//! The dataset is read-only, so mutations are rejected alongside
//! subscriptions. Fragments are not supported.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use graphql_parser::query::{
    Definition, Document, Field, OperationDefinition, Selection, Value as GqlValue, parse_query,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::query::{Arguments, Executor, FieldError, FieldSelection, QueryResponse, SelectionSet};
use crate::server::AppState;

#[derive(Debug, Deserialize)]
struct GraphQlRequestBody {
    query: String,
    // Accepted for wire compatibility with standard GraphQL clients;
    // the query surface takes inline arguments only.
    #[allow(dead_code)]
    variables: Option<serde_json::Map<String, Value>>,
    #[serde(rename = "operationName")]
    #[allow(dead_code)]
    operation_name: Option<String>,
}

/// Graph query exposure implementation
pub struct GraphQlExposure;

impl GraphQlExposure {
    /// Build the graph query router over the shared application state.
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/graphql", post(graphql_handler))
            .with_state(state)
    }
}

/// Handler for graph query documents
async fn graphql_handler(
    State(state): State<AppState>,
    Json(request): Json<GraphQlRequestBody>,
) -> impl IntoResponse {
    match selection_from_document(&request.query) {
        Ok(selection) => {
            let resolved = Executor::new(&state.schema, &state.store).execute(&selection);
            if !resolved.errors.is_empty() {
                tracing::debug!(
                    error_count = resolved.errors.len(),
                    "query resolved with field errors"
                );
            }
            Json(response_body(resolved))
        }
        Err(message) => {
            tracing::debug!(%message, "rejected query document");
            Json(json!({"errors": [{"message": message}]}))
        }
    }
}

/// Parse a query document and convert its selection into the core's tree.
///
/// Request-level failures (unparseable document, unsupported operation kind)
/// reject the whole request; everything below the top-level selection is the
/// executor's business, including unknown names.
fn selection_from_document(query: &str) -> Result<SelectionSet, String> {
    let doc: Document<'_, String> =
        parse_query(query).map_err(|e| format!("Failed to parse query: {}", e))?;

    let operation = doc
        .definitions
        .iter()
        .find_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
        .ok_or_else(|| "No operation found in query".to_string())?;

    let items = match operation {
        OperationDefinition::Query(query) => &query.selection_set.items,
        OperationDefinition::SelectionSet(selection_set) => &selection_set.items,
        OperationDefinition::Mutation(_) => {
            return Err("Mutations are not supported: the dataset is read-only".to_string());
        }
        OperationDefinition::Subscription(_) => {
            return Err("Subscriptions are not supported".to_string());
        }
    };

    convert_selections(items)
}

fn convert_selections(items: &[Selection<'_, String>]) -> Result<SelectionSet, String> {
    let mut fields = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Selection::Field(field) => fields.push(convert_field(field)?),
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                return Err("Fragments are not supported".to_string());
            }
        }
    }
    Ok(SelectionSet::new(fields))
}

fn convert_field(field: &Field<'_, String>) -> Result<FieldSelection, String> {
    let mut arguments = Arguments::default();
    for (name, value) in &field.arguments {
        arguments.push(name.clone(), gql_value_to_json(value));
    }

    Ok(FieldSelection {
        name: field.name.clone(),
        arguments,
        selection: convert_selections(&field.selection_set.items)?,
    })
}

/// Convert a GraphQL literal to JSON
fn gql_value_to_json(value: &GqlValue<'_, String>) -> Value {
    match value {
        GqlValue::Null => Value::Null,
        GqlValue::Int(i) => json!(i.as_i64().unwrap_or(0)),
        GqlValue::Float(f) => json!(f),
        GqlValue::String(s) => json!(s),
        GqlValue::Boolean(b) => json!(b),
        GqlValue::Enum(e) => json!(e),
        GqlValue::List(list) => Value::Array(list.iter().map(gql_value_to_json).collect()),
        GqlValue::Object(obj) => {
            let mut map = serde_json::Map::new();
            for (k, v) in obj {
                map.insert(k.clone(), gql_value_to_json(v));
            }
            Value::Object(map)
        }
        // Variables are not bound; the executor reports the typing error.
        GqlValue::Variable(_) => Value::Null,
    }
}

/// Serialize the executor's response into the wire envelope.
fn response_body(resolved: QueryResponse) -> Value {
    if resolved.errors.is_empty() {
        json!({"data": resolved.data})
    } else {
        let errors: Vec<Value> = resolved.errors.iter().map(error_entry).collect();
        json!({"data": resolved.data, "errors": errors})
    }
}

fn error_entry(error: &FieldError) -> Value {
    json!({
        "message": error.error.to_string(),
        "path": error.path,
        "extensions": {"code": error.error.error_code()},
    })
}
