//! Schema registry: entity types, scalar fields, and relationship edges
//!
//! The registry is static configuration, built once at process start by
//! [`Schema::build`] and never mutated. For each entity type it declares an
//! ordered table of fields: scalars map to typed extraction functions,
//! relationships map to resolver functions that query the store's
//! foreign-key indices and name the target type for recursive resolution.
//!
//! Field dispatch is a table lookup over these declarations; the only runtime
//! string comparison left is the one that produces an unknown-field error.

use indexmap::IndexMap;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::core::entity::{Comment, EntityId, Post, User};
use crate::store::Store;

/// Borrowed view over any entity record owned by the store.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    User(&'a User),
    Post(&'a Post),
    Comment(&'a Comment),
}

impl Node<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Node::User(_) => EntityKind::User,
            Node::Post(_) => EntityKind::Post,
            Node::Comment(_) => EntityKind::Comment,
        }
    }
}

/// The three declared entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Post,
    Comment,
}

impl EntityKind {
    /// Client-facing type name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Post => "Post",
            EntityKind::Comment => "Comment",
        }
    }
}

/// How many related records a relationship field yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    Many,
}

/// Extracts a scalar value from a node of the declaring type.
pub type ScalarFn = fn(Node<'_>) -> Value;

/// Resolves the related records for a node of the declaring type.
pub type RelationFn = for<'a> fn(&'a Store, Node<'a>) -> Vec<Node<'a>>;

/// Looks up a root entity by id.
pub type RootFn = for<'a> fn(&'a Store, EntityId) -> Option<Node<'a>>;

/// A declared field on an entity type.
pub enum FieldDef {
    /// Scalar field: extract and emit directly, no further selection.
    Scalar(ScalarFn),

    /// Relationship field: derived edge computed from foreign-key lookups.
    Relation {
        /// Entity type of the resolved records, used to pick the field table
        /// for recursive resolution.
        target: EntityKind,
        cardinality: Cardinality,
        resolve: RelationFn,
    },
}

/// Ordered field table for one entity type.
pub struct TypeDef {
    kind: EntityKind,
    fields: IndexMap<&'static str, FieldDef>,
}

impl TypeDef {
    /// Client-facing type name.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.get(name)
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }
}

/// A declared root operation: single integer `id` argument, optional result.
pub struct RootDef {
    pub target: EntityKind,
    pub lookup: RootFn,
}

/// The complete static schema: entity type tables plus root operations.
pub struct Schema {
    types: HashMap<EntityKind, TypeDef>,
    roots: IndexMap<&'static str, RootDef>,
}

impl Schema {
    /// Declare the entity types and root operations.
    ///
    /// The declared relationship graph (User -> Post -> Comment) is acyclic.
    /// The executor relies on the registry never declaring a cycle and
    /// carries no visited-set guard of its own.
    pub fn build() -> Self {
        let mut types = HashMap::new();
        types.insert(EntityKind::User, user_type());
        types.insert(EntityKind::Post, post_type());
        types.insert(EntityKind::Comment, comment_type());

        let mut roots: IndexMap<&'static str, RootDef> = IndexMap::new();
        roots.insert(
            "user",
            RootDef {
                target: EntityKind::User,
                lookup: lookup_user,
            },
        );
        roots.insert(
            "post",
            RootDef {
                target: EntityKind::Post,
                lookup: lookup_post,
            },
        );
        roots.insert(
            "comment",
            RootDef {
                target: EntityKind::Comment,
                lookup: lookup_comment,
            },
        );

        Self { types, roots }
    }

    /// Field table for an entity kind. Every kind reachable from a declared
    /// root or relation target is present by construction.
    pub fn type_of(&self, kind: EntityKind) -> &TypeDef {
        &self.types[&kind]
    }

    pub fn root(&self, name: &str) -> Option<&RootDef> {
        self.roots.get(name)
    }

    /// Declared root operation names in declaration order.
    pub fn root_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.roots.keys().copied()
    }
}

// =============================================================================
// Type declarations
// =============================================================================

// Scalar extractors are only ever invoked with a node of the declaring type;
// the executor dispatches through the table keyed by that type.

fn user_type() -> TypeDef {
    let mut fields: IndexMap<&'static str, FieldDef> = IndexMap::new();
    fields.insert(
        "id",
        FieldDef::Scalar(|node| {
            let Node::User(user) = node else {
                return Value::Null;
            };
            json!(user.id)
        }),
    );
    fields.insert(
        "name",
        FieldDef::Scalar(|node| {
            let Node::User(user) = node else {
                return Value::Null;
            };
            json!(user.name)
        }),
    );
    fields.insert(
        "email",
        FieldDef::Scalar(|node| {
            let Node::User(user) = node else {
                return Value::Null;
            };
            json!(user.email)
        }),
    );
    fields.insert(
        "posts",
        FieldDef::Relation {
            target: EntityKind::Post,
            cardinality: Cardinality::Many,
            resolve: user_posts,
        },
    );

    TypeDef {
        kind: EntityKind::User,
        fields,
    }
}

fn post_type() -> TypeDef {
    let mut fields: IndexMap<&'static str, FieldDef> = IndexMap::new();
    fields.insert(
        "id",
        FieldDef::Scalar(|node| {
            let Node::Post(post) = node else {
                return Value::Null;
            };
            json!(post.id)
        }),
    );
    fields.insert(
        "userId",
        FieldDef::Scalar(|node| {
            let Node::Post(post) = node else {
                return Value::Null;
            };
            json!(post.user_id)
        }),
    );
    fields.insert(
        "title",
        FieldDef::Scalar(|node| {
            let Node::Post(post) = node else {
                return Value::Null;
            };
            json!(post.title)
        }),
    );
    fields.insert(
        "body",
        FieldDef::Scalar(|node| {
            let Node::Post(post) = node else {
                return Value::Null;
            };
            json!(post.body)
        }),
    );
    fields.insert(
        "createdAt",
        FieldDef::Scalar(|node| {
            let Node::Post(post) = node else {
                return Value::Null;
            };
            json!(post.created_at)
        }),
    );
    fields.insert(
        "comments",
        FieldDef::Relation {
            target: EntityKind::Comment,
            cardinality: Cardinality::Many,
            resolve: post_comments,
        },
    );

    TypeDef {
        kind: EntityKind::Post,
        fields,
    }
}

fn comment_type() -> TypeDef {
    let mut fields: IndexMap<&'static str, FieldDef> = IndexMap::new();
    fields.insert(
        "id",
        FieldDef::Scalar(|node| {
            let Node::Comment(comment) = node else {
                return Value::Null;
            };
            json!(comment.id)
        }),
    );
    fields.insert(
        "postId",
        FieldDef::Scalar(|node| {
            let Node::Comment(comment) = node else {
                return Value::Null;
            };
            json!(comment.post_id)
        }),
    );
    fields.insert(
        "author",
        FieldDef::Scalar(|node| {
            let Node::Comment(comment) = node else {
                return Value::Null;
            };
            json!(comment.author)
        }),
    );
    fields.insert(
        "text",
        FieldDef::Scalar(|node| {
            let Node::Comment(comment) = node else {
                return Value::Null;
            };
            json!(comment.text)
        }),
    );

    TypeDef {
        kind: EntityKind::Comment,
        fields,
    }
}

// =============================================================================
// Relationship resolvers and root lookups
// =============================================================================

fn user_posts<'a>(store: &'a Store, node: Node<'a>) -> Vec<Node<'a>> {
    let Node::User(user) = node else {
        return Vec::new();
    };
    store
        .posts_by_user(user.id)
        .into_iter()
        .map(Node::Post)
        .collect()
}

fn post_comments<'a>(store: &'a Store, node: Node<'a>) -> Vec<Node<'a>> {
    let Node::Post(post) = node else {
        return Vec::new();
    };
    store
        .comments_by_post(post.id)
        .into_iter()
        .map(Node::Comment)
        .collect()
}

fn lookup_user(store: &Store, id: EntityId) -> Option<Node<'_>> {
    store.find_user_by_id(id).map(Node::User)
}

fn lookup_post(store: &Store, id: EntityId) -> Option<Node<'_>> {
    store.find_post_by_id(id).map(Node::Post)
}

fn lookup_comment(store: &Store, id: EntityId) -> Option<Node<'_>> {
    store.find_comment_by_id(id).map(Node::Comment)
}
