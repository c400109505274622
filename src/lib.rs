//! # Microblog
//!
//! An in-memory users/posts/comments service exposing two access patterns
//! over one resolution core:
//!
//! - **REST projections**: three fixed, hand-picked endpoints
//!   (`/users/{id}`, `/users/{id}/posts`, `/posts/{id}/comments`)
//! - **Graph queries**: `POST /graphql` accepting an arbitrary
//!   client-specified selection tree over the `user`/`post`/`comment` root
//!   operations, resolved recursively against the declared relationships
//!
//! ## Architecture
//!
//! - [`store`]: the immutable dataset and its lookup primitives, with
//!   foreign-key indices built once at load
//! - [`schema`]: static declarations of entity types, scalar fields, and
//!   relationship edges with typed resolvers
//! - [`query`]: the executor that walks a selection tree and materializes
//!   exactly the requested shape, with per-field partial-result errors
//! - [`server`]: axum assembly; per-protocol exposures over shared state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use microblog::prelude::*;
//!
//! let state = AppState::new(Store::seeded(), Schema::build());
//! let app = build_router(state);
//! // axum::serve(listener, app).await
//! ```

pub mod config;
pub mod core;
pub mod query;
pub mod schema;
pub mod server;
pub mod store;

/// Re-exports of commonly used types
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        entity::{Comment, EntityId, Post, User},
        error::{ConfigError, ErrorResponse, QueryError, RequestError},
    };

    // === Store & Schema ===
    pub use crate::schema::{Cardinality, EntityKind, FieldDef, Node, Schema};
    pub use crate::store::{Dataset, Store, seed_dataset};

    // === Query ===
    pub use crate::query::{
        Arguments, Executor, FieldError, FieldSelection, QueryResponse, SelectionSet,
    };

    // === Server ===
    pub use crate::config::ServerConfig;
    pub use crate::server::{AppState, build_router, serve};
}
