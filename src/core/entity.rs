//! Entity records served by the API
//!
//! All three record types are plain immutable data: they are loaded once at
//! startup and never created, mutated, or deleted afterwards. Wire names are
//! camelCase (`userId`, `createdAt`, `postId`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier type shared by all entities. Unique within each collection.
pub type EntityId = i64;

/// A registered user. Owns zero or more posts via `Post::user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub name: String,
    pub email: String,
}

/// A post authored by a user. Owns zero or more comments via
/// `Comment::post_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post. The `author` is free text, not a user reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: EntityId,
    pub post_id: EntityId,
    pub author: String,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_post_serializes_with_camel_case_keys() {
        let post = Post {
            id: 101,
            user_id: 1,
            title: "My First Post".to_string(),
            body: "Hello, world!".to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 5, 20, 10, 0, 0).unwrap(),
        };

        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["userId"], 1);
        assert_eq!(value["createdAt"], "2025-05-20T10:00:00Z");
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn test_comment_round_trips_through_json() {
        let comment = Comment {
            id: 1001,
            post_id: 101,
            author: "Bob".to_string(),
            text: "Great first post!".to_string(),
        };

        let json = serde_json::to_string(&comment).unwrap();
        let back: Comment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, comment);
    }

    #[test]
    fn test_user_deserializes_from_wire_shape() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Alice",
            "email": "alice@example.com"
        }))
        .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Alice");
    }
}
