//! Immutable in-memory store for the users/posts/comments dataset
//!
//! The store is the sole owner of all entity records. It is built once at
//! process start from a [`Dataset`] and never mutated afterwards, so it can be
//! shared across any number of concurrent resolutions without locking.
//!
//! Foreign-key joins go through indices owned by the store, built once at
//! load time: `user id -> post positions` and `post id -> comment positions`.
//! Relationship lookups are O(result size), not collection scans.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::entity::{Comment, EntityId, Post, User};

/// The raw collections the store is built from.
///
/// Referential integrity (`Post::user_id`, `Comment::post_id`) is assumed at
/// load time and not validated: a dangling reference resolves to an empty
/// result set at query time, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

/// Read-only dataset with id and foreign-key indices.
pub struct Store {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,

    users_by_id: HashMap<EntityId, usize>,
    posts_by_id: HashMap<EntityId, usize>,
    comments_by_id: HashMap<EntityId, usize>,

    // FK indices hold positions in insertion order, so relationship
    // resolution preserves the order records were loaded in.
    posts_by_user: HashMap<EntityId, Vec<usize>>,
    comments_by_post: HashMap<EntityId, Vec<usize>>,
}

impl Store {
    /// Build the store and its indices from a dataset.
    pub fn new(dataset: Dataset) -> Self {
        let Dataset {
            users,
            posts,
            comments,
        } = dataset;

        let users_by_id = users.iter().enumerate().map(|(i, u)| (u.id, i)).collect();
        let posts_by_id = posts.iter().enumerate().map(|(i, p)| (p.id, i)).collect();
        let comments_by_id = comments
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        let mut posts_by_user: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for (i, post) in posts.iter().enumerate() {
            posts_by_user.entry(post.user_id).or_default().push(i);
        }

        let mut comments_by_post: HashMap<EntityId, Vec<usize>> = HashMap::new();
        for (i, comment) in comments.iter().enumerate() {
            comments_by_post.entry(comment.post_id).or_default().push(i);
        }

        Self {
            users,
            posts,
            comments,
            users_by_id,
            posts_by_id,
            comments_by_id,
            posts_by_user,
            comments_by_post,
        }
    }

    /// Build the store from the seed dataset.
    pub fn seeded() -> Self {
        Self::new(seed_dataset())
    }

    pub fn find_user_by_id(&self, id: EntityId) -> Option<&User> {
        self.users_by_id.get(&id).map(|&i| &self.users[i])
    }

    pub fn find_post_by_id(&self, id: EntityId) -> Option<&Post> {
        self.posts_by_id.get(&id).map(|&i| &self.posts[i])
    }

    pub fn find_comment_by_id(&self, id: EntityId) -> Option<&Comment> {
        self.comments_by_id.get(&id).map(|&i| &self.comments[i])
    }

    /// All posts whose `user_id` matches, in insertion order. Empty when the
    /// user has no posts or does not exist.
    pub fn posts_by_user(&self, user_id: EntityId) -> Vec<&Post> {
        self.posts_by_user
            .get(&user_id)
            .map(|positions| positions.iter().map(|&i| &self.posts[i]).collect())
            .unwrap_or_default()
    }

    /// All comments whose `post_id` matches, in insertion order.
    pub fn comments_by_post(&self, post_id: EntityId) -> Vec<&Comment> {
        self.comments_by_post
            .get(&post_id)
            .map(|positions| positions.iter().map(|&i| &self.comments[i]).collect())
            .unwrap_or_default()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}

/// The fixed dataset the service ships with.
pub fn seed_dataset() -> Dataset {
    let ts = Utc
        .with_ymd_and_hms(2025, 5, 20, 10, 0, 0)
        .single()
        .expect("valid seed timestamp");

    Dataset {
        users: vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                email: "bob@example.com".to_string(),
            },
        ],
        posts: vec![
            Post {
                id: 101,
                user_id: 1,
                title: "My First Post".to_string(),
                body: "Hello, world!".to_string(),
                created_at: ts,
            },
            Post {
                id: 102,
                user_id: 1,
                title: "A Day in the Life".to_string(),
                body: "Today I went to the park...".to_string(),
                created_at: ts,
            },
            Post {
                id: 201,
                user_id: 2,
                title: "Trip to the Zoo".to_string(),
                body: "I saw a lion...".to_string(),
                created_at: ts,
            },
            Post {
                id: 202,
                user_id: 2,
                title: "Cooking 101".to_string(),
                body: "Today I baked cookies...".to_string(),
                created_at: ts,
            },
        ],
        comments: vec![
            Comment {
                id: 1001,
                post_id: 101,
                author: "Bob".to_string(),
                text: "Great first post!".to_string(),
            },
            Comment {
                id: 1002,
                post_id: 101,
                author: "Carol".to_string(),
                text: "Welcome to blogging!".to_string(),
            },
            Comment {
                id: 1003,
                post_id: 102,
                author: "Dave".to_string(),
                text: "Nice day-in-the-life post!".to_string(),
            },
            Comment {
                id: 2001,
                post_id: 202,
                author: "Alice".to_string(),
                text: "Yum!".to_string(),
            },
            Comment {
                id: 2002,
                post_id: 202,
                author: "Carol".to_string(),
                text: "Can I have a cookie?".to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_user_by_id() {
        let store = Store::seeded();
        let user = store.find_user_by_id(1).expect("user 1 should exist");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_find_missing_entity_returns_none() {
        let store = Store::seeded();
        assert!(store.find_user_by_id(999).is_none());
        assert!(store.find_post_by_id(999).is_none());
        assert!(store.find_comment_by_id(999).is_none());
    }

    #[test]
    fn test_posts_by_user_preserves_insertion_order() {
        let store = Store::seeded();
        let posts = store.posts_by_user(1);
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["My First Post", "A Day in the Life"]);
    }

    #[test]
    fn test_posts_by_unknown_user_is_empty() {
        let store = Store::seeded();
        assert!(store.posts_by_user(999).is_empty());
    }

    #[test]
    fn test_comments_by_post_preserves_insertion_order() {
        let store = Store::seeded();
        let comments = store.comments_by_post(202);
        let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Yum!", "Can I have a cookie?"]);
    }

    #[test]
    fn test_post_without_comments_is_empty_not_error() {
        let store = Store::seeded();
        assert!(store.comments_by_post(201).is_empty());
    }

    #[test]
    fn test_seed_counts() {
        let store = Store::seeded();
        assert_eq!(store.user_count(), 2);
        assert_eq!(store.post_count(), 4);
        assert_eq!(store.comment_count(), 5);
    }

    #[test]
    fn test_dangling_foreign_key_resolves_empty() {
        let mut dataset = seed_dataset();
        dataset.posts.push(Post {
            id: 301,
            user_id: 42, // no such user
            title: "Orphan".to_string(),
            body: "".to_string(),
            created_at: Utc::now(),
        });
        let store = Store::new(dataset);

        // The post is reachable by id, its author set is simply empty.
        assert!(store.find_post_by_id(301).is_some());
        assert!(store.posts_by_user(42).len() == 1);
        assert!(store.posts_by_user(43).is_empty());
    }
}
