//! In-memory post storage.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// A blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Concurrent post store with atomically assigned ids.
#[derive(Default)]
pub struct PostStore {
    posts: DashMap<u64, Post>,
    next_id: AtomicU64,
}

impl PostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All posts, ordered by id for stable listings.
    pub fn list(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.iter().map(|p| p.value().clone()).collect();
        posts.sort_by_key(|p| p.id);
        posts
    }

    pub fn get(&self, id: u64) -> Option<Post> {
        self.posts.get(&id).map(|p| p.value().clone())
    }

    pub fn insert(&self, title: String, excerpt: String, body: String) -> Post {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let post = Post {
            id,
            title,
            excerpt,
            body,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.posts.insert(id, post.clone());
        post
    }

    /// Replace the content of an existing post, stamping `updated_at`.
    pub fn update(&self, id: u64, title: String, excerpt: String, body: String) -> Option<Post> {
        let mut entry = self.posts.get_mut(&id)?;
        entry.title = title;
        entry.excerpt = excerpt;
        entry.body = body;
        entry.updated_at = Some(Utc::now());
        Some(entry.clone())
    }

    pub fn remove(&self, id: u64) -> bool {
        self.posts.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let store = PostStore::new();
        let a = store.insert("First".into(), "".into(), "Body".into());
        let b = store.insert("Second".into(), "".into(), "Body".into());
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_list_is_ordered_by_id() {
        let store = PostStore::new();
        for i in 0..5 {
            store.insert(format!("Post {i}"), "".into(), "Body".into());
        }
        let ids: Vec<u64> = store.list().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_update_stamps_updated_at() {
        let store = PostStore::new();
        let post = store.insert("Title".into(), "".into(), "Body".into());
        assert!(post.updated_at.is_none());

        let updated = store
            .update(post.id, "New".into(), "".into(), "Body".into())
            .unwrap();
        assert_eq!(updated.title, "New");
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_update_missing_returns_none() {
        let store = PostStore::new();
        assert!(store.update(42, "T".into(), "".into(), "B".into()).is_none());
    }

    #[test]
    fn test_remove() {
        let store = PostStore::new();
        let post = store.insert("Title".into(), "".into(), "Body".into());
        assert!(store.remove(post.id));
        assert!(!store.remove(post.id));
        assert!(store.is_empty());
    }
}
