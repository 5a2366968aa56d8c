use crate::{
    post::{verify_fields, IdGenerator, Post},
    BlogError, BlogResult,
};

/// The authoritative collection of posts, kept in insertion order. Nothing
/// is persisted: the store starts empty and is gone with the process.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: Vec<Post>,
    ids: IdGenerator,
}

impl PostStore {
    // ***
    // Command handlers
    // ***

    /// All posts, oldest first.
    pub fn list(&self) -> &[Post] {
        &self.posts
    }

    /// Adds a new post at the end of the store and returns it.
    pub fn create(&mut self, title: String, content: String) -> BlogResult<Post> {
        verify_fields(&title, &content)?;
        let post = Post::new(self.ids.next_id(), title, content)?;
        self.posts.push(post.clone());
        Ok(post)
    }

    /// Overwrite the title and content of an existing post.
    pub fn update(&mut self, id: u64, title: String, content: String) -> BlogResult<Post> {
        let idx = self.post_id_to_idx(id)?;
        let post = &mut self.posts[idx];
        post.update(title, content)?;
        Ok(post.clone())
    }

    /// Removes an existing post from the store and returns it.
    pub fn delete(&mut self, id: u64) -> BlogResult<Post> {
        let idx = self.post_id_to_idx(id)?;
        Ok(self.posts.remove(idx))
    }

    // ***
    // Helpers
    // ***

    /// Return a specific post.
    pub fn get(&self, id: u64) -> Option<&Post> {
        self.post_id_to_idx(id).ok().map(|idx| &self.posts[idx])
    }

    /// Get the number of posts in store
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Returns the index of post, with the associated ID, in the posts vector.
    /// IDs only grow, so the vector stays sorted by ID.
    fn post_id_to_idx(&self, id: u64) -> BlogResult<usize> {
        self.posts
            .binary_search_by_key(&id, Post::id)
            .map_err(|_| BlogError::PostNotFound { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(n: usize) -> PostStore {
        let mut store = PostStore::default();
        for i in 0..n {
            store
                .create(format!("title {i}"), format!("content {i}"))
                .unwrap();
        }
        store
    }

    #[test]
    fn create_assigns_unique_ids() {
        let store = seeded(200);
        let mut ids: Vec<u64> = store.list().iter().map(Post::id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn create_rejects_empty_fields_without_mutating() {
        let mut store = seeded(2);
        let before = store.list().to_vec();

        assert_eq!(
            store.create(String::new(), "World".into()),
            Err(BlogError::EmptyTitle)
        );
        assert_eq!(
            store.create("Hi".into(), String::new()),
            Err(BlogError::EmptyContent)
        );
        assert!(store
            .create(String::new(), String::new())
            .unwrap_err()
            .is_validation());
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn create_appends_after_prior_contents() {
        let mut store = seeded(3);
        let before = store.list().to_vec();

        let created = store.create("Hi".into(), "World".into()).unwrap();
        assert_eq!(created.title, "Hi");
        assert_eq!(created.content, "World");

        let after = store.list();
        assert_eq!(after.len(), before.len() + 1);
        assert_eq!(&after[..before.len()], before.as_slice());
        assert_eq!(after.last(), Some(&created));
    }

    #[test]
    fn update_changes_only_the_target() {
        let mut store = seeded(3);
        let before = store.list().to_vec();
        let target = before[1].id();

        let updated = store.update(target, "x".into(), "y".into()).unwrap();
        assert_eq!(updated.id(), target);
        assert_eq!((updated.title.as_str(), updated.content.as_str()), ("x", "y"));

        let after = store.list();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], updated);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut store = seeded(2);
        let before = store.list().to_vec();
        assert_eq!(
            store.update(999_999, "x".into(), "y".into()),
            Err(BlogError::PostNotFound { id: 999_999 })
        );
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn update_with_empty_fields_is_rejected() {
        let mut store = seeded(1);
        let id = store.list()[0].id();
        assert_eq!(
            store.update(id, String::new(), "y".into()),
            Err(BlogError::EmptyTitle)
        );
        assert_eq!(store.get(id).unwrap().title, "title 0");
        // Lookup comes first: an unknown id wins over empty fields.
        assert_eq!(
            store.update(id + 1, String::new(), String::new()),
            Err(BlogError::PostNotFound { id: id + 1 })
        );
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = seeded(4);
        let target = store.list()[2].id();

        let removed = store.delete(target).unwrap();
        assert_eq!(removed.id(), target);
        assert_eq!(store.len(), 3);
        assert!(store.get(target).is_none());
        assert!(store.list().iter().all(|post| post.id() != target));
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let mut store = seeded(2);
        let before = store.list().to_vec();
        assert_eq!(
            store.delete(42),
            Err(BlogError::PostNotFound { id: 42 })
        );
        assert_eq!(store.list(), before.as_slice());

        let mut empty = PostStore::default();
        assert!(empty.delete(1).is_err());
    }

    #[test]
    fn lookups_work_after_deletes() {
        let mut store = seeded(6);
        let ids: Vec<u64> = store.list().iter().map(Post::id).collect();
        store.delete(ids[0]).unwrap();
        store.delete(ids[3]).unwrap();
        for id in [ids[1], ids[2], ids[4], ids[5]] {
            assert_eq!(store.get(id).map(Post::id), Some(id));
        }
        assert!(store.get(ids[3]).is_none());
    }
}
