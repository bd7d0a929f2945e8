//! Community feed of the learning screen.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Author shown on posts created from this app.
pub const CURRENT_AUTHOR: &str = "Айгуль К.";
pub const CURRENT_AUTHOR_INITIALS: &str = "AK";
pub const DEFAULT_AVATAR_COLOR: &str = "#2563eb";
const JUST_NOW: &str = "Только что";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author: String,
    pub initials: String,
    /// Hex colour of the initials badge.
    pub avatar_color: String,
    /// Human relative timestamp, e.g. "2 часа назад".
    pub posted: String,
    pub content: String,
    pub likes: u32,
    pub comments: u32,
}

impl Post {
    pub fn new(
        author: impl Into<String>,
        initials: impl Into<String>,
        posted: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: author.into(),
            initials: initials.into(),
            avatar_color: DEFAULT_AVATAR_COLOR.to_string(),
            posted: posted.into(),
            content: content.into(),
            likes: 0,
            comments: 0,
        }
    }

    #[must_use]
    pub fn with_avatar_color(mut self, color: impl Into<String>) -> Self {
        self.avatar_color = color.into();
        self
    }

    #[must_use]
    pub fn with_reactions(mut self, likes: u32, comments: u32) -> Self {
        self.likes = likes;
        self.comments = comments;
        self
    }
}

/// Posts, newest first.
#[derive(Debug, Default, Clone)]
pub struct CommunityFeed {
    posts: Vec<Post>,
}

impl CommunityFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Publishes a post by [`CURRENT_AUTHOR`] at the top of the feed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInput`] if `content` is blank.
    pub fn create_post(&mut self, content: &str) -> ResultEngine<&Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(EngineError::InvalidInput("post content is empty".to_string()));
        }

        let post = Post::new(CURRENT_AUTHOR, CURRENT_AUTHOR_INITIALS, JUST_NOW, content);
        tracing::debug!(post_id = %post.id, "post created");
        self.posts.insert(0, post);
        Ok(&self.posts[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_post_is_rejected() {
        let mut feed = CommunityFeed::new();
        let err = feed.create_post(" \n\t ").unwrap_err();

        assert!(matches!(err, EngineError::InvalidInput(_)));
        assert!(feed.posts().is_empty());
    }

    #[test]
    fn new_post_goes_on_top() {
        let mut feed = CommunityFeed::with_posts(vec![
            Post::new("Асем", "AH", "2 часа назад", "old").with_reactions(24, 8),
        ]);

        let post = feed.create_post("  Закрыла кредит!  ").unwrap();
        assert_eq!(post.content, "Закрыла кредит!");
        assert_eq!(post.author, CURRENT_AUTHOR);
        assert_eq!(post.posted, "Только что");
        assert_eq!((post.likes, post.comments), (0, 0));

        assert_eq!(feed.posts().len(), 2);
        assert_eq!(feed.posts()[1].likes, 24);
    }
}
