// 📰 Publish Webhook - Payload reshaping for the articles table
// Pure transform from the publishing platform's webhook payload to the
// backend article record; transport lives in the server binary

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};

/// Author credited when the payload carries none
pub const DEFAULT_AUTHOR: &str = "Amaravati Chamber";

// ============================================================================
// INCOMING PAYLOAD
// ============================================================================

/// Webhook body sent on post publish/update: the post lives under
/// `post.current`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishPayload {
    #[serde(default)]
    pub post: Option<PostEnvelope>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    #[serde(default)]
    pub current: Option<Post>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub html: String,

    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub feature_image: Option<String>,

    #[serde(default)]
    pub excerpt: Option<String>,

    #[serde(default)]
    pub published_at: String,

    #[serde(default)]
    pub primary_author: Option<Author>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,
}

// ============================================================================
// ARTICLE RECORD
// ============================================================================

/// Row shape of the backend `articles` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Newly minted UUID; the platform's own id is kept separately
    pub id: String,

    /// Original post id, for upsert matching on re-publish
    pub ghost_id: String,

    pub title: String,
    pub description: String,
    pub author: String,
    pub published_at: String,
    pub image_url: String,
    pub html_content: String,
    pub slug: String,
}

impl Article {
    /// Reshape a full webhook payload. Fails when the envelope carries
    /// no post or when a required post field is missing.
    pub fn from_payload(payload: PublishPayload) -> Result<Article> {
        let post = payload
            .post
            .and_then(|envelope| envelope.current)
            .ok_or_else(|| anyhow!("Invalid webhook payload: No post data received"))?;

        Article::from_post(post)
    }

    /// Reshape one post into an article row
    pub fn from_post(post: Post) -> Result<Article> {
        let missing: Vec<&str> = [
            ("id", post.id.is_empty()),
            ("title", post.title.is_empty()),
            ("html", post.html.is_empty()),
            ("slug", post.slug.is_empty()),
            ("published_at", post.published_at.is_empty()),
        ]
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(field, _)| *field)
        .collect();

        if !missing.is_empty() {
            bail!("Missing required fields: {}", missing.join(", "));
        }

        let author = post
            .primary_author
            .map(|a| a.name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

        Ok(Article {
            id: uuid::Uuid::new_v4().to_string(),
            ghost_id: post.id,
            title: post.title,
            description: post.excerpt.unwrap_or_default(),
            author,
            published_at: post.published_at,
            image_url: post.feature_image.unwrap_or_default(),
            html_content: post.html,
            slug: post.slug,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_post() -> Post {
        Post {
            id: "ghost-abc".to_string(),
            title: "Chamber News".to_string(),
            html: "<p>Body</p>".to_string(),
            slug: "chamber-news".to_string(),
            feature_image: Some("https://img.example/cover.png".to_string()),
            excerpt: Some("Short summary".to_string()),
            published_at: "2024-02-01T08:00:00.000Z".to_string(),
            primary_author: Some(Author {
                name: "K. Rao".to_string(),
            }),
        }
    }

    #[test]
    fn test_reshape_full_post() {
        let article = Article::from_post(full_post()).unwrap();

        assert_eq!(article.ghost_id, "ghost-abc");
        assert_eq!(article.title, "Chamber News");
        assert_eq!(article.description, "Short summary");
        assert_eq!(article.author, "K. Rao");
        assert_eq!(article.image_url, "https://img.example/cover.png");
        assert_eq!(article.html_content, "<p>Body</p>");
        assert_eq!(article.slug, "chamber-news");
        // Fresh identity, distinct from the platform id
        assert!(!article.id.is_empty());
        assert_ne!(article.id, article.ghost_id);
    }

    #[test]
    fn test_optional_fields_default() {
        let mut post = full_post();
        post.excerpt = None;
        post.feature_image = None;
        post.primary_author = None;

        let article = Article::from_post(post).unwrap();
        assert_eq!(article.description, "");
        assert_eq!(article.image_url, "");
        assert_eq!(article.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn test_empty_author_name_defaults() {
        let mut post = full_post();
        post.primary_author = Some(Author::default());

        let article = Article::from_post(post).unwrap();
        assert_eq!(article.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn test_missing_required_field_named_in_error() {
        let mut post = full_post();
        post.slug = String::new();
        post.html = String::new();

        let err = Article::from_post(post).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Missing required fields"));
        assert!(message.contains("html"));
        assert!(message.contains("slug"));
    }

    #[test]
    fn test_payload_without_post_rejected() {
        let payload = PublishPayload { post: None };
        let err = Article::from_payload(payload).unwrap_err();
        assert!(err.to_string().contains("No post data received"));
    }

    #[test]
    fn test_payload_deserializes_from_json() {
        let json = r#"{
            "post": {
                "current": {
                    "id": "g1",
                    "title": "T",
                    "html": "<p>x</p>",
                    "slug": "t",
                    "published_at": "2024-02-01T08:00:00.000Z",
                    "primary_author": { "name": "A" }
                }
            }
        }"#;

        let payload: PublishPayload = serde_json::from_str(json).unwrap();
        let article = Article::from_payload(payload).unwrap();
        assert_eq!(article.ghost_id, "g1");
        assert_eq!(article.author, "A");
    }
}
