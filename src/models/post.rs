use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Structured author name as kept in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
}

impl Author {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// `"firstName lastName"`, the form the API exposes.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// A stored post record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct PostDb {
    pub id: Uuid,
    pub author: Json<Author>,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<PostDb> for Post {
    fn from(db: PostDb) -> Self {
        Self {
            id: db.id,
            author: db.author.0,
            title: db.title,
            content: db.content,
            created: db.created,
        }
    }
}

/// Fields a caller supplies; the store assigns `id` and `created`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
}

/// External representation of a post with the author flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    /// Author display name, `"firstName lastName"`
    #[schema(example = "Damian Lillard")]
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author: post.author.display_name(),
            title: post.title.clone(),
            content: post.content.clone(),
            created: post.created,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            author: post.author.display_name(),
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}

/// `GET /blogposts` wraps the collection under a `blogposts` key.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlogpostsEnvelope {
    pub blogposts: Vec<PostResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePostRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(nested)]
    pub author: Author,
    #[validate(length(min = 1))]
    pub content: String,
}

impl From<CreatePostRequest> for NewPost {
    fn from(request: CreatePostRequest) -> Self {
        Self {
            author: request.author,
            title: request.title,
            content: request.content,
        }
    }
}

/// Full replacement body for `PUT /posts/{id}`; `id` must match the path.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    pub id: Uuid,
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(nested)]
    pub author: Author,
    #[validate(length(min = 1))]
    pub content: String,
}

impl From<UpdatePostRequest> for NewPost {
    fn from(request: UpdatePostRequest) -> Self {
        Self {
            author: request.author,
            title: request.title,
            content: request.content,
        }
    }
}
