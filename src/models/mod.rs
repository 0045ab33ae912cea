// Data models and DTOs
// Store records, API request/response models.

pub mod post;

pub use post::{
    Author, BlogpostsEnvelope, CreatePostRequest, NewPost, Post, PostDb, PostResponse,
    UpdatePostRequest,
};
