pub mod extractors;
pub mod health;
pub mod metrics;
pub mod posts;
pub mod response;

// Re-export commonly used types
pub use extractors::{ValidatedJson, ValidatedUuid};
pub use posts::{blogposts_routes, posts_routes};
pub use response::{Created, NoContent};
