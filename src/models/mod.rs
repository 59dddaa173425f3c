pub mod post;
pub mod user;

pub use post::{Post, PostForm, PostListing};
pub use user::{Credentials, User};
