pub mod auth;
pub mod categories;
pub mod dispatch;
pub mod ideas;
pub mod landing;
pub mod route;
pub mod shared;
pub mod stats;
