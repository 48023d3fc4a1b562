pub mod auth;
pub mod feed;
pub mod posts;
pub mod tenancy;
pub mod users;
