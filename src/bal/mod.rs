pub mod auth;
pub mod discord;
pub mod pronouns;
pub mod route;
