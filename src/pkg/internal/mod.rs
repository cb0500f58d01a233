pub mod access;
pub mod adaptors;
pub mod auth;
pub mod jobs;
