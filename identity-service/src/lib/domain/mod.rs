pub mod federation;
pub mod user;
