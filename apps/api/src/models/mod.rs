pub mod playlist;
pub mod user;
