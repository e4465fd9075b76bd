pub mod handlers;
pub mod save;
