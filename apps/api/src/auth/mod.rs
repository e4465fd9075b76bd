// Account creation, credential checks and session tokens.
// Tokens are verified in `extract`; the page gate only looks for the cookie.

pub mod extract;
pub mod gate;
pub mod handlers;
pub mod password;
pub mod token;
