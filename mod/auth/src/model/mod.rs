mod session;
mod user;

pub use session::{Claims, LoginRequest};
pub use user::{PublicUser, RegisterRequest, User};
