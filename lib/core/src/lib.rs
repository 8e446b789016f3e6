pub mod error;
pub mod identity;
pub mod module;
pub mod types;

pub use error::ServiceError;
pub use identity::Identity;
pub use module::Module;
pub use types::{new_id, now_rfc3339, now_unix};
