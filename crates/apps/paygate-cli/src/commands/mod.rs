//! Command implementations.

pub mod callback;
pub mod endpoints;
pub mod init;
pub mod link;
pub mod query;
pub mod request_code;

pub use callback::callback;
pub use endpoints::endpoints;
pub use init::init;
pub use link::{link, LinkArgs};
pub use query::query;
pub use request_code::request_code;
