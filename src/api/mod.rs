pub mod error;
pub mod handlers;
pub mod query_actions;
pub mod routes;
pub mod sidebar;
pub mod user_extractor;

pub use error::*;
pub use handlers::*;
pub use query_actions::*;
pub use routes::*;
pub use sidebar::*;
