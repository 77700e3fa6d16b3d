pub mod query_state;
pub mod record_filter;
pub mod route_table;

pub use query_state::*;
pub use record_filter::*;
pub use route_table::*;
