pub mod navigation;
pub mod parcel;
pub mod query;
pub mod user_context;

pub use navigation::*;
pub use parcel::*;
pub use query::*;
pub use user_context::*;
