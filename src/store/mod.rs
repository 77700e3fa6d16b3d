pub mod history;
pub mod memory;
pub mod traits;

pub use history::*;
pub use memory::*;
pub use traits::*;
