pub mod types;
pub mod values;

pub use types::*;
pub use values::*;
