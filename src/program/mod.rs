pub mod conversion;
pub mod definition;
pub mod history;
pub mod model;
pub mod snapshot;

pub use conversion::*;
pub use definition::*;
pub use history::*;
pub use model::*;
pub use snapshot::*;
