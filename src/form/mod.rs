pub mod conversion;
pub mod definition;
pub mod navigation;

pub use conversion::*;
pub use definition::*;
pub use navigation::*;
