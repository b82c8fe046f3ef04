pub mod answer;
pub mod field_type;
pub mod operators;
pub mod rule;
pub mod spec;

pub use answer::*;
pub use field_type::*;
pub use operators::*;
pub use rule::*;
pub use spec::*;
