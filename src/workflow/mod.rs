pub mod definition;
pub mod parsing;

pub use definition::*;
