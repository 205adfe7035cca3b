pub mod checker;
pub mod input;
pub mod rules;

pub use checker::*;
pub use input::*;
pub use rules::*;
