pub mod checker;
pub mod frontmatter;
pub mod input;
pub mod rules;

pub use checker::*;
pub use frontmatter::*;
pub use input::*;
pub use rules::*;
