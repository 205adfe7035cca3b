pub mod check;
pub mod config;
pub mod error;
pub mod reporter;
pub mod types;
pub mod util;

pub use check::*;
pub use config::*;
pub use error::*;
pub use reporter::*;
pub use types::*;
pub use util::*;
