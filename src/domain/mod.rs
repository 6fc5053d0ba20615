mod arrangement;
mod parse;
mod types;

pub use arrangement::*;
pub use parse::*;
pub use types::*;
