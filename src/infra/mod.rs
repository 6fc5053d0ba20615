mod displayplacer;
mod logging;

pub use displayplacer::*;
pub use logging::*;
