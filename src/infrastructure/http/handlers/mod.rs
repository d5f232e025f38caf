//! HTTP Handlers

mod audio;
mod consult;
mod index;
mod ping;

pub use audio::*;
pub use consult::*;
pub use index::*;
pub use ping::*;
