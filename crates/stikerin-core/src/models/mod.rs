//! Data models shared by the pipeline and its HTTP boundary

mod media;
mod sticker;

pub use media::*;
pub use sticker::*;
