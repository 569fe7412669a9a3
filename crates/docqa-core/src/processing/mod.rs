//! Text processing: splitting passages into retrievable chunks.

pub mod split;

pub use split::TextSplitter;
