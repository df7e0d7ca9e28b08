pub mod unicode;

pub use unicode::*;
