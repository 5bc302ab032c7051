//! Clinical-text processing.
//!
//! Pipeline: medicines text → extract → normalize → group → rank
//!           signs text → detect conditions → count → rank
//!
//! Everything here is pure and synchronous: no I/O, no shared mutable state.

mod conditions;
mod extractor;
mod frequency;
mod grouper;
mod normalizer;

pub use conditions::*;
pub use extractor::*;
pub use frequency::*;
pub use grouper::*;
pub use normalizer::*;
