//! Data model for marked text.
//!
//! An [`Extraction`] is the only thing that leaves the parser: the rendered
//! plain text, the located [`Mark`]s with their [`TextRange`]s, and the
//! [`MatchMiss`]es for elements that could not be located.

mod extraction;
mod mark;
mod range;

pub use extraction::Extraction;
pub use mark::{Mark, MatchMiss, MissReason};
pub use range::{CodeUnit, TextRange};
