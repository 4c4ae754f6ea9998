#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod automaton;
pub mod boundary;
pub mod fold;

pub use automaton::{MatcherError, Span, WordMatcher};
