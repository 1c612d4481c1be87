//! Text primitives shared by the semcache crates.
//!
//! - [`character`] -- Character classification and single-char case folding
//! - [`token`] -- ASCII word-run tokenization

pub mod character;
pub mod token;
