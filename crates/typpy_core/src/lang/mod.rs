//! typpy language vocabulary registries.
//!
//! Callers work with **stable IDs** (e.g. `KeywordId`, `NumericTypeId`) and look up spellings and
//! metadata through registry tables instead of scattering string comparisons across the lexer,
//! parser and analyzer.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - Each registry table is ordered like its ID enum, so `info_for` is a direct index.
//!
//! ## Examples
//! ```rust
//! use typpy_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("elif"), Some(KeywordId::Elif));
//! assert_eq!(keywords::as_str(KeywordId::Elif), "elif");
//! ```

pub mod builtins;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod types;
