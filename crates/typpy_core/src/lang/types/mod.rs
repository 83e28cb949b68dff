//! Builtin type vocabularies.
//!
//! ## Notes
//! - These registries are vocabulary only: spellings and metadata, not subtype rules.
//! - Each submodule groups a small family of types for readability.

pub mod collections;
pub mod numerics;
pub mod special;
pub mod stringlike;

pub use collections::{COLLECTION_TYPES, CollectionTypeId, CollectionTypeInfo};
pub use numerics::{NUMERIC_TYPES, NumericTypeId, NumericTypeInfo};
pub use special::{SPECIAL_FORMS, SpecialFormId, SpecialFormInfo};
pub use stringlike::{STRING_LIKE_TYPES, StringLikeId, StringLikeInfo};

/// Name of the root of every nominal class hierarchy.
pub const OBJECT: &str = "object";

/// Name used when displaying the type of `None`.
pub const NONE: &str = "None";
