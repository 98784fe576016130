//! Sparse cross-column property diffing.

pub mod engine;
pub mod result;

pub use engine::{diff, diff_object, property_sort_key, CompareError, PREFERRED_PROPERTY_ORDER};
pub use result::{DiffSet, ObjectDiff, PropertyValues};
