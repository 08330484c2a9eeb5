//! Exact solver for the k-MST problem (minimum weight tree with exactly k nodes)

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// k-MST instance, solutions and checker
pub mod kmst;

/// errors of the library
pub mod error;

/// read/write the text instance format
pub mod text_format;

/// read/write the JSON instance format
pub mod json_format;

/// random instance generation
pub mod generator;

/// helper and utility methods for executables
pub mod util;

/// search algorithms for the k-MST problem
pub mod search;
