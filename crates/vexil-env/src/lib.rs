#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Typed coercion of environment variable strings.
//!
//! Every coercion in this crate is a **total** function: whatever string
//! arrives (absent, empty, garbled) a value of the requested type comes back.
//! A bad setting degrades to its fallback instead of aborting startup.
//!
//! # Usage
//!
//! ```rust
//! use vexil_env::{BoundsOptions, coerce_bool, coerce_bounded_int, coerce_int, coerce_string_list};
//!
//! assert_eq!(coerce_int(Some("42px"), 0), 42);
//! assert!(coerce_bool(Some("t"), false));
//! assert_eq!(coerce_string_list(Some("a, b ,c"), Vec::new()), ["a", "b", "c"]);
//!
//! let opts = BoundsOptions::new(10).with_min(20);
//! assert_eq!(coerce_bounded_int(None, &opts), 20);
//! ```
//!
//! # Absent versus empty
//!
//! Raw input is modelled as `Option<&str>`. `None` means the variable is not
//! set. `Some("")` means it is set to the empty string. Integer and boolean
//! coercion treat both as "use the fallback"; string-list coercion treats
//! `Some("")` as an explicit empty list.
//!
//! For keyed lookups against the process environment (or an in-memory map)
//! use [`EnvReader`], which adds alias resolution and `tracing` diagnostics on
//! top of the pure functions.

/// Integer, boolean and string-list coercion.
pub mod coerce;
/// Bounded integer coercion.
pub mod bounds;
/// Keyed lookups with alias resolution and diagnostics.
pub mod reader;
/// Where raw values come from.
pub mod source;

pub use bounds::{BoundsOptions, coerce_bounded_int};
pub use coerce::{TRUTHY_TOKENS, coerce_bool, coerce_int, coerce_string_list, parse_leading_int};
pub use reader::{EnvReader, Lookup};
pub use source::{EnvSource, ProcessEnv, collect_env_vars};
