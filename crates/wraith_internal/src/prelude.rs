//! Prelude module for `wraith_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use wraith_internal::prelude::*;
//!
//! let layout = FilenameLayout::current();
//! assert_eq!(layout.lengths(), vec![100, 102, 114]);
//!
//! let course = GameData::wii_u().course(27).unwrap();
//! assert_eq!(course.ghost_number(), 11);
//! ```

// Re-export everything from wraith_types::prelude
#[doc(inline)]
pub use wraith_types::prelude::*;

// Re-export the entire wraith_types module for advanced usage
#[doc(inline)]
pub use wraith_types;
