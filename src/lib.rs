//! Typed configuration for the person re-identification tracker.
//!
//! Operators hand the service an untyped attribute tree. The [`config`]
//! module declares every expected field as an attribute (its kind,
//! required-ness, default and constraints) and turns the tree into validated
//! records or a precise error naming the offending field.
//!
//! ```rust,ignore
//! use reid_config::config::{load_tree_from_str, TrackerConfig};
//!
//! let tree = load_tree_from_str(r#"{"detector_name": "vision-1", "max_age_track": 500}"#)?;
//! let config = TrackerConfig::from_tree(&tree)?;
//! assert_eq!(config.tracking.max_age_track, 500);
//! ```

pub mod config;
pub mod error;

// Re-exports
pub use error::*;
