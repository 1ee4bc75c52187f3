//! Tagsync - Entity-to-Resource Mapper Registry
//!
//! Converts externally-discovered metadata entities (tables, paths, topics,
//! buckets) into normalized service resources for an access-control system.
//! The mapper registry is the extensibility seam that lets the tag-sync
//! pipeline support arbitrarily many source-system entity types without the
//! pipeline knowing about any of them directly.

pub mod cli;
pub mod config;
pub mod error;
pub mod mapper;
pub mod model;
pub mod registry;

pub use error::{Result, TagsyncError};
