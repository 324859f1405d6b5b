//! Reelfetch Core Library
//!
//! Turns a list of remote video URLs into a small playlist manifest
//! (`videos.json`) that a rendering front end can load directly.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`source`] - Loading and validating the list of source URLs
//! - [`tool`] - External downloader abstraction and the `yt-dlp` backend
//! - [`fetch`] - Sequential fetching with per-item failure isolation
//! - [`scan`] - Media discovery under the video root
//! - [`metadata`] - Sidecar titles and title sanitization
//! - [`manifest`] - The bounded manifest and its atomic writer
//! - [`layout`] - Paths derived from the project root
//! - [`pipeline`] - The end-to-end run

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod fetch;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod scan;
pub mod source;
pub mod tool;

// Re-export commonly used types
pub use fetch::{FetchExecutor, FetchStats};
pub use layout::ProjectLayout;
pub use manifest::{MAX_MANIFEST_ENTRIES, Manifest, ManifestEntry, ManifestError};
pub use metadata::sanitize_title;
pub use pipeline::{Pipeline, PipelineError, PipelineReport};
pub use scan::{ContainerType, DiscoveredMedia, ScanError};
pub use source::{ConfigError, SourceList, load_sources};
pub use tool::{FetchError, MediaFetcher, NoopFetcher, YtDlp};
