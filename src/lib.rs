//! VCAT test vector builder
//!
//! Builds a hierarchy of JSON documents from a folder of video files:
//! per-video manifests, playlists wrapping them, a catalog of playlists and
//! a catalog index. Media properties come from scraping `ffmpeg -i` output;
//! every reference carries a SHA-256 checksum and byte length of the
//! referenced document.

pub mod build;
pub mod config;
pub mod config_file;
pub mod digest;
pub mod discovery;
pub mod document;
pub mod error;
pub mod probe;


pub use build::{build, run_pass, BuildSummary, Pass, PassReport};
pub use config::{BuilderConfig, Overrides, Settings};
pub use error::{BuildError, InspectError, Result};
pub use probe::{FfmpegInspector, MediaInspector};
