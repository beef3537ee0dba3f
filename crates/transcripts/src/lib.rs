//! # YouTube Transcript Tools
//!
//! Fetch, filter, search and summarize YouTube video transcripts, exposed as
//! MCP tools.
//!
//! ## Core Features
//!
//! - **Flexible input**: bare 11-character video IDs or any common YouTube URL
//! - **Track selection**: manual subtitles preferred over auto-generated ones
//! - **Time ranges**: keep only the entries overlapping a window
//! - **Search**: literal matches with surrounding context
//! - **Summaries**: word statistics, speech analysis and sample excerpts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use transcripts::{TranscriptConfig, TranscriptRequest, TranscriptService};
//!
//! # async fn run() -> transcripts::Result<()> {
//! let service = TranscriptService::from_config(&TranscriptConfig::load(None)?);
//! let response = service
//!     .get_transcript(&TranscriptRequest::new("https://youtu.be/jNQXAC9IVRw"))
//!     .await?;
//! println!("{}", response.plain_text);
//! # Ok(())
//! # }
//! ```

pub mod assembler;
pub mod command;
pub mod config;
pub mod error;
pub mod languages;
pub mod mcp;
pub mod params;
pub mod request;
pub mod search;
pub mod service;
pub mod summary;
pub mod types;
pub mod video_id;

pub use command::{CommandOutput, TranscriptCommand};
pub use config::TranscriptConfig;
pub use error::{ErrorKind, Result, TranscriptError};
pub use request::{LanguagesRequest, SearchRequest, SummaryRequest, TranscriptRequest};
pub use service::TranscriptService;
pub use types::*;
pub use video_id::resolve_video_id;
