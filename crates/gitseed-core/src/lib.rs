//! # gitseed-core
//!
//! Core logic for gitseed: deciding which days of a date range receive
//! synthetic commits, and assembling those commits into a `git fast-import`
//! stream. Everything here is pure with respect to an injected random
//! source and a supplied "now" anchor - no I/O, no process state.

mod config;
mod error;
mod schedule;
mod stream;

pub use config::{GenerationConfig, Identity};
pub use error::{Error, Result};
pub use schedule::{Schedule, ScheduledDay};
pub use stream::{
    BlobRecord, CommitRecord, DEFAULT_BRANCH, FILE_CONTENT, FILE_PATH, ImportStream, Mark,
    ParentRef, Record, build_stream,
};
