//! # gitseed-git
//!
//! Git boundary for gitseed. Repository setup, identity configuration, and
//! head resolution go through git2; clone, `fast-import`, checkout, and push
//! shell out to the `git` binary, which covers the pieces git2 has no good
//! interface for (fast-import in particular consumes its payload on stdin).

mod error;
mod repository;

pub use error::{Error, Result};
pub use repository::{Repository, global_identity};
