//! Generation parameters and commit identity.

use crate::error::{Error, Result};

/// Hard upper bound on commits placed on a single day.
pub(crate) const MAX_COMMITS_CEILING: u32 = 20;

/// Immutable parameters controlling how history is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConfig {
    /// Exclude Saturdays and Sundays entirely.
    pub skip_weekends: bool,

    /// Upper bound on commits per scheduled day (1-20).
    pub max_commits_per_day: u32,

    /// Percentage of days that receive commits (0-100).
    pub frequency_percent: u32,

    /// Days before the anchor date to start generating.
    pub days_before: u32,

    /// Days after the anchor date to keep generating.
    pub days_after: u32,
}

impl GenerationConfig {
    /// Validate parameter ranges.
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfiguration`] for any out-of-range value.
    pub fn validate(&self) -> Result<()> {
        if self.max_commits_per_day < 1 || self.max_commits_per_day > MAX_COMMITS_CEILING {
            return Err(Error::InvalidConfiguration {
                field: "max_commits_per_day",
                reason: format!(
                    "must be between 1 and {MAX_COMMITS_CEILING}, got {}",
                    self.max_commits_per_day
                ),
            });
        }

        if self.frequency_percent > 100 {
            return Err(Error::InvalidConfiguration {
                field: "frequency_percent",
                reason: format!("must be between 0 and 100, got {}", self.frequency_percent),
            });
        }

        Ok(())
    }

    /// Total number of calendar days in the generation window.
    #[must_use]
    pub const fn total_days(&self) -> u32 {
        self.days_before + self.days_after
    }

    /// Per-day commit cap, clamped into `[1, 20]`.
    ///
    /// The scheduler uses this rather than the raw field so a misconfigured
    /// caller can never produce more than 20 commits on one day.
    #[must_use]
    pub(crate) const fn clamped_max_commits(&self) -> u32 {
        if self.max_commits_per_day < 1 {
            1
        } else if self.max_commits_per_day > MAX_COMMITS_CEILING {
            MAX_COMMITS_CEILING
        } else {
            self.max_commits_per_day
        }
    }
}

/// Author/committer identity for every synthesized commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Committer name.
    pub name: String,
    /// Committer email.
    pub email: String,
}

impl Identity {
    /// Create a validated identity.
    ///
    /// # Errors
    /// Returns [`Error::EmptyIdentity`] if either field is empty.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let email = email.into();

        if name.trim().is_empty() {
            return Err(Error::EmptyIdentity("name"));
        }
        if email.trim().is_empty() {
            return Err(Error::EmptyIdentity("email"));
        }

        Ok(Self { name, email })
    }
}
