//! Per-day commit scheduling.
//!
//! Decides, for each calendar day in the generation window, whether the day
//! receives commits and how many. Randomness comes from an injected
//! [`Rng`] so tests can drive the schedule with a seeded generator.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use rand::Rng;

use crate::config::GenerationConfig;

/// One calendar day and the number of commits scheduled on it.
///
/// A count of 0 means the day was skipped (weekend or frequency roll).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledDay {
    /// The calendar day.
    pub date: NaiveDate,
    /// Commits to place on this day.
    pub count: u32,
}

impl ScheduledDay {
    /// Whether this day receives any commits.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Lazy sequence of [`ScheduledDay`] values over the generation window.
///
/// Yields one item per day offset `0 .. days_before + days_after`, in
/// increasing date order. Each call to `next` consumes fresh randomness,
/// so the sequence is not restartable.
pub struct Schedule<'r, R: Rng> {
    config: GenerationConfig,
    start: NaiveDate,
    offset: u32,
    rng: &'r mut R,
}

impl<'r, R: Rng> Schedule<'r, R> {
    /// Create a schedule starting at `start` (the anchor date minus
    /// `days_before` days, computed by the caller).
    pub fn new(config: GenerationConfig, start: NaiveDate, rng: &'r mut R) -> Self {
        Self {
            config,
            start,
            offset: 0,
            rng,
        }
    }
}

impl<R: Rng> Iterator for Schedule<'_, R> {
    type Item = ScheduledDay;

    fn next(&mut self) -> Option<ScheduledDay> {
        if self.offset >= self.config.total_days() {
            return None;
        }

        let date = self.start.checked_add_days(Days::new(u64::from(self.offset)))?;
        self.offset += 1;

        // Weekends are excluded before any randomness is consumed.
        if self.config.skip_weekends
            && matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
        {
            return Some(ScheduledDay { date, count: 0 });
        }

        // Roll in [1, 100] so that frequency 0 always skips and
        // frequency 100 never does.
        if self.rng.gen_range(1..=100) > self.config.frequency_percent {
            return Some(ScheduledDay { date, count: 0 });
        }

        let count = self.rng.gen_range(1..=self.config.clamped_max_commits());
        Some(ScheduledDay { date, count })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.config.total_days() - self.offset) as usize;
        (remaining, Some(remaining))
    }
}
