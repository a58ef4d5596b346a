//! Fast-import stream assembly.
//!
//! Each scheduled commit becomes two immutable records - a blob carrying the
//! placeholder file content and a commit referencing it - which are collected
//! in chronological order and serialized once at the end. Parent linkage is
//! threaded through the loop as a [`ParentRef`] accumulator: the first commit
//! chains to the externally supplied head in append mode, every later commit
//! chains to the mark of the one before it.

use std::fmt;

use chrono::{DateTime, Days, FixedOffset, NaiveDate, NaiveTime, TimeDelta};
use rand::Rng;

use crate::config::{GenerationConfig, Identity};
use crate::schedule::{Schedule, ScheduledDay};

/// Content of the single generated file, identical across all commits.
pub const FILE_CONTENT: &str = "# Contributions\n\nGenerated contribution history.\n";

/// Path of the single generated file.
pub const FILE_PATH: &str = "README.md";

/// Branch every generated commit lands on.
pub const DEFAULT_BRANCH: &str = "main";

/// Local wall-clock hour at which each day's commits start.
const ANCHOR_HOUR: i64 = 20;

/// A fast-import mark: a temporary handle for an object created earlier in
/// the same stream. Blob and commit marks share one counter, so every mark
/// is unique within a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(u32);

impl Mark {
    /// The raw mark number.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.0)
    }
}

/// Allocates marks from a single monotonically increasing counter.
#[derive(Debug)]
struct MarkAllocator {
    next: u32,
}

impl MarkAllocator {
    const fn new() -> Self {
        // fast-import marks start at 1
        Self { next: 1 }
    }

    fn allocate(&mut self) -> Mark {
        let mark = Mark(self.next);
        self.next += 1;
        mark
    }
}

/// Parent of a generated commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentRef {
    /// No parent - the very first commit of an empty repository.
    Root,
    /// A commit generated earlier in this stream.
    Mark(Mark),
    /// A resolved commit id of pre-existing history (append mode, first
    /// generated commit only).
    External(String),
}

/// A blob record: the stored content of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobRecord {
    /// Mark the commit record uses to reference this blob.
    pub mark: Mark,
    /// File content.
    pub content: &'static str,
}

impl fmt::Display for BlobRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "blob")?;
        writeln!(f, "mark {}", self.mark)?;
        writeln!(f, "data {}", self.content.len())?;
        write!(f, "{}", self.content)
    }
}

/// A commit record: author, timestamp, message, parent linkage, and the
/// single file modification binding the blob into the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// This commit's own mark.
    pub mark: Mark,
    /// Branch ref the commit lands on.
    pub branch: &'static str,
    /// Committer name and email.
    pub author: Identity,
    /// Commit time as Unix epoch seconds.
    pub epoch_seconds: i64,
    /// UTC offset string (`±HHMM`) recorded next to the epoch.
    pub tz_offset: String,
    /// Commit message.
    pub message: String,
    /// Parent reference.
    pub parent: ParentRef,
    /// Mark of the blob this commit stores.
    pub blob: Mark,
    /// Path the blob is stored at.
    pub path: &'static str,
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "commit refs/heads/{}", self.branch)?;
        writeln!(f, "mark {}", self.mark)?;
        writeln!(
            f,
            "committer {} <{}> {} {}",
            self.author.name, self.author.email, self.epoch_seconds, self.tz_offset
        )?;
        writeln!(f, "data {}", self.message.len())?;
        writeln!(f, "{}", self.message)?;

        match &self.parent {
            ParentRef::Root => {}
            ParentRef::Mark(mark) => writeln!(f, "from {mark}")?,
            ParentRef::External(id) => writeln!(f, "from {id}")?,
        }

        // The trailing modification line ends the commit record.
        writeln!(f, "M 100644 {} {}", self.blob, self.path)
    }
}

/// One record of the import stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// File content.
    Blob(BlobRecord),
    /// Commit metadata.
    Commit(CommitRecord),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(blob) => blob.fmt(f),
            Self::Commit(commit) => commit.fmt(f),
        }
    }
}

/// The complete, ordered fast-import payload for one run.
#[derive(Debug, Clone)]
pub struct ImportStream {
    records: Vec<Record>,
    commit_count: usize,
}

impl ImportStream {
    /// Number of commit records in the stream.
    #[must_use]
    pub const fn commit_count(&self) -> usize {
        self.commit_count
    }

    /// Whether the stream contains no commits at all.
    ///
    /// An empty stream must never be handed to `git fast-import`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commit_count == 0
    }

    /// The individual records, in chronological order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Serialize all records into the textual payload `git fast-import`
    /// consumes, blank-line-separated.
    #[must_use]
    pub fn serialize(&self) -> String {
        let parts: Vec<String> = self.records.iter().map(ToString::to_string).collect();
        parts.join("\n")
    }
}

/// Build the fast-import stream for the whole generation window.
///
/// `now` anchors the window: commits start at `now`'s date minus
/// `days_before`, each day's commits at 20:00 local, one minute apart.
/// Epoch seconds and the recorded `±HHMM` string both use `now`'s UTC
/// offset for every commit, including historical dates that may have had a
/// different DST offset - a deliberate simplification carried over from
/// the previous implementation.
///
/// `parent`, when present, is the resolved head of pre-existing history;
/// the first generated commit chains to it.
pub fn build_stream<R: Rng>(
    config: &GenerationConfig,
    identity: &Identity,
    now: DateTime<FixedOffset>,
    parent: Option<String>,
    rng: &mut R,
) -> ImportStream {
    let tz_offset = now.format("%z").to_string();
    let utc_shift = i64::from(now.offset().local_minus_utc());
    let start = window_start(now.date_naive(), config.days_before);

    let mut records = Vec::new();
    let mut marks = MarkAllocator::new();
    let mut parent = parent.map_or(ParentRef::Root, ParentRef::External);
    let mut commit_count = 0;

    for day in Schedule::new(*config, start, rng).filter(ScheduledDay::is_active) {
        for slot in 0..day.count {
            let commit_time = day.date.and_time(NaiveTime::MIN)
                + TimeDelta::hours(ANCHOR_HOUR)
                + TimeDelta::minutes(i64::from(slot));

            let blob = BlobRecord {
                mark: marks.allocate(),
                content: FILE_CONTENT,
            };
            let blob_mark = blob.mark;
            records.push(Record::Blob(blob));

            let commit = CommitRecord {
                mark: marks.allocate(),
                branch: DEFAULT_BRANCH,
                author: identity.clone(),
                epoch_seconds: commit_time.and_utc().timestamp() - utc_shift,
                tz_offset: tz_offset.clone(),
                message: format!("Contribution: {}", commit_time.format("%Y-%m-%d %H:%M")),
                parent,
                blob: blob_mark,
                path: FILE_PATH,
            };
            parent = ParentRef::Mark(commit.mark);
            records.push(Record::Commit(commit));
            commit_count += 1;
        }
    }

    ImportStream {
        records,
        commit_count,
    }
}

fn window_start(anchor: NaiveDate, days_before: u32) -> NaiveDate {
    anchor
        .checked_sub_days(Days::new(u64::from(days_before)))
        .unwrap_or(NaiveDate::MIN)
}
