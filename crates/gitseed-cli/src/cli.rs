//! Command-line argument definitions.

use clap::Parser;
use gitseed_core::GenerationConfig;

/// Generate a synthetic git commit history.
#[derive(Debug, Parser)]
#[command(
    name = "gitseed",
    version,
    about = "Generate a synthetic git commit history via fast-import"
)]
pub struct Cli {
    /// Skip Saturdays and Sundays
    #[arg(short = 'n', long)]
    pub no_weekends: bool,

    /// Maximum commits per day (1-20)
    #[arg(short = 'm', long, default_value_t = 10, value_name = "COUNT")]
    pub max_commits: u32,

    /// Percentage of days that receive commits (0-100)
    #[arg(long, default_value_t = 80, value_name = "PERCENT")]
    pub frequency: u32,

    /// Days before today to start generating
    #[arg(long, default_value_t = 365, value_name = "DAYS")]
    pub days_before: u32,

    /// Days after today to keep generating
    #[arg(long, default_value_t = 0, value_name = "DAYS")]
    pub days_after: u32,

    /// Remote repository URL to push to
    #[arg(short = 'r', long, value_name = "URL")]
    pub repository: Option<String>,

    /// Override git user.name
    #[arg(long, value_name = "NAME")]
    pub user_name: Option<String>,

    /// Override git user.email
    #[arg(long, value_name = "EMAIL")]
    pub user_email: Option<String>,

    /// Force push (overwrites remote history)
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Append to an existing repository (clones it, preserves history)
    #[arg(short = 'a', long, requires = "repository")]
    pub append: bool,
}

impl Cli {
    /// Collect the generation parameters.
    #[must_use]
    pub const fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            skip_weekends: self.no_weekends,
            max_commits_per_day: self.max_commits,
            frequency_percent: self.frequency,
            days_before: self.days_before,
            days_after: self.days_after,
        }
    }
}
