//! One-shot run orchestration: working directory setup, identity
//! resolution, stream generation, import, and push.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Local;
use gitseed_core::{DEFAULT_BRANCH, Identity, build_stream};
use gitseed_git::Repository;

use crate::cli::Cli;
use crate::output;
use crate::workdir;

/// Execute one generation run.
pub fn run(cli: &Cli) -> Result<()> {
    let config = cli.generation_config();
    config.validate()?;

    let now = Local::now();

    // Set up the working directory: append mode clones the existing
    // history, create mode initializes a fresh repository.
    let repo = if cli.append {
        let url = cli
            .repository
            .as_deref()
            .context("--append requires --repository")?;
        let dir = workdir::directory_name(Some(url), now);

        output::info(&format!("Cloning {url}..."));
        Repository::clone(url, &dir).context("clone failed")?
    } else {
        let dir = workdir::directory_name(cli.repository.as_deref(), now);
        if Path::new(&dir).exists() {
            bail!("directory '{dir}' already exists - remove it or use a different name");
        }
        Repository::init(&dir, DEFAULT_BRANCH)?
    };

    let identity = resolve_identity(cli)?;
    if cli.user_name.is_some() || cli.user_email.is_some() {
        repo.set_identity(cli.user_name.as_deref(), cli.user_email.as_deref())?;
    }

    // In append mode the first generated commit chains to the current head.
    let parent = if cli.append {
        repo.head_commit()?
    } else {
        None
    };

    let mut rng = rand::thread_rng();
    let stream = build_stream(&config, &identity, now.fixed_offset(), parent, &mut rng);

    // fast-import must never see an empty payload.
    if stream.is_empty() {
        output::info("No commits scheduled - nothing to import");
        output::success("Repository generated successfully");
        return Ok(());
    }

    output::info(&format!("Generating {} commits...", stream.commit_count()));
    repo.fast_import(&stream.serialize())?;
    repo.checkout(DEFAULT_BRANCH)?;

    if let Some(url) = &cli.repository {
        if !cli.append {
            repo.add_remote("origin", url)?;
        }
        repo.force_branch_name(DEFAULT_BRANCH)?;
        push(&repo, cli)?;
    }

    output::success("Repository generated successfully");
    Ok(())
}

/// Resolve the commit identity: CLI overrides first, then global git config.
fn resolve_identity(cli: &Cli) -> Result<Identity> {
    let (global_name, global_email) = gitseed_git::global_identity();

    let Some(name) = cli.user_name.clone().or(global_name) else {
        bail!(
            "git user.name not configured - pass --user-name or run: \
             git config --global user.name 'Your Name'"
        );
    };
    let Some(email) = cli.user_email.clone().or(global_email) else {
        bail!(
            "git user.email not configured - pass --user-email or run: \
             git config --global user.email 'you@example.com'"
        );
    };

    Ok(Identity::new(name, email)?)
}

fn push(repo: &Repository, cli: &Cli) -> Result<()> {
    match repo.push("origin", DEFAULT_BRANCH, cli.force) {
        Ok(()) => Ok(()),
        Err(gitseed_git::Error::PushRejected { .. }) => {
            output::warn("Push rejected - remote has existing history.");
            if cli.append {
                output::detail("  Your --append added commits, but push still needs --force.");
                output::detail("  Run: git push origin main --force");
            } else {
                output::detail(
                    "  Use --append to preserve existing history, or --force to overwrite:",
                );
                output::detail("  gitseed -r <repo> --append");
                output::detail("  gitseed -r <repo> --force");
            }
            bail!("push rejected by remote");
        }
        Err(err) => Err(err.into()),
    }
}
