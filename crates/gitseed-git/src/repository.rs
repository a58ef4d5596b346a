//! Repository wrapper providing the git operations gitseed needs.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

/// High-level wrapper around a local git repository.
pub struct Repository {
    inner: git2::Repository,
    workdir: PathBuf,
}

impl Repository {
    /// Initialize a fresh repository at `path` with the given initial branch.
    ///
    /// # Errors
    /// Returns error if initialization fails.
    pub fn init(path: impl AsRef<Path>, initial_branch: &str) -> Result<Self> {
        let mut opts = git2::RepositoryInitOptions::new();
        opts.initial_head(initial_branch);

        let inner = git2::Repository::init_opts(path, &opts)?;
        Self::from_git2(inner)
    }

    /// Open an existing repository at `path`.
    ///
    /// # Errors
    /// Returns error if no repository is found at path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::open(path)?;
        Self::from_git2(inner)
    }

    /// Clone `url` into `path` and open the result.
    ///
    /// Runs `git clone` as a subprocess so the usual credential helpers and
    /// URL schemes all work.
    ///
    /// # Errors
    /// Returns [`Error::CommandFailed`] with the clone's stderr on failure.
    pub fn clone(url: &str, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let output = Command::new("git")
            .arg("clone")
            .arg(url)
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(command_failed("clone", &output.stderr));
        }

        Self::open(path)
    }

    fn from_git2(inner: git2::Repository) -> Result<Self> {
        let workdir = inner
            .workdir()
            .ok_or_else(|| git2::Error::from_str("repository has no working directory"))?
            .to_path_buf();
        Ok(Self { inner, workdir })
    }

    /// Path to the working directory.
    #[must_use]
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Resolve the current HEAD commit id, or `None` on an unborn branch.
    ///
    /// # Errors
    /// Currently infallible in practice; kept fallible for interface
    /// consistency with the other operations.
    pub fn head_commit(&self) -> Result<Option<String>> {
        match self.inner.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(_) => Ok(None),
        }
    }

    /// Write `user.name` / `user.email` overrides into repo-local config.
    ///
    /// # Errors
    /// Returns error if the config can't be written.
    pub fn set_identity(&self, name: Option<&str>, email: Option<&str>) -> Result<()> {
        let mut config = self.inner.config()?;

        if let Some(name) = name {
            config.set_str("user.name", name)?;
        }
        if let Some(email) = email {
            config.set_str("user.email", email)?;
        }

        Ok(())
    }

    /// Feed a fast-import payload to `git fast-import --quiet` on stdin and
    /// wait for it to apply atomically.
    ///
    /// # Errors
    /// Returns [`Error::CommandFailed`] with fast-import's stderr if the
    /// stream is rejected.
    pub fn fast_import(&self, payload: &str) -> Result<()> {
        let mut child = Command::new("git")
            .args(["fast-import", "--quiet"])
            .current_dir(&self.workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(command_failed("fast-import", &output.stderr));
        }

        Ok(())
    }

    /// Check out a branch, populating the working directory.
    ///
    /// # Errors
    /// Returns error if checkout fails.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run_git(&["checkout", branch])
    }

    /// Force-rename the current branch (`git branch -M`).
    ///
    /// # Errors
    /// Returns error if the rename fails.
    pub fn force_branch_name(&self, name: &str) -> Result<()> {
        self.run_git(&["branch", "-M", name])
    }

    /// Add a remote.
    ///
    /// # Errors
    /// Returns error if the remote already exists or the URL is invalid.
    pub fn add_remote(&self, name: &str, url: &str) -> Result<()> {
        self.inner.remote(name, url)?;
        Ok(())
    }

    /// Push `branch` to `remote`, setting upstream.
    ///
    /// # Errors
    /// Returns [`Error::PushRejected`] when a non-forced push is refused
    /// because the remote has diverging history, [`Error::CommandFailed`]
    /// for any other failure.
    pub fn push(&self, remote: &str, branch: &str, force: bool) -> Result<()> {
        let mut args = vec!["push", "-u", remote, branch];
        if force {
            args.push("--force");
        }

        let output = Command::new("git")
            .args(&args)
            .current_dir(&self.workdir)
            .output()?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !force && is_rejection(&stderr) {
            return Err(Error::PushRejected { stderr });
        }

        Err(Error::CommandFailed {
            command: "push".into(),
            stderr,
        })
    }

    fn run_git(&self, args: &[&str]) -> Result<()> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        if !output.status.success() {
            let command = args.first().copied().unwrap_or("git");
            return Err(command_failed(command, &output.stderr));
        }

        Ok(())
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("workdir", &self.workdir)
            .finish()
    }
}

/// Read `user.name` and `user.email` from the default (global) git config.
///
/// Missing keys come back as `None`; a missing config file entirely means
/// both are `None`.
#[must_use]
pub fn global_identity() -> (Option<String>, Option<String>) {
    let Ok(config) = git2::Config::open_default() else {
        return (None, None);
    };

    let get = |key: &str| {
        config
            .get_string(key)
            .ok()
            .filter(|value| !value.trim().is_empty())
    };

    (get("user.name"), get("user.email"))
}

fn command_failed(command: &str, stderr: &[u8]) -> Error {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    Error::CommandFailed {
        command: command.into(),
        stderr: if stderr.is_empty() {
            "unknown error".into()
        } else {
            stderr
        },
    }
}

fn is_rejection(stderr: &str) -> bool {
    stderr.contains("[rejected]")
        || stderr.contains("non-fast-forward")
        || stderr.contains("fetch first")
}
