use crate::domain::UpdateSettings;
use crate::error::{Result, UpdaterError};
use crate::git::RepoInspector;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// Captured result of one git invocation
struct GitOutput {
    status: ExitStatus,
    stdout: String,
    stderr: String,
}

impl GitOutput {
    /// Both streams, labelled, for error messages
    fn captured(&self) -> String {
        let mut message = String::new();
        if !self.stdout.is_empty() {
            message.push_str(&format!("stdout: {}", self.stdout.trim_end()));
        }
        if !self.stderr.is_empty() {
            if !message.is_empty() {
                message.push('\n');
            }
            message.push_str(&format!("stderr: {}", self.stderr.trim_end()));
        }
        if message.is_empty() {
            message.push_str("(no output)");
        }
        message
    }
}

/// [RepoInspector] backed by the `git` executable
///
/// Every call runs git with the repository's working directory as its
/// current directory.
pub struct GitCli {
    git: PathBuf,
    workdir: PathBuf,
}

impl GitCli {
    /// Locate the working copy containing `path`.
    ///
    /// Any subdirectory of the checkout is accepted. Bare repositories are
    /// rejected because the updater merges into a working tree.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = git2::Repository::discover(path.as_ref())?;
        let workdir = repo.workdir().ok_or_else(|| {
            UpdaterError::inspect(format!(
                "'{}' is a bare repository",
                path.as_ref().display()
            ))
        })?;

        Ok(GitCli {
            git: PathBuf::from("git"),
            workdir: workdir.to_path_buf(),
        })
    }

    /// Use a specific git executable instead of `git` from `PATH`
    pub fn with_git_binary(mut self, git: impl Into<PathBuf>) -> Self {
        self.git = git.into();
        self
    }

    /// Root of the working copy
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn run(&self, args: &[&str]) -> Result<GitOutput> {
        debug!(?args, workdir = %self.workdir.display(), "running git");

        let output = Command::new(&self.git)
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        let result = GitOutput {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(?args, status = ?result.status.code(), "git finished");

        Ok(result)
    }

    /// Run git and map a non-zero exit to the error built by `on_failure`
    fn run_checked(
        &self,
        args: &[&str],
        on_failure: impl FnOnce(String) -> UpdaterError,
    ) -> Result<GitOutput> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(on_failure(format!(
                "git {} exited with {}\n{}",
                args.join(" "),
                output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                output.captured()
            )));
        }
        Ok(output)
    }
}

impl RepoInspector for GitCli {
    fn fetch_all_tags(&self) -> Result<()> {
        self.run_checked(&["fetch", "--tags", "--all"], UpdaterError::fetch)?;
        Ok(())
    }

    fn current_commit(&self) -> Result<String> {
        let output = self.run_checked(&["rev-parse", "HEAD"], UpdaterError::inspect)?;
        let lines: Vec<&str> = output.stdout.lines().collect();

        match lines.as_slice() {
            [hash] => Ok(hash.trim().to_string()),
            _ => Err(UpdaterError::inspect(format!(
                "expected one line from git rev-parse HEAD, got {}\n{}",
                lines.len(),
                output.captured()
            ))),
        }
    }

    fn list_tags(&self, settings: &UpdateSettings) -> Result<Vec<String>> {
        let output = self.run_checked(
            &["tag", "-l", "--sort", "-version:refname"],
            UpdaterError::inspect,
        )?;
        Ok(settings.filter_tags(output.stdout.lines()))
    }

    fn tags_reachable_from(&self, commit: &str) -> Result<Vec<String>> {
        let output = self.run_checked(
            &["tag", "-l", "--sort", "-version:refname", "--merged", commit],
            UpdaterError::inspect,
        )?;
        Ok(output.stdout.split('\n').map(str::to_string).collect())
    }

    fn is_tree_clean(&self) -> Result<bool> {
        let output = self.run(&["diff", "--quiet"])?;
        match output.status.code() {
            Some(0) => Ok(true),
            Some(1) => Ok(false),
            _ => Err(UpdaterError::inspect(format!(
                "git diff --quiet failed\n{}",
                output.captured()
            ))),
        }
    }

    fn merge(&self, tag: &str) -> Result<()> {
        self.run_checked(&["merge", tag], UpdaterError::merge)?;
        Ok(())
    }
}
