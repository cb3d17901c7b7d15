//! Process configuration resolved once from the environment.
//!
//! Variables:
//! - `APP_NAME` (default `python-docker`): directory name under the home directory.
//! - `GIT_REPOSITORY` (required): clone source.
//! - `GIT_BRANCH` (optional): branch/ref to clone; empty means the remote default.
//! - `SETUP_APP_GIT` / `SETUP_APP_PIP`: override the git / pip programs.

use std::path::{Path, PathBuf};

use crate::errors::SetupError;

pub const DEFAULT_APP_NAME: &str = "python-docker";
pub const FIRST_RUN_FILENAME: &str = ".setup_app_done";
pub const REQUIREMENTS_FILENAME: &str = "requirements.txt";
pub const DEFAULT_GIT_PROGRAM: &str = "git";
pub const DEFAULT_PIP_PROGRAM: &str = "pip";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    app_name: String,
    git_repository: String,
    git_branch: Option<String>,
    base_dir: PathBuf,
    first_run_file: PathBuf,
    app_dir: PathBuf,
    requirements_file: PathBuf,
    git_program: String,
    pip_program: String,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn validate_app_name(name: &str) -> Result<(), SetupError> {
    if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
        return Err(SetupError::Configuration(format!(
            "APP_NAME must be a single directory name, got '{name}'"
        )));
    }
    Ok(())
}

impl Settings {
    /// Resolve from the process environment and the current user's home directory.
    pub fn from_env() -> Result<Self, SetupError> {
        Self::from_lookup(|k| std::env::var(k).ok(), home::home_dir())
    }

    /// Resolve from an arbitrary variable lookup. `base_dir` is the home directory, if known.
    ///
    /// `GIT_REPOSITORY` is checked first so its absence is reported regardless of anything else.
    pub fn from_lookup<F>(lookup: F, base_dir: Option<PathBuf>) -> Result<Self, SetupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let git_repository = non_empty(lookup("GIT_REPOSITORY")).ok_or_else(|| {
            SetupError::Configuration("GIT_REPOSITORY environment variable is required".to_string())
        })?;
        let app_name =
            non_empty(lookup("APP_NAME")).unwrap_or_else(|| DEFAULT_APP_NAME.to_string());
        validate_app_name(&app_name)?;
        let git_branch = non_empty(lookup("GIT_BRANCH"));
        let git_program = non_empty(lookup("SETUP_APP_GIT"))
            .unwrap_or_else(|| DEFAULT_GIT_PROGRAM.to_string());
        let pip_program = non_empty(lookup("SETUP_APP_PIP"))
            .unwrap_or_else(|| DEFAULT_PIP_PROGRAM.to_string());

        let base_dir = base_dir
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                SetupError::Configuration("could not determine home directory".to_string())
            })?;
        let first_run_file = base_dir.join(FIRST_RUN_FILENAME);
        let app_dir = base_dir.join(&app_name);
        let requirements_file = app_dir.join(REQUIREMENTS_FILENAME);

        Ok(Settings {
            app_name,
            git_repository,
            git_branch,
            base_dir,
            first_run_file,
            app_dir,
            requirements_file,
            git_program,
            pip_program,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn git_repository(&self) -> &str {
        &self.git_repository
    }

    pub fn git_branch(&self) -> Option<&str> {
        self.git_branch.as_deref()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn first_run_file(&self) -> &Path {
        &self.first_run_file
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn requirements_file(&self) -> &Path {
        &self.requirements_file
    }

    pub fn git_program(&self) -> &str {
        &self.git_program
    }

    pub fn pip_program(&self) -> &str {
        &self.pip_program
    }
}
