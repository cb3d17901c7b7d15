//! First-run bootstrap: clear stale app dir, clone, install requirements, write marker.
//!
//! The marker file is the only idempotence signal. It is written last, so any
//! failure leaves it absent and the next container start repeats the whole
//! sequence from a clean app directory. There is no locking across processes.

use std::fs;

#[cfg(feature = "trace")]
use tracing::instrument;

use crate::errors::SetupError;
use crate::log::{log_error, log_line, log_success};
use crate::settings::Settings;
use crate::util::{CommandRunner, ExecRequest};

/// What `Bootstrapper::run` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Installed,
    AlreadyInstalled,
    DryRun,
}

/// True when the marker file is not present as a regular file.
pub fn is_first_run(settings: &Settings) -> bool {
    !settings.first_run_file().is_file()
}

/// Remove `app_dir` recursively if anything is there. Absence is success.
///
/// Returns whether something was removed.
#[cfg_attr(
    feature = "trace",
    instrument(level = "info", err, skip_all, fields(app_dir = %settings.app_dir().display()))
)]
pub fn clear_output_dir(settings: &Settings) -> Result<bool, SetupError> {
    let removed = crate::util::fs::remove_path_all(settings.app_dir())
        .map_err(|e| SetupError::filesystem(settings.app_dir(), e))?;
    if removed {
        log_line("Cleared old app directory");
    }
    Ok(removed)
}

/// `git clone [--branch <b>] <repo> <app_dir>`, with terminal credential prompts disabled.
pub fn clone_request(settings: &Settings) -> ExecRequest {
    let mut req = ExecRequest::new(settings.git_program()).arg("clone");
    if let Some(branch) = settings.git_branch() {
        req = req.arg("--branch").arg(branch);
    }
    req.arg(settings.git_repository())
        .arg(settings.app_dir())
        .env("GIT_TERMINAL_PROMPT", "0")
        .capture_output(true)
}

/// `pip install --user -r <requirements_file>`, inheriting stdio.
pub fn install_request(settings: &Settings) -> ExecRequest {
    ExecRequest::new(settings.pip_program())
        .args(["install", "--user", "-r"])
        .arg(settings.requirements_file())
}

#[cfg_attr(
    feature = "trace",
    instrument(level = "info", err, skip_all, fields(repository = settings.git_repository(), branch = ?settings.git_branch()))
)]
pub fn clone<R: CommandRunner + ?Sized>(settings: &Settings, runner: &R) -> Result<(), SetupError> {
    log_line("Cloning app through Git...");
    if let Some(parent) = settings.app_dir().parent() {
        fs::create_dir_all(parent).map_err(|e| SetupError::filesystem(parent, e))?;
    }

    let out = runner.run(&clone_request(settings))?;
    if !out.success() {
        log_error("Git clone failed!");
        log_line(&format!("stdout:\n{}", out.stdout));
        log_line(&format!("stderr:\n{}", out.stderr));
        return Err(SetupError::Clone {
            code: out.code,
            stdout: out.stdout,
            stderr: out.stderr,
        });
    }
    log_line("App cloned successfully!");
    Ok(())
}

/// Install from `requirements.txt` when the cloned app ships one.
///
/// Returns whether the installer was invoked.
#[cfg_attr(
    feature = "trace",
    instrument(level = "info", err, skip_all, fields(requirements = %settings.requirements_file().display()))
)]
pub fn install_requirements<R: CommandRunner + ?Sized>(
    settings: &Settings,
    runner: &R,
) -> Result<bool, SetupError> {
    if !settings.requirements_file().is_file() {
        log_line("No requirements.txt file found — skipping install");
        return Ok(false);
    }
    log_line("Installing requirements via pip...");
    let out = runner.run(&install_request(settings))?;
    if !out.success() {
        return Err(SetupError::Install { code: out.code });
    }
    log_line("Requirements installed!");
    Ok(true)
}

/// Create the empty marker file. An existing marker is fine.
pub fn save_setup_done(settings: &Settings) -> Result<(), SetupError> {
    crate::util::fs::ensure_file_exists(settings.first_run_file())
        .map_err(|e| SetupError::filesystem(settings.first_run_file(), e))?;
    log_line("Saved 'App installed' status");
    Ok(())
}

pub struct Bootstrapper<'a, R: CommandRunner> {
    settings: &'a Settings,
    runner: R,
    dry_run: bool,
}

impl<'a, R: CommandRunner> Bootstrapper<'a, R> {
    pub fn new(settings: &'a Settings, runner: R) -> Self {
        Self {
            settings,
            runner,
            dry_run: false,
        }
    }

    /// Log the steps a first run would take without touching the filesystem or running tools.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    #[cfg_attr(feature = "trace", instrument(level = "info", err, skip_all, fields(app = self.settings.app_name(), dry_run = self.dry_run)))]
    pub fn run(&self) -> Result<Outcome, SetupError> {
        let settings = self.settings;
        if !is_first_run(settings) {
            log_line("App already installed — skipping setup.");
            return Ok(Outcome::AlreadyInstalled);
        }

        log_line("This is container first run, running setup...");
        if self.dry_run {
            self.log_plan();
            return Ok(Outcome::DryRun);
        }

        clear_output_dir(settings)?;
        clone(settings, &self.runner)?;
        install_requirements(settings, &self.runner)?;
        save_setup_done(settings)?;
        log_success("✅ Setup completed successfully! App ready.");
        Ok(Outcome::Installed)
    }

    fn log_plan(&self) {
        let settings = self.settings;
        if fs::symlink_metadata(settings.app_dir()).is_ok() {
            log_line(&format!(
                "dry-run: would remove {}",
                settings.app_dir().display()
            ));
        }
        log_line(&format!(
            "dry-run: would run: {}",
            clone_request(settings).preview()
        ));
        log_line(&format!(
            "dry-run: would run if {} exists after clone: {}",
            crate::settings::REQUIREMENTS_FILENAME,
            install_request(settings).preview()
        ));
        log_line(&format!(
            "dry-run: would create {}",
            settings.first_run_file().display()
        ));
    }
}
