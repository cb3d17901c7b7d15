//! Read-only reports: `status` (setup state) and `doctor` (environment diagnostics).

use std::path::PathBuf;

use serde::Serialize;

use crate::bootstrap::is_first_run;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub app_name: String,
    pub git_repository: String,
    pub git_branch: Option<String>,
    pub app_dir: PathBuf,
    pub first_run_file: PathBuf,
    pub requirements_file: PathBuf,
    pub setup_done: bool,
    pub app_dir_present: bool,
    pub requirements_present: bool,
}

impl StatusReport {
    pub fn collect(settings: &Settings) -> Self {
        StatusReport {
            app_name: settings.app_name().to_string(),
            git_repository: settings.git_repository().to_string(),
            git_branch: settings.git_branch().map(str::to_string),
            app_dir: settings.app_dir().to_path_buf(),
            first_run_file: settings.first_run_file().to_path_buf(),
            requirements_file: settings.requirements_file().to_path_buf(),
            setup_done: !is_first_run(settings),
            app_dir_present: settings.app_dir().is_dir(),
            requirements_present: settings.requirements_file().is_file(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn render_text(&self) -> String {
        let yes_no = |b: bool| if b { "yes" } else { "no" };
        let mut out = String::new();
        out.push_str(&format!("app: {}\n", self.app_name));
        out.push_str(&format!("repository: {}\n", self.git_repository));
        out.push_str(&format!(
            "branch: {}\n",
            self.git_branch.as_deref().unwrap_or("(remote default)")
        ));
        out.push_str(&format!("app dir: {}\n", self.app_dir.display()));
        out.push_str(&format!("setup done: {}\n", yes_no(self.setup_done)));
        out.push_str(&format!("app dir present: {}\n", yes_no(self.app_dir_present)));
        out.push_str(&format!(
            "requirements.txt present: {}\n",
            yes_no(self.requirements_present)
        ));
        out
    }
}

/// Resolve `program` on PATH (or as a path) for diagnostics.
pub fn tool_path(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

/// Print environment diagnostics to stderr. Never mutates anything.
pub fn run_doctor(settings: Option<&Settings>) {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("setup-app doctor");
    eprintln!("  version: v{}", version);
    eprintln!(
        "  build: {} {} ({}, {})",
        env!("SETUP_APP_BUILD_DATE"),
        env!("SETUP_APP_BUILD_TARGET"),
        env!("SETUP_APP_BUILD_PROFILE"),
        env!("SETUP_APP_BUILD_RUSTC")
    );
    eprintln!("  host: {} / {}", std::env::consts::OS, std::env::consts::ARCH);
    match home::home_dir() {
        Some(h) => eprintln!("  home: {}", h.display()),
        None => eprintln!("  home: (unknown)"),
    }

    let Some(settings) = settings else {
        eprintln!("  settings: unavailable (see error above)");
        eprintln!("doctor: completed diagnostics.");
        return;
    };

    eprintln!("  app dir: {}", settings.app_dir().display());
    eprintln!("  marker: {}", settings.first_run_file().display());
    for program in [settings.git_program(), settings.pip_program()] {
        match tool_path(program) {
            Some(p) => eprintln!("  {}: {}", program, p.display()),
            None => eprintln!("  {}: not found", program),
        }
    }
    eprintln!(
        "  setup done: {}",
        if is_first_run(settings) { "no" } else { "yes" }
    );
    eprintln!("doctor: completed diagnostics.");
}
