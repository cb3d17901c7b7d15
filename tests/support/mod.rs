/*!
Test support helpers shared across integration tests.

- have_git(): check git availability on PATH
- init_repo_with_default_user(dir): initialize a git repository with one commit
- write_script(dir, name, body): executable shell script standing in for git / pip
- FakeTools: fake git / pip pair that record their invocations into one log
- setup_app(home): Command for the built binary with a clean, HOME-scoped environment

These helpers do not print skip messages themselves so tests keep their own
"skipping: ..." outputs.
*/

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Return true if `git` is available on PATH.
pub fn have_git() -> bool {
    Command::new("git")
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Initialize a git repository in `dir` with one commit containing `init.txt`.
pub fn init_repo_with_default_user(dir: &Path) {
    fs::create_dir_all(dir).expect("create repo dir");
    let git = |args: &[&str]| {
        let st = Command::new("git")
            .args(["-c", "user.name=UT", "-c", "user.email=ut@example.com"])
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .expect("run git");
        assert!(st.success(), "git {:?} failed", args);
    };
    git(&["init"]);
    fs::write(dir.join("init.txt"), "x\n").expect("write init.txt");
    git(&["add", "-A"]);
    git(&["commit", "-m", "init"]);
}

/// Write an executable `#!/bin/sh` script.
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    fs::create_dir_all(dir).expect("create script dir");
    let p = dir.join(name);
    fs::write(&p, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perm = fs::metadata(&p).expect("stat script").permissions();
    perm.set_mode(0o755);
    fs::set_permissions(&p, perm).expect("chmod script");
    p
}

/// Fake git and pip that append one line per invocation to `log`.
pub struct FakeTools {
    pub git: PathBuf,
    pub pip: PathBuf,
    pub log: PathBuf,
}

impl FakeTools {
    /// `git_extra` runs after the destination directory was created (`$dest` is set);
    /// `pip_exit` is the installer's exit code.
    #[cfg(unix)]
    pub fn new(bin_dir: &Path, git_extra: &str, pip_exit: i32) -> Self {
        let log = bin_dir.join("calls.log");
        let git_body = format!(
            "printf 'git %s\\n' \"$*\" >> '{log}'\nfor dest; do :; done\nmkdir -p \"$dest\"\n{git_extra}",
            log = log.display()
        );
        let pip_body = format!(
            "printf 'pip %s\\n' \"$*\" >> '{log}'\nexit {pip_exit}",
            log = log.display()
        );
        let git = write_script(bin_dir, "fake-git", &git_body);
        let pip = write_script(bin_dir, "fake-pip", &pip_body);
        FakeTools { git, pip, log }
    }

    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

/// Command for the setup-app binary with HOME pointed at `home` and configuration variables cleared.
pub fn setup_app(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_setup-app"));
    cmd.env("HOME", home).env("NO_COLOR", "1");
    for key in [
        "APP_NAME",
        "GIT_REPOSITORY",
        "GIT_BRANCH",
        "SETUP_APP_GIT",
        "SETUP_APP_PIP",
        "SETUP_APP_COLOR",
        "SETUP_APP_TRACE",
        "RUST_LOG",
    ] {
        cmd.env_remove(key);
    }
    cmd
}

pub fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run setup-app")
}

pub fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn describe(out: &Output) -> String {
    format!(
        "status: {:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}

/// True if `line` starts with `[YY/MM/DD HH:MM:SS] `.
pub fn has_log_prefix(line: &str) -> bool {
    let b = line.as_bytes();
    if b.len() < 20 {
        return false;
    }
    let digits = [1, 2, 4, 5, 7, 8, 10, 11, 13, 14, 16, 17];
    b[0] == b'['
        && b[3] == b'/'
        && b[6] == b'/'
        && b[9] == b' '
        && b[12] == b':'
        && b[15] == b':'
        && b[18] == b']'
        && b[19] == b' '
        && digits.iter().all(|&i| b[i].is_ascii_digit())
}

/// Sorted entry names directly under `dir`.
pub fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|rd| {
            rd.filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
