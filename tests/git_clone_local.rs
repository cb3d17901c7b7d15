#![cfg(unix)]

mod support;

use std::fs;
use std::process::{Command, Stdio};

use support::{describe, have_git, init_repo_with_default_user, run, setup_app, FakeTools};

fn git_in(dir: &std::path::Path, args: &[&str]) {
    let st = Command::new("git")
        .args(["-c", "user.name=UT", "-c", "user.email=ut@example.com"])
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .expect("run git");
    assert!(st.success(), "git {:?} failed", args);
}

#[test]
fn test_real_git_clone_of_branch_with_requirements() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let repo = td.path().join("origin");
    init_repo_with_default_user(&repo);
    git_in(&repo, &["checkout", "-b", "release"]);
    fs::write(repo.join("requirements.txt"), "requests\n").unwrap();
    git_in(&repo, &["add", "-A"]);
    git_in(&repo, &["commit", "-m", "release deps"]);
    // Leave the origin on another branch so only --branch can pick up requirements.txt.
    git_in(&repo, &["checkout", "-b", "main-line", "HEAD~1"]);

    let home = td.path().join("home");
    fs::create_dir_all(&home).unwrap();
    let tools = FakeTools::new(&td.path().join("bin"), "", 0);

    let out = run(setup_app(&home)
        .env("GIT_REPOSITORY", &repo)
        .env("GIT_BRANCH", "release")
        .env("SETUP_APP_PIP", &tools.pip));
    assert!(out.status.success(), "{}", describe(&out));

    let app_dir = home.join("python-docker");
    assert!(app_dir.join(".git").is_dir(), "not a clone\n{}", describe(&out));
    assert!(app_dir.join("init.txt").is_file());
    assert!(app_dir.join("requirements.txt").is_file());
    assert_eq!(
        tools.calls(),
        vec![format!(
            "pip install --user -r {}",
            app_dir.join("requirements.txt").display()
        )]
    );
    assert!(home.join(".setup_app_done").is_file());
}

#[test]
fn test_real_git_unknown_branch_fails() {
    if !have_git() {
        eprintln!("skipping: git not found in PATH");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let repo = td.path().join("origin");
    init_repo_with_default_user(&repo);
    let home = td.path().join("home");
    fs::create_dir_all(&home).unwrap();

    let out = run(setup_app(&home)
        .env("GIT_REPOSITORY", &repo)
        .env("GIT_BRANCH", "does-not-exist"));
    assert_eq!(out.status.code(), Some(1), "{}", describe(&out));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("stderr:"), "{stdout}");
    assert!(stdout.contains("does-not-exist"), "{stdout}");
    assert!(!home.join(".setup_app_done").exists());
}
