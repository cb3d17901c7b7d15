use std::ffi::OsString;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Anything that can execute an [`ExecRequest`] to completion.
///
/// The bootstrap steps only talk to external tools through this seam.
pub trait CommandRunner {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput> {
        (**self).run(request)
    }
}

/// Blocking command execution on the host. No timeout: the child runs to completion.
#[derive(Debug, Clone, Default)]
pub struct ExecService;

impl ExecService {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ExecService {
    fn run(&self, request: &ExecRequest) -> Result<ExecOutput> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        for (key, value) in &request.env {
            cmd.env(key, value);
        }

        if request.capture_output {
            let out = cmd
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .output()
                .with_context(|| {
                    format!(
                        "failed to spawn {:?} with args {:?}",
                        request.program, request.args
                    )
                })?;
            Ok(ExecOutput {
                code: out.status.code(),
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            })
        } else {
            let status = cmd.status().with_context(|| {
                format!(
                    "failed to spawn {:?} with args {:?}",
                    request.program, request.args
                )
            })?;
            Ok(ExecOutput {
                code: status.code(),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecRequest {
    program: OsString,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
    capture_output: bool,
}

impl ExecRequest {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    pub fn captures_output(&self) -> bool {
        self.capture_output
    }

    /// Program followed by its arguments, lossily converted for logging and assertions.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy().into_owned())
            .collect()
    }

    /// Shell-quoted preview of the command line.
    pub fn preview(&self) -> String {
        super::shell_join(&self.argv())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Exit code; `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}
