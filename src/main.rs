mod cli;

use std::process::ExitCode;

use clap::Parser;
use setup_app::{
    display_for_setup_error, exit_code_for_setup_error, log_error, Bootstrapper, ExecService,
    SetupError, Settings, StatusReport,
};

use crate::cli::{Cli, Command};

fn fail(e: &SetupError) -> ExitCode {
    log_error(&display_for_setup_error(e));
    ExitCode::from(exit_code_for_setup_error(e))
}

fn load_env_file(path: &std::path::Path) -> Result<(), SetupError> {
    dotenvy::from_path(path).map_err(|e| {
        SetupError::Configuration(format!(
            "failed to load env file {}: {e}",
            path.display()
        ))
    })
}

fn run_setup(dry_run: bool) -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let boot = Bootstrapper::new(&settings, ExecService::new()).dry_run(dry_run);
    match boot.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn run_status(json: bool) -> ExitCode {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let report = StatusReport::collect(&settings);
    if json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.render_text());
    }
    ExitCode::SUCCESS
}

fn run_doctor() -> ExitCode {
    match Settings::from_env() {
        Ok(settings) => {
            setup_app::run_doctor(Some(&settings));
            ExitCode::SUCCESS
        }
        Err(e) => {
            let use_err = setup_app::color_enabled_stderr();
            eprintln!(
                "{}",
                setup_app::paint(use_err, "\x1b[31;1m", &format!("setup-app: {e}"))
            );
            setup_app::run_doctor(None);
            ExitCode::from(exit_code_for_setup_error(&e))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(mode) = cli.color {
        setup_app::set_color_mode(mode);
    }
    let _tracing = setup_app::telemetry_init();

    if let Some(path) = cli.env_file.as_deref() {
        if let Err(e) = load_env_file(path) {
            return fail(&e);
        }
    }

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => run_setup(cli.dry_run),
        Command::Status { json } => run_status(json),
        Command::Doctor => run_doctor(),
    }
}
