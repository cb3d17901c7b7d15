/*!
First-run container bootstrap.

On container start: if the marker file `~/.setup_app_done` is absent, clear
`~/<APP_NAME>`, clone `GIT_REPOSITORY` (optionally restricted to `GIT_BRANCH`)
into it, install `requirements.txt` with pip when the app ships one, and
write the marker. Later starts see the marker and do nothing.

Modules:
- settings: environment → immutable `Settings`
- bootstrap: the four steps and the `Bootstrapper` orchestrator
- status: read-only `status` / `doctor` reports
- errors: `SetupError` and exit-code mapping
- log / color: timestamped stdout lines with optional color
- util: external command execution and filesystem helpers
*/

pub mod bootstrap;
mod color;
mod errors;
pub mod log;
pub mod settings;
pub mod status;
mod telemetry;
pub mod util;

pub use bootstrap::{
    clear_output_dir, clone, clone_request, install_request, install_requirements, is_first_run,
    save_setup_done, Bootstrapper, Outcome,
};
pub use color::{
    color_enabled_stderr, color_enabled_stdout, paint, set_color_mode, ColorMode,
};
pub use errors::{display_for_setup_error, exit_code_for_setup_error, SetupError};
pub use log::{log_error, log_line, log_success};
pub use settings::Settings;
pub use status::{run_doctor, StatusReport};
pub use telemetry::telemetry_init;
pub use util::{CommandRunner, ExecOutput, ExecRequest, ExecService};
