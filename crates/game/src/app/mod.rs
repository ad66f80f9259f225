use std::process::ExitCode;

use tracing::error;

mod bootstrap;
mod config;
mod gameplay;
mod loop_runner;

pub(crate) fn run() -> ExitCode {
    bootstrap::init_tracing();
    match bootstrap::build_app() {
        Ok(app) => loop_runner::run(app),
        Err(err) => {
            error!(error = %err, env_var = config::CONFIG_ENV_VAR, "config_failed");
            ExitCode::FAILURE
        }
    }
}
