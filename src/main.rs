use auto_gif_convert::component::GifConverter;
use auto_gif_convert::config::types::Config;
use auto_gif_convert::init;
use auto_gif_convert::signal::setup_shutdown_signal;
use console::style;
use log::{info, warn};
use rust_i18n::t;
use std::env;
use std::process::ExitCode;

#[macro_use]
extern crate rust_i18n;

i18n!("locales", fallback = "en-US");

fn main() -> ExitCode {
    init::init();
    let shutdown_signal = setup_shutdown_signal();

    // Load config and set locale
    let config = match Config::new() {
        Ok(config) => config,
        Err(e) => return report_fatal(&e),
    };
    rust_i18n::set_locale(config.settings.language.as_str());

    let current_dir = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => return report_fatal(&anyhow::Error::from(e)),
    };

    let fail_on_error = config.settings.gif_converter.fail_on_error;
    let converter = GifConverter::new(config, shutdown_signal);

    match converter.run(&current_dir) {
        Ok(results) => {
            let failed = results.iter().filter(|r| !r.outcome.is_success()).count();
            if failed > 0 {
                warn!("{}", t!("main.failures", count = failed));
                if fail_on_error {
                    return ExitCode::FAILURE;
                }
            }
            info!("Program exited normally");
            ExitCode::SUCCESS
        }
        Err(e) => report_fatal(&e),
    }
}

fn report_fatal(error: &anyhow::Error) -> ExitCode {
    warn!("Program error: {error}");
    eprintln!(
        "{} {}",
        style(t!("main.error_prefix")).red().bold(),
        error
    );
    ExitCode::FAILURE
}
