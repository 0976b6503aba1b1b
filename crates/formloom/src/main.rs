//! Formloom CLI
//!
//! Binary name: `formloom`

use std::process;

use formloom::cli::{build_cli, handlers};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let code = match handlers::dispatch(&matches) {
        Ok(code) => code,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {err:#}");
            }
            handlers::exit_code(&err)
        }
    };

    #[allow(clippy::exit)]
    process::exit(code);
}
