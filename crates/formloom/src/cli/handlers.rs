use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use formloom_core::config::load_config;

use crate::commands::{check, fields, io, pages, spam, template};

/// Run the selected subcommand, returning the process exit code.
pub fn dispatch(matches: &ArgMatches) -> Result<i32> {
    match matches.subcommand() {
        Some(("pages", sub_m)) => handle_pages(sub_m),
        Some(("check", sub_m)) => handle_check(sub_m),
        Some(("spam", sub_m)) => handle_spam(sub_m),
        Some(("template", sub_m)) => handle_template(sub_m),
        Some(("fields", _)) => handle_fields(),
        _ => anyhow::bail!("Unknown command. Run 'formloom --help' for usage."),
    }
}

/// Exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<formloom_core::Error>()
        .map_or(1, formloom_core::Error::exit_code)
}

fn path_arg<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a Path> {
    matches
        .get_one::<String>(name)
        .map(Path::new)
        .with_context(|| format!("missing argument <{name}>"))
}

fn print_json<T: serde::Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to render report")?;
    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}

fn handle_pages(matches: &ArgMatches) -> Result<i32> {
    let form = io::read_form(path_arg(matches, "form")?)?;
    print_json(&pages::run(&form))?;
    Ok(0)
}

fn handle_check(matches: &ArgMatches) -> Result<i32> {
    let config = load_config()?;
    let form = io::read_form(path_arg(matches, "form")?)?;
    let responses = io::read_responses(path_arg(matches, "responses")?)?;
    let report = check::run(&form, &responses, &config);
    print_json(&report)?;
    Ok(i32::from(!report.valid))
}

fn handle_spam(matches: &ArgMatches) -> Result<i32> {
    let config = load_config()?;
    let responses = io::read_responses(path_arg(matches, "responses")?)?;
    let form = matches
        .get_one::<String>("form")
        .map(|path| io::read_form(Path::new(path)))
        .transpose()?;
    print_json(&spam::run(&responses, form.as_ref(), &config))?;
    Ok(0)
}

fn handle_template(matches: &ArgMatches) -> Result<i32> {
    let name = matches
        .get_one::<String>("name")
        .context("missing argument <name>")?;
    print_json(&template::run(name)?)?;
    Ok(0)
}

fn handle_fields() -> Result<i32> {
    print_json(&fields::run())?;
    Ok(0)
}
