pub mod handlers;

use clap::{Arg, Command};

pub fn build_cli() -> Command {
    Command::new("formloom")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect, validate and spam-check form definitions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(cmd_pages())
        .subcommand(cmd_check())
        .subcommand(cmd_spam())
        .subcommand(cmd_template())
        .subcommand(cmd_fields())
}

fn form_arg() -> Arg {
    Arg::new("form")
        .value_name("FORM.json")
        .help("Form definition as JSON")
        .required(true)
}

fn responses_arg() -> Arg {
    Arg::new("responses")
        .value_name("RESPONSES.json")
        .help("Answers as a JSON object keyed by field id")
        .required(true)
}

fn cmd_pages() -> Command {
    Command::new("pages")
        .about("Show how a form splits into pages")
        .arg(form_arg())
}

fn cmd_check() -> Command {
    Command::new("check")
        .about("Validate answers against every page of a form and score them for spam")
        .arg(form_arg())
        .arg(responses_arg())
}

fn cmd_spam() -> Command {
    Command::new("spam")
        .about("Score answers for spam")
        .arg(responses_arg())
        .arg(
            Arg::new("form")
                .long("form")
                .value_name("FORM.json")
                .help("Form definition, enables field-type aware checks"),
        )
}

fn cmd_template() -> Command {
    Command::new("template")
        .about("Print a starter form definition")
        .arg(
            Arg::new("name")
                .value_name("NAME")
                .help("blank, contact, feedback, registration or survey")
                .required(true),
        )
}

fn cmd_fields() -> Command {
    Command::new("fields").about("List field types")
}
