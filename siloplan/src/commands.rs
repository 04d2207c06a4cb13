use clap::{arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("siloplan")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("siloplan")
        .about("Plan the internal links of a reverse content silo")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Enable debug logging on stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            form_arguments(
                command!("plan")
                    .about("Generate the linking plan for a target page and its supporting posts"),
            )
            .arg(
                arg!(-f --"format" <FORMAT>)
                    .required(false)
                    .help("Report format: text, json, markdown")
                    .value_parser(["text", "json", "markdown", "md"])
                    .default_value("text"),
            )
            .arg(
                arg!(-o --"output" <PATH>)
                    .required(false)
                    .help("Save report to file (default: display to screen)"),
            )
            .arg(
                arg!(--"copy" <ENTRY>)
                    .required(false)
                    .help("Copy the links of one entry (number or id) to the clipboard"),
            )
            .arg(
                arg!(--"no-clipboard")
                    .required(false)
                    .help("Print copied text instead of using the system clipboard")
                    .action(clap::ArgAction::SetTrue),
            ),
        )
        .subcommand(
            form_arguments(
                command!("check").about("Check whether the supporting posts form a valid silo"),
            )
            .arg(
                arg!(--"audit")
                    .required(false)
                    .help("Also audit the generated plan against the three silo rules")
                    .action(clap::ArgAction::SetTrue),
            ),
        )
        .subcommand(
            command!("slug")
                .about("Show the anchor text slug derived from a URL or title")
                .arg(arg!(<TEXT>).required(true).help("URL or title to derive a slug from")),
        )
        .subcommand(
            command!("session")
                .about("Interactively build a silo plan")
                .arg(
                    arg!(-i --"input" <PATH>)
                        .required(false)
                        .help("JSON form file to start the session from"),
                )
                .arg(
                    arg!(--"no-clipboard")
                        .required(false)
                        .help("Print copied text instead of using the system clipboard")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
}

/// Arguments shared by every command that builds a form
fn form_arguments(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(-i --"input" <PATH>)
            .required(false)
            .help("JSON form file; flags below override its fields"),
    )
    .arg(arg!(--"home" <URL>).required(false).help("Home page URL"))
    .arg(arg!(--"target" <URL>).required(false).help("Target page URL"))
    .arg(
        arg!(-k --"keyword" <KEYWORD>)
            .required(false)
            .help("Primary keyword, used verbatim as anchor text to the target page"),
    )
    .arg(arg!(--"stat-page-1" <URL>).required(false).help("Stat page placed first in the chain"))
    .arg(arg!(--"stat-page-2" <URL>).required(false).help("Stat page placed last in the chain"))
    .arg(arg!(--"reddit" <URL>).required(false).help("Reddit discussion URL"))
    .arg(arg!(--"perplexity" <URL>).required(false).help("Perplexity answer URL"))
    .arg(
        arg!(-p --"post" <URL>)
            .required(false)
            .help("Supporting post URL, in chain order (repeatable)")
            .action(clap::ArgAction::Append),
    )
    .arg(
        arg!(-P --"posts-file" <PATH>)
            .required(false)
            .help("Path to a newline-delimited file of supporting post URLs"),
    )
}
