use colored::Colorize;
use siloplan::commands::command_argument_builder;
use siloplan::handlers;
use siloplan_core::print_banner;

fn main() {
    let chosen_command = command_argument_builder().get_matches();
    let quiet = chosen_command.get_flag("quiet");
    handlers::init_logging(chosen_command.get_flag("verbose"));

    let result = match chosen_command.subcommand() {
        None => {
            // No subcommand provided, just show the banner
            if !quiet {
                print_banner();
            }
            Ok(())
        }
        Some(("plan", primary_command)) => handlers::handle_plan(primary_command),
        Some(("check", primary_command)) => match handlers::handle_check(primary_command) {
            Ok(true) => Ok(()),
            Ok(false) => std::process::exit(2),
            Err(e) => Err(e),
        },
        Some(("slug", primary_command)) => handlers::handle_slug(primary_command),
        Some(("session", primary_command)) => {
            if !quiet {
                print_banner();
            }
            handlers::handle_session(primary_command)
        }
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}
