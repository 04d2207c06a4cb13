use crate::session::{Session, run_session};
use anyhow::{Context, Result, anyhow, bail};
use clap::ArgMatches;
use colored::Colorize;
use siloplan_core::clipboard::{
    Clipboard, MemoryClipboard, SystemClipboard, copy_to_clipboard, entry_copy_block,
};
use siloplan_core::form::{FormField, FormSnapshot, FormState};
use siloplan_core::report::{ReportFormat, render_report, save_report};
use siloplan_core::slug::url_slug;
use siloplan_core::verify::{SILO_RULES, VerificationResult, audit_plan};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{Level, debug};

/// Flag name and the form field it fills
const FIELD_FLAGS: [(&str, FormField); 7] = [
    ("home", FormField::HomePage),
    ("target", FormField::TargetPage),
    ("keyword", FormField::TargetKeyword),
    ("stat-page-1", FormField::StatPage1),
    ("stat-page-2", FormField::StatPage2),
    ("reddit", FormField::Reddit),
    ("perplexity", FormField::Perplexity),
];

pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Load supporting post URLs from a newline-delimited file
pub fn load_posts_from_file(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read posts file {}", path.display()))?;

    if content.lines().all(|line| line.trim().is_empty()) {
        bail!("No posts found in {}", path.display());
    }

    Ok(content)
}

/// Assemble the form from an optional JSON file and the command-line flags
pub fn build_form(args: &ArgMatches) -> Result<FormState> {
    let snapshot = match args.get_one::<String>("input") {
        Some(input) => {
            let path = expand_path(input);
            FormSnapshot::load(&path)
                .with_context(|| format!("Failed to load form from {}", path.display()))?
        }
        None => FormSnapshot::default(),
    };

    let mut form = FormState::from_snapshot(snapshot);

    for (flag, field) in FIELD_FLAGS {
        if let Some(value) = args.get_one::<String>(flag) {
            form.set_field(field, value.as_str());
        }
    }

    if let Some(posts) = args.get_many::<String>("post") {
        for url in posts {
            form.add_post(url.as_str());
        }
    }

    if let Some(posts_file) = args.get_one::<String>("posts-file") {
        let content = load_posts_from_file(&expand_path(posts_file))?;
        let added = form.add_posts_from_bulk(&content);
        debug!("Loaded {} posts from {}", added, posts_file);
    }

    Ok(form)
}

pub fn clipboard_for(no_clipboard: bool) -> Box<dyn Clipboard> {
    if no_clipboard {
        Box::new(MemoryClipboard::new())
    } else {
        Box::new(SystemClipboard::new())
    }
}

pub fn print_verification(verification: &VerificationResult) {
    println!("{}", "VERIFY YOUR SILO".bright_blue().bold());
    for rule in SILO_RULES {
        println!("  {} {}", "•".blue(), rule);
    }
    println!();
    if verification.is_success() {
        println!("{} {}", "✓".green().bold(), verification.display_message());
    } else {
        println!("{} {}", "⚠".yellow().bold(), verification.display_message());
    }
}

pub fn handle_plan(args: &ArgMatches) -> Result<()> {
    let mut clipboard = clipboard_for(args.get_flag("no-clipboard"));
    let stdout = io::stdout();
    let stderr = io::stderr();
    write_plan(args, clipboard.as_mut(), &mut stdout.lock(), &mut stderr.lock())
}

/// Render the plan to `out`, or to the `--output` file, then handle `--copy`.
///
/// When a JSON report goes to `out`, copy output is written to `err` so the
/// report stays parseable.
pub fn write_plan(
    args: &ArgMatches,
    clipboard: &mut dyn Clipboard,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<()> {
    let form = build_form(args)?;
    let plan = form.plan();

    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_name)
        .ok_or_else(|| anyhow!("Unknown report format '{}'", format_name))?;

    let report = render_report(format, &plan, form.verification())
        .context("Failed to render report")?;

    let report_on_out = match args.get_one::<String>("output") {
        Some(output) => {
            let path = expand_path(output);
            save_report(&report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            writeln!(
                out,
                "{} Report saved: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            )?;
            false
        }
        None => {
            write!(out, "{}", report)?;
            true
        }
    };

    if let Some(selector) = args.get_one::<String>("copy") {
        let entry = plan
            .find_entry(selector)
            .ok_or_else(|| anyhow!("No plan entry matches '{}'", selector))?;
        let block = entry_copy_block(entry);
        let notes: &mut dyn Write = if report_on_out && format == ReportFormat::Json {
            err
        } else {
            out
        };

        if copy_to_clipboard(clipboard, &block).is_copied() {
            if args.get_flag("no-clipboard") {
                write!(notes, "{}", block)?;
            } else {
                writeln!(
                    notes,
                    "{} Copied All Links! ({})",
                    "✓".green().bold(),
                    entry.source_label
                )?;
            }
        }
    }

    Ok(())
}

/// Returns whether the silo passed the checks
pub fn handle_check(args: &ArgMatches) -> Result<bool> {
    let form = build_form(args)?;
    let verification = form.verification().clone();
    print_verification(&verification);

    let mut passed = verification.is_success();

    if args.get_flag("audit") {
        let violations = audit_plan(&form.plan());
        println!();
        if violations.is_empty() {
            println!("{} Generated plan follows all three rules", "✓".green().bold());
        } else {
            passed = false;
            for violation in &violations {
                println!("{} {}", "✗".red().bold(), violation);
            }
        }
    }

    Ok(passed)
}

pub fn handle_slug(args: &ArgMatches) -> Result<()> {
    let text = args
        .get_one::<String>("TEXT")
        .ok_or_else(|| anyhow!("TEXT is required"))?;
    println!("{}", url_slug(text));
    Ok(())
}

pub fn handle_session(args: &ArgMatches) -> Result<()> {
    let form = match args.get_one::<String>("input") {
        Some(input) => {
            let path = expand_path(input);
            FormState::from_snapshot(
                FormSnapshot::load(&path)
                    .with_context(|| format!("Failed to load form from {}", path.display()))?,
            )
        }
        None => FormState::new(),
    };

    let no_clipboard = args.get_flag("no-clipboard");
    let mut session =
        Session::new(form, clipboard_for(no_clipboard)).with_echo_copies(no_clipboard);

    println!(
        "  Type '{}' for available commands, '{}' or '{}' to exit.",
        "help".bright_cyan(),
        "exit".bright_cyan(),
        "quit".bright_cyan()
    );
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())
}
