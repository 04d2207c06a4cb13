// Interactive planning session over a line-based terminal

use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use siloplan_core::clipboard::{Clipboard, copy_to_clipboard, entry_copy_block};
use siloplan_core::form::{FormField, FormState, copy_all_key, copy_link_key, copy_url_key};
use siloplan_core::model::{LinkPlan, LinkPlanEntry};
use siloplan_core::report::{ReportFormat, render_report, save_report};
use siloplan_core::verify::SILO_RULES;
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::debug;

use crate::handlers::expand_path;

const HELP: &[(&str, &str)] = &[
    ("home <url>", "Set the home page URL"),
    ("target <url>", "Set the target page URL"),
    ("keyword <text>", "Set the primary keyword"),
    ("stat1 <url> / stat2 <url>", "Set the stat pages bounding the chain"),
    ("reddit <url> / perplexity <url>", "Set the outside-in discussion links"),
    ("add [url]", "Add a supporting post (blank if no URL)"),
    ("bulk", "Paste URLs one per line, finish with a single '.'"),
    ("title <n> [text]", "Change or clear the title of post n"),
    ("url <n> <url>", "Change the URL of post n"),
    ("remove <n>", "Remove post n"),
    ("posts", "List supporting posts"),
    ("fields", "Show the core page fields"),
    ("chain", "Show the ordered silo chain"),
    ("plan", "Show the linking plan"),
    ("check", "Verify the silo"),
    ("copy <entry>", "Copy all links of a plan entry"),
    ("copy-url <entry>", "Copy the source URL of a plan entry"),
    ("copy-link <entry> <n>", "Copy the URL of link n of a plan entry"),
    ("export <path> [format]", "Save the plan as text, json or markdown"),
    ("exit / quit", "Leave the session"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    form: FormState,
    clipboard: Box<dyn Clipboard>,
    echo_copies: bool,
}

impl Session {
    pub fn new(form: FormState, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            form,
            clipboard,
            echo_copies: false,
        }
    }

    /// Also print whatever gets copied
    pub fn with_echo_copies(mut self, echo: bool) -> Self {
        self.echo_copies = echo;
        self
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Run one command line. `input` feeds multi-line commands such as `bulk`.
    pub fn execute(
        &mut self,
        line: &str,
        input: &mut dyn BufRead,
        out: &mut dyn Write,
    ) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        debug!("Session command '{}'", command);

        if let Some(field) = FormField::from_str(command) {
            self.form.set_field(field, rest);
            writeln!(out, "{} {}: {}", "✓".green().bold(), field.label(), rest)?;
            return Ok(Flow::Continue);
        }

        match command.to_lowercase().as_str() {
            "help" => self.print_help(out)?,
            "exit" | "quit" => return Ok(Flow::Exit),
            "add" => {
                let post = self.form.add_post(rest);
                let id = post.id.clone();
                writeln!(
                    out,
                    "{} Added Supporting Post #{} ({})",
                    "✓".green().bold(),
                    self.form.posts().len(),
                    id
                )?;
                self.print_status(out)?;
            }
            "bulk" => {
                let text = read_bulk(input)?;
                let added = self.form.add_posts_from_bulk(&text);
                writeln!(out, "{} Added {} posts", "✓".green().bold(), added)?;
                self.print_status(out)?;
            }
            "title" => {
                // An empty title falls back to the URL for anchor text
                let (selector, title) = rest
                    .split_once(char::is_whitespace)
                    .map(|(selector, title)| (selector, title.trim()))
                    .unwrap_or((rest, ""));
                let id = self.form.resolve_post(selector)?;
                self.form.set_post_title(&id, title);
                writeln!(out, "{} Post {} title: {}", "✓".green().bold(), selector, title)?;
            }
            "url" => {
                let (selector, url) = split_argument(rest, "url <n> <url>")?;
                let id = self.form.resolve_post(selector)?;
                self.form.set_post_url(&id, url);
                writeln!(out, "{} Post {} URL: {}", "✓".green().bold(), selector, url)?;
            }
            "remove" => {
                let id = self.form.resolve_post(rest)?;
                self.form.remove_post(&id);
                writeln!(out, "{} Removed post {}", "✓".green().bold(), rest)?;
                self.print_status(out)?;
            }
            "posts" => self.print_posts(out)?,
            "fields" => self.print_fields(out)?,
            "chain" => self.print_chain(out)?,
            "plan" => self.print_plan(out)?,
            "check" => self.print_check(out)?,
            "copy" => {
                let plan = self.form.plan();
                let entry = find_entry(&plan, rest)?;
                let key = copy_all_key(&entry.id);
                if self.copy(&key, &entry_copy_block(entry), out)? {
                    writeln!(out, "{} Copied All Links!", "✓".green().bold())?;
                }
            }
            "copy-url" => {
                let plan = self.form.plan();
                let entry = find_entry(&plan, rest)?;
                let key = copy_url_key(&entry.id);
                if self.copy(&key, &entry.source_url, out)? {
                    writeln!(out, "{} Copied {}", "✓".green().bold(), entry.source_url)?;
                }
            }
            "copy-link" => {
                let (selector, link) = split_argument(rest, "copy-link <entry> <n>")?;
                let plan = self.form.plan();
                let entry = find_entry(&plan, selector)?;
                let link_idx = link
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .filter(|idx| *idx < entry.target_links.len())
                    .ok_or_else(|| anyhow!("No link {} on entry {}", link, selector))?;
                let url = entry.target_links[link_idx].url.clone();
                let key = copy_link_key(&entry.id, link_idx);
                if self.copy(&key, &url, out)? {
                    writeln!(out, "{} Copied {}", "✓".green().bold(), url)?;
                }
            }
            "export" => {
                let (path, format) = match rest.split_once(char::is_whitespace) {
                    Some((path, format)) => (path, format.trim()),
                    None => (rest, "text"),
                };
                if path.is_empty() {
                    bail!("usage: export <path> [format]");
                }
                let format = ReportFormat::from_str(format)
                    .ok_or_else(|| anyhow!("Unknown report format '{}'", format))?;
                let report = render_report(format, &self.form.plan(), self.form.verification())?;
                let path = expand_path(path);
                save_report(&report, &path)?;
                writeln!(
                    out,
                    "{} Report saved: {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                )?;
            }
            other => bail!("Unknown command '{}'. Type 'help' for available commands.", other),
        }

        Ok(Flow::Continue)
    }

    fn copy(&mut self, key: &str, text: &str, out: &mut dyn Write) -> Result<bool> {
        let outcome = copy_to_clipboard(self.clipboard.as_mut(), text);
        self.form.record_copy(key, outcome, Instant::now());
        if self.echo_copies {
            writeln!(out, "{}", text.trim_end())?;
        }
        Ok(outcome.is_copied())
    }

    fn print_help(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", "COMMANDS".bright_blue().bold())?;
        for (usage, description) in HELP {
            writeln!(out, "  {:<34} {}", usage.bright_cyan(), description)?;
        }
        Ok(())
    }

    fn print_status(&self, out: &mut dyn Write) -> Result<()> {
        let verification = self.form.verification();
        let marker = if verification.is_success() {
            "✓".green().bold()
        } else {
            "⚠".yellow().bold()
        };
        writeln!(out, "{} {}", marker, verification.display_message())?;
        Ok(())
    }

    fn print_posts(&self, out: &mut dyn Write) -> Result<()> {
        if self.form.posts().is_empty() {
            writeln!(out, "  (no supporting posts)")?;
            return Ok(());
        }
        for (idx, post) in self.form.posts().iter().enumerate() {
            writeln!(out, "Supporting Post #{}", idx + 1)?;
            writeln!(out, "  Title: {}", post.title)?;
            writeln!(out, "  URL:   {}", post.url)?;
        }
        Ok(())
    }

    fn print_fields(&self, out: &mut dyn Write) -> Result<()> {
        for field in [
            FormField::HomePage,
            FormField::TargetPage,
            FormField::TargetKeyword,
            FormField::StatPage1,
            FormField::StatPage2,
            FormField::Reddit,
            FormField::Perplexity,
        ] {
            writeln!(out, "  {:<16} {}", field.label(), self.form.field(field))?;
        }
        Ok(())
    }

    fn print_chain(&self, out: &mut dyn Write) -> Result<()> {
        let plan = self.form.plan();
        writeln!(out, "{}", plan.silo_type.as_str().bright_white().bold())?;
        for (idx, page) in plan.chain.iter().enumerate() {
            writeln!(out, "  {}. {} - {}", idx + 1, page.label(), page.url)?;
        }
        Ok(())
    }

    fn print_plan(&self, out: &mut dyn Write) -> Result<()> {
        let plan = self.form.plan();
        if plan.is_empty() {
            writeln!(out, "  (no links yet)")?;
            return Ok(());
        }

        writeln!(
            out,
            "This is a {}. Use this list to implement the internal links in your articles.",
            plan.silo_type.as_str().bold()
        )?;
        writeln!(out)?;

        let copied = self.form.copied_key(Instant::now()).map(str::to_string);
        for (idx, entry) in plan.entries.iter().enumerate() {
            writeln!(
                out,
                "[{}] From: {} - {}",
                idx + 1,
                entry.source_label.bright_white().bold(),
                entry.source_url
            )?;
            for (link_idx, link) in entry.target_links.iter().enumerate() {
                writeln!(out, "    {}. Link to:     {}", link_idx + 1, link.url)?;
                writeln!(out, "       Anchor Text: {}", link.anchor_text)?;
            }
            let label = if copied.as_deref() == Some(copy_all_key(&entry.id).as_str()) {
                "Copied All Links!"
            } else {
                "Copy All Links"
            };
            writeln!(out, "    {} copy {}", label.dimmed(), idx + 1)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn print_check(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", "VERIFY YOUR SILO".bright_blue().bold())?;
        for rule in SILO_RULES {
            writeln!(out, "  {} {}", "•".blue(), rule)?;
        }
        self.print_status(out)
    }
}

/// Read and run commands until `exit` or end of input. Command errors are
/// reported and the session continues.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut out: W,
) -> Result<()> {
    loop {
        write!(out, "{} ", "silo>".bright_cyan().bold())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        match session.execute(&line, &mut input, &mut out) {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => writeln!(out, "{} {}", "✗".red().bold(), e)?,
        }
    }
    Ok(())
}

fn read_bulk(input: &mut dyn BufRead) -> Result<String> {
    let mut text = String::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim() == "." {
            break;
        }
        text.push_str(&line);
    }
    Ok(text)
}

fn split_argument<'a>(rest: &'a str, usage: &str) -> Result<(&'a str, &'a str)> {
    rest.split_once(char::is_whitespace)
        .map(|(first, second)| (first, second.trim()))
        .ok_or_else(|| anyhow!("usage: {}", usage))
}

fn find_entry<'a>(plan: &'a LinkPlan, selector: &str) -> Result<&'a LinkPlanEntry> {
    plan.find_entry(selector)
        .ok_or_else(|| anyhow!("No plan entry matches '{}'", selector))
}
