//! `threatwatch shell` - Interactive shell mode.
//!
//! Fetches run on a background task and post their outcome back to the shell
//! loop, so the prompt stays usable while a feed is downloading.

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use threatwatch::{spawn_fetch, FetchCompleted, ThreatIntel};
use tokio::sync::mpsc;

use super::{Context, FETCH_FAILED, FETCH_SUCCEEDED, MISSING_URL};
use crate::output::records_table;

const PROMPT: &str = "threatwatch> ";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Fetch a feed, optionally naming its URL
    Fetch(Option<String>),
    /// List high-risk records in the held set
    Analyze,
    /// List every held record
    Show,
    /// Summarize the held set
    Status,
    /// Print available commands
    Help,
    /// Leave the shell
    Exit,
    /// Blank line
    Empty,
    /// Anything else
    Unknown(String),
}

impl ShellCommand {
    /// Parse one input line.
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Self::Empty;
        };

        match command.to_lowercase().as_str() {
            "fetch" | "get" => Self::Fetch(words.next().map(String::from)),
            "analyze" | "analyse" | "risks" => Self::Analyze,
            "show" | "list" => Self::Show,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "exit" | "quit" | "q" => Self::Exit,
            _ => Self::Unknown(command.to_string()),
        }
    }
}

/// Input read by the line editor thread
enum ShellInput {
    Line(String),
    Interrupted,
    Closed,
    Failed(String),
}

struct Shell {
    ctx: Context,
    intel: ThreatIntel,
    completions: mpsc::UnboundedSender<FetchCompleted>,
    in_flight: Option<String>,
}

pub async fn execute(ctx: Context) -> Result<()> {
    println!("Welcome to the {} interactive shell!", "threatwatch".bold());
    println!(
        "Type {} for commands, {} to quit.",
        "help".green(),
        "exit".red()
    );
    if let Some(url) = &ctx.default_url {
        println!("Default feed: {}", url.cyan());
    }
    println!();

    let (completions, mut completed) = mpsc::unbounded_channel();
    let (mut lines, next_prompt) = spawn_line_reader();

    let mut shell = Shell {
        intel: ctx.intel()?,
        ctx,
        completions,
        in_flight: None,
    };

    loop {
        tokio::select! {
            Some(done) = completed.recv() => shell.finish_fetch(done),
            input = lines.recv() => {
                match input {
                    Some(ShellInput::Line(line)) => {
                        if !shell.dispatch(ShellCommand::parse(&line)) {
                            break;
                        }
                    }
                    Some(ShellInput::Interrupted) => {}
                    Some(ShellInput::Closed) | None => break,
                    Some(ShellInput::Failed(err)) => anyhow::bail!("line editor failed: {err}"),
                }
                if next_prompt.send(()).is_err() {
                    break;
                }
            }
        }
    }

    println!("Bye.");
    Ok(())
}

/// Run the line editor on its own thread.
///
/// The thread waits for a signal on the returned sender before showing the
/// next prompt, so command output is never interleaved with it.
fn spawn_line_reader() -> (
    mpsc::UnboundedReceiver<ShellInput>,
    std::sync::mpsc::Sender<()>,
) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (prompt_tx, prompt_rx) = std::sync::mpsc::channel::<()>();

    std::thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(err) => {
                let _ = input_tx.send(ShellInput::Failed(err.to_string()));
                return;
            }
        };

        loop {
            let input = match editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = editor.add_history_entry(line.as_str());
                    }
                    ShellInput::Line(line)
                }
                Err(ReadlineError::Interrupted) => ShellInput::Interrupted,
                Err(ReadlineError::Eof) => ShellInput::Closed,
                Err(err) => ShellInput::Failed(err.to_string()),
            };

            let last = matches!(input, ShellInput::Closed | ShellInput::Failed(_));
            if input_tx.send(input).is_err() || last || prompt_rx.recv().is_err() {
                break;
            }
        }
    });

    (input_rx, prompt_tx)
}

impl Shell {
    /// Run one command; returns false when the shell should exit.
    fn dispatch(&mut self, command: ShellCommand) -> bool {
        match command {
            ShellCommand::Fetch(url) => self.start_fetch(url),
            ShellCommand::Analyze => self.analyze(),
            ShellCommand::Show => self.show(),
            ShellCommand::Status => self.status(),
            ShellCommand::Help => print_help(),
            ShellCommand::Exit => return false,
            ShellCommand::Empty => {}
            ShellCommand::Unknown(word) => {
                println!("{} unknown command '{}'. Type {} for commands.",
                    "Error:".red().bold(),
                    word,
                    "help".green()
                );
            }
        }
        true
    }

    fn start_fetch(&mut self, url: Option<String>) {
        if let Some(running) = &self.in_flight {
            println!("{} still fetching {}", "Busy:".yellow().bold(), running.cyan());
            return;
        }

        let url = match self.ctx.resolve_url(url) {
            Ok(url) => url,
            Err(_) => {
                println!("{} {}", "Error:".red().bold(), MISSING_URL);
                return;
            }
        };

        println!("Fetching {} in the background...", url.cyan());
        spawn_fetch(self.intel.source().clone(), url.clone(), self.completions.clone());
        self.in_flight = Some(url);
    }

    fn finish_fetch(&mut self, done: FetchCompleted) {
        self.in_flight = None;
        let url = done.url.clone();

        println!();
        match self.intel.apply_completed(done) {
            Ok(true) => println!(
                "{} {} records from {}",
                FETCH_SUCCEEDED.green().bold(),
                self.intel.threats().len(),
                url.cyan()
            ),
            Ok(false) => println!("{} ({})", FETCH_FAILED.red().bold(), url),
            Err(err) => println!("{} {}", "Error:".red().bold(), err),
        }
    }

    fn analyze(&self) {
        match self.intel.analyze() {
            Ok(flagged) => super::analyze::print_findings(&flagged),
            Err(err) => println!("{} {}", "Error:".red().bold(), err),
        }
    }

    fn show(&self) {
        let threats = self.intel.threats();
        if threats.is_empty() {
            println!("{}", "No threat data held. Use 'fetch <url>' first.".dimmed());
        } else {
            println!("{}", records_table(threats.records()));
        }
    }

    fn status(&self) {
        let threats = self.intel.threats();

        println!(
            "  {} {}",
            "Source:".bold(),
            threats.source.as_deref().unwrap_or("(none)")
        );
        if let Some(at) = threats.fetched_at {
            println!("  {} {}", "Fetched:".bold(), at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        println!("  {} {}", "Records:".bold(), threats.len());
        match self.intel.summary() {
            Ok(summary) => println!("  {} {}", "High risk:".bold(), summary.high_risk),
            Err(err) => println!("  {} {}", "High risk:".bold(), err),
        }
        if let Some(url) = &self.in_flight {
            println!("  {} {}", "Fetching:".bold(), url.cyan());
        }
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  {}   fetch a feed in the background", "fetch [url]".green());
    println!("  {}       list high-risk records (severity >= 7)", "analyze".green());
    println!("  {}          list every held record", "show".green());
    println!("  {}        summarize the held records", "status".green());
    println!("  {}          leave the shell", "exit".green());
}
