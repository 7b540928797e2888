//! Label command - review records in the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use briefmark::{Mark, ReviewConfig, ReviewSession, SessionView};
use briefmark::persistence::snapshot_path;
use colored::Colorize;

const HELP: &str = "Commands: 1-5 mark and advance, p previous, n next, e export, s show, h help, q quit";

/// A reviewer command typed at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Mark(Mark),
    Previous,
    Next,
    Export,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    if let Ok(value) = line.parse::<i64>() {
        return Mark::try_from(value)
            .map(Command::Mark)
            .map_err(|e| e.to_string());
    }

    match line.to_lowercase().as_str() {
        "p" | "prev" | "previous" => Ok(Command::Previous),
        "n" | "next" => Ok(Command::Next),
        "e" | "export" => Ok(Command::Export),
        "" | "s" | "show" => Ok(Command::Show),
        "h" | "help" | "?" => Ok(Command::Help),
        "q" | "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("Unknown command: {}", other)),
    }
}

/// Terminal front end over one review session.
pub struct TerminalReview {
    session: ReviewSession,
    config: ReviewConfig,
}

impl TerminalReview {
    pub fn new(session: ReviewSession, config: ReviewConfig) -> Self {
        Self { session, config }
    }

    pub fn session(&self) -> &ReviewSession {
        &self.session
    }

    /// Read commands until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut out: W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        writeln!(out, "{}", HELP.dimmed())?;
        render(&self.session.view()?, &mut out)?;
        prompt(&mut out)?;

        for line in input.lines() {
            let line = line?;
            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(message) => {
                    writeln!(out, "{} {}", "Error:".red(), message)?;
                    prompt(&mut out)?;
                    continue;
                }
            };

            if command == Command::Quit {
                break;
            }
            self.handle(command, &mut out)?;
            prompt(&mut out)?;
        }

        let path = self.save_snapshot()?;
        writeln!(out)?;
        writeln!(out, "Session saved to {}", path.display())?;
        Ok(())
    }

    fn handle<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let changed = match command {
            Command::Mark(mark) => {
                self.session.set_label(mark)?;
                true
            }
            Command::Previous => {
                let moved = self.session.go_previous();
                if !moved {
                    writeln!(out, "{}", "Already at the first record.".yellow())?;
                }
                moved
            }
            Command::Next => {
                let moved = self.session.go_next();
                if !moved {
                    let reason = if self.session.cursor() + 1 == self.session.len() {
                        "Already at the last record."
                    } else {
                        "Mark this record before moving on."
                    };
                    writeln!(out, "{}", reason.yellow())?;
                }
                moved
            }
            Command::Export => {
                if self.session.all_labeled() {
                    let path = self.session.save_export(&self.config.output_dir)?;
                    writeln!(out, "{} {}", "Exported".green().bold(), path.display())?;
                } else {
                    writeln!(
                        out,
                        "{} {} of {} records marked, mark the rest first.",
                        "Not yet:".yellow(),
                        self.session.labeled_count(),
                        self.session.len()
                    )?;
                }
                return Ok(());
            }
            Command::Show => false,
            Command::Help => {
                writeln!(out, "{}", HELP)?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };

        if changed && self.config.autosave {
            self.save_snapshot()?;
        }
        render(&self.session.view()?, out)?;
        Ok(())
    }

    fn save_snapshot(&self) -> briefmark::Result<PathBuf> {
        let path = snapshot_path(&self.config.output_dir, self.session.source());
        self.session.save_snapshot(&path)?;
        Ok(path)
    }
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Draw the current record.
fn render<W: Write>(view: &SessionView, out: &mut W) -> io::Result<()> {
    let bar_width = 30;
    let filled = (view.progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled.min(bar_width));

    writeln!(out)?;
    writeln!(
        out,
        "{} Record {} of {} ({} marked)",
        bar.cyan(),
        view.position,
        view.total,
        view.labeled
    )?;
    writeln!(out)?;
    writeln!(out, "{}", "Description".yellow().bold())?;
    writeln!(out, "{}", view.description)?;
    writeln!(out)?;
    writeln!(out, "{}", "Short description".yellow().bold())?;
    writeln!(out, "{}", view.short_description)?;
    writeln!(out)?;

    let ratings: Vec<String> = view
        .ratings
        .iter()
        .map(|r| {
            if r.selected {
                format!("[{}]", r.value).green().bold().to_string()
            } else {
                format!(" {} ", r.value)
            }
        })
        .collect();
    writeln!(out, "Mark: {}", ratings.join(" "))?;

    let mut hints = Vec::new();
    if view.can_go_previous {
        hints.push("p previous");
    }
    if view.can_go_next {
        hints.push("n next");
    }
    if view.all_labeled {
        hints.push("e export");
    }
    if !hints.is_empty() {
        writeln!(out, "{}", hints.join(", ").dimmed())?;
    }

    if view.all_labeled {
        writeln!(
            out,
            "{} Export with 'e' to write {}",
            "All records are marked.".green(),
            view.export_name
        )?;
    }

    Ok(())
}

pub fn run(
    file: PathBuf,
    config: ReviewConfig,
    fresh: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (session, resumed) = super::open_session(&file, &config, fresh)?;

    if resumed {
        println!(
            "{} Resuming at record {} of {}",
            "Note:".yellow(),
            session.cursor() + 1,
            session.len()
        );
    } else if verbose {
        println!("Loaded {} records from {}", session.len(), file.display());
    }

    let mut review = TerminalReview::new(session, config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    review.run(stdin.lock(), stdout.lock())
}
