// Interactive session — a line-oriented version of the analyzer form.
//
// Typing a URL and pressing Enter submits it. A blank line resubmits the
// current input. `:sort <column>` acts as a column-header click. Requests
// run on a background task so the prompt stays live; a submit while one is
// in flight is ignored, the same as a disabled button.

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::controller::{Launch, ReportController, Submission};
use crate::output::terminal;
use crate::report::sort::SortKey;

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    /// Submit; `None` keeps the current input
    Submit(Option<String>),
    Sort(SortKey),
    Show,
    Help,
    Quit,
    Invalid(String),
}

/// Parse a line typed at the session prompt.
pub fn parse_command(line: &str) -> SessionCommand {
    let line = line.trim();
    if line.is_empty() {
        return SessionCommand::Submit(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return SessionCommand::Submit(Some(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q" | "quit" | "exit"), None) => SessionCommand::Quit,
        (Some("h" | "help"), None) => SessionCommand::Help,
        (Some("show"), None) => SessionCommand::Show,
        (Some("sort"), Some(key)) => match key.parse::<SortKey>() {
            Ok(key) => SessionCommand::Sort(key),
            Err(e) => SessionCommand::Invalid(e),
        },
        (Some("sort"), None) => {
            SessionCommand::Invalid("usage: :sort <impact|help|nodes|id|description>".to_string())
        }
        _ => SessionCommand::Invalid(format!("unknown command '{line}' (try :help)")),
    }
}

enum Event {
    Line(Option<String>),
    Done(Option<Submission>),
}

/// What the prompt loop does after one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// A submit arrived while a request was in flight and was dropped.
    Busy,
    Quit,
}

/// One interactive session over a controller, plus its in-flight request.
pub struct Session {
    controller: ReportController,
    pending: Option<JoinHandle<Submission>>,
}

impl Session {
    pub fn new(controller: ReportController) -> Self {
        Self {
            controller,
            pending: None,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Act on one line of input.
    pub async fn handle_line(&mut self, line: &str) -> Step {
        match parse_command(line) {
            SessionCommand::Quit => return Step::Quit,
            SessionCommand::Help => print_help(),
            SessionCommand::Show => terminal::display_view(&self.controller.snapshot().await),
            SessionCommand::Invalid(msg) => println!("{}", msg.yellow()),
            SessionCommand::Sort(key) => {
                let sort = self.controller.toggle_sort(key).await;
                debug!(key = %sort.key, dir = ?sort.dir, "Sort changed");
                let state = self.controller.snapshot().await;
                if state.report().is_some() {
                    terminal::display_view(&state);
                } else {
                    println!("{}", format!("Sorting by {}", sort.key).dimmed());
                }
            }
            SessionCommand::Submit(input) => match self.controller.launch(input.as_deref()).await {
                Launch::Started(handle) => {
                    self.pending = Some(handle);
                    terminal::display_view(&self.controller.snapshot().await);
                }
                Launch::Settled(Submission::Ignored) => {
                    println!("{}", "Analysis in progress, please wait.".dimmed());
                    return Step::Busy;
                }
                Launch::Settled(_) => terminal::display_view(&self.controller.snapshot().await),
            },
        }
        Step::Continue
    }

    /// Resolves when the in-flight request finishes; never resolves when idle.
    async fn wait_pending(&mut self) -> Option<Submission> {
        match &mut self.pending {
            Some(handle) => handle.await.ok(),
            None => std::future::pending::<Option<Submission>>().await,
        }
    }

    async fn settle(&mut self, submission: Option<Submission>) {
        self.pending = None;
        if submission.is_none() {
            warn!("Analysis task ended without a result");
        }
        println!();
        terminal::display_view(&self.controller.snapshot().await);
    }

    /// Leave the session. A request still in flight has its result dropped.
    pub async fn close(&mut self) {
        if self.pending.take().is_some() {
            debug!("Session closed with an analysis in flight");
            self.controller.teardown().await;
        }
    }
}

/// Run the session until `:quit` or end of input.
pub async fn run(controller: ReportController) -> Result<()> {
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new(controller);

    loop {
        prompt()?;

        let event = tokio::select! {
            line = lines.next_line() => Event::Line(line.context("Failed to read from stdin")?),
            done = session.wait_pending() => Event::Done(done),
        };

        match event {
            Event::Done(submission) => session.settle(submission).await,
            Event::Line(None) => break,
            Event::Line(Some(line)) => {
                if session.handle_line(&line).await == Step::Quit {
                    break;
                }
            }
        }
    }

    session.close().await;
    Ok(())
}

fn prompt() -> Result<()> {
    print!("{} ", ">".bold());
    std::io::stdout().flush().context("Failed to flush stdout")
}

fn print_help() {
    println!("{}", "Accessibility Analyzer".bold());
    println!("  Enter a website URL (https://example.com) and press Enter to analyze.");
    println!("  {}", "Blank line      re-analyze the current URL".dimmed());
    println!("  {}", ":sort <column>  sort by impact, help, nodes, id or description".dimmed());
    println!("  {}", ":show           show the current report".dimmed());
    println!("  {}", ":quit           leave".dimmed());
}
