//! Interactive terminal host for the timer panel.
//!
//! Commands are read line by line from stdin while a single interval delivers
//! ticks for as long as the panel asks for them.

use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tomato_core::error::Result;
use tomato_core::{Event, Input, Notifier, Panel, SystemClock, VaultStore};

use super::Context;

/// Rings the terminal bell and posts a desktop notification through the
/// escape sequences most terminals understand.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(message, "notification");
        let msg = escape_osc(message);
        let mut err = io::stderr();
        // BEL, OSC 9 (iTerm2), OSC 777 (VTE/Konsole)
        let _ = write!(err, "\x07\x1b]9;{msg}\x07\x1b]777;notify;tomato;{msg}\x07");
        let _ = writeln!(err, "{message}");
        let _ = err.flush();
    }
}

/// Strip characters that would terminate an OSC sequence early.
fn escape_osc(s: &str) -> String {
    s.chars().filter(|c| !matches!(c, '\x07' | '\x1b' | ';')).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PanelCommand {
    Input(Input),
    Status,
    Count,
    Note(String),
    Help,
    Quit,
}

impl FromStr for PanelCommand {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let cmd = match word {
            "start" | "s" => PanelCommand::Input(Input::Start),
            "pause" | "p" => PanelCommand::Input(Input::Pause),
            "stop" | "x" => PanelCommand::Input(Input::Stop),
            "reset" | "r" => PanelCommand::Input(Input::Reset),
            "status" | "" => PanelCommand::Status,
            "count" => PanelCommand::Count,
            "note" | "n" if !rest.trim().is_empty() => PanelCommand::Note(rest.trim().to_string()),
            "note" | "n" => return Err("note needs some text".into()),
            "help" | "?" => PanelCommand::Help,
            "quit" | "q" | "exit" => PanelCommand::Quit,
            other => return Err(format!("unknown command: {other}")),
        };
        Ok(cmd)
    }
}

const HELP: &str = "commands: start | pause | stop | reset | status | count | note <text> | quit";

type TerminalPanel = Panel<VaultStore, TerminalNotifier, SystemClock>;

struct Output {
    json: bool,
}

impl Output {
    fn event(&self, event: &Event) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(event).map_err(io::Error::other)?;
            println!("{line}");
        }
        Ok(())
    }

    fn view(&self, panel: &TerminalPanel) -> io::Result<()> {
        if self.json {
            let snapshot = panel.machine().snapshot();
            let line = serde_json::to_string(&snapshot).map_err(io::Error::other)?;
            println!("{line}");
        } else {
            println!("{}", panel.view());
        }
        Ok(())
    }

    /// Countdown refresh on the same terminal line.
    fn countdown(&self, panel: &TerminalPanel) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        let mut out = io::stdout();
        write!(out, "\r\x1b[2K{}", panel.view())?;
        out.flush()
    }

    fn message(&self, text: &str) {
        if !self.json {
            println!("{text}");
        }
    }
}

pub fn run(ctx: &Context, json: bool) -> Result<()> {
    let panel = Panel::from_config(ctx.store(), &ctx.config, TerminalNotifier, SystemClock);
    let period = Duration::from_millis(ctx.config.timer.tick_interval_ms.max(1));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run_loop(panel, period, Output { json }))?;
    Ok(())
}

async fn run_loop(mut panel: TerminalPanel, period: Duration, out: Output) -> io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    out.message(HELP);
    out.view(&panel)?;

    loop {
        let was_ticking = panel.is_ticking();
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match line.parse::<PanelCommand>() {
                    Ok(PanelCommand::Quit) => break,
                    Ok(PanelCommand::Input(input)) => {
                        if let Some(event) = panel.handle(input) {
                            out.event(&event)?;
                        }
                        out.view(&panel)?;
                    }
                    Ok(PanelCommand::Status) => out.view(&panel)?,
                    Ok(PanelCommand::Count) => {
                        if let Some(count) = panel.refresh_count() {
                            tracing::debug!(count, "count changed on disk");
                        }
                        out.message(&panel.count().to_string());
                        out.view(&panel)?;
                    }
                    Ok(PanelCommand::Note(text)) => {
                        if !panel.jot(&text) {
                            out.message("no session in progress; note not saved");
                        }
                    }
                    Ok(PanelCommand::Help) => out.message(HELP),
                    Err(e) => out.message(&e),
                }
                // Newly armed: the next tick is one full period away.
                if !was_ticking && panel.is_ticking() {
                    ticker.reset();
                }
            }
            _ = ticker.tick(), if was_ticking => {
                match panel.tick() {
                    Some(event) => {
                        out.event(&event)?;
                        out.message("");
                        out.view(&panel)?;
                    }
                    None => out.countdown(&panel)?,
                }
            }
        }
    }

    panel.close();
    Ok(())
}
