//! Drives a parsed script through one engine instance.
//!
//! The runner owns the engine, so every submission finishes before the next
//! command is looked at. Awaiting only ever happens between commands
//! (pauses), never inside a `submit` call.

use std::io::{self, Write};
use std::time::Duration;

use matching_core::{AllocationPolicy, MatchEvent, MatchingEngine, Price, Side};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{OutputFormat, ReplayConfig};
use crate::report;
use crate::script::ScriptCommand;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("failed to write report")]
    Io(#[from] io::Error),

    #[error("failed to encode report line")]
    Json(#[from] serde_json::Error),
}

/// Counters for one replay run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaySummary {
    pub submitted: usize,
    pub rejected: usize,
    pub fills: usize,
    pub completed: usize,
}

pub struct Replay<P: AllocationPolicy, W: Write> {
    engine: MatchingEngine<P>,
    config: ReplayConfig,
    out: W,
    summary: ReplaySummary,
}

impl<P: AllocationPolicy, W: Write> Replay<P, W> {
    pub fn new(config: ReplayConfig, out: W) -> Self {
        let engine = MatchingEngine::<P>::new().with_trade_price(config.trade_price);
        Replay {
            engine,
            config,
            out,
            summary: ReplaySummary::default(),
        }
    }

    /// Run every command in order and return the counters.
    pub async fn run(&mut self, commands: &[ScriptCommand]) -> Result<ReplaySummary, ReplayError> {
        info!(
            policy = self.engine.policy_name(),
            trade_price = ?self.config.trade_price,
            commands = commands.len(),
            "replay started"
        );

        for command in commands {
            match command {
                ScriptCommand::Submit { side, price, quantity } => {
                    self.submit(*side, *price, *quantity)?;
                }
                ScriptCommand::PrintBook => {
                    self.print_book()?;
                    if self.config.step_delay_ms > 0 {
                        self.pause(Duration::from_millis(self.config.step_delay_ms)).await?;
                    }
                }
                ScriptCommand::Wait(duration) => {
                    self.pause(*duration).await?;
                }
            }
        }

        self.out.flush()?;
        info!(summary = ?self.summary, "replay finished");
        Ok(self.summary)
    }

    pub fn engine(&self) -> &MatchingEngine<P> {
        &self.engine
    }

    pub fn summary(&self) -> ReplaySummary {
        self.summary
    }

    /// Give back the output sink, e.g. to inspect a buffer in tests.
    pub fn into_output(self) -> W {
        self.out
    }

    fn submit(&mut self, side: Side, price: Price, quantity: u32) -> Result<(), ReplayError> {
        match self.engine.submit(side, price, quantity) {
            Ok(submission) => {
                self.summary.submitted += 1;
                debug!(
                    order_id = %submission.order_id,
                    filled_immediately = submission.filled_immediately,
                    events = submission.events.len(),
                    "submitted"
                );
                for event in &submission.events {
                    match event {
                        MatchEvent::PartialFill(_) => self.summary.fills += 1,
                        MatchEvent::Completed(_) => self.summary.completed += 1,
                    }
                    let line = match self.config.format {
                        OutputFormat::Text => report::format_event(event),
                        OutputFormat::Json => report::json_event(event)?,
                    };
                    writeln!(self.out, "{line}")?;
                }
            }
            Err(err) => {
                self.summary.rejected += 1;
                warn!(%side, %price, quantity, error = %err, "order rejected");
                let line = match self.config.format {
                    OutputFormat::Text => report::format_rejection(side, price, quantity, &err),
                    OutputFormat::Json => report::json_rejection(side, price, quantity, &err)?,
                };
                writeln!(self.out, "{line}")?;
            }
        }
        Ok(())
    }

    fn print_book(&mut self) -> Result<(), ReplayError> {
        match self.config.format {
            OutputFormat::Text => {
                for line in report::format_book(&self.engine, self.config.book_view) {
                    writeln!(self.out, "{line}")?;
                }
            }
            OutputFormat::Json => {
                writeln!(self.out, "{}", report::json_book(&self.engine)?)?;
            }
        }
        Ok(())
    }

    async fn pause(&mut self, duration: Duration) -> Result<(), ReplayError> {
        // Make everything so far visible before going quiet.
        self.out.flush()?;
        debug!(?duration, "pausing");
        tokio::time::sleep(duration).await;
        Ok(())
    }
}
