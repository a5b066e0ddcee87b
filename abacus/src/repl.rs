//! Line-oriented chat loop.
//!
//! Each non-blank line is one chat turn. `exit` or end of input stops the loop.
//! A failed turn is reported and the loop keeps reading.

use std::io::Write;

use achat::{ChatService, ChatSession, ChatTurnRequest, ChatTurnResult};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::error::AppError;

pub const PROMPT: &str = "You: ";
pub const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReplSummary {
    pub turns: usize,
    pub failed_turns: usize,
}

pub async fn run_repl<R, W>(
    chat: &ChatService,
    session: &ChatSession,
    input: R,
    output: &mut W,
) -> Result<ReplSummary, AppError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut summary = ReplSummary::default();

    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(output)?;
            break;
        };
        let line = line.trim();
        if line == EXIT_COMMAND {
            break;
        }
        if line.is_empty() {
            continue;
        }

        summary.turns += 1;
        match chat.run_turn(ChatTurnRequest::new(session.clone(), line)).await {
            Ok(result) => render_turn(output, &result)?,
            Err(error) => {
                summary.failed_turns += 1;
                tracing::warn!(phase = "repl", event = "turn_failed", error = %error);
                writeln!(output, "Error: {error}")?;
            }
        }
    }

    Ok(summary)
}

fn render_turn<W: Write>(output: &mut W, result: &ChatTurnResult) -> std::io::Result<()> {
    for (call, outcome) in result.tool_activity() {
        writeln!(
            output,
            "[tool] {}({}) -> {}",
            call.name, call.arguments, outcome.content
        )?;
    }
    if result.tool_round_limit_reached {
        writeln!(output, "[tool] round-trip limit reached")?;
    }
    writeln!(output, "Agent: {}", result.assistant_message)
}
