//! Command-line surface of the `abacus` binary.

use std::path::PathBuf;
use std::sync::Arc;

use agraph::{BranchDecider, CoinFlip};
use aobserve::{SafeGraphHooks, StandardObservabilityHooks};
use clap::{Parser, Subcommand};

use crate::config::AgentConfig;
use crate::error::AppError;
use crate::repl::run_repl;
use crate::runtime::{build_provider, chat_service, chat_session, default_tool_runtime};
use crate::tools::demo_registry;
use crate::workflow::{WorkflowState, build_workflow};

pub const DEFAULT_DIAGRAM_PATH: &str = "workflow.mmd";

#[derive(Debug, Parser)]
#[command(name = "abacus", version, about = "Tool-calling arithmetic agent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Chat with the agent; type `exit` to quit.
    Chat {
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        system_prompt: Option<String>,
        #[arg(long)]
        max_tool_rounds: Option<usize>,
        #[arg(long, default_value = "cli-session")]
        session: String,
    },
    /// Run the toy workflow once and export its Mermaid diagram.
    Graph {
        #[arg(long, default_value = DEFAULT_DIAGRAM_PATH)]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the registered tools.
    Tools,
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Chat {
            model,
            system_prompt,
            max_tool_rounds,
            session,
        } => {
            let mut config = AgentConfig::from_env()?;
            if let Some(model) = model {
                config = config.with_model(model);
            }
            if let Some(system_prompt) = system_prompt {
                config = config.with_system_prompt(system_prompt);
            }
            if let Some(rounds) = max_tool_rounds {
                config = config.with_max_tool_round_trips(rounds);
            }
            run_chat(config, session).await
        }
        Command::Graph { output, seed } => run_graph(output, seed).await,
        Command::Tools => print_tools(),
    }
}

async fn run_chat(config: AgentConfig, session_id: String) -> Result<(), AppError> {
    let provider = build_provider(&config)?;
    let tool_runtime = Arc::new(default_tool_runtime()?);
    let session = chat_session(session_id, provider.as_ref(), &config);
    let chat = chat_service(provider, tool_runtime, &config);

    tracing::info!(
        phase = "cli",
        event = "chat_start",
        model = config.model,
        session_id = %session.id
    );
    println!("Chatting with {} (type '{}' to quit).", config.model, crate::repl::EXIT_COMMAND);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    let summary = run_repl(&chat, &session, stdin, &mut stdout).await?;

    tracing::info!(
        phase = "cli",
        event = "chat_end",
        turns = summary.turns,
        failed_turns = summary.failed_turns
    );
    Ok(())
}

async fn run_graph(output: PathBuf, seed: Option<u64>) -> Result<(), AppError> {
    let decider: Box<dyn BranchDecider> = match seed {
        Some(seed) => Box::new(CoinFlip::seeded(seed)),
        None => Box::new(CoinFlip::new()),
    };

    let workflow = build_workflow()?.with_hooks(Arc::new(SafeGraphHooks::new(
        StandardObservabilityHooks::new(),
    )));
    let run = workflow
        .invoke(WorkflowState::new("demo"), decider.as_ref())
        .await?;

    println!("Trail: {}", run.state.trail.join(" -> "));
    workflow.write_mermaid(&output)?;
    println!("Workflow diagram written to {}", output.display());
    Ok(())
}

fn print_tools() -> Result<(), AppError> {
    for definition in demo_registry()?.definitions() {
        println!("{}: {}", definition.name, definition.description);
        println!("    {}", definition.input_schema);
    }
    Ok(())
}
