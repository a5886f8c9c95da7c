//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Header, every tool call and step, then the answer
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for brigade_domain::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Full => Self::Full,
            OutputFormatArg::Answer => Self::Answer,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// Which pipeline an experiment runs for each dataset item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EvalTask {
    /// The tool-calling conversation loop with the kitchen tools
    #[default]
    Conversation,
    /// Plan-and-execute
    Plan,
}

/// CLI arguments for brigade
#[derive(Parser, Debug)]
#[command(name = "brigade")]
#[command(author, version, about = "Tool-calling conversation loop, planner and evaluator")]
#[command(long_about = r#"
Brigade drives a completion provider through a bounded tool-calling loop.

Commands:
  run    Answer a task, letting the model call the kitchen tools
  plan   Plan a request into steps, execute each step, then synthesize
  eval   Run a dataset through a pipeline and score every output
  tools  List the registered tools and their parameters

Responses come from a replay script (--script), a JSON list of provider
responses consumed in order.

Configuration files are loaded from (in priority order):
1. BRIGADE_* environment variables (BRIGADE_LOOP__MAX_TURNS=8)
2. --config <path>     Explicit config file
3. ./brigade.toml      Project-level config
4. ~/.config/brigade/config.toml   Global config

Example:
  brigade run --script demos/replay.json "Cost of 3 risottos for 4?"
  brigade plan --script demos/plan.json "A vegetarian dinner for six"
  brigade eval --script demos/eval.json --dataset demos/dataset.json --judge
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormatArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a task with the tool-calling loop
    Run(RunArgs),
    /// Plan, execute each step, and synthesize an answer
    Plan(PlanArgs),
    /// Run an experiment over a dataset
    Eval(EvalArgs),
    /// List registered tools
    Tools(ToolsArgs),
}

/// Replay script shared by every provider-backed command
#[derive(Args, Debug, Clone)]
pub struct ScriptArg {
    /// JSON file of provider responses, consumed in order
    #[arg(short, long, value_name = "PATH")]
    pub script: PathBuf,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub script: ScriptArg,

    /// The task to answer
    pub task: String,

    /// Turn budget (overrides [loop] max_turns)
    #[arg(long, value_name = "N")]
    pub max_turns: Option<usize>,

    /// Delegate to specialist sub-agents instead of calling tools directly
    #[arg(long)]
    pub team: bool,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub script: ScriptArg,

    /// The request to plan
    pub request: String,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub script: ScriptArg,

    /// JSON dataset of items
    #[arg(short, long, value_name = "PATH")]
    pub dataset: PathBuf,

    /// Experiment name (defaults to the dataset name or file stem)
    #[arg(long)]
    pub name: Option<String>,

    /// Pipeline run for each item
    #[arg(long, value_enum, default_value = "conversation")]
    pub task: EvalTask,

    /// Add the model-as-judge evaluator (overrides [experiment] judge)
    #[arg(long)]
    pub judge: bool,

    /// Items processed at once (overrides [experiment] concurrency)
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ToolsArgs {
    /// Print the provider-facing JSON schemas instead of a table
    #[arg(long)]
    pub json: bool,
}
