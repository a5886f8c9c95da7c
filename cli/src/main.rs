//! CLI entrypoint for brigade
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use brigade_application::{
    AgentTool, ConversationLogger, ConversationTask, Evaluator, ExecutionParams, ExperimentTask,
    JudgeEvaluator, NoConversationLogger, NoProgress, PlanAndExecuteUseCase, PlanTask,
    ProgressNotifier, RuleEvaluator, RunConversationUseCase, RunExperimentUseCase,
    StructuredCallUseCase, ToolSchemaPort,
};
use brigade_domain::config::has_errors;
use brigade_domain::{PromptTemplate, ToolRegistry};
use brigade_infrastructure::{
    BackgroundConversationLogger, ConfigLoader, FileConfig, JsonSchemaToolConverter,
    JsonlConversationLogger, ReplayProvider, back_office_registry, kitchen_registry,
    load_dataset, service_registry,
};
use brigade_presentation::cli::commands::{EvalArgs, PlanArgs, RunArgs, ToolsArgs};
use brigade_presentation::{
    Cli, Command, ConsoleFormatter, EvalTask, OutputConfig, OutputFormatter, ProgressReporter,
    SimpleProgress,
};
use clap::{CommandFactory, Parser};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let _log_guard = init_tracing(cli.verbose, &config)?;
    info!("Starting brigade");

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            eprintln!("config error: {}", issue.message);
        } else {
            warn!("{}", issue.message);
        }
    }
    if has_errors(&issues) {
        bail!("Invalid configuration");
    }

    let (format, _) = config.output.parse_format();
    let output =
        OutputConfig::new(format, config.output.color).with_cli_overrides(cli.output, cli.quiet);
    if !output.color {
        colored::control::set_override(false);
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // === Dependency Injection ===
    let (logger, log_task) = match &config.logging.conversation_log {
        Some(path) => match JsonlConversationLogger::new(path) {
            Some(jsonl) => {
                let (background, handle) = BackgroundConversationLogger::spawn(Arc::new(jsonl));
                (Arc::new(background) as Arc<dyn ConversationLogger>, Some(handle))
            }
            None => {
                warn!("Conversation log disabled: cannot open {}", path.display());
                (Arc::new(NoConversationLogger) as Arc<dyn ConversationLogger>, None)
            }
        },
        None => (Arc::new(NoConversationLogger) as Arc<dyn ConversationLogger>, None),
    };

    let app = App {
        params: config.execution_params(),
        config: &config,
        formatter: &ConsoleFormatter,
        output,
        logger,
    };
    let rendered = app.execute(command).await;

    // Every logger clone is gone once `app` is consumed; drain the channel.
    if let Some(handle) = log_task {
        let _ = handle.await;
    }

    println!("{}", rendered?.trim_end());
    Ok(())
}

fn init_tracing(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    match &config.logging.file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("[logging] file has no file name: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn print_config_sources(config_path: Option<&Path>) {
    println!("Configuration sources (highest priority first):");
    println!("  Env       BRIGADE_* (e.g. BRIGADE_LOOP__MAX_TURNS=8)");
    for source in ConfigLoader::sources(config_path) {
        let status = if source.found { "found" } else { "not found" };
        println!("  {:<9} {} ({})", source.label, source.path.display(), status);
    }
}

struct App<'a> {
    config: &'a FileConfig,
    formatter: &'a dyn OutputFormatter,
    params: ExecutionParams,
    output: OutputConfig,
    logger: Arc<dyn ConversationLogger>,
}

impl App<'_> {
    async fn execute(self, command: Command) -> Result<String> {
        match command {
            Command::Run(args) => self.run(args).await,
            Command::Plan(args) => self.plan(args).await,
            Command::Eval(args) => self.eval(args).await,
            Command::Tools(args) => self.tools(args),
        }
    }

    fn progress(&self) -> Box<dyn ProgressNotifier> {
        if !self.output.show_progress {
            Box::new(NoProgress)
        } else if std::io::stderr().is_terminal() {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress)
        }
    }

    fn provider(&self, script: &Path) -> Result<Arc<ReplayProvider>> {
        let provider = ReplayProvider::from_file(script)?;
        info!("Replay script loaded: {} response(s)", provider.remaining());
        Ok(Arc::new(provider))
    }

    fn conversation(
        &self,
        provider: Arc<ReplayProvider>,
        registry: ToolRegistry,
        params: ExecutionParams,
    ) -> RunConversationUseCase {
        RunConversationUseCase::new(provider, Arc::new(registry), Arc::new(JsonSchemaToolConverter))
            .with_conversation_logger(self.logger.clone())
            .with_params(params)
    }

    /// Parent registry whose tools are specialist sub-agents.
    fn team_registry(&self, provider: Arc<ReplayProvider>, max_turns: usize) -> Result<ToolRegistry> {
        let front = AgentTool::new(
            self.conversation(provider.clone(), service_registry()?, self.params.clone()),
            max_turns,
        );
        let back = AgentTool::new(
            self.conversation(provider, back_office_registry()?, self.params.clone()),
            max_turns,
        );
        Ok(ToolRegistry::new()
            .with_tool(front.descriptor(
                "front_of_house",
                "Answers questions about the menu, dishes, allergens and prices.",
            ))?
            .with_tool(back.descriptor(
                "back_office",
                "Handles seasonal produce, food costs and reservations.",
            ))?)
    }

    async fn run(self, args: RunArgs) -> Result<String> {
        let provider = self.provider(&args.script.script)?;
        let max_turns = args.max_turns.unwrap_or(self.params.max_turns);
        let params = self.params.clone().with_max_turns(max_turns);

        let registry = if args.team {
            self.team_registry(provider.clone(), max_turns)?
        } else {
            kitchen_registry()?
        };
        let use_case = self.conversation(provider, registry, params);

        let progress = self.progress();
        let outcome = use_case
            .run(PromptTemplate::head_chef_system(), &args.task, max_turns, progress.as_ref())
            .await?;
        drop(progress);

        Ok(self.formatter.format_outcome(&args.task, &outcome, self.output.format))
    }

    async fn plan(self, args: PlanArgs) -> Result<String> {
        let provider = self.provider(&args.script.script)?;
        let use_case = PlanAndExecuteUseCase::new(provider)
            .with_conversation_logger(self.logger.clone())
            .with_params(self.params.clone());

        let progress = self.progress();
        let result = use_case.execute(&args.request, progress.as_ref()).await?;
        drop(progress);

        Ok(self.formatter.format_plan(&result, self.output.format))
    }

    async fn eval(self, args: EvalArgs) -> Result<String> {
        let provider = self.provider(&args.script.script)?;
        let dataset = load_dataset(&args.dataset)?;
        let name = args
            .name
            .clone()
            .or(dataset.name.clone())
            .or_else(|| {
                args.dataset
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| "experiment".to_string());

        let task: Box<dyn ExperimentTask> = match args.task {
            EvalTask::Conversation => Box::new(ConversationTask::new(
                self.conversation(provider.clone(), kitchen_registry()?, self.params.clone()),
                PromptTemplate::head_chef_system(),
                self.params.max_turns,
            )),
            EvalTask::Plan => Box::new(PlanTask::new(
                PlanAndExecuteUseCase::new(provider.clone())
                    .with_conversation_logger(self.logger.clone())
                    .with_params(self.params.clone()),
            )),
        };

        let mut evaluators: Vec<Arc<dyn Evaluator>> = vec![Arc::new(RuleEvaluator)];
        if args.judge || self.config.experiment.judge {
            let structured = StructuredCallUseCase::new(provider)
                .with_conversation_logger(self.logger.clone())
                .with_provider_timeout(self.params.provider_timeout);
            let mut judge = JudgeEvaluator::new(structured, self.params.max_attempts);
            if !self.config.experiment.criteria.is_empty() {
                judge = judge.with_criteria(self.config.experiment.criteria.clone());
            }
            evaluators.push(Arc::new(judge));
        }

        let concurrency = args.concurrency.unwrap_or(self.params.concurrency);
        let progress = self.progress();
        let report = RunExperimentUseCase::new()
            .with_conversation_logger(self.logger.clone())
            .run(
                &name,
                dataset.items,
                task.as_ref(),
                &evaluators,
                concurrency,
                progress.as_ref(),
            )
            .await?;
        drop(progress);

        Ok(self.formatter.format_experiment(&report, self.output.format))
    }

    fn tools(self, args: ToolsArgs) -> Result<String> {
        let registry = kitchen_registry()?;
        if args.json {
            let schemas = JsonSchemaToolConverter.registry_schema(&registry);
            return Ok(serde_json::to_string_pretty(&schemas)?);
        }
        Ok(self.formatter.format_tools(&registry.definitions()))
    }
}
