use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use handoff::config::Config;
use handoff::core::{AgentGraph, ModelTier, Role, Task};
use handoff::manifest::Manifest;
use handoff::orchestration::{analyze_named, DelegationEngine, NoSkills, Selector, SkillMatcher};
use handoff::{hlog, hlog_error, Result};

/// Handoff - route tasks to agent roles and check agent dependencies
#[derive(Parser, Debug)]
#[command(name = "handoff")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    HANDOFF_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.handoff/handoff.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Log more detail: -v for decisions, -vv for graph traversal
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Agent manifest to load (defaults to the configured manifest)
    #[arg(short = 'm', long, global = true)]
    pub manifest: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// A task described on the command line.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct TaskArgs {
    /// Task category (feature, bug_fix, refactor, test, documentation, architecture)
    #[arg(short = 't', long = "type")]
    pub task_type: String,

    /// What the task should accomplish
    #[arg(short = 'D', long)]
    pub description: String,

    /// Files the task touches (repeatable)
    #[arg(short = 'f', long = "file")]
    pub files: Vec<PathBuf>,

    /// External action name passed to skill matching
    #[arg(long, default_value = "")]
    pub action: String,

    /// External workflow phase passed to skill matching
    #[arg(long, default_value = "")]
    pub phase: String,
}

impl TaskArgs {
    fn to_task(&self) -> Result<Task> {
        let task = Task::parse(&self.task_type, &self.description)?
            .with_action(&self.action, &self.phase)
            .with_files(self.files.iter().cloned());
        Ok(task)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Choose role, model tier and skills for a task
    Select {
        #[command(flatten)]
        task: TaskArgs,
    },

    /// Score a task's complexity
    Analyze {
        #[command(flatten)]
        task: TaskArgs,
    },

    /// List every agent required to run the given agents
    Resolve {
        /// Seed agent names
        #[arg(required = true)]
        agents: Vec<String>,
    },

    /// Order all agents
    Order {
        /// Dependencies first instead of delegation order
        #[arg(long)]
        load: bool,
    },

    /// Check the manifest for missing references and cycles
    Validate,

    /// Show the delegation chain for a task category
    Chain {
        /// Task category; unknown names fall back to [developer]
        task_type: String,
    },

    /// Show the role after the given one in a category's chain
    Next {
        /// Task category; unknown names fall back to [developer]
        task_type: String,

        /// Current role
        role: String,
    },

    /// Check whether one role may hand work to another
    CanHandOff {
        from: String,
        to: String,
    },

    /// Show or change ~/.handoff/handoff.toml
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,

    /// Map a tier tag (opus, sonnet, haiku) to a concrete model id
    SetModel { tier: String, id: String },

    /// Set the default agent manifest path
    SetManifest { path: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    handoff::log::init(cli.verbose, cli.debug);
    hlog!("handoff {:?}", cli.command);

    let result = run(&cli);
    if let Err(e) = &result {
        hlog_error!("command failed: {}", e);
    }
    result
}

fn run(cli: &Cli) -> Result<()> {
    run_with(cli, Config::load)
}

/// Dispatch `cli`, calling `load_config` only for commands that read the
/// manifest or the model map.
fn run_with(cli: &Cli, load_config: impl Fn() -> Result<Config>) -> Result<()> {
    let engine = DelegationEngine::new();

    match &cli.command {
        Command::Select { task } => run_select(cli, &load_config()?, &task.to_task()?),
        Command::Analyze { task } => {
            let result = analyze_named(&task.task_type, &task.description, task.files.len());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} (score {})", result.level, result.score);
                println!("{}", result.reason);
            }
            Ok(())
        }
        Command::Resolve { agents } => {
            let graph = load_graph(cli, &load_config()?)?;
            print_names(cli, &graph.resolve_dependencies(agents.as_slice())?)
        }
        Command::Order { load } => {
            let graph = load_graph(cli, &load_config()?)?;
            let order = if *load {
                graph.load_order()?
            } else {
                graph.full_ordering()?
            };
            print_names(cli, &order)
        }
        Command::Validate => run_validate(cli, &load_config()?),
        Command::Chain { task_type } => {
            let chain: Vec<&str> = engine
                .chain_for_name(task_type)
                .iter()
                .map(Role::as_str)
                .collect();
            if cli.json {
                println!("{}", serde_json::to_string(&chain)?);
            } else {
                println!("{}", chain.join(" -> "));
            }
            Ok(())
        }
        Command::Next { task_type, role } => {
            let role: Role = role.parse()?;
            match engine.next_in_chain(engine.chain_for_name(task_type), role) {
                Ok(next) => println!("{}", next),
                Err(e) if e.is_workflow_end() => println!("complete"),
                Err(e) => return Err(e),
            }
            Ok(())
        }
        Command::CanHandOff { from, to } => {
            let allowed = engine.can_hand_off(from.parse()?, to.parse()?);
            println!("{}", allowed);
            Ok(())
        }
        Command::Config { action } => {
            let path = Config::config_path()?;
            let config = run_config(action.as_ref(), &path)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
            Ok(())
        }
    }
}

/// Apply a config change to the file at `path`, returning the result.
/// Without an action the file is only read.
fn run_config(action: Option<&ConfigAction>, path: &Path) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    match action {
        None | Some(ConfigAction::Show) => return Ok(config),
        Some(ConfigAction::SetModel { tier, id }) => {
            let tier: ModelTier = tier.parse()?;
            config.set_model(tier, id.as_str());
            hlog!("config: {} -> {}", tier, id);
        }
        Some(ConfigAction::SetManifest { path: manifest }) => {
            config.manifest = Some(manifest.clone());
            hlog!("config: manifest -> {}", manifest);
        }
    }
    config.save_to(path)?;
    Ok(config)
}

fn run_select(cli: &Cli, config: &Config, task: &Task) -> Result<()> {
    let skills: Box<dyn SkillMatcher> = match manifest_path(cli, config)? {
        Some(path) => Box::new(Manifest::load(&path)?.skill_matcher()),
        None => Box::new(NoSkills),
    };
    let selection = Selector::new(skills).select(task)?;

    if cli.json {
        let output = serde_json::json!({
            "role": selection.role,
            "tier": selection.tier,
            "model": config.model_for(selection.tier),
            "skills": selection.skills,
            "complexity": selection.complexity,
            "reason": selection.reason,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("role:   {}", selection.role);
        println!("model:  {}", config.model_for(selection.tier));
        if !selection.skills.is_empty() {
            println!("skills: {}", selection.skills.join(", "));
        }
        println!("{}", selection.reason);
    }
    Ok(())
}

fn run_validate(cli: &Cli, config: &Config) -> Result<()> {
    let graph = load_graph(cli, config)?;
    let report = graph.validation_report();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_ok() {
        println!("ok: {} agents", graph.agent_count());
    } else {
        for missing in &report.missing {
            println!("missing: {} -> {}", missing.agent, missing.dependency);
        }
        if let Some(path) = &report.cycle {
            println!("cycle: {}", path.join(" -> "));
        }
    }
    report.into_result()
}

/// The manifest given on the command line, else the configured one if it
/// exists on disk.
fn manifest_path(cli: &Cli, config: &Config) -> Result<Option<PathBuf>> {
    if let Some(path) = &cli.manifest {
        return Ok(Some(path.clone()));
    }
    let path = config.manifest_path()?;
    Ok(path.exists().then_some(path))
}

fn load_graph(cli: &Cli, config: &Config) -> Result<AgentGraph> {
    let path = match manifest_path(cli, config)? {
        Some(path) => path,
        None => config.manifest_path()?,
    };
    Ok(Manifest::load(&path)?.to_graph())
}

fn print_names(cli: &Cli, names: &[String]) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string(names)?);
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
