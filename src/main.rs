mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use logsift_analyzer::{AnalysisLimits, LogAnalysis, LogAnalyzer};
use logsift_report::{FsLogReader, PromptBuilder, cache_key};

use crate::config::Config;

/// Logsift - structured analysis of multi-line application logs
#[derive(Parser, Debug)]
#[command(name = "logsift")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (defaults to ~/.logsift/config.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum WARN events listed in the analysis
    #[arg(long, global = true)]
    max_warnings: Option<usize>,

    /// Maximum events listed in the analysis
    #[arg(long, global = true)]
    max_events: Option<usize>,

    /// Maximum samples kept per error group
    #[arg(long, global = true)]
    max_samples: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the analysis of a log file as JSON
    Analyze {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Print summary counts and error groups as text
    Summary {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the report prompt and its response cache key
    Prompt {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long, default_value = "ollama")]
        provider: String,

        #[arg(long, default_value = "mistral")]
        model: String,
    },

    /// List log files in the datasets directory
    List {
        /// Directory to list (overrides the configured datasets_dir)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                config
                    .log_level
                    .parse::<tracing_subscriber::filter::Directive>()
                    .with_context(|| format!("invalid log_level '{}'", config.log_level))?,
            ),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(args, config);

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

fn run(args: Args, config: Config) -> Result<()> {
    let limits = resolve_limits(&args, config.limits);
    let analyzer = LogAnalyzer::new(limits);

    match args.command {
        Command::Analyze { file, compact } => {
            let analysis = analyzer.analyze(&read_log(&file)?);
            let json = if compact {
                serde_json::to_string(&analysis)?
            } else {
                serde_json::to_string_pretty(&analysis)?
            };
            println!("{json}");
        }
        Command::Summary { file } => {
            let analysis = analyzer.analyze(&read_log(&file)?);
            print!("{}", render_summary(&analysis));
        }
        Command::Prompt {
            file,
            provider,
            model,
        } => {
            let text = read_log(&file)?;
            let analysis = analyzer.analyze(&text);
            let prompt = PromptBuilder::new(config.prompt.excerpt_lines)
                .build(&analysis, &text)
                .context("failed to serialize analysis")?;
            let key = cache_key(&provider, &model, Some(&prompt.system), &text);

            println!("# cache key: {key}");
            println!("# system\n{}\n", prompt.system);
            println!("# user\n{}", prompt.user);
        }
        Command::List { dir } => {
            let dir = dir.unwrap_or(config.datasets_dir);
            let sources = FsLogReader::list(&dir)?;
            if sources.is_empty() {
                eprintln!("No log files in {}", dir.display());
            }
            for source in sources {
                println!("{:>10}  {}", source.size_bytes, source.name);
            }
        }
    }

    Ok(())
}

/// CLI flags win over config file values
fn resolve_limits(args: &Args, base: AnalysisLimits) -> AnalysisLimits {
    AnalysisLimits {
        max_warnings: args.max_warnings.unwrap_or(base.max_warnings),
        max_events: args.max_events.unwrap_or(base.max_events),
        max_samples_per_group: args.max_samples.unwrap_or(base.max_samples_per_group),
    }
}

fn read_log(path: &Path) -> Result<String> {
    FsLogReader::read(path).with_context(|| format!("cannot analyze {}", path.display()))
}

fn render_summary(analysis: &LogAnalysis) -> String {
    let summary = &analysis.summary;
    let mut out = format!(
        "events: {}\nerrors: {}\nwarnings: {}\n",
        summary.total_events, summary.total_errors, summary.total_warnings
    );

    if !analysis.error_groups.is_empty() {
        out.push_str("\nerror groups:\n");
    }
    for group in &analysis.error_groups {
        let exception = group.exception.as_deref().unwrap_or("(no exception)");
        let location = group
            .top_frame
            .as_ref()
            .map(|f| format!(" at {}({}:{})", f.location, f.file, f.line))
            .unwrap_or_default();
        out.push_str(&format!(
            "{:>6}x {exception}{location} [{}] {} .. {}\n",
            group.count, group.logger, group.first_ts, group.last_ts
        ));
    }

    out
}
