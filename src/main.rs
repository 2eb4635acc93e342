use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colloc::{stats, Precomputation, PrecomputationConfig, SuffixArray};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "colloc")]
#[command(about = "Precompute collocations of frequent patterns over a suffix array")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a collocation index from a suffix array directory
    Build {
        /// Directory holding corpus.bin and sa.bin
        #[arg(short, long)]
        suffix_array: PathBuf,

        /// Where to write the collocation index
        #[arg(short, long)]
        output: PathBuf,

        /// JSON file with precomputation thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Worker threads (0 = all cores)
        #[arg(short = 'j', long, default_value_t = 0)]
        threads: usize,

        /// Hide progress bars
        #[arg(short, long)]
        quiet: bool,
    },
    /// Show collocation index statistics
    Stats {
        /// Collocation index file
        path: PathBuf,
    },
    /// Print the occurrences of one template, e.g. "12 X 7 Y 3"
    Lookup {
        /// Collocation index file
        path: PathBuf,

        /// Template with X and Y marking the gaps
        template: String,
    },
    /// Print the default configuration as JSON
    Config,
}

/// Command-line values that take precedence over the config file
#[derive(Args)]
struct ConfigOverrides {
    #[arg(long)]
    num_frequent_patterns: Option<usize>,
    #[arg(long)]
    num_super_frequent_patterns: Option<usize>,
    #[arg(long)]
    max_rule_span: Option<usize>,
    #[arg(long)]
    max_rule_symbols: Option<usize>,
    #[arg(long)]
    min_gap_size: Option<usize>,
    #[arg(long)]
    max_frequent_phrase_len: Option<usize>,
    #[arg(long)]
    min_frequency: Option<usize>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut PrecomputationConfig) {
        let fields = [
            (self.num_frequent_patterns, &mut config.num_frequent_patterns),
            (self.num_super_frequent_patterns, &mut config.num_super_frequent_patterns),
            (self.max_rule_span, &mut config.max_rule_span),
            (self.max_rule_symbols, &mut config.max_rule_symbols),
            (self.min_gap_size, &mut config.min_gap_size),
            (self.max_frequent_phrase_len, &mut config.max_frequent_phrase_len),
            (self.min_frequency, &mut config.min_frequency),
        ];
        for (value, field) in fields {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "colloc=debug" } else { "colloc=info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Build {
            suffix_array,
            output,
            config,
            overrides,
            threads,
            quiet,
        } => {
            let mut precomputation_config = match &config {
                Some(path) if !path.exists() => {
                    anyhow::bail!("config file not found: {}", path.display())
                }
                Some(path) => PrecomputationConfig::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?,
                None => PrecomputationConfig::default(),
            };
            overrides.apply(&mut precomputation_config);

            if threads > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build_global()
                    .context("failed to configure the thread pool")?;
            }

            build(&suffix_array, &output, &precomputation_config, quiet)?;
        }
        Commands::Stats { path } => {
            stats::show_stats(&path)?;
        }
        Commands::Lookup { path, template } => {
            stats::show_lookup(&path, &template)?;
        }
        Commands::Config => {
            let json = serde_json::to_string_pretty(&PrecomputationConfig::default())?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build(sa_dir: &Path, output: &Path, config: &PrecomputationConfig, quiet: bool) -> Result<()> {
    let start = std::time::Instant::now();

    if !quiet {
        println!("Loading suffix array: {}", sa_dir.display());
    }
    let sa = SuffixArray::open(sa_dir)
        .with_context(|| format!("failed to load suffix array from {}", sa_dir.display()))?;
    let sa_stats = sa.stats();

    let precomputation = Precomputation::build_with_progress(&sa, config, quiet)
        .context("collocation precomputation failed")?;
    precomputation
        .write_to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    if !quiet {
        let index_stats = precomputation.collocations().stats();
        println!(
            "Indexed {} templates ({} occurrences) from {} sentences in {:.2}s",
            index_stats.entries,
            index_stats.occurrences,
            sa_stats.sentence_count,
            start.elapsed().as_secs_f64()
        );
        println!("Collocation index stored at: {}", output.display());
    }

    Ok(())
}
