use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "The γ-Secretase Database Contributors",
    version,
    about = "gammadb - Sequence and structure comparison of γ-secretase subunits across species.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S aligner.run-timeout-secs=60
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", global = true)]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare two structure files, using the cache, the aligner or a simulation.
    Compare(CompareArgs),
    /// Look up a cached structural comparison without computing anything.
    Cached(CachedArgs),
    /// Report whether the structural aligner can be invoked.
    Probe,
    /// Compute sequence identity, similarity and conserved regions for two sequences.
    Similarity(SimilarityArgs),
    /// Combine sequence and structure metrics for two entries of the dataset.
    Analyze(AnalyzeArgs),
    /// Recompute the structural comparison cache for every subunit in the dataset.
    Precompute,
    /// Write all cached structural comparisons as CSV.
    Export(ExportArgs),
    /// Manage the local data directory that holds the comparison cache.
    Data(DataArgs),
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug, Default)]
pub struct CompareArgs {
    /// Read the request as JSON from a file ('-' for stdin). Flags override its fields.
    #[arg(long, value_name = "PATH")]
    pub request: Option<PathBuf>,

    /// Reference structure file, relative to the structure root unless absolute.
    #[arg(short, long, value_name = "PATH")]
    pub reference: Option<String>,

    /// Target structure file, relative to the structure root unless absolute.
    #[arg(short, long, value_name = "PATH")]
    pub target: Option<String>,

    /// Subunit name used as the cache key (e.g., PSEN1, PEN-2).
    #[arg(long)]
    pub subunit: Option<String>,

    /// Target species used as the cache key.
    #[arg(long, value_name = "NAME")]
    pub species: Option<String>,

    /// Ignore any cached result and recompute.
    #[arg(long)]
    pub no_cache: bool,

    /// Skip the aligner and return simulated metrics.
    #[arg(long)]
    pub simulate: bool,

    /// Reference sequence for sequence-derived simulation, inline or as @path.
    #[arg(long, value_name = "SEQ")]
    pub reference_sequence: Option<String>,

    /// Target sequence for sequence-derived simulation, inline or as @path.
    #[arg(long, value_name = "SEQ")]
    pub target_sequence: Option<String>,
}

/// Arguments for the `cached` subcommand.
#[derive(Args, Debug)]
pub struct CachedArgs {
    #[arg(long)]
    pub subunit: Option<String>,

    #[arg(long, value_name = "NAME")]
    pub species: Option<String>,
}

/// Arguments for the `similarity` subcommand.
#[derive(Args, Debug)]
pub struct SimilarityArgs {
    /// First sequence, inline or as @path to a plain-text file.
    pub sequence1: String,

    /// Second sequence, inline or as @path to a plain-text file.
    pub sequence2: String,

    /// Pre-aligned form of the first sequence.
    #[arg(long, value_name = "SEQ", requires = "aligned2")]
    pub aligned1: Option<String>,

    /// Pre-aligned form of the second sequence.
    #[arg(long, value_name = "SEQ", requires = "aligned1")]
    pub aligned2: Option<String>,

    /// Sliding window size for conserved-region detection.
    #[arg(short, long, default_value_t = 10)]
    pub window: usize,

    /// Minimum window identity, in percent, for a conserved region.
    #[arg(long, default_value_t = 80.0)]
    pub threshold: f64,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Dataset id of the reference entry.
    #[arg(short, long, value_name = "ID")]
    pub reference: String,

    /// Dataset id of the target entry.
    #[arg(short, long, value_name = "ID")]
    pub target: String,

    /// Ignore any cached structural result and recompute.
    #[arg(long)]
    pub no_cache: bool,

    /// Skip the aligner and use simulated structural metrics.
    #[arg(long)]
    pub simulate: bool,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write CSV to this file instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing data files.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = Cli::parse_from([
            "gammadb",
            "probe",
            "-vv",
            "-c",
            "gammadb.toml",
            "-S",
            "simulation.seed=7",
            "-S",
            "cache.in-memory=true",
        ]);
        assert!(matches!(cli.command, Commands::Probe));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("gammadb.toml")));
        assert_eq!(cli.set_values, vec!["simulation.seed=7", "cache.in-memory=true"]);
    }

    #[test]
    fn compare_flags_are_optional_so_the_service_can_validate_them() {
        let cli = Cli::parse_from(["gammadb", "compare", "-r", "ref.pdb", "--simulate"]);
        let Commands::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.reference.as_deref(), Some("ref.pdb"));
        assert_eq!(args.target, None);
        assert!(args.simulate);
        assert!(!args.no_cache);
    }

    #[test]
    fn aligned_sequences_must_come_in_pairs() {
        let result = Cli::try_parse_from(["gammadb", "similarity", "MKT", "MKV", "--aligned1", "MK-T"]);
        assert!(result.is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["gammadb", "probe", "-q", "-v"]).is_err());
    }
}
