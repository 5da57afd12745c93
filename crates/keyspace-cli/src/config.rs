use anyhow::{Context, bail};
use clap::Parser;
use core::time::Duration;
use keyspace::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TOTAL, GenerationConfig, MAX_WORKERS, Mode, OutputFormat,
    Profile, parse_word_list,
};
use std::path::PathBuf;

/// Command-line and environment configuration for the `keyspace` binary.
///
/// Every option can also be set through the environment variable named in its
/// help text; a `.env` file in the working directory is loaded first.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "keyspace",
    version,
    about = "Generate brute-force wordlists in parallel"
)]
pub struct CliArgs {
    /// File the wordlist is written to. Truncated if it exists.
    ///
    /// Environment variable: `KEYSPACE_OUTPUT`
    #[arg(short, long, env = "KEYSPACE_OUTPUT", default_value = "passwords.txt")]
    pub output: PathBuf,

    /// Output format: `txt`, `csv` or `json`.
    ///
    /// Defaults to the output file's extension, or `txt` if it has none.
    ///
    /// Environment variable: `KEYSPACE_FORMAT`
    #[arg(short, long, env = "KEYSPACE_FORMAT")]
    pub format: Option<String>,

    /// Shortest length to generate (words, for `passphrase`).
    ///
    /// Environment variable: `KEYSPACE_MIN_LENGTH`
    #[arg(short = 'm', long, env = "KEYSPACE_MIN_LENGTH", default_value_t = 1)]
    pub min_length: usize,

    /// Longest length to generate (words, for `passphrase`).
    ///
    /// Environment variable: `KEYSPACE_MAX_LENGTH`
    #[arg(short = 'M', long, env = "KEYSPACE_MAX_LENGTH", default_value_t = 4)]
    pub max_length: usize,

    /// Character-set preset: `basic`, `standard`, `advanced`, `elite`,
    /// `military`, `alien` or `custom`.
    ///
    /// Environment variable: `KEYSPACE_PROFILE`
    #[arg(short, long, env = "KEYSPACE_PROFILE", default_value = "standard")]
    pub profile: String,

    /// Explicit alphabet. Overrides `--profile`; symbols must be unique.
    ///
    /// Environment variable: `KEYSPACE_CHARACTERS`
    #[arg(short, long, env = "KEYSPACE_CHARACTERS")]
    pub characters: Option<String>,

    /// Drop easily confused symbols (`0 O 1 l I`) from the alphabet.
    ///
    /// Environment variable: `KEYSPACE_EXCLUDE_AMBIGUOUS`
    #[arg(long, env = "KEYSPACE_EXCLUDE_AMBIGUOUS", default_value_t = false)]
    pub exclude_ambiguous: bool,

    /// Generation mode: `brute`, `random`, `pronounceable`, `passphrase` or
    /// `hybrid`.
    ///
    /// Environment variable: `KEYSPACE_MODE`
    #[arg(long, env = "KEYSPACE_MODE", default_value = "brute")]
    pub mode: String,

    /// Passwords to generate per length. Required by `random`,
    /// `pronounceable` and `hybrid`; `passphrase` defaults to 1000.
    ///
    /// Environment variable: `KEYSPACE_COUNT`
    #[arg(short = 'n', long, env = "KEYSPACE_COUNT")]
    pub count: Option<u64>,

    /// Word list for `passphrase` mode, one word per line. Blank lines and
    /// lines starting with `#` are skipped.
    ///
    /// Environment variable: `KEYSPACE_WORDLIST`
    #[arg(long, env = "KEYSPACE_WORDLIST")]
    pub wordlist: Option<PathBuf>,

    /// Separator between passphrase words.
    ///
    /// Environment variable: `KEYSPACE_SEPARATOR`
    #[arg(long, env = "KEYSPACE_SEPARATOR", default_value = "-")]
    pub separator: String,

    /// Annotate every password with entropy, strength and crack time.
    /// Only visible in `csv` and `json` output.
    ///
    /// Environment variable: `KEYSPACE_ANALYZE`
    #[arg(long, env = "KEYSPACE_ANALYZE", default_value_t = false)]
    pub analyze: bool,

    /// Number of generation workers. Defaults to the number of CPUs, capped
    /// at 64.
    ///
    /// Environment variable: `KEYSPACE_WORKERS`
    #[arg(short, long, env = "KEYSPACE_WORKERS")]
    pub workers: Option<usize>,

    /// Work units per chunk. Bounds how much a worker holds at once.
    ///
    /// Environment variable: `KEYSPACE_CHUNK_SIZE`
    #[arg(long, env = "KEYSPACE_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// Records buffered between workers and the writer. Defaults to twice
    /// the worker count.
    ///
    /// Environment variable: `KEYSPACE_QUEUE_CAPACITY`
    #[arg(long, env = "KEYSPACE_QUEUE_CAPACITY")]
    pub queue_capacity: Option<usize>,

    /// Refuse runs that would produce more passwords than this.
    ///
    /// Environment variable: `KEYSPACE_MAX_TOTAL`
    #[arg(long, env = "KEYSPACE_MAX_TOTAL", default_value_t = DEFAULT_MAX_TOTAL)]
    pub max_total: u64,

    /// Milliseconds between progress updates.
    ///
    /// Environment variable: `KEYSPACE_PROGRESS_INTERVAL_MS`
    #[arg(long, env = "KEYSPACE_PROGRESS_INTERVAL_MS", default_value_t = 100)]
    pub progress_interval_ms: u64,

    /// Hide the progress bar.
    ///
    /// Environment variable: `KEYSPACE_QUIET`
    #[arg(short, long, env = "KEYSPACE_QUIET", default_value_t = false)]
    pub quiet: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub generation: GenerationConfig,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub show_progress: bool,
}

impl TryFrom<CliArgs> for Settings {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let mode: Mode = args.mode.parse()?;

        let alphabet = match &args.characters {
            Some(characters) => characters.chars().collect(),
            None => {
                let profile: Profile = args.profile.parse()?;
                profile.alphabet().symbols().to_vec()
            }
        };

        let format = match &args.format {
            Some(format) => format.parse()?,
            None => OutputFormat::from_path(&args.output).unwrap_or_default(),
        };

        let words = match &args.wordlist {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read word list {}", path.display()))?;
                Some(parse_word_list(&text))
            }
            None => None,
        };
        if words.is_some() && mode != Mode::Passphrase {
            bail!("--wordlist is only used by passphrase mode");
        }

        let workers = args
            .workers
            .unwrap_or_else(|| num_cpus::get().clamp(1, MAX_WORKERS));

        Ok(Self {
            generation: GenerationConfig {
                alphabet,
                exclude_ambiguous: args.exclude_ambiguous,
                min_length: args.min_length,
                max_length: args.max_length,
                chunk_size: args.chunk_size,
                workers,
                queue_capacity: args.queue_capacity,
                mode,
                count: args.count,
                words,
                separator: args.separator,
                analyze: args.analyze,
                max_total: args.max_total,
                progress_interval: Duration::from_millis(args.progress_interval_ms),
            },
            output: args.output,
            format,
            show_progress: !args.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyspace::ConfigError;

    fn parse(args: &[&str]) -> anyhow::Result<Settings> {
        let args = CliArgs::try_parse_from(["keyspace"].iter().chain(args))?;
        Settings::try_from(args)
    }

    #[test]
    fn defaults() {
        let settings = parse(&["--workers", "3"]).unwrap();
        let generation = &settings.generation;
        assert_eq!(generation.alphabet.len(), 62);
        assert_eq!((generation.min_length, generation.max_length), (1, 4));
        assert_eq!(generation.mode, Mode::Brute);
        assert_eq!(generation.workers, 3);
        assert_eq!(generation.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(generation.progress_interval, Duration::from_millis(100));
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.output, PathBuf::from("passwords.txt"));
        assert!(settings.show_progress);
    }

    #[test]
    fn default_workers_are_capped() {
        let settings = parse(&[]).unwrap();
        let workers = settings.generation.workers;
        assert!((1..=MAX_WORKERS).contains(&workers));
    }

    #[test]
    fn characters_override_profile() {
        let settings = parse(&["--profile", "elite", "--characters", "xyz"]).unwrap();
        assert_eq!(settings.generation.alphabet, ['x', 'y', 'z']);
    }

    #[test]
    fn unicode_profiles_are_selectable() {
        let settings = parse(&["--profile", "military"]).unwrap();
        assert_eq!(settings.generation.alphabet.len(), 140);
        let settings = parse(&["--profile", "alien", "--exclude-ambiguous"]).unwrap();
        assert_eq!(settings.generation.alphabet.len(), 343);
        assert!(settings.generation.exclude_ambiguous);
    }

    #[test]
    fn format_follows_extension_unless_given() {
        let settings = parse(&["-o", "out.json"]).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        let settings = parse(&["-o", "out.json", "--format", "csv"]).unwrap();
        assert_eq!(settings.format, OutputFormat::Csv);
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = parse(&["--mode", "dictionary"]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnknownMode {
                name: "dictionary".to_string()
            })
        );
        let err = parse(&["--profile", "mega"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::UnknownProfile { .. })
        ));
        assert!(parse(&["--format", "xml"]).is_err());
    }

    #[test]
    fn reads_word_lists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "# colours\nred\n\ngreen\n").unwrap();

        let settings = parse(&[
            "--mode",
            "passphrase",
            "--wordlist",
            path.to_str().unwrap(),
            "-n",
            "3",
        ])
        .unwrap();
        assert_eq!(
            settings.generation.words,
            Some(vec!["red".to_string(), "green".to_string()])
        );

        assert!(parse(&["--wordlist", path.to_str().unwrap()]).is_err());
        assert!(parse(&["--mode", "passphrase", "--wordlist", "/nonexistent/words"]).is_err());
    }
}
