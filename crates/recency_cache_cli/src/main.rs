use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use recency_cache::{
    CacheError, LruCache, PolicyKind, ScriptError, Step, TrackedCache, compare_steps,
    parse_capacity, parse_script, parse_trace_csv, replay_steps, validate_script,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

mod session;

#[derive(Parser)]
#[command(name = "recency-cache")]
#[command(version, about = "Fixed-capacity LRU cache: interactive session and trace replay")]
struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive put/get/display session over stdin
    Session(SessionArgs),
    /// Check a replay script without running it
    Validate(ValidateArgs),
    /// Run a script or CSV trace and print the final state as JSON
    Replay(ReplayArgs),
    /// Run the same workload under LRU and FIFO
    Compare(CompareArgs),
}

#[derive(Args)]
struct SessionArgs {
    #[arg(short = 'c', long, allow_negative_numbers = true)]
    capacity: i64,
}

#[derive(Args)]
struct ValidateArgs {
    #[arg(short = 's', long)]
    script: PathBuf,
    #[arg(short = 'e', long, default_value = "text")]
    error_format: ErrorFormat,
}

#[derive(Args)]
struct ReplayArgs {
    #[arg(short = 's', long)]
    script: PathBuf,
    /// Overrides the script capacity; required for CSV traces
    #[arg(short = 'c', long, allow_negative_numbers = true)]
    capacity: Option<i64>,
    #[arg(short = 'p', long)]
    policy: Option<PolicyArg>,
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    #[arg(short = 'e', long, default_value = "text")]
    error_format: ErrorFormat,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(short = 's', long)]
    script: PathBuf,
    #[arg(short = 'c', long, allow_negative_numbers = true)]
    capacity: Option<i64>,
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
    #[arg(short = 'e', long, default_value = "text")]
    error_format: ErrorFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ErrorFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Lru,
    Fifo,
}

struct Workload {
    policy: PolicyKind,
    capacity: i64,
    steps: Vec<Step>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Session(args) => run_session(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Replay(args) => run_replay(args),
        Commands::Compare(args) => run_compare(args),
    };
    std::process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_session(args: SessionArgs) -> i32 {
    let cache = match parse_capacity(args.capacity).and_then(LruCache::new) {
        Ok(cache) => cache,
        Err(err) => {
            emit_cache_error(&err, ErrorFormat::Text);
            return 2;
        }
    };
    let mut cache = TrackedCache::new(cache);

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut reader = stdin.lock();
    let mut writer = io::stdout().lock();

    match session::run(&mut cache, &mut reader, &mut writer, interactive) {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("session failed: {}", err);
            1
        }
    }
}

fn run_validate(args: ValidateArgs) -> i32 {
    if is_csv(&args.script) {
        let input = match read_file(&args.script, "trace") {
            Ok(input) => input,
            Err(code) => return code,
        };
        return match parse_trace_csv(&input) {
            Ok(_) => 0,
            Err(err) => {
                emit_cache_error(&err, args.error_format);
                2
            }
        };
    }

    let yaml = match read_file(&args.script, "script") {
        Ok(yaml) => yaml,
        Err(code) => return code,
    };
    let script = match parse_script(&yaml) {
        Ok(script) => script,
        Err(err) => {
            eprintln!("failed to parse script: {}", err);
            return 1;
        }
    };

    match validate_script(&script) {
        Ok(()) => 0,
        Err(errors) => {
            emit_validation_errors(&errors, args.error_format);
            2
        }
    }
}

fn run_replay(args: ReplayArgs) -> i32 {
    let mut workload = match load_workload(&args.script, args.capacity, args.error_format) {
        Ok(workload) => workload,
        Err(code) => return code,
    };
    if let Some(policy) = args.policy {
        workload.policy = match policy {
            PolicyArg::Lru => PolicyKind::Lru,
            PolicyArg::Fifo => PolicyKind::Fifo,
        };
    }

    let report = match replay_steps(workload.policy, workload.capacity, &workload.steps) {
        Ok(report) => report,
        Err(err) => {
            emit_cache_error(&err, args.error_format);
            return 3;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(text) => write_output(args.output.as_deref(), &text),
        Err(err) => {
            eprintln!("failed to serialize report JSON: {}", err);
            1
        }
    }
}

fn run_compare(args: CompareArgs) -> i32 {
    let workload = match load_workload(&args.script, args.capacity, args.error_format) {
        Ok(workload) => workload,
        Err(code) => return code,
    };

    let comparison = match compare_steps(workload.capacity, &workload.steps) {
        Ok(comparison) => comparison,
        Err(err) => {
            emit_cache_error(&err, args.error_format);
            return 3;
        }
    };

    match serde_json::to_string_pretty(&comparison) {
        Ok(text) => write_output(args.output.as_deref(), &text),
        Err(err) => {
            eprintln!("failed to serialize report JSON: {}", err);
            1
        }
    }
}

fn load_workload(
    path: &Path,
    capacity: Option<i64>,
    error_format: ErrorFormat,
) -> Result<Workload, i32> {
    let input = read_file(path, "script")?;

    if is_csv(path) {
        let Some(capacity) = capacity else {
            eprintln!("--capacity is required for CSV traces");
            return Err(1);
        };
        let steps = parse_trace_csv(&input).map_err(|err| {
            emit_cache_error(&err, error_format);
            3
        })?;
        return Ok(Workload {
            policy: PolicyKind::Lru,
            capacity,
            steps,
        });
    }

    let script = parse_script(&input).map_err(|err| {
        eprintln!("failed to parse script: {}", err);
        1
    })?;

    if let Err(errors) = validate_script(&script) {
        // A capacity override may repair an invalid script capacity.
        let blocking: Vec<ScriptError> = errors
            .into_iter()
            .filter(|err| capacity.is_none() || err.path.as_deref() != Some("capacity"))
            .collect();
        if !blocking.is_empty() {
            emit_validation_errors(&blocking, error_format);
            return Err(2);
        }
    }

    tracing::debug!(
        path = %path.display(),
        steps = script.operations.len(),
        "loaded script"
    );

    Ok(Workload {
        policy: script.policy,
        capacity: capacity.unwrap_or(script.capacity),
        steps: script.operations,
    })
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn read_file(path: &Path, what: &str) -> Result<String, i32> {
    fs::read_to_string(path).map_err(|err| {
        eprintln!("failed to read {}: {}", what, err);
        1
    })
}

fn write_output(path: Option<&Path>, text: &str) -> i32 {
    let Some(path) = path else {
        println!("{}", text);
        return 0;
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = fs::create_dir_all(parent) {
                eprintln!("failed to create output directory: {}", err);
                return 1;
            }
        }
    }
    let mut file = match fs::File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("failed to write output: {}", err);
            return 1;
        }
    };
    if let Err(err) = writeln!(file, "{}", text) {
        eprintln!("failed to write output: {}", err);
        return 1;
    }
    0
}

fn emit_validation_errors(errors: &[ScriptError], format: ErrorFormat) {
    match format {
        ErrorFormat::Text => {
            for err in errors {
                let mut parts = Vec::new();
                parts.push(format!("E {}", err.code.as_str()));
                if let Some(path) = &err.path {
                    parts.push(format!("path={}", path));
                }
                parts.push(format!("msg=\"{}\"", err.message));
                eprintln!("{}", parts.join(" "));
            }
        }
        ErrorFormat::Json => {
            let values: Vec<_> = errors.iter().map(validation_error_json).collect();
            eprintln!("{}", serde_json::to_string(&values).unwrap_or_default());
        }
    }
}

fn validation_error_json(err: &ScriptError) -> serde_json::Value {
    let mut value = json!({
        "type": "validation",
        "code": err.code.as_str(),
        "message": err.message,
    });
    if let Some(path) = &err.path {
        value["path"] = json!(path);
    }
    value
}

fn emit_cache_error(err: &CacheError, format: ErrorFormat) {
    match format {
        ErrorFormat::Text => {
            let mut parts = Vec::new();
            parts.push(format!("E {}", err.kind.as_str()));
            if let Some(path) = &err.path {
                parts.push(format!("path={}", path));
            }
            parts.push(format!("msg=\"{}\"", err.message));
            eprintln!("{}", parts.join(" "));
        }
        ErrorFormat::Json => {
            let mut value = json!({
                "type": "cache",
                "kind": err.kind.as_str(),
                "message": err.message,
            });
            if let Some(path) = &err.path {
                value["path"] = json!(path);
            }
            eprintln!("{}", serde_json::to_string(&vec![value]).unwrap_or_default());
        }
    }
}
