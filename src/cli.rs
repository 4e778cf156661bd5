// Idiomatic Rust CLI for lzss.
//
// Explicit subcommands with long-form options. `c` and `u` remain as short
// aliases for compress and decompress, and the exit codes distinguish input
// failures (255) from output failures (254).

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use dialoguer::Confirm;

use crate::codec::decoder::{self, StopReason, TokenIterator};
use crate::codec::encoder;
use crate::codec::format::{
    CLI_DEFAULT_MAX_OUTPUT, DEFAULT_MAX_OUTPUT, MAX_CODED, MAX_UNENCODED, MIN_MATCH, WINDOW_SIZE,
};
use crate::codec::token::Token;
use crate::engine::compression_ratio;
use crate::hash::config::HASH_SIZE;

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_WRITE_FAILURE: i32 = 254;
const EXIT_READ_FAILURE: i32 = 255;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024u64),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        _ => (s, 1u64),
    };
    let num: u64 = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// LZSS compressor/decompressor (256-byte window, flag-grouped tokens).
#[derive(Parser, Debug)]
#[command(
    name = "lzss",
    version,
    about = "LZSS compressor/decompressor",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Overwrite existing output files without asking.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress an input file.
    #[command(visible_alias = "c")]
    Compress(CompressArgs),
    /// Decompress an input file.
    #[command(visible_alias = "u")]
    Decompress(DecompressArgs),
    /// Print the token stream of a compressed file.
    Tokens(PrintArgs),
    /// Print format constants and build features.
    Config,
}

#[derive(Args, Debug)]
struct CompressArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DecompressArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Stop decoding once this many bytes are produced (supports K/M/G suffix).
    #[arg(long = "max-size", short = 'm', value_parser = parse_byte_size, default_value_t = CLI_DEFAULT_MAX_OUTPUT as u64)]
    max_size: u64,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PrintArgs {
    /// Compressed input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Compress,
    Decompress,
    Tokens,
    Config,
}

struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    max_output_size: usize,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

fn resolve_options(cli: Cli) -> Options {
    let base = Options {
        command: Command::Config,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        max_output_size: CLI_DEFAULT_MAX_OUTPUT,
        input_file: None,
        output_file: None,
    };

    match cli.command {
        Cmd::Compress(args) => Options {
            command: Command::Compress,
            use_stdout: args.stdout,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            ..base
        },
        Cmd::Decompress(args) => Options {
            command: Command::Decompress,
            use_stdout: args.stdout,
            max_output_size: usize::try_from(args.max_size).unwrap_or(usize::MAX),
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            ..base
        },
        Cmd::Tokens(args) => Options {
            command: Command::Tokens,
            input_file: Some(args.input),
            ..base
        },
        Cmd::Config => base,
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("lzss".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Shared I/O helpers
// ---------------------------------------------------------------------------

fn input_name(opts: &Options) -> String {
    match &opts.input_file {
        Some(path) => path.display().to_string(),
        None => "<stdin>".to_string(),
    }
}

fn output_path(opts: &Options) -> Option<&Path> {
    if opts.use_stdout {
        None
    } else {
        opts.output_file.as_deref()
    }
}

fn output_name(opts: &Options) -> String {
    match output_path(opts) {
        Some(path) => path.display().to_string(),
        None => "<stdout>".to_string(),
    }
}

/// Read the whole input (file or stdin). On failure the error is reported and
/// the exit code returned.
fn read_input(opts: &Options) -> Result<Vec<u8>, i32> {
    let result = match &opts.input_file {
        Some(path) => std::fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf).map(|_| buf)
        }
    };
    result.map_err(|e| {
        eprintln!("lzss: error reading '{}': {e}", input_name(opts));
        EXIT_READ_FAILURE
    })
}

/// Ask before replacing an existing output file.
///
/// `Err` carries the exit code when the command should stop: declining the
/// prompt is a clean exit, a non-interactive session without `--force` is a
/// failure.
fn confirm_overwrite(opts: &Options) -> Result<(), i32> {
    let Some(path) = output_path(opts) else {
        return Ok(());
    };
    if opts.force || !path.exists() {
        return Ok(());
    }

    if opts.quiet || !io::stdin().is_terminal() {
        eprintln!(
            "lzss: output file exists, use -f to overwrite: {}",
            path.display()
        );
        return Err(EXIT_FAILURE);
    }

    let answer = Confirm::new()
        .with_prompt(format!("Output file '{}' exists. Overwrite?", path.display()))
        .default(false)
        .interact();
    match answer {
        Ok(true) => Ok(()),
        Ok(false) => {
            eprintln!("Aborted.");
            Err(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("lzss: prompt failed: {e}");
            Err(EXIT_FAILURE)
        }
    }
}

fn write_output(opts: &Options, data: &[u8]) -> Result<(), i32> {
    let result = match output_path(opts) {
        Some(path) => File::create(path).and_then(|f| {
            let mut w = BufWriter::with_capacity(BUF_SIZE, f);
            w.write_all(data)?;
            w.flush()
        }),
        None => {
            let mut out = io::stdout().lock();
            out.write_all(data).and_then(|_| out.flush())
        }
    };
    result.map_err(|e| {
        eprintln!("lzss: error writing to '{}': {e}", output_name(opts));
        EXIT_WRITE_FAILURE
    })
}

fn print_json(value: serde_json::Value) {
    eprintln!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("lzss version {version} (Rust)");

    let file_io = cfg!(feature = "file-io") as u8;
    let parallel = cfg!(feature = "parallel") as u8;

    eprintln!("WINDOW_SIZE={WINDOW_SIZE}");
    eprintln!("MAX_UNENCODED={MAX_UNENCODED}");
    eprintln!("MIN_MATCH={MIN_MATCH}");
    eprintln!("MAX_CODED={MAX_CODED}");
    eprintln!("HASH_SIZE={HASH_SIZE}");
    eprintln!("DEFAULT_MAX_OUTPUT={DEFAULT_MAX_OUTPUT}");
    eprintln!("CLI_DEFAULT_MAX_OUTPUT={CLI_DEFAULT_MAX_OUTPUT}");
    eprintln!("FILE_IO={file_io}");
    eprintln!("PARALLEL={parallel}");

    EXIT_SUCCESS
}

// ---------------------------------------------------------------------------
// Compress command
// ---------------------------------------------------------------------------

fn cmd_compress(opts: &Options) -> i32 {
    if let Err(code) = confirm_overwrite(opts) {
        return code;
    }
    if !opts.quiet {
        eprintln!(
            "Compressing '{}' to '{}'...",
            input_name(opts),
            output_name(opts)
        );
    }

    let input = match read_input(opts) {
        Ok(data) => data,
        Err(code) => return code,
    };
    if !opts.quiet {
        eprintln!("Data in: {} bytes.", input.len());
    }

    let encoded = match encoder::encode_detailed(&input) {
        Ok(e) => e,
        Err(e) => {
            eprintln!("lzss: encode error: {e}");
            return EXIT_FAILURE;
        }
    };

    if let Err(code) = write_output(opts, &encoded.data) {
        return code;
    }

    let ratio = compression_ratio(input.len() as u64, encoded.data.len() as u64);
    if !opts.quiet {
        eprintln!("Data out: {} bytes.", encoded.data.len());
        if let Some(r) = ratio {
            eprintln!("Compression ratio: {r:.2}%");
        }
        if opts.verbose > 0 {
            eprintln!(
                "lzss: encoder: literals: {}, matches: {}",
                encoded.literals, encoded.matches
            );
        }
        eprintln!("All done!");
    }

    if opts.json_output {
        print_json(serde_json::json!({
            "command": "compress",
            "input_size": input.len(),
            "output_size": encoded.data.len(),
            "literals": encoded.literals,
            "matches": encoded.matches,
            "ratio_percent": ratio,
        }));
    }

    EXIT_SUCCESS
}

// ---------------------------------------------------------------------------
// Decompress command
// ---------------------------------------------------------------------------

fn cmd_decompress(opts: &Options) -> i32 {
    if let Err(code) = confirm_overwrite(opts) {
        return code;
    }
    if !opts.quiet {
        eprintln!(
            "Decompressing '{}' to '{}'...",
            input_name(opts),
            output_name(opts)
        );
    }

    let input = match read_input(opts) {
        Ok(data) => data,
        Err(code) => return code,
    };
    if !opts.quiet {
        eprintln!("Data in: {} bytes.", input.len());
    }

    let decoded = match decoder::decode_detailed(&input, opts.max_output_size) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("lzss: decode error: {e}");
            return EXIT_FAILURE;
        }
    };

    if decoded.stop == StopReason::OutputLimit && !opts.quiet {
        eprintln!(
            "lzss: warning: stopped after reaching {} bytes, raise --max-size to decode further",
            opts.max_output_size
        );
    }

    if let Err(code) = write_output(opts, &decoded.data) {
        return code;
    }

    if !opts.quiet {
        eprintln!("Data out: {} bytes.", decoded.data.len());
        if opts.verbose > 0 {
            eprintln!(
                "lzss: decoder: tokens: {}, stopped: {}",
                decoded.tokens, decoded.stop
            );
        }
        eprintln!("All done!");
    }

    if opts.json_output {
        print_json(serde_json::json!({
            "command": "decompress",
            "input_size": input.len(),
            "output_size": decoded.data.len(),
            "tokens": decoded.tokens,
            "stop": decoded.stop.as_str(),
        }));
    }

    EXIT_SUCCESS
}

// ---------------------------------------------------------------------------
// Tokens command
// ---------------------------------------------------------------------------

fn cmd_tokens(opts: &Options) -> i32 {
    let input = match read_input(opts) {
        Ok(data) => data,
        Err(code) => return code,
    };

    println!("LZSS stream:                  {}", input_name(opts));
    println!("Compressed size:              {}", input.len());
    println!();
    println!("  TOKEN    INPUT   OUTPUT  KIND");

    let mut iter = TokenIterator::new(&input);
    let (mut literals, mut matches) = (0u64, 0u64);
    let mut index = 0u64;

    loop {
        let out_pos = iter.output_position();
        let token = match iter.next() {
            Some(Ok(t)) => t,
            Some(Err(e)) => {
                eprintln!("lzss: invalid stream: {e}");
                return EXIT_FAILURE;
            }
            None => break,
        };
        // Offset of the token's payload (after any flag byte).
        let in_pos = iter.position() - token.encoded_len();

        match token {
            Token::Literal(b) => {
                literals += 1;
                let shown = if b.is_ascii_graphic() || b == b' ' {
                    format!(" '{}'", b as char)
                } else {
                    String::new()
                };
                println!("{index:>7} {in_pos:>8} {out_pos:>8}  LIT   {b:#04x}{shown}");
            }
            Token::Match { offset, length } => {
                matches += 1;
                println!(
                    "{index:>7} {in_pos:>8} {out_pos:>8}  COPY  distance {}, length {length}",
                    offset as usize + 1
                );
            }
        }
        index += 1;
    }

    let stop = iter.stop_reason().unwrap_or(StopReason::EndOfStream);
    println!();
    println!("Tokens:                       {index} ({literals} literals, {matches} matches)");
    println!("Decompressed size:            {}", iter.output_position());
    println!("Stream end:                   {stop}");

    if opts.json_output {
        print_json(serde_json::json!({
            "command": "tokens",
            "input_size": input.len(),
            "tokens": index,
            "literals": literals,
            "matches": matches,
            "output_size": iter.output_position(),
            "stop": stop.as_str(),
        }));
    }

    EXIT_SUCCESS
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let opts = resolve_options(cli);

    let default_filter = match opts.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    if opts.use_stdout
        && !opts.quiet
        && let Some(path) = &opts.output_file
    {
        eprintln!(
            "lzss: warning: -c option overrides output filename: {}",
            path.display()
        );
    }

    let exit_code = match opts.command {
        Command::Compress => cmd_compress(&opts),
        Command::Decompress => cmd_decompress(&opts),
        Command::Tokens => cmd_tokens(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("lzss".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn parse_byte_size_suffixes() {
        assert_eq!(parse_byte_size("1").unwrap(), 1);
        assert_eq!(parse_byte_size("2K").unwrap(), 2 * 1024);
        assert_eq!(parse_byte_size("3m").unwrap(), 3 * 1024 * 1024);
        assert_eq!(parse_byte_size("4G").unwrap(), 4 * 1024 * 1024 * 1024);
        assert!(parse_byte_size("").is_err());
        assert!(parse_byte_size("12X").is_err());
    }

    #[test]
    fn compress_subcommand_maps_correctly() {
        let opts = parse_opts(&["compress", "in.bin", "out.lzss"]);
        assert_eq!(opts.command, Command::Compress);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.bin")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.lzss")));
        assert!(!opts.use_stdout);
    }

    #[test]
    fn short_aliases() {
        assert_eq!(parse_opts(&["c", "a", "b"]).command, Command::Compress);
        assert_eq!(parse_opts(&["u", "a", "b"]).command, Command::Decompress);
    }

    #[test]
    fn decompress_max_size() {
        let opts = parse_opts(&["decompress", "in.lzss", "out.bin"]);
        assert_eq!(opts.max_output_size, CLI_DEFAULT_MAX_OUTPUT);

        let opts = parse_opts(&["decompress", "--max-size", "1M", "in.lzss", "out.bin"]);
        assert_eq!(opts.max_output_size, 1024 * 1024);
    }

    #[test]
    fn long_form_paths() {
        let opts = parse_opts(&["--quiet", "decompress", "--input", "a", "--output", "b"]);
        assert!(opts.quiet);
        assert_eq!(opts.input_file, Some(PathBuf::from("a")));
        assert_eq!(opts.output_file, Some(PathBuf::from("b")));
    }

    #[test]
    fn global_stdio_and_force_flags() {
        let opts = parse_opts(&["--force", "compress", "--stdout", "in", "out"]);
        assert!(opts.use_stdout);
        assert!(opts.force);
        assert_eq!(output_path(&opts), None);
        assert_eq!(output_name(&opts), "<stdout>");
    }

    #[test]
    fn missing_paths_mean_stdio() {
        let opts = parse_opts(&["compress"]);
        assert_eq!(input_name(&opts), "<stdin>");
        assert_eq!(output_path(&opts), None);
    }

    #[test]
    fn verbose_is_capped() {
        let verbose = parse_opts(&["--verbose", "--verbose", "--verbose", "compress", "in", "out"]);
        assert_eq!(verbose.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["lzss", "-q", "-v", "compress", "in", "out"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn tokens_and_config_map() {
        let opts = parse_opts(&["tokens", "in.lzss"]);
        assert_eq!(opts.command, Command::Tokens);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.lzss")));
        assert_eq!(parse_opts(&["config"]).command, Command::Config);
    }

    #[test]
    fn fuzz_entry_tolerates_garbage() {
        fuzz_try_parse_args(&["--nope".to_string()]);
        fuzz_try_parse_args(&["decompress".to_string(), "-m".to_string(), "x".to_string()]);
    }
}
