/// Plotscript - Interpreter CLI
use plotscript::backend::*;
use plotscript::repl::{run_repl, ReplConfig};
use std::env;
use std::fs;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the log filter
const LOG_ENV: &str = "PLOTSCRIPT_LOG";

fn print_usage() {
    eprintln!("Plotscript v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    plotscript [OPTIONS] [FILE]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help           Print this help message");
    eprintln!("    -v, --version        Print version information");
    eprintln!("    -e <EXPR>            Evaluate EXPR and print the result");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    [FILE]               Plotscript program to evaluate");
    eprintln!();
    eprintln!("With no arguments an interactive REPL is started.");
    eprintln!();
    eprintln!("ENVIRONMENT:");
    eprintln!("    {}        Log filter, e.g. debug (default: warn)", LOG_ENV);
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    plotscript plot.pls");
    eprintln!("    plotscript -e \"(map sqrt (list 1 4 9))\"");
    eprintln!("    plotscript");
}

fn print_version() {
    println!("Plotscript {}", VERSION);
}

struct Options {
    input: Option<String>,
    expression: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut expression = None;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-e" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing expression after -e".to_string());
                }
                expression = Some(args[i].clone());
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if input.is_some() {
                    return Err("Multiple input files specified".to_string());
                }
                input = Some(arg.to_string());
            }
        }
        i += 1;
    }

    if input.is_some() && expression.is_some() {
        return Err("Give either -e <EXPR> or FILE, not both".to_string());
    }

    Ok(Options { input, expression })
}

fn read_input(input: &str) -> Result<String, String> {
    let path = Path::new(input);
    if !path.exists() {
        return Err(format!("Could not open file for reading: {}", input));
    }
    fs::read_to_string(path).map_err(|e| format!("Failed to read file '{}': {}", input, e))
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Startup program text: the configured file if any, else the embedded one.
fn startup_program(config: &ReplConfig) -> Result<String, String> {
    match &config.startup_file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("Failed to read startup file '{}': {}", path.display(), e)),
        None => Ok(STARTUP_PROGRAM.to_string()),
    }
}

/// Evaluate one program and print its value.
fn eval_program(interp: &mut Interpreter, program: &str) -> Result<String, String> {
    interp.parse_stream(program).map_err(|_| {
        "Error: Invalid Program. Could not parse.".to_string()
    })?;
    interp
        .evaluate()
        .map(|exp| exp.to_string())
        .map_err(|e| e.to_string())
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    init_logging();

    let config = ReplConfig::load();
    let startup = match startup_program(&config) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut interp = Interpreter::new();
    if let Err(e) = interp.load_startup(&startup) {
        tracing::warn!(error = %e, "startup program failed");
        eprintln!("{}", e);
        process::exit(1);
    }

    let program = match (&options.input, &options.expression) {
        (Some(file), _) => match read_input(file) {
            Ok(content) => Some(content),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        (None, Some(expr)) => Some(expr.clone()),
        (None, None) => None,
    };

    match program {
        Some(program) => match eval_program(&mut interp, &program) {
            Ok(output) => println!("{}", output),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => {
            let mut kernel = Kernel::new(interp.into_environment());
            if let Err(e) = run_repl(&mut kernel, &config, &startup) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}
