use std::io::BufRead;
use std::path::{Path, PathBuf};

use passvet::config::{self, ProjectConfig};
use passvet::generator::{self, GeneratorOptions};
use passvet::{audit, output, Analyzer};
use tracing_subscriber::EnvFilter;

/// environment variable holding the log filter
const LOG_ENV: &str = "PASSVET_LOG";

fn main() {
    init_logging();
    std::process::exit(run());
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> i32 {
    // exit codes: 0 = ok, 1 = weak password found, 2 = error
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (config_path, args) = match take_config_flag(args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            return 2;
        }
    };

    match args.first().map(|s| s.as_str()) {
        Some("analyze") => run_analyze(&args[1..], config_path.as_deref()),
        Some("generate") => run_generate(&args[1..], config_path.as_deref()),
        Some("audit") => run_audit(&args[1..], config_path.as_deref()),
        Some("--help" | "-h") | None => {
            print_usage();
            0
        }
        Some(cmd) => {
            eprintln!("[ERROR] unknown command: {}", cmd);
            eprintln!();
            print_usage();
            2
        }
    }
}

fn print_usage() {
    eprintln!("passvet - password strength analyzer and generator");
    eprintln!();
    eprintln!("usage:");
    eprintln!("  passvet analyze [--json]        analyze the password on the first line of stdin");
    eprintln!("  passvet generate [flags]        print a random password");
    eprintln!("  passvet audit <file> [--json]   analyze every line of a password list");
    eprintln!("  passvet --help                  show this help");
    eprintln!();
    eprintln!("global flags:");
    eprintln!("  --config <path>                 config file (default: $PASSVET_CONFIG or");
    eprintln!("                                  $XDG_CONFIG_HOME/passvet/passvet.toml)");
    eprintln!();
    eprintln!("generate flags:");
    eprintln!("  --length <n>                    password length (default 14)");
    eprintln!("  --no-lower                      exclude lowercase letters");
    eprintln!("  --no-upper                      exclude uppercase letters");
    eprintln!("  --no-digits                     exclude digits");
    eprintln!("  --no-symbols                    exclude symbols");
    eprintln!("  --every-class                   include every selected class at least once");
    eprintln!();
    eprintln!("examples:");
    eprintln!("  printf '%s\\n' 'Tr0ub4dor&3' | passvet analyze");
    eprintln!("  passvet generate --length 20 --no-symbols");
    eprintln!("  passvet audit leaked.txt --json");
}

/// strip `--config <path>` from anywhere in the argument list
fn take_config_flag(args: Vec<String>) -> Result<(Option<PathBuf>, Vec<String>), String> {
    let mut config_path = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            match iter.next() {
                Some(path) => config_path = Some(PathBuf::from(path)),
                None => return Err("--config requires a value".to_string()),
            }
        } else if let Some(path) = arg.strip_prefix("--config=") {
            config_path = Some(PathBuf::from(path));
        } else {
            rest.push(arg);
        }
    }
    Ok((config_path, rest))
}

/// load the user config (if any), reporting failures on stderr
fn load_config(explicit: Option<&Path>) -> Option<ProjectConfig> {
    match config::load_config(explicit) {
        Ok((config, _)) => Some(config),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            None
        }
    }
}

fn build_analyzer(project_config: &ProjectConfig) -> Option<Analyzer> {
    let result = config::build_analyzer_config(project_config).and_then(Analyzer::new);
    match result {
        Ok(analyzer) => Some(analyzer),
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            None
        }
    }
}

fn run_analyze(args: &[String], config_path: Option<&Path>) -> i32 {
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            other => {
                eprintln!("[ERROR] unknown analyze flag: {}", other);
                return 2;
            }
        }
    }

    let Some(project_config) = load_config(config_path) else {
        return 2;
    };
    let Some(analyzer) = build_analyzer(&project_config) else {
        return 2;
    };

    let mut line = String::new();
    if let Err(e) = std::io::stdin().lock().read_line(&mut line) {
        eprintln!("[ERROR] failed to read password from stdin: {}", e);
        return 2;
    }
    let password = line.strip_suffix('\n').unwrap_or(&line);
    let password = password.strip_suffix('\r').unwrap_or(password);

    let report = analyzer.analyze(password);
    if json {
        match output::render_json(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("[ERROR] failed to serialize report: {}", e);
                return 2;
            }
        }
    } else {
        print!("{}", output::render_report(&report));
    }

    if report.is_weak() {
        1
    } else {
        0
    }
}

fn run_generate(args: &[String], config_path: Option<&Path>) -> i32 {
    let Some(project_config) = load_config(config_path) else {
        return 2;
    };

    let mut options = GeneratorOptions {
        length: project_config
            .generator
            .length
            .unwrap_or(generator::DEFAULT_LENGTH),
        ..Default::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--length" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("[ERROR] --length requires a value");
                    return 2;
                }
                options.length = match args[i].parse() {
                    Ok(n) => n,
                    Err(_) => {
                        eprintln!("[ERROR] invalid length: {}", args[i]);
                        return 2;
                    }
                };
            }
            "--no-lower" => options.lower = false,
            "--no-upper" => options.upper = false,
            "--no-digits" => options.digits = false,
            "--no-symbols" => options.symbols = false,
            "--every-class" => options.require_every_class = true,
            other => {
                eprintln!("[ERROR] unknown generate flag: {}", other);
                return 2;
            }
        }
        i += 1;
    }

    match generator::generate(&options) {
        Ok(password) => {
            println!("{}", password);
            0
        }
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            2
        }
    }
}

fn run_audit(args: &[String], config_path: Option<&Path>) -> i32 {
    let mut json = false;
    let mut list: Option<PathBuf> = None;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            flag if flag.starts_with("--") => {
                eprintln!("[ERROR] unknown audit flag: {}", flag);
                return 2;
            }
            path => {
                if list.is_some() {
                    eprintln!("[ERROR] audit takes a single file");
                    return 2;
                }
                list = Some(PathBuf::from(path));
            }
        }
    }
    let Some(list) = list else {
        eprintln!("[ERROR] audit requires a file argument");
        return 2;
    };

    let Some(project_config) = load_config(config_path) else {
        return 2;
    };
    let Some(analyzer) = build_analyzer(&project_config) else {
        return 2;
    };

    let summary = match audit::audit_file(&analyzer, &list) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[ERROR] failed to read {}: {}", list.display(), e);
            return 2;
        }
    };

    if json {
        match output::render_json(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("[ERROR] failed to serialize audit: {}", e);
                return 2;
            }
        }
    } else {
        print!("{}", output::render_audit(&summary));
        if summary.weak > 0 {
            eprintln!("[WARN] {} weak password(s) found", summary.weak);
        } else {
            eprintln!("[OK] no weak passwords found");
        }
    }

    if summary.weak > 0 {
        1
    } else {
        0
    }
}
