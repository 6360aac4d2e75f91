use signal_compiler::config::RuntimeConfig;
use signal_compiler::{logging, pipeline};
use std::env;

struct Options {
    input: String,
    show_tree: bool,
    config_path: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_global_logging()?;
    pipeline::validate_pipeline()?;

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map_or("signal_compiler", String::as_str);

    if args.iter().skip(1).any(|arg| arg == "--help") {
        print_help(program_name);
        return Ok(());
    }

    let options = match parse_options(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} <input.sig> [--tree] [--config <file>]", program_name);
            eprintln!("       {} --help", program_name);
            std::process::exit(1);
        }
    };

    let config = match &options.config_path {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };

    let result = match pipeline::process_file_with_config(&options.input, &config) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("FAILED [{}]: {}", error.error_code(), error);
            std::process::exit(1);
        }
    };

    if options.show_tree {
        if let Some(tree) = result.tree_dump() {
            println!("{}", tree);
        }
    }

    if result.is_success() {
        println!("{}", result.report());
        Ok(())
    } else {
        for line in result.diagnostics() {
            eprintln!("{}", line);
        }
        std::process::exit(1);
    }
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut input = None;
    let mut show_tree = false;
    let mut config_path = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--tree" => show_tree = true,
            "--config" => match iter.next() {
                Some(path) => config_path = Some(path.clone()),
                None => return Err("--config requires a file path".to_string()),
            },
            option if option.starts_with("--") => {
                return Err(format!("unknown option '{}'", option));
            }
            path if input.is_none() => input = Some(path.to_string()),
            extra => return Err(format!("unexpected argument '{}'", extra)),
        }
    }

    Ok(Options {
        input: input.ok_or_else(|| "missing input file".to_string())?,
        show_tree,
        config_path,
    })
}

fn print_help(program_name: &str) {
    println!("SIGNAL Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("Scanner, parser and stack-frame code generator for SIGNAL programs");
    println!();
    println!("USAGE:");
    println!("    {} <input.sig> [options]", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --tree              Print the syntax tree before the listing");
    println!("    --config <file>     Load runtime preferences from a TOML file");
    println!();
    println!("OUTPUT:");
    println!("    Success: pseudo-assembly listing followed by the identifier table");
    println!("    Failure: one diagnostic per line, exit status 1");
    println!();
    println!("CONFIGURATION:");
    println!("    Build profile: {}", signal_compiler::config::build_info::profile());
    println!("    {}", signal_compiler::config::build_info::source_info());
}
