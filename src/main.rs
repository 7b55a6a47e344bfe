//! envtidy: regroup shell environment-variable definitions.
//!
//! Reads a variable collection from stdin (or `--input-file` when stdin is a
//! terminal), recomputes every `sort_group`, and writes the collection back in
//! the requested form.
//!
//! Handles:
//!   - JSON arrays of `{name, value, sort_group}` records
//!   - JSON analysis documents (`versions[*].environment_variables`)
//!   - `export NAME=VALUE` and `NAME=VALUE` lines

use std::io::{IsTerminal, Read};

use envtidy::config::Config;
use envtidy::diagnostics::LogSink;
use envtidy::format::{self, InputType, SpecialVars};
use envtidy::record::{EnvironmentVariable, validate_batch};
use envtidy::{Error, TidyOptions, tidy_sort_groups};

const USAGE: &str = "\
usage: envtidy [--input-file PATH] [--input-type TYPE] [--output-type TYPE]
               [--verbose] [--dump-config] [--help]

TYPE is one of: json-array, json-analysis, bash-exports, bash-env
Input is read from stdin unless stdin is a terminal.";

#[derive(Debug, Default)]
struct Args {
    input_file: Option<String>,
    input_type: Option<InputType>,
    output_type: Option<InputType>,
    verbose: bool,
    dump_config: bool,
    help: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut args = Args::default();
    while let Some(arg) = argv.next() {
        match arg.as_str() {
            "--input-file" => {
                args.input_file = Some(argv.next().ok_or("--input-file needs a path")?);
            }
            "--input-type" | "--output-type" => {
                let value = argv.next().ok_or(format!("{arg} needs a type"))?;
                let ty = value.parse::<InputType>().map_err(|e| e.to_string())?;
                if arg == "--input-type" {
                    args.input_type = Some(ty);
                } else {
                    args.output_type = Some(ty);
                }
            }
            "--verbose" | "-v" => args.verbose = true,
            "--dump-config" => args.dump_config = true,
            "--help" | "-h" => args.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn read_input(args: &Args) -> Result<Option<String>, Error> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        let mut input = String::new();
        stdin.lock().read_to_string(&mut input)?;
        return Ok(Some(input));
    }
    let Some(path) = &args.input_file else {
        return Ok(None);
    };
    let path = shellexpand::tilde(path).into_owned();
    Ok(Some(std::fs::read_to_string(path)?))
}

fn run(args: &Args, config: &Config, input: &str) -> Result<String, Error> {
    let input = input.trim();
    let input_type = args.input_type.unwrap_or_else(|| InputType::detect(input));
    let mut output_type = args.output_type.unwrap_or(input_type);
    let options = TidyOptions {
        verbose: args.verbose || config.settings.verbose,
    };
    let special = config.special_vars.to_special_vars();
    let mut sink = LogSink;

    if input_type == InputType::JsonAnalysis {
        if output_type != InputType::JsonAnalysis {
            log::warn!("{input_type} input can only be written as {input_type}");
        }
        return format::tidy_analysis(input, &options, &mut sink);
    }
    if output_type == InputType::JsonAnalysis {
        log::warn!("{output_type} output needs {output_type} input; writing {input_type}");
        output_type = input_type;
    }

    let vars = read_vars(input_type, input, &special)?;
    validate_batch(&vars)?;
    let tidied = tidy_sort_groups(&vars, &options, &mut sink)?;
    let tidied = tidied.iter().map(|c| c.as_ref());

    match output_type {
        InputType::JsonArray | InputType::JsonAnalysis => format::to_json_array(tidied),
        InputType::BashExports => Ok(format::to_bash_expression(
            tidied,
            &config.settings.export_prefix,
            &special,
        )),
        InputType::BashEnv => Ok(format::to_bash_expression(tidied, "", &special)),
    }
}

fn read_vars(
    input_type: InputType,
    input: &str,
    special: &SpecialVars,
) -> Result<Vec<EnvironmentVariable>, Error> {
    let vars = match input_type {
        InputType::JsonArray => format::from_json_array(input)?,
        InputType::BashExports | InputType::BashEnv => format::from_bash_expression(input),
        InputType::JsonAnalysis => {
            return Err(Error::Analysis(
                "analysis documents are regrouped as a whole".into(),
            ));
        }
    };
    Ok(special.clean_all(vars))
}

fn main() {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("envtidy: {e}\n{USAGE}");
            std::process::exit(1);
        }
    };
    if args.help {
        println!("{USAGE}");
        return;
    }

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("envtidy: {e}");
            std::process::exit(1);
        }
    };
    if args.dump_config {
        print!("{}", config.to_toml());
        return;
    }

    envtidy::logging::init(
        args.verbose || config.settings.verbose,
        &config.settings.log_file,
    );

    let input = match read_input(&args) {
        Ok(Some(input)) => input,
        Ok(None) => {
            eprintln!("envtidy: this usage requires --input-file\n{USAGE}");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("envtidy: {e}");
            std::process::exit(1);
        }
    };

    match run(&args, &config, &input) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("envtidy: {e}");
            std::process::exit(1);
        }
    }
}
