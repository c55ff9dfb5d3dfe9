//! Fuseforge - Entry Point
//!
//! Parses command-line options, then either rebuilds the dataset from a
//! guide document or loads the catalog and runs the interactive shell.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Result;

use fuseforge::catalog::loader;
use fuseforge::ingest;
use fuseforge::shell;

#[derive(Debug, Default)]
struct Options {
    data_path: Option<PathBuf>,
    rebuild: Option<(PathBuf, Option<PathBuf>)>,
    show_help: bool,
    show_version: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => options.show_help = true,
            "-V" | "--version" => options.show_version = true,
            "--data" => {
                i += 1;
                let path = args.get(i).ok_or("--data requires a path")?;
                options.data_path = Some(PathBuf::from(path));
            }
            "--rebuild-data" => {
                i += 1;
                let input = args.get(i).ok_or("--rebuild-data requires an input file")?;
                let output = args
                    .get(i + 1)
                    .filter(|a| !a.starts_with("--"))
                    .map(PathBuf::from);
                if output.is_some() {
                    i += 1;
                }
                options.rebuild = Some((PathBuf::from(input), output));
            }
            other => return Err(format!("unknown option: {other}")),
        }
        i += 1;
    }
    Ok(options)
}

fn print_usage() {
    println!("Usage: fuseforge [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --data <path>                  Use a specific dataset file");
    println!("  --rebuild-data <guide> [out]   Rebuild the dataset from a fusion guide");
    println!("  -h, --help                     Show this help");
    println!("  -V, --version                  Show version");
    println!();
    println!("Without options, starts the interactive search shell.");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!();
            print_usage();
            process::exit(2);
        }
    };
    if options.show_help {
        print_usage();
        return Ok(());
    }
    if options.show_version {
        println!("fuseforge {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some((input, output)) = options.rebuild {
        let report = ingest::rebuild_dataset(&input, output.as_deref())?;
        println!(
            "Rebuilt {} items -> {}",
            report.item_count,
            report.output.display()
        );
        return Ok(());
    }

    log::info!("starting fuseforge v{}", env!("CARGO_PKG_VERSION"));
    let loaded = loader::load_catalog(options.data_path.as_deref())?;
    println!(
        "Loaded {} items from {}",
        loaded.index.len(),
        loaded.source_name()
    );
    println!("Type a name to search (partial allowed). Type \"help\" for help.");
    shell::run(&loaded.index)
}
