/// Report: writes an HTML or CSV scene report next to a project file.
///
/// Usage: report <project.ron> [--config <file>] [--csv | --html]
///               [--suffix <text>] [--filter <category>:<title>] [--list-filters]
///
/// Categories: tag, viewpoint, character, location, item

use scene_report::core::choices::{FilterCategory, FilterChoices};
use scene_report::core::format::OutputKind;
use scene_report::core::pipeline::ReportEngine;
use scene_report::schema::project::Project;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let source = PathBuf::from(&args[1]);
    let mut config_path = None;
    let mut output = None;
    let mut suffix = None;
    let mut filter_arg = None;
    let mut list_filters = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(PathBuf::from(&args[i]));
            }
            "--suffix" if i + 1 < args.len() => {
                i += 1;
                suffix = Some(args[i].clone());
            }
            "--filter" if i + 1 < args.len() => {
                i += 1;
                filter_arg = Some(args[i].clone());
            }
            "--csv" => output = Some(OutputKind::Csv),
            "--html" => output = Some(OutputKind::Html),
            "--list-filters" => list_filters = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if list_filters {
        let project = load_project(&source);
        print_filter_choices(&project);
        return;
    }

    let mut builder = ReportEngine::builder();
    if let Some(path) = config_path {
        builder = builder.config_file(path);
    }
    if let Some(output) = output {
        builder = builder.output(output);
    }
    if let Some(ref suffix) = suffix {
        builder = builder.suffix(suffix);
    }
    if let Some(ref arg) = filter_arg {
        let project = load_project(&source);
        let (category, title) = match parse_filter_arg(arg) {
            Some(parsed) => parsed,
            None => {
                eprintln!("ERROR: Filter must look like <category>:<title>, got '{}'", arg);
                process::exit(1);
            }
        };
        let choices = FilterChoices::from_project(&project);
        match choices.resolve(&project, category, title) {
            Some(filter) => builder = builder.filter(filter),
            None => {
                eprintln!("ERROR: No {} named '{}' in this project", category.name(), title);
                process::exit(1);
            }
        }
    }

    let engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    match engine.convert(&source) {
        Ok(target) => println!("Report written to \"{}\".", target.display()),
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: report <project.ron> [options]");
    println!();
    println!("Options:");
    println!("  --config <file>             RON report configuration");
    println!("  --csv | --html              output format (default: html)");
    println!("  --suffix <text>             appended to the report file name");
    println!("  --filter <category>:<title> only scenes matching the filter");
    println!("  --list-filters              print the filter choices and exit");
    println!();
    println!("Categories: tag, viewpoint, character, location, item");
}

fn load_project(path: &Path) -> Project {
    if !path.is_file() {
        eprintln!("ERROR: File \"{}\" not found.", path.display());
        process::exit(1);
    }
    match Project::load_from_ron(path) {
        Ok(project) => project,
        Err(e) => {
            eprintln!("ERROR: Failed to load project: {}", e);
            process::exit(1);
        }
    }
}

fn parse_filter_arg(arg: &str) -> Option<(FilterCategory, &str)> {
    let (category, title) = arg.split_once(':')?;
    let category = FilterCategory::from_name(&category.to_lowercase())?;
    Some((category, title))
}

fn print_filter_choices(project: &Project) {
    let choices = FilterChoices::from_project(project);
    for category in FilterCategory::ALL {
        let titles = choices.titles(project, category);
        if titles.is_empty() {
            println!("{}: (none)", category.name());
        } else {
            println!("{}: {}", category.name(), titles.join(" | "));
        }
    }
}
