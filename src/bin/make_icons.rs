use std::{io::Write, path::PathBuf};

use anyhow::bail;
use solid_png::{create_icons, DEFAULT_ICONS};

const USAGE: &str = "usage: make-icons [-v] [OUTPUT_DIR]";

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(String::as_str) == Some("-v") {
        args.remove(0);
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();

    run(&args, &mut std::io::stdout())
}

fn output_dir(args: &[String]) -> anyhow::Result<PathBuf> {
    match args {
        [] => Ok(PathBuf::from(".")),
        [dir] => Ok(PathBuf::from(dir)),
        _ => bail!(USAGE),
    }
}

fn run(args: &[String], out: &mut impl Write) -> anyhow::Result<()> {
    create_icons(&output_dir(args)?, &DEFAULT_ICONS)?;
    writeln!(out, "Icons created successfully")?;
    Ok(())
}
