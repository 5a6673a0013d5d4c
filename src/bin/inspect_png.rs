use anyhow::{anyhow, bail, Context};
use solid_png::chunks::{iter_chunks, parse_signature, Chunk};

const USAGE: &str = "usage: inspect-png [-v] FILE";

fn main() -> anyhow::Result<()> {
    let mut args: Vec<_> = std::env::args().skip(1).collect();
    let verbosity = if args.first().map(String::as_str) == Some("-v") {
        args.remove(0);
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Error
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .parse_default_env()
        .init();

    let file_name = input_file(&args)?;
    let input = std::fs::read(file_name).with_context(|| format!("Failed to read {file_name}"))?;
    let (rest, _) =
        parse_signature(&input).map_err(|_| anyhow!("{file_name} is not a PNG file"))?;
    println!("signature ok");

    for chunk in iter_chunks(rest) {
        let chunk = chunk?;
        match chunk.parse()? {
            Chunk::IHDR(ihdr) => println!(
                "{chunk} width={} height={} depth={} color={:?} interlace={:?}",
                ihdr.width, ihdr.height, ihdr.bit_depth, ihdr.color_type, ihdr.interlace_method
            ),
            _ => println!("{chunk}"),
        }
    }
    Ok(())
}

fn input_file(args: &[String]) -> anyhow::Result<&str> {
    match args {
        [file_name] => Ok(file_name),
        _ => bail!(USAGE),
    }
}
