//! Command-line runner: map an ELF file and dump its vtables.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use tracing::{error, info};

use vmtdump::io::MappedRegion;
use vmtdump::{logging, validate_elf, DumpConfig, DumpError, LoadedObject};

/// Dump the Itanium C++ vtables of an ELF executable or shared object.
#[derive(Debug, Parser)]
#[command(name = "vmtdump", version, about)]
struct Args {
    /// ELF file to inspect
    file: PathBuf,

    /// Print a JSON array instead of text blocks
    #[arg(long)]
    json: bool,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => DumpConfig::from_file(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => DumpConfig::default(),
    };
    config.logging.json |= args.log_json;
    logging::init_from_config(&config.logging);

    let region = MappedRegion::open(&args.file, &config.io)
        .with_context(|| format!("could not open file {}", args.file.display()))?;
    let image = region.as_bytes();

    if !validate_elf(image) {
        bail!("invalid ELF file: {}", args.file.display());
    }

    let object = load_symbols(image, &args.file)?;
    info!(symbols = object.len(), "Symbols loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut reports = Vec::new();

    for symbol in object.symbols_with_marker(&config.vtable.marker) {
        let table = match object.decode_vtable(symbol) {
            Ok(table) => table,
            Err(err) => {
                error!(error = %err, symbol = symbol.name, "Skipping vtable");
                continue;
            }
        };

        if args.json {
            reports.push(if config.vtable.demangle {
                table.with_demangled_name()
            } else {
                table
            });
        } else {
            write!(out, "{table}")?;
        }
    }

    if args.json {
        serde_json::to_writer_pretty(&mut out, &reports)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}

/// Load the object, turning library errors into one runner diagnostic.
fn load_symbols<'a>(image: &'a [u8], path: &Path) -> anyhow::Result<LoadedObject<'a>> {
    match LoadedObject::load(image) {
        Ok(object) => Ok(object),
        Err(DumpError::NoSymbolTable | DumpError::EmptySymbolTable) => {
            bail!("no symbols found in {}", path.display())
        }
        Err(err) => Err(err).context("unable to load symbols from file"),
    }
}
