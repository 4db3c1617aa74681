//! Command-line interface for kenmerk-flatten

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::io::Write;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use kenmerk_flatten::{
    assemble, default_targets, render, Loader, OutputFormat, ResolveContext, Result, Target,
    DEFAULT_SCHEMA_PATH,
};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "kenmerk-flatten")]
#[command(author, version, about = "Flatten the RIO XSD into an entity/attribute mapping", long_about = None)]
struct Cli {
    /// Path to the XSD schema file
    #[arg(value_name = "SCHEMA", default_value = DEFAULT_SCHEMA_PATH)]
    schema: PathBuf,

    /// Output notation
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Edn)]
    format: OutputFormat,

    /// Write everything on one line
    #[arg(long)]
    compact: bool,

    /// Only resolve the requested entities instead of every complex type
    #[arg(long)]
    lazy: bool,

    /// Resolve these names instead of the built-in entity table (repeatable)
    #[arg(short, long = "entity", value_name = "NAME")]
    entities: Vec<String>,
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<()> {
    let schema = Loader::new().load_file(&cli.schema)?;
    let mut ctx = ResolveContext::new(&schema);

    if !cli.lazy {
        let resolved = ctx.resolve_all()?;
        tracing::info!(resolved, "resolved all complex types");
    }

    let targets = if cli.entities.is_empty() {
        default_targets()
    } else {
        cli.entities.into_iter().map(Target::single).collect()
    };

    let mapping = assemble(&mut ctx, &targets)?;
    let rendered = render(&mapping, cli.format, !cli.compact)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
