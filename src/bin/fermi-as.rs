use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fermi_asm::render::{render, report, InstReport};
use fermi_asm::{assemble, parse, AsmError, EncodeOptions, FormatTable};

#[derive(Parser, Debug)]
#[command(author, version, about = "Fermi-class GPU assembler (subset)")]
struct Opts {
    /// Input assembly files (one instruction per line), processed in order
    #[arg(required = true, value_name = "FILE")]
    inputs: Vec<PathBuf>,
    /// Output binary file (little-endian instruction words)
    #[arg(short, long)]
    output: PathBuf,
    /// Print a listing of each encoded instruction
    #[arg(long)]
    dump: bool,
    /// Print the listing as JSON instead of text
    #[arg(long)]
    json: bool,
    /// Reproduce the reference encoder's data-width modifier slot handling
    #[arg(long)]
    compat_slot_reset: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let opts = Opts::parse();

    let table = FormatTable::builtin();
    let enc = EncodeOptions {
        reference_slot_reset: opts.compat_slot_reset,
    };

    let mut out: Vec<u8> = Vec::new();
    let mut reports: Vec<InstReport> = Vec::new();
    let mut errors = 0usize;

    for path in &opts.inputs {
        let text = fs::read_to_string(path)
            .with_context(|| format!("{}: cannot open input file", path.display()))?;
        for (i, line) in text.lines().enumerate() {
            let lineno = i + 1;
            let src = match parse::parse_line(line) {
                Ok(None) => continue,
                Ok(Some(src)) => src,
                Err(e) => {
                    eprintln!("{}:{}: error: {}", path.display(), lineno, e);
                    errors += 1;
                    continue;
                }
            };
            match assemble(&table, src.pred, &src.name, src.args, enc) {
                Ok(inst) => {
                    out.extend_from_slice(inst.bytes());
                    if opts.dump && !opts.json {
                        print!("{}", render(&inst));
                    }
                    reports.push(report(&inst));
                }
                // a missing encoder is a table bug, not a source error
                Err(e @ AsmError::UnsupportedFormat(_)) => {
                    bail!("{}:{}: internal error: {}", path.display(), lineno, e)
                }
                Err(e) => {
                    eprintln!("{}:{}: error: {}", path.display(), lineno, e);
                    errors += 1;
                }
            }
        }
    }

    if errors > 0 {
        bail!("assembly failed with {errors} error(s)");
    }
    fs::write(&opts.output, &out)
        .with_context(|| format!("{}: cannot write output", opts.output.display()))?;
    if opts.dump && opts.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}
