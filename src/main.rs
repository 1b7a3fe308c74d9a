use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use svtree::summary::ALL_OPCODES;
use svtree::{summarize, ElementType, Scalar, SummarizeRequest, SvtBuilder, NA_INTEGER, NA_REAL};
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "svtree", about = "Summarize sparse arrays stored as Sparse Vector Trees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reduce a sparse array read as coordinate entries.
    Summarize {
        /// Entries file: 0-based coordinates then the value on each line (`-` for stdin).
        entries: PathBuf,
        /// Array extents, innermost first (e.g. `4,3` for a 4 x 3 matrix).
        #[arg(long, value_delimiter = ',', required = true)]
        dims: Vec<usize>,
        /// Element type: integer or double.
        #[arg(long = "type", default_value = "double")]
        element_type: ElementType,
        /// Operation name (see `svtree ops`).
        #[arg(long)]
        op: String,
        /// Drop NAs instead of propagating them.
        #[arg(long)]
        na_rm: bool,
        /// Center for centered_X2_sum, var1 and sd1.
        #[arg(long, allow_hyphen_values = true)]
        center: Option<f64>,
        /// Store all-one leaves with values instead of lacunar.
        #[arg(long)]
        no_lacunar: bool,
        /// Print traversal statistics.
        #[arg(long)]
        stats: bool,
    },
    /// List the supported operation names.
    Ops,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("svtree=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            entries,
            dims,
            element_type,
            op,
            na_rm,
            center,
            no_lacunar,
            stats,
        } => {
            let request = SummarizeRequest::new(&op, element_type)?
                .with_na_rm(na_rm)
                .with_center(center)
                .with_stats(stats);
            run_summarize(entries, &dims, request, !no_lacunar)?
        }
        Commands::Ops => run_ops(),
    }

    Ok(())
}

fn run_summarize(
    entries_path: PathBuf,
    dims: &[usize],
    request: SummarizeRequest,
    lacunar: bool,
) -> Result<()> {
    let mut builder = SvtBuilder::new(dims, request.element_type)
        .context("invalid array shape")?
        .with_lacunar(lacunar);
    let reader = open_entries(&entries_path)
        .with_context(|| format!("failed to open entries file {}", entries_path.display()))?;
    read_entries(reader, &mut builder)
        .with_context(|| format!("failed to read entries from {}", entries_path.display()))?;

    let svt = builder.build();
    let summary = summarize(&svt, dims, &request)
        .with_context(|| format!("{}() failed", request.opcode))?;

    if summary.overflow_warning {
        warn!(op = %request.opcode, "NAs produced by integer overflow");
        eprintln!("warning: NAs produced by integer overflow");
    }
    println!("{}", summary.value);
    println!(
        "totalcount={}\tnzcount={}\tnacount={}",
        summary.totalcount, summary.nzcount, summary.nacount
    );
    if let Some(stats) = summary.stats {
        println!("{}", stats.report());
    }

    Ok(())
}

fn run_ops() {
    for op in ALL_OPCODES {
        let types = if op.supports(ElementType::Double) {
            "integer, double"
        } else {
            "integer"
        };
        println!("{}\t{}", op, types);
    }
}

fn open_entries(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    Ok(Box::new(BufReader::new(File::open(path)?)))
}

fn read_entries(reader: Box<dyn BufRead>, builder: &mut SvtBuilder) -> Result<()> {
    let ndim = builder.dims().len();
    let element_type = builder.element_type();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != ndim + 1 {
            anyhow::bail!(
                "expected {} coordinates and a value on line {}, found {} fields",
                ndim,
                line_no + 1,
                fields.len()
            );
        }
        let coords = fields[..ndim]
            .iter()
            .map(|field| {
                field.parse::<usize>().with_context(|| {
                    format!("invalid coordinate '{}' on line {}", field, line_no + 1)
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        let value = parse_value(fields[ndim], element_type)
            .with_context(|| format!("invalid value '{}' on line {}", fields[ndim], line_no + 1))?;

        builder
            .push(&coords, value)
            .with_context(|| format!("cannot store entry on line {}", line_no + 1))?;
    }

    Ok(())
}

fn parse_value(field: &str, element_type: ElementType) -> Result<Scalar> {
    Ok(match (field, element_type) {
        ("NA", ElementType::Integer) => Scalar::Int(NA_INTEGER),
        ("NA", ElementType::Double) => Scalar::Double(NA_REAL),
        (field, ElementType::Integer) => Scalar::Int(field.parse()?),
        (field, ElementType::Double) => Scalar::Double(field.parse()?),
    })
}
