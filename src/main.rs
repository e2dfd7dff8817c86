use clap::Parser;
use keyed_csv::{parse, rename, serialize, Dialect, DialectRegistry};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "keyed-csv")]
#[command(version)]
#[command(
    about = "Rename a primary key in a keyed CSV file, updating every <key> reference",
    long_about = None
)]
struct Cli {
    /// Input keyed-CSV file
    #[arg(value_name = "CSVFILE", required_unless_present = "list")]
    csvfile: Option<PathBuf>,

    /// Output file (must not be the same file as CSVFILE)
    #[arg(value_name = "OUTFILE", required_unless_present = "list")]
    outfile: Option<PathBuf>,

    /// Primary key to rename
    #[arg(value_name = "SRCKEY", required_unless_present = "list")]
    srckey: Option<String>,

    /// Replacement primary key
    #[arg(value_name = "DSTKEY", required_unless_present = "list")]
    dstkey: Option<String>,

    /// Dialect to use for parsing and serializing
    #[arg(short = 'D', long, default_value = "keyed")]
    dialect: String,

    /// Also reject reference tokens that point at no row
    #[arg(long)]
    strict: bool,

    /// List available dialects
    #[arg(short, long)]
    list: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load dialect configuration with user overrides
    let config = DialectRegistry::load_with_overrides()?;

    // Handle list command
    if cli.list {
        println!("Available dialects:\n");
        let mut dialects: Vec<_> = config.dialects.iter().collect();
        dialects.sort_by_key(|(name, _)| *name);

        for (name, dialect_config) in dialects {
            println!(
                "  {:<12} fields '{}'  rows '{}'  refs '{}{}'",
                name,
                dialect_config.field_delimiter.escape_default(),
                dialect_config.row_delimiter.escape_default(),
                dialect_config.reference_open.escape_default(),
                dialect_config.reference_close.escape_default(),
            );
        }
        return Ok(());
    }

    let dialect_config = config.get_dialect(&cli.dialect).ok_or_else(|| {
        format!(
            "Dialect '{}' not found. Use --list to see available dialects.",
            cli.dialect
        )
    })?;
    let dialect = Dialect::from_config(dialect_config)
        .map_err(|e| format!("Invalid dialect '{}': {}", cli.dialect, e))?;

    let csvfile = cli.csvfile.ok_or("CSVFILE is required")?;
    let outfile = cli.outfile.ok_or("OUTFILE is required")?;
    let srckey = cli.srckey.ok_or("SRCKEY is required")?;
    let dstkey = cli.dstkey.ok_or("DSTKEY is required")?;

    // Refuse to rewrite the input in place
    let same_file = csvfile == outfile
        || match (fs::canonicalize(&csvfile), fs::canonicalize(&outfile)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        };
    if same_file {
        return Err(format!(
            "CSVFILE ({}) and OUTFILE ({}) must not be the same file",
            csvfile.display(),
            outfile.display()
        )
        .into());
    }

    let text = fs::read_to_string(&csvfile)?;
    let table = parse(&text, &dialect)?;
    if cli.strict {
        table.validate_references(&dialect)?;
    }
    let renamed = rename(&table, &srckey, &dstkey, &dialect)?;
    fs::write(&outfile, serialize(&renamed, &dialect))?;

    Ok(())
}
