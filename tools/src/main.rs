use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::Registry;
use dis_tools::{catalog_entries, format_catalog_pretty, format_inspect_pretty, inspect_datagram};
use glob::Pattern;

#[derive(Parser)]
#[command(
    name = "dis-tools",
    version,
    about = "DIS datagram inspection and catalog tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect the PDUs in captured datagrams.
    Inspect {
        /// Path to a datagram file or a directory of them.
        path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected datagrams.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected datagrams (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// List the registered PDU types.
    Catalog {
        /// Output format.
        #[arg(long, value_enum, default_value_t = CatalogFormat::Pretty)]
        format: CatalogFormat,
        /// Include each schema's field layout (json only).
        #[arg(long)]
        fields: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CatalogFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let cli = Cli::parse();
    let registry = catalog::registry().context("build catalog registry")?;
    match cli.command {
        Command::Inspect {
            path,
            glob,
            sort,
            limit,
        } => {
            let limits = wire::Limits::default();
            if path.is_dir() {
                let entries = collect_datagram_entries(&path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                log::info!("inspecting {} datagrams in {}", entries.len(), path.display());
                for entry in entries {
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    print!("{}", inspect_file(&entry.path, registry, &limits)?);
                }
            } else {
                print!("{}", inspect_file(&path, registry, &limits)?);
            }
        }
        Command::Catalog { format, fields } => {
            let with_layout = fields && matches!(format, CatalogFormat::Json);
            let entries = catalog_entries(registry, with_layout);
            match format {
                CatalogFormat::Json => {
                    let json = serde_json::to_string_pretty(&entries).context("serialize json")?;
                    println!("{json}");
                }
                CatalogFormat::Pretty => {
                    print!("{}", format_catalog_pretty(&entries));
                }
            }
        }
    }
    Ok(())
}

fn inspect_file(path: &Path, registry: &Registry, limits: &wire::Limits) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("read datagram {}", path.display()))?;
    let report = inspect_datagram(&bytes, registry, limits);
    if let Some(err) = &report.framing_error {
        log::warn!("{}: {err}", path.display());
    }
    Ok(format_inspect_pretty(&report))
}

struct DatagramEntry {
    path: PathBuf,
    size: u64,
}

fn collect_datagram_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<DatagramEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(DatagramEntry { path, size });
    }
    Ok(entries)
}

fn maybe_sort_entries(
    mut entries: Vec<DatagramEntry>,
    sort: Option<InspectSort>,
) -> Vec<DatagramEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}
