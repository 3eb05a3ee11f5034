//! `sitemap2csv` - convert an XML sitemap (or sitemap index) to CSV.
//!
//! Reads a file, standard input, or `--text`, and writes `sitemap-<millis>.csv`
//! unless `--output` or `--stdout` says otherwise.
use anyhow::{Context, Result};
use clap::Parser;
use sitemap_csv::{SitemapSource, export_file_name, parse_source, render_preview, write_csv};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
    process::ExitCode,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "sitemap_csv=info,sitemap2csv=info";

#[derive(Debug, Parser)]
#[command(name = "sitemap2csv", version, about = "Convert an XML sitemap to CSV")]
struct Args {
    /// Sitemap file to read; `-` reads standard input
    #[arg(conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Sitemap XML given inline, as if pasted
    #[arg(long)]
    text: Option<String>,

    /// Directory for the timestamped export file
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Exact path of the export file, instead of a timestamped name in --out-dir
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the CSV to standard output instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Print the first rows as a table on standard error
    #[arg(long)]
    preview: bool,
}
impl Args {
    fn source(&self) -> Result<Option<SitemapSource>> {
        if let Some(text) = &self.text {
            return Ok(Some(SitemapSource::Text(text.clone())));
        }

        match &self.file {
            Some(path) if path.as_os_str() == "-" => {
                let text = std::io::read_to_string(std::io::stdin())
                    .context("failed to read standard input")?;
                Ok(Some(SitemapSource::Text(text)))
            }
            Some(path) => Ok(Some(SitemapSource::File(path.clone()))),
            None => Ok(None),
        }
    }

    fn output_path(&self) -> PathBuf {
        match &self.output {
            Some(path) => path.clone(),
            None => self.out_dir.join(export_file_name(chrono::Utc::now())),
        }
    }
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let source = args.source()?;
    let records = parse_source(source.as_ref())?;
    info!(records = records.len(), "parsed sitemap");

    if args.preview {
        eprint!("{}", render_preview(&records));
    }

    if args.stdout {
        let mut stdout = std::io::stdout().lock();
        write_csv(&mut stdout, &records).context("failed to write to standard output")?;
        writeln!(stdout)?;
        return Ok(());
    }

    let path = args.output_path();
    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, &records)
        .and_then(|()| writer.flush())
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), "exported CSV");
    Ok(())
}
