use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use slovnik_scanner::parallel::{process_batch_threaded, write_results, ParallelConfig, Stats};
use slovnik_scanner::{query_url, LabelTable, Language};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "slovnik-scanner")]
#[command(about = "Extracts dictionary entries from saved slovnik.seznam.cz result pages - outputs one JSON line per page")]
struct Args {
    /// Saved result pages (.html or .html.bz2)
    #[arg(required_unless_present = "url_for")]
    inputs: Vec<PathBuf>,

    /// Output JSONL file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of threads (0 = auto-detect)
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Pages handed to the worker threads at a time
    #[arg(long, default_value_t = 256)]
    batch_size: usize,

    /// YAML table of block header labels (default: built-in Czech labels)
    #[arg(long)]
    labels: Option<PathBuf>,

    /// Print the query URL for WORD and exit
    #[arg(long, value_name = "WORD")]
    url_for: Option<String>,

    /// Source language for --url-for (cz or ru)
    #[arg(long, default_value = "cz")]
    lang: Language,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,
}

fn print_stats(stats: &Stats) {
    eprintln!();
    eprintln!("============================================================");
    eprintln!("Pages processed: {}", stats.pages_processed);
    eprintln!("  Entry pages: {}", stats.entry_pages);
    eprintln!("  Suggestion pages: {}", stats.suggestion_pages);
    eprintln!("  Without results: {}", stats.missing_pages);
    eprintln!("  Failed: {}", stats.failed_pages);
    eprintln!("Words written: {}", stats.words_written);
    eprintln!("Samples written: {}", stats.samples_written);
    eprintln!(
        "Time: {}m {}s",
        stats.elapsed.as_secs() / 60,
        stats.elapsed.as_secs() % 60
    );
    eprintln!("============================================================");
}

fn run(args: &Args) -> slovnik_scanner::Result<Stats> {
    let start_time = Instant::now();

    let labels = match &args.labels {
        Some(path) => LabelTable::load(path)?,
        None => LabelTable::default(),
    };
    log::debug!("using {} block labels", labels.len());

    let mut config = ParallelConfig::default();
    if args.threads > 0 {
        config.num_threads = args.threads;
    }

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };
    let mut writer = BufWriter::with_capacity(256 * 1024, sink);

    let pb = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(args.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    };

    let mut stats = Stats::default();
    for batch in args.inputs.chunks(args.batch_size.max(1)) {
        let results = process_batch_threaded(batch, &labels, config.num_threads);
        let failures = write_results(&results, &mut writer, &mut stats)?;
        for (source, error) in failures {
            pb.suspend(|| eprintln!("Error parsing {}: {}", source.display(), error));
        }
        pb.inc(batch.len() as u64);
        pb.set_message(format!("Words: {}", stats.words_written));
    }

    pb.finish_and_clear();
    stats.elapsed = start_time.elapsed();
    Ok(stats)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Some(word) = &args.url_for {
        match query_url(word, args.lang) {
            Ok(url) => println!("{}", url),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    if !args.quiet {
        eprintln!("Pages: {}", args.inputs.len());
        match &args.output {
            Some(path) => eprintln!("Output: {}", path.display()),
            None => eprintln!("Output: stdout"),
        }
        eprintln!();
    }

    match run(&args) {
        Ok(stats) => {
            if !args.quiet {
                print_stats(&stats);
            }
            if stats.failed_pages > 0 {
                std::process::exit(2);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
