use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use ansiview::{Document, ViewOptions, read_input, render_dump, run_pager};
use clap::Parser;

/// CP437 ANSI art viewer with scrolling, autoplay and SAUCE support
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ANSI file to show, or `-` to read standard input
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Write the art once to stdout with colors instead of paging it
    #[arg(long)]
    cat: bool,

    /// Show the SAUCE metadata including comments
    #[arg(long)]
    sauce: bool,

    /// Delay between lines in autoplay mode, in seconds
    #[arg(long, value_name = "SECS", default_value = "0.1", value_parser = parse_delay)]
    autoplay_delay: Duration,

    /// Wrap at this many columns instead of the SAUCE width (at most 1024)
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..=ansiview::MAX_COLUMNS as i64))]
    columns: Option<u16>,

    /// Force iCE colors (blink selects bright backgrounds)
    #[arg(long, conflicts_with = "no_ice")]
    ice: bool,

    /// Force classic blink, ignoring the SAUCE iCE flag
    #[arg(long)]
    no_ice: bool,

    /// Log decoding details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_delay(arg: &str) -> Result<Duration, String> {
    let secs: f64 = arg.parse().map_err(|e| format!("{e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{e}"))
}

impl Args {
    fn view_options(&self) -> ViewOptions {
        let ice_colors = match (self.ice, self.no_ice) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        ViewOptions {
            show_metadata: self.sauce,
            dump_mode: self.cat,
            autoplay_delay: self.autoplay_delay,
            columns: self.columns,
            ice_colors,
        }
    }
}

fn main() {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(err) = run(&args) {
        if err.is_input_error() {
            eprintln!("ansiview: {err}");
        } else {
            eprintln!("ansiview: terminal error: {err}");
        }
        process::exit(1);
    }
}

fn run(args: &Args) -> ansiview::Result<()> {
    let options = args.view_options();
    let data = read_input(&args.file)?;
    let document = Document::from_bytes(&data, &options);

    if options.show_metadata {
        let mut out = io::stdout().lock();
        document.write_metadata_report(&mut out)?;
        out.flush()?;
        return Ok(());
    }
    if options.dump_mode {
        return render_dump(&document.screen, &mut io::BufWriter::new(io::stdout().lock()));
    }
    run_pager(&document, options.autoplay_delay)
}
