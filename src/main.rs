// SPDX-License-Identifier: MPL-2.0
use exif_lens::config::{self, Config, DEFAULT_LOG_FILTER, VERBOSE_LOG_FILTER};
use exif_lens::media::ExifMetadataReader;
use exif_lens::ui::report::OutputFormat;
use exif_lens::ui::shell::{self, PathFilter, SessionOptions, SessionOutcome};
use exif_lens::ui::terminal::TerminalInteraction;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
exif_lens - read EXIF metadata and GPS location from a photo

USAGE:
    exif_lens [OPTIONS] [IMAGE]

With IMAGE, prints its report and exits. Without it, starts the
interactive menu.

OPTIONS:
    --json              Print the report as JSON
    --all               Also list every EXIF tag (text output)
    --no-color          Disable coloured output
    --config <PATH>     Read settings from PATH
    --init-config       Write a default settings file and exit
    -v, --verbose       Print debug logs to stderr
    -h, --help          Print this help
    -V, --version       Print version
";

#[derive(Debug, Default, PartialEq)]
struct Args {
    image: Option<PathBuf>,
    json: bool,
    all: bool,
    no_color: bool,
    verbose: bool,
    init_config: bool,
    config: Option<PathBuf>,
    help: bool,
    version: bool,
}

impl Args {
    fn parse(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let parsed = Self {
            help: args.contains(["-h", "--help"]),
            version: args.contains(["-V", "--version"]),
            json: args.contains("--json"),
            all: args.contains("--all"),
            no_color: args.contains("--no-color"),
            verbose: args.contains(["-v", "--verbose"]),
            init_config: args.contains("--init-config"),
            config: args.opt_value_from_str("--config")?,
            image: args.opt_free_from_str()?,
        };
        if let Some(image) = &parsed.image {
            if image.to_string_lossy().starts_with('-') {
                return Err(pico_args::Error::ArgumentParsingFailed {
                    cause: format!("unknown option '{}'", image.display()),
                });
            }
        }
        let remaining = args.finish();
        if let Some(extra) = remaining.first() {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unexpected argument '{}'", extra.to_string_lossy()),
            });
        }
        Ok(parsed)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(path: Option<&PathBuf>) -> Config {
    let loaded = match path {
        Some(path) => config::load_from_path(path),
        None => config::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "could not read settings, using defaults");
        Config::default()
    })
}

fn session_options(args: &Args, config: &Config) -> SessionOptions {
    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output()
    };
    SessionOptions {
        clear_screen: config.clear_screen(),
        show_banner: config.show_banner(),
        color: config.color() && !args.no_color && console::colors_enabled(),
        show_all: args.all,
        format,
        policy: config.presence_policy(),
    }
}

fn init_config(path: Option<&PathBuf>) -> ExitCode {
    let Some(path) = path.cloned().or_else(config::default_config_path) else {
        eprintln!("error: no configuration directory on this platform");
        return ExitCode::FAILURE;
    };
    if path.exists() {
        eprintln!("error: {} already exists", path.display());
        return ExitCode::FAILURE;
    }
    match config::save_to_path(&Config::default(), &path) {
        Ok(()) => {
            println!("Wrote {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_direct(image: &Path, options: &SessionOptions) -> ExitCode {
    if let Err(rejection) = shell::check_file(image) {
        eprintln!("error: {rejection}");
        return ExitCode::FAILURE;
    }

    let report = shell::inspect_path(&ExifMetadataReader, image, options.policy);
    match shell::render(&report, options.format, options.text_options()) {
        Ok(rendered) => print!("{rendered}"),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    }

    if report.is_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_menu(config: &Config, options: &SessionOptions) -> ExitCode {
    let mut terminal = TerminalInteraction::new(options.color);
    let filter = PathFilter::new(config.extensions());
    match shell::run_interactive(&mut terminal, &ExifMetadataReader, &filter, options) {
        Ok(outcome) => {
            debug!(?outcome, "session finished");
            if matches!(outcome, SessionOutcome::Cancelled) {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let args = match Args::parse(pico_args::Arguments::from_env()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    if args.help {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }
    if args.version {
        println!("exif_lens {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    if args.init_config {
        return init_config(args.config.as_ref());
    }

    let config = load_config(args.config.as_ref());
    let options = session_options(&args, &config);
    debug!(?options, "starting");

    match &args.image {
        Some(image) => run_direct(image, &options),
        None => run_menu(&config, &options),
    }
}
