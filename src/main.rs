use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use rir_cidr_summary::cli::CommandLine;
use rir_cidr_summary::config;
use rir_cidr_summary::output::{print_summary, write_country_set, OutputFormat};
use rir_cidr_summary::summarize;
use std::error::Error;

/// log4rs.yml when present, otherwise warnings and errors to stderr.
fn init_logging() {
    if log4rs::init_file(config::LOG_CONFIG_FILE, Default::default()).is_ok() {
        return;
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {m}{n}")))
        .build();
    let fallback = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(LevelFilter::Warn));
    if let Ok(fallback) = fallback {
        let _ = log4rs::init_config(fallback);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    init_logging();
    let commands = CommandLine::parse_args();
    log::info!("#Start main()");

    let format = OutputFormat::from_mask_flag(commands.mask);
    let set = summarize(&commands.sources(), &commands.cache_dir, commands.overlap).await?;

    let stdout = std::io::stdout();
    write_country_set(&mut stdout.lock(), &set, format, &commands.countries)?;
    if commands.summary {
        print_summary(&set);
    }

    Ok(())
}
