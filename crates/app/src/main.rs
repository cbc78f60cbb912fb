use cartpole_app::{run, RunOptions, SimConfig};
use log::LevelFilter;
use simcore::SimResult;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

fn main() -> SimResult<()> {
    let options = RunOptions::parse(std::env::args().skip(1))?;

    let level = if options.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("logger init failed: {e}");
    }

    let config = match &options.config_path {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };

    let summary = run(&config, &options)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
