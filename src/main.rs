use clap::Parser;
use config_ipam_report::config::{
    RunConfig, DEFAULT_AGGREGATES_FILE, DEFAULT_INPUT_DIR, DEFAULT_LOG_CONFIG, DEFAULT_OUTPUT_DIR,
};
use config_ipam_report::output::{print_summary, write_report};
use config_ipam_report::run;
use config_ipam_report::templates::BuiltinTemplates;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "config-ipam-report")]
#[command(about = "Build an IPAM report from network device configuration captures.")]
struct Args {
    /// Directory holding the capture files
    #[arg(long, env = "CONFIG_IPAM_INPUT", default_value = DEFAULT_INPUT_DIR)]
    input: PathBuf,

    /// JSON file of public aggregates by category
    #[arg(long, env = "CONFIG_IPAM_AGGREGATES", default_value = DEFAULT_AGGREGATES_FILE)]
    aggregates: PathBuf,

    /// Directory the CSV reports are written to
    #[arg(long, env = "CONFIG_IPAM_OUTPUT", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// log4rs configuration file
    #[arg(long, env = "CONFIG_IPAM_LOG_CONFIG", default_value = DEFAULT_LOG_CONFIG)]
    log_config: PathBuf,

    /// Do not print the summary
    #[arg(long, env = "CONFIG_IPAM_QUIET")]
    quiet: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let args = Args::parse();
    let log_config = args.log_config.display().to_string();
    log4rs::init_file(&args.log_config, Default::default())
        .map_err(|e| format!("Error initializing log4rs from {log_config}: {e}"))?;
    log::info!("#Start main()");

    let config = RunConfig {
        input_dir: args.input,
        aggregates_file: args.aggregates,
        output_dir: args.output,
        ..Default::default()
    };

    let report = run(&config, &BuiltinTemplates::new())?;
    write_report(&report, &config.output_dir)?;
    if !args.quiet {
        print_summary(&report);
    }

    log::info!("#End main()");
    Ok(())
}
