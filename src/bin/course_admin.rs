use lib::admin::backend::HttpBackend;
use lib::admin::helpers::read_config;
use lib::admin::models::Args;
use lib::admin::notifier::LogNotifier;
use lib::admin::run_tool::run;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config = match read_config(&args.config_json_path) {
        Ok(config) => config,
        Err(err) => {
            error!(
                "Cannot read config from {}: {}",
                args.config_json_path.display(),
                err
            );
            std::process::exit(2);
        }
    };
    let backend = HttpBackend::new(reqwest::Client::new(), config.api_base_url.as_str());

    if let Err(err) = run(backend, LogNotifier, &args, &config).await {
        error!("{}", err);
        std::process::exit(1);
    }
}
