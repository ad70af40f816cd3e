use lib::admin::backend::HttpBackend;
use lib::admin::helpers::read_config;
use lib::admin::local_storage::LocalStorage;
use lib::admin::session::Session;
use lib::catalog::{
    format_course_card, missing_card_fields, CatalogArgs, CatalogView, CategoryFilter,
};

use clap::Parser;
use log::{error, info, warn};

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = CatalogArgs::parse();
    let filter = match args.category.parse::<CategoryFilter>() {
        Ok(filter) => filter,
        Err(err) => {
            error!("{}", err);
            std::process::exit(2);
        }
    };
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

    /* Greet whoever is logged in on this machine */
    let storage = LocalStorage::new(&config.local_storage_path);
    match Session::restore(&storage) {
        Ok(session) => {
            if let Some(user) = session.user() {
                info!("Welcome back, {}!", user.name);
            }
        }
        Err(err) => warn!("Ignoring unreadable session: {}", err),
    }

    let backend = HttpBackend::new(reqwest::Client::new(), config.api_base_url.as_str());
    let mut view = CatalogView::new();
    view.load(&backend).await;
    view.select_category(filter);

    if let Some(message) = view.error() {
        error!("{}", message);
        std::process::exit(1);
    }

    info!("{}: {} course(s)", view.active(), view.courses().len());
    for course in view.courses() {
        info!("{}", format_course_card(course));
        let missing = missing_card_fields(course);
        if !missing.is_empty() {
            warn!("Course {} is missing {:?}", course.id, missing);
        }
    }
}
