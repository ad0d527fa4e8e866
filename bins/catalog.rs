use dotenvy::dotenv;
use tracing::{error, info, warn};

use configs::{AppConfig, LogFormat, LoggingConfig};
use service::storage::{seed, EntityStore};
use service::Catalog;

fn init_logging(cfg: &LoggingConfig) {
    let directives = cfg.filter.as_deref();
    match cfg.format {
        LogFormat::Compact => common::utils::logging::init_logging_default(directives),
        LogFormat::Json => common::utils::logging::init_logging_json(directives),
    }
    info!(service = "catalog", event = "logger_init", format = ?cfg.format, "tracing subscriber initialized");
}

fn build_store(cfg: &AppConfig) -> anyhow::Result<EntityStore> {
    let store = match &cfg.catalog.seed_path {
        Some(path) => EntityStore::from_dataset(seed::load_dataset(path)?)?,
        None if cfg.catalog.demo_seed => seed::demo_store()?,
        None => EntityStore::new(),
    };
    Ok(store)
}

fn report(catalog: &Catalog) {
    let store = catalog.store();
    for team in store.list_teams() {
        info!(
            team = %team.name,
            members = store.member_count(team.id),
            services = store.team_services(team.id).len(),
            "team"
        );
    }
    for user in store.list_users() {
        info!(user = %user.name, role = ?user.role(), owned = store.services_owned_by(user.id).len(), "user");
    }
    for details in store.list_service_details() {
        info!(
            service = %details.service.name,
            owner = details.owner_name(),
            team = details.team_name(),
            docs = details.service.documentation_url.as_deref().unwrap_or("-"),
            repo = details.service.repository_url.as_deref().unwrap_or("-"),
            "service"
        );
    }
}

fn main() -> std::process::ExitCode {
    // load .env before reading RUST_LOG / CONFIG_PATH
    dotenv().ok();

    let (cfg, cfg_err) = match AppConfig::load_or_default() {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(&cfg.logging);
    if let Some(e) = cfg_err {
        warn!(service = "catalog", event = "config_invalid", error = %e, "falling back to default config");
    }

    let store = match build_store(&cfg) {
        Ok(store) => store,
        Err(e) => {
            error!(service = "catalog", event = "seed_failed", error = %e, "failed to build catalog");
            return std::process::ExitCode::FAILURE;
        }
    };

    let catalog = Catalog::new(store);
    info!(
        service = "catalog",
        event = "start",
        version = env!("CARGO_PKG_VERSION"),
        users = catalog.store().list_users().len(),
        teams = catalog.store().list_teams().len(),
        services = catalog.store().list_services().len(),
        "catalog ready"
    );
    report(&catalog);
    std::process::ExitCode::SUCCESS
}
