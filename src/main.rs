use std::sync::Arc;

use blueprint::api::HttpBlueprintApi;
use blueprint::auth::{PersistedSession, SessionStore};
use blueprint::cli::{parse_args, run_command, CliContext, USAGE};
use blueprint::config::ClientConfig;
use blueprint::logging::init_tracing;
use blueprint::query::LifecycleEvents;

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(64);
        }
    };

    let config = ClientConfig::from_env()?;
    init_tracing(&config.log_filter);

    let storage = config.storage()?;
    tracing::debug!("Session storage at {}", storage.path().display());
    let store = SessionStore::new(PersistedSession::new(Arc::new(storage)));
    store.rehydrate();

    let api = HttpBlueprintApi::reqwest(&config.api_base_url).with_session(store.clone());
    let ctx = CliContext {
        config,
        store,
        api: Arc::new(api),
        events: LifecycleEvents::new(),
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let code = runtime.block_on(async {
        let mut stdout = std::io::stdout();
        run_command(command, &ctx, &mut stdout).await
    })?;

    std::process::exit(code)
}
