use anyhow::Result;
use std::time::Duration;

use common::api::GoldsaveClient;
use common::config::Config;
use wallet::credentials::FileCredentialStore;
use wallet::routes::Route;
use wallet::session::{SessionSignal, WalletSession};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(Config::default_config_path);
    let config = Config::load(&config_path)?;

    let dispatch = common::observability::build_dispatch(&config.general.log_level);
    tracing::dispatcher::set_global_default(dispatch).map_err(anyhow::Error::msg)?;

    tracing::info!(backend = %config.backend.base_url, "goldsave wallet starting");

    let client = GoldsaveClient::new(
        &config.backend.base_url,
        Duration::from_secs(config.backend.request_timeout_secs),
    );
    let store = FileCredentialStore::new(&config.auth.token_path);

    let mut session = WalletSession::new();
    let signal = session.refresh(&client, &store).await;

    if signal == SessionSignal::RedirectToLogin {
        if let Some(error) = session.state().error.as_ref() {
            println!("{error}");
        }
        println!("-> redirect to {}", Route::Login);
        return Ok(());
    }

    print!("{}", wallet::render::render_page(session.state(), &config));
    Ok(())
}
