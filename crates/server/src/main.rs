use gamehub_server::config::Config;
use gamehub_server::server::{Server, ServerError};
use gamehub_server::store::Store;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    env_logger::init();

    let config = Config::from_env();
    let store = Store::open(&config.db_path)?;
    store.init_tables()?;
    log::info!("opened database at {}", config.db_path);

    Server::new(config, store).run().await
}
