use env_logger::Env;
use filedrop::{HttpServer, ServerConfig, ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let server = HttpServer::new(ServerConfig::default());
    server.start().await
}
