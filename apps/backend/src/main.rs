use actix_web::{middleware::Logger, web, App, HttpServer};
use chameleon_backend::config::GameConfig;
use chameleon_backend::infra::state::build_state;
use chameleon_backend::routes;
use chameleon_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment.
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = match std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
    {
        Ok(port) => port,
        Err(_) => {
            error!("BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        }
    };

    let security_config = match SecurityConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "BACKEND_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    let game_config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid game configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_security(security_config)
        .with_game_config(game_config.clone())
        .build()
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to build application state");
            std::process::exit(1);
        }
    };

    info!(
        host = %host,
        port,
        min_players = game_config.min_players,
        max_players = game_config.max_players,
        voting_secs = game_config.voting_duration.as_secs(),
        "Starting Chameleon backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
