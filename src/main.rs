#![allow(dead_code, unused_imports)]

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

mod adapter;
mod domain;
mod infrastructure;
mod usecase;

use adapter::handler::{self, AppState};
use domain::repository::{AppointmentRepository, PetRepository};
use infrastructure::config::Config;
use infrastructure::persistence::{
    AppointmentPostgresRepository, InMemoryAppointmentRepository, InMemoryClinicStore,
    InMemoryPetRepository, PetPostgresRepository,
};
use infrastructure::telemetry::Metrics;
use infrastructure::template::TemplateEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config
    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config/config.yaml".to_string());
    let cfg = Config::load(&config_path)?;

    // Telemetry
    infrastructure::telemetry::init_telemetry(&cfg.telemetry);

    info!(
        app_name = %cfg.app.name,
        version = %cfg.app.version,
        environment = %cfg.app.environment,
        "starting petclinic server"
    );

    // Database pool (optional)
    let db_pool = if let Some(ref db_config) = cfg.database {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| db_config.connection_url());
        info!("connecting to database");
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(db_config.max_open_conns)
            .connect(&url)
            .await?;
        info!("database connection pool established");
        Some(pool)
    } else if let Ok(url) = std::env::var("DATABASE_URL") {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(25)
            .connect(&url)
            .await?;
        info!("database connection pool established from DATABASE_URL");
        Some(pool)
    } else {
        info!("no database configured, using in-memory store");
        None
    };

    // Migrations
    if let Some(ref pool) = db_pool {
        sqlx::migrate!().run(pool).await?;
        info!("database migrations applied");
    }

    // Repositories
    let (pet_repo, appointment_repo): (
        Arc<dyn PetRepository>,
        Arc<dyn AppointmentRepository>,
    ) = if let Some(ref pool) = db_pool {
        (
            Arc::new(PetPostgresRepository::new(pool.clone())),
            Arc::new(AppointmentPostgresRepository::new(pool.clone())),
        )
    } else {
        let store = Arc::new(InMemoryClinicStore::new());
        (
            Arc::new(InMemoryPetRepository::new(store.clone())),
            Arc::new(InMemoryAppointmentRepository::new(store)),
        )
    };

    // Use cases
    let create_pet_uc = Arc::new(usecase::CreatePetUseCase::new(pet_repo.clone()));
    let get_pet_uc = Arc::new(usecase::GetPetUseCase::new(pet_repo.clone()));
    let list_pets_uc = Arc::new(usecase::ListPetsUseCase::new(pet_repo.clone()));
    let update_pet_uc = Arc::new(usecase::UpdatePetUseCase::new(pet_repo.clone()));
    let delete_pet_uc = Arc::new(usecase::DeletePetUseCase::new(pet_repo.clone()));
    let create_appointment_uc = Arc::new(usecase::CreateAppointmentUseCase::new(
        appointment_repo.clone(),
        pet_repo.clone(),
    ));
    let get_appointment_uc = Arc::new(usecase::GetAppointmentUseCase::new(
        appointment_repo.clone(),
    ));
    let list_appointments_uc = Arc::new(usecase::ListAppointmentsUseCase::new(
        appointment_repo.clone(),
    ));
    let update_appointment_uc = Arc::new(usecase::UpdateAppointmentUseCase::new(
        appointment_repo.clone(),
        pet_repo.clone(),
    ));
    let delete_appointment_uc = Arc::new(usecase::DeleteAppointmentUseCase::new(
        appointment_repo.clone(),
    ));

    // Metrics and templates
    let metrics = Arc::new(Metrics::new("petclinic-server"));
    let templates = Arc::new(TemplateEngine::new()?);

    // AppState
    let state = AppState {
        create_pet_uc,
        get_pet_uc,
        list_pets_uc,
        update_pet_uc,
        delete_pet_uc,
        create_appointment_uc,
        get_appointment_uc,
        list_appointments_uc,
        update_appointment_uc,
        delete_appointment_uc,
        metrics,
        templates,
        root_view: cfg.server.root_view,
    };

    // Router
    let app = handler::router(state);

    // HTTP server
    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port).parse()?;
    info!("HTTP server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("petclinic server exited");
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = signal::ctrl_c() => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
