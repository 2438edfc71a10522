use std::net::{IpAddr, SocketAddr};

use axum::{
    Router,
    routing::{get, post},
};
use kaziconnect_backend::{
    AppState,
    config::Config,
    middleware::{auth_middleware, log_errors},
    routes,
};
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Failed to load configuration");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'kaziconnect_backend';")
                    .await?;
                Ok(())
            })
        })
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to Postgres");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database schema is up to date");

    let state = AppState {
        pool,
        config: config.clone(),
    };

    let public_routes = Router::new()
        .route("/auth/register", post(routes::auth::register))
        .route("/auth/login", post(routes::auth::login))
        .route("/jobs", get(routes::jobs::list_jobs))
        .route("/jobs/{id}", get(routes::jobs::get_job))
        .route("/courses", get(routes::courses::list_courses))
        .route("/courses/{id}", get(routes::courses::get_course))
        .route("/ping", get(routes::health::ping));

    let protected_routes = Router::new()
        .route("/auth/me", get(routes::auth::me))
        .route(
            "/users/profile",
            get(routes::profile::get_profile).put(routes::profile::update_profile),
        )
        .route("/users/skills", post(routes::profile::add_skill))
        .route("/users/education", post(routes::profile::add_education))
        .route("/users/experience", post(routes::profile::add_experience))
        .route("/jobs/recommended", get(routes::jobs::recommended_jobs))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let router = Router::new().nest(
        "/api",
        Router::new().merge(public_routes).merge(protected_routes),
    );

    let router = router
        .layer(axum::middleware::from_fn(log_errors))
        .layer(CorsLayer::permissive());

    let app = router.with_state(state.clone());

    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
