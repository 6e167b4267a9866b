//! Mindful API Server
//!
//! A meditation tracker with a social layer: users log sessions, follow each
//! other, and take part in challenges that award badges.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post, put},
    Json, Router,
};
use sea_orm::{Database, DatabaseConnection};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod feed;
mod handlers;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::{
    ClickHouseClient, PostgresActivityRepository, PostgresBadgeRepository,
    PostgresChallengeRepository, PostgresFollowRepository, PostgresReminderRepository,
    PostgresSessionRepository, PostgresSubscriptionRepository, PostgresUserRepository,
};
use app::{
    AuthService, ChallengeService, DashboardService, FeedService, ProfileService,
    ReminderService, SessionService, SocialService, SubscriptionService,
};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<PostgresUserRepository, ClickHouseClient>>,
    pub session_service: Arc<
        SessionService<PostgresSessionRepository, PostgresActivityRepository, ClickHouseClient>,
    >,
    pub dashboard_service: Arc<DashboardService<PostgresSessionRepository>>,
    pub feed_service: Arc<
        FeedService<PostgresUserRepository, PostgresActivityRepository, PostgresFollowRepository>,
    >,
    pub social_service: Arc<SocialService<PostgresUserRepository, PostgresFollowRepository>>,
    pub profile_service: Arc<
        ProfileService<PostgresUserRepository, PostgresSessionRepository, PostgresBadgeRepository>,
    >,
    pub reminder_service: Arc<ReminderService<PostgresReminderRepository>>,
    pub subscription_service: Arc<SubscriptionService<PostgresSubscriptionRepository>>,
    pub challenge_service: Arc<
        ChallengeService<
            PostgresChallengeRepository,
            PostgresSessionRepository,
            PostgresBadgeRepository,
            ClickHouseClient,
        >,
    >,
    pub config: Config,
}

impl AppState {
    /// Wire every service to the Postgres adapters on `db`
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
        let session_repo = Arc::new(PostgresSessionRepository::new(db.clone()));
        let activity_repo = Arc::new(PostgresActivityRepository::new(db.clone()));
        let follow_repo = Arc::new(PostgresFollowRepository::new(db.clone()));
        let reminder_repo = Arc::new(PostgresReminderRepository::new(db.clone()));
        let subscription_repo = Arc::new(PostgresSubscriptionRepository::new(db.clone()));
        let challenge_repo = Arc::new(PostgresChallengeRepository::new(db.clone()));
        let badge_repo = Arc::new(PostgresBadgeRepository::new(db));

        let analytics_client = Arc::new(ClickHouseClient::new(config.clickhouse_url.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(
                user_repo.clone(),
                analytics_client.clone(),
                config.password_pepper.clone(),
            )),
            session_service: Arc::new(SessionService::new(
                session_repo.clone(),
                activity_repo.clone(),
                analytics_client.clone(),
            )),
            dashboard_service: Arc::new(DashboardService::new(session_repo.clone())),
            feed_service: Arc::new(
                FeedService::new(user_repo.clone(), activity_repo, follow_repo.clone())
                    .with_default_limit(config.feed_limit),
            ),
            social_service: Arc::new(SocialService::new(user_repo.clone(), follow_repo)),
            profile_service: Arc::new(ProfileService::new(
                user_repo,
                session_repo.clone(),
                badge_repo.clone(),
            )),
            reminder_service: Arc::new(ReminderService::new(reminder_repo)),
            subscription_service: Arc::new(SubscriptionService::new(subscription_repo)),
            challenge_service: Arc::new(ChallengeService::new(
                challenge_repo,
                session_repo,
                badge_repo,
                analytics_client,
            )),
            config,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router over `state`
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    // Rate limiting config: 2 req/sec sustained, burst of 5
    // Uses PeerIpKeyExtractor to get client IP from socket connection
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(2)
            .burst_size(5)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("invalid rate limit configuration"))?,
    );

    // Rate-limited routes (account creation and login)
    let rate_limited_routes = Router::new()
        .route("/auth/signup", post(handlers::signup))
        .route("/auth/social", post(handlers::social_signup))
        .route("/auth/login", post(handlers::login))
        .layer(GovernorLayer {
            config: governor_config,
        });

    let protected_routes = Router::new()
        // Sessions
        .route(
            "/sessions",
            get(handlers::list_sessions).post(handlers::create_session),
        )
        .route("/moods", get(handlers::list_moods))
        .route(
            "/meditation-types",
            get(handlers::list_types).post(handlers::create_type),
        )
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/analytics", get(handlers::get_analytics))
        // Feed
        .route("/feed", get(handlers::get_feed))
        .route("/feed/:id/comments", post(handlers::post_comment))
        .route("/feed/:id/encouragements", post(handlers::post_encouragement))
        // Social
        .route("/follow", post(handlers::follow))
        .route("/unfollow", post(handlers::unfollow))
        .route("/users/:id/followers", get(handlers::list_followers))
        .route("/users/:id/following", get(handlers::list_following))
        // Profiles
        .route("/users/me", get(handlers::get_me))
        .route("/users/me/bio", put(handlers::update_bio))
        .route("/users/me/photo", put(handlers::update_photo))
        .route("/users/me/visibility", put(handlers::update_visibility))
        .route("/users/:id", get(handlers::get_profile))
        .route("/users/:id/stats", get(handlers::get_stats))
        // Reminders
        .route(
            "/notifications",
            get(handlers::list_reminders).post(handlers::create_reminder),
        )
        .route(
            "/notifications/:id",
            patch(handlers::update_reminder).delete(handlers::delete_reminder),
        )
        // Subscription
        .route(
            "/subscription",
            get(handlers::get_subscription).post(handlers::subscribe),
        )
        // Challenges
        .route(
            "/challenges",
            get(handlers::list_community).post(handlers::create_challenge),
        )
        .route("/challenges/private", get(handlers::list_private))
        .route("/challenges/join", post(handlers::join_challenge))
        .route(
            "/challenges/:id/progress",
            get(handlers::get_progress).post(handlers::log_progress),
        )
        .route("/badges", get(handlers::list_badges))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Ok(Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        .merge(rate_limited_routes)
        .merge(protected_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindful_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mindful API...");

    let config = Config::from_env();
    if !config.clickhouse_enabled() {
        tracing::warn!("CLICKHOUSE_URL not set, usage events will only be logged");
    }

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = build_router(AppState::new(db, config))?;

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
