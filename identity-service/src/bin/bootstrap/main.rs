use auth::TokenIssuer;
use auth::TokenSubject;
use auth::TokenVerifier;
use identity_service::config::Config;
use identity_service::domain::user::ports::CredentialStore;
use identity_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,auth=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Bootstrap starting"
    );

    let config = Config::load()?;
    let token_settings = config.jwt.token_settings()?;

    tracing::info!(
        max_connections = config.database.max_connections,
        jwt_issuer = %config.jwt.issuer,
        jwt_audience = %config.jwt.audience,
        jwt_lifetime_minutes = config.jwt.lifetime_minutes,
        "Configuration loaded"
    );

    if !token_settings.is_configured() {
        anyhow::bail!("jwt.secret is not configured; set JWT__SECRET");
    }

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    let store = PostgresCredentialStore::new(pg_pool);
    store.initialize().await?;

    // Round-trip a throwaway token through the configured signing settings
    let issuer = TokenIssuer::new(token_settings.clone());
    let verifier = TokenVerifier::new(token_settings);
    let probe = issuer.issue(&TokenSubject {
        id: None,
        login_name: "bootstrap-probe",
        email: None,
        roles: "",
    })?;
    verifier.validate(&probe.token)?;
    tracing::info!(token_id = %probe.token_id, "Token signing verified");

    tracing::info!("Identity core ready");

    Ok(())
}
