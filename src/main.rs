use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadsim::api;
use leadsim::client::{SimClient, DEFAULT_URL};
use leadsim::config::ServerConfig;
use leadsim::service::SimulationService;
use leadsim::store::MemoryStore;
use leadsim_core::models::{Phase, SimulationAction};

#[derive(Parser)]
#[command(name = "leadsim")]
#[command(about = "Team-leadership training simulation")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the simulation server
    Serve {
        /// Port for HTTP API (overrides LEADSIM_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Interface to bind (overrides LEADSIM_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Mount the debug phase override route
        #[arg(long)]
        debug_routes: bool,

        /// Seed for scripted answers (overrides LEADSIM_RNG_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Check server status
    Status {
        /// API base URL
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
    /// Play a scripted session against a server started with --debug-routes
    Demo {
        /// API base URL
        #[arg(long, default_value = DEFAULT_URL)]
        url: String,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "leadsim=debug,leadsim_core=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new(config.max_sessions, config.session_ttl));
    let service = SimulationService::with_seed(store, config.rng_seed, config.debug_routes);

    // Expired sessions are also dropped lazily on access; this keeps idle ones
    // from piling up.
    let sweeper = service.clone();
    let sweep_interval = config.sweep_interval;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        loop {
            ticker.tick().await;
            sweeper.sweep_expired();
        }
    });

    if config.debug_routes {
        tracing::warn!("Debug routes enabled: phases can be forced over HTTP");
    }

    let app = api::create_router(service);
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("leadsim server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn demo(client: &SimClient) -> anyhow::Result<()> {
    let id = client.start_session().await?;
    println!("Session {}", id);

    let script = [
        SimulationAction::question("alex"),
        SimulationAction::question("jordan"),
        SimulationAction::question("sam"),
        SimulationAction::delegate("alex", "backend_api"),
        SimulationAction::delegate("jordan", "create_mockups"),
        SimulationAction::delegate("sam", "market_research"),
        SimulationAction::message("jordan", "Great work on the research, I appreciate it"),
        SimulationAction::conflict("private_meetings"),
    ];
    for action in &script {
        let response = client.submit_action(id, action).await?;
        println!(
            "[{}] {} - {}",
            action.kind.as_str(),
            response.message,
            response.team_member_reaction.unwrap_or_default()
        );
        for consequence in &response.consequences {
            println!("    ! {}", consequence);
        }
    }

    client.force_phase(id, Phase::Completed).await?;
    let state = client.get_state(id).await?;
    println!("Phase: {}", state.phase);
    let results = client.get_results(id).await?;
    for score in results.competency_scores.values() {
        println!("{:<20} {:>3}  {}", score.name, score.score, score.feedback);
    }
    println!(
        "Overall: {} ({} actions)",
        results.overall_rating.as_str(),
        results.actions_taken
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve {
            port,
            host,
            debug_routes,
            seed,
        }) => {
            let mut config = ServerConfig::from_env();
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(host) = host {
                config.host = host;
            }
            config.debug_routes |= debug_routes;
            if seed.is_some() {
                config.rng_seed = seed;
            }
            serve(config).await?;
        }
        Some(Commands::Status { url }) => {
            let client = SimClient::new(url.as_str());
            match client.health().await {
                Ok(status) => println!("leadsim server at {}: {}", url, status),
                Err(e) => println!("leadsim server at {} is not reachable: {}", url, e),
            }
        }
        Some(Commands::Demo { url }) => {
            demo(&SimClient::new(url)).await?;
        }
        None => {
            serve(ServerConfig::from_env()).await?;
        }
    }

    Ok(())
}
