//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, PLAYERS_FILE (dataset path), GAME_SEED (reproducible draws).

use actix_files::Files;
use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use hoops_guess_web::{
    parse_players, Game, GameError, GameView, PlayerRecord, PoolFilterConfig, RoundEngine,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Unique identifier for a browser session's game.
type GameId = Uuid;

/// Per-session entry: game state + last activity time (for auto-cleanup).
struct GameEntry {
    game: Game,
    last_activity: Instant,
}

/// The one-shot dataset fetch, as seen by sessions created later.
enum Dataset {
    Loading,
    Loaded(Vec<PlayerRecord>),
    Failed(String),
}

struct Shared {
    dataset: RwLock<Dataset>,
    games: RwLock<HashMap<GameId, GameEntry>>,
    seed: Option<u64>,
    sessions_created: AtomicU64,
}

type AppState = Data<Shared>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Session view; on a failed action the error rides along with the state it left behind.
#[derive(Serialize)]
struct SessionResponse {
    id: GameId,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(flatten)]
    view: GameView,
}

impl SessionResponse {
    fn new(id: GameId, game: &Game, result: Result<(), GameError>) -> Self {
        Self {
            id,
            error: result.err().map(|e| e.to_string()),
            view: game.view(),
        }
    }
}

#[derive(Deserialize)]
struct GuessBody {
    guess: String,
}

/// Path segment: game id (e.g. /api/games/{id})
#[derive(Deserialize)]
struct GamePath {
    id: GameId,
}

/// Run `f` against a session's game and respond with its view (400 plus `error` on failure).
fn with_game<F>(state: &AppState, id: GameId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Game) -> Result<(), GameError>,
{
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No game" })),
    };
    entry.last_activity = Instant::now();
    let result = f(&mut entry.game);
    let failed = result.is_err();
    let body = SessionResponse::new(id, &entry.game, result);
    if failed {
        HttpResponse::BadRequest().json(body)
    } else {
        HttpResponse::Ok().json(body)
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "hoops-guess-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new session (client stores the id for subsequent requests).
#[post("/api/games")]
async fn api_create_game(state: AppState) -> HttpResponse {
    let n = state.sessions_created.fetch_add(1, Ordering::Relaxed);
    let rng = match state.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(n)),
        None => StdRng::from_entropy(),
    };
    let mut game = Game::new(RoundEngine::new(rng));

    // Lock order: games, then dataset (same as the loader) so no session misses the load.
    let mut g = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match state.dataset.read() {
        Ok(dataset) => match &*dataset {
            Dataset::Loading => {}
            Dataset::Loaded(players) => {
                if let Err(e) = game.load_players(players.clone()) {
                    log::warn!("New session has no round: {}", e);
                }
            }
            Dataset::Failed(reason) => game.load_failed(reason.clone()),
        },
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    }

    let id = Uuid::new_v4();
    let body = SessionResponse::new(id, &game, Ok(()));
    g.insert(
        id,
        GameEntry {
            game,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(body)
}

/// Get a session's view (404 if not found). Touching it refreshes last_activity.
#[get("/api/games/{id}")]
async fn api_get_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |_| Ok(()))
}

/// Change the pool filters; may redraw the target.
#[put("/api/games/{id}/filter")]
async fn api_set_filter(
    state: AppState,
    path: Path<GamePath>,
    body: Json<PoolFilterConfig>,
) -> HttpResponse {
    let config = body.into_inner();
    with_game(&state, path.id, move |game| game.set_filter(config))
}

/// Submit a guess for the current round.
#[post("/api/games/{id}/guess")]
async fn api_submit_guess(
    state: AppState,
    path: Path<GamePath>,
    body: Json<GuessBody>,
) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.submit_guess(&body.guess);
        Ok(())
    })
}

/// Reveal the next clue (costs a score tier).
#[post("/api/games/{id}/clue")]
async fn api_reveal_clue(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| {
        game.reveal_clue();
        Ok(())
    })
}

/// Start the next round with a fresh target.
#[post("/api/games/{id}/next")]
async fn api_next_round(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| game.next_round())
}

/// Restart the session: score and rounds back to zero.
#[post("/api/games/{id}/restart")]
async fn api_restart_game(state: AppState, path: Path<GamePath>) -> HttpResponse {
    with_game(&state, path.id, |game| game.restart())
}

/// Read and parse the dataset, then hand it to every session waiting on it.
async fn load_dataset(state: AppState, players_file: String) {
    let result = match tokio::fs::read_to_string(&players_file).await {
        Ok(raw) => parse_players(&raw).map_err(|e| e.to_string()),
        Err(e) => Err(format!("cannot read {}: {}", players_file, e)),
    };

    let mut games = match state.games.write() {
        Ok(guard) => guard,
        Err(_) => {
            log::error!("Dataset load finished but session lock is poisoned");
            return;
        }
    };
    match result {
        Ok(players) => {
            log::info!("Loaded {} players from {}", players.len(), players_file);
            for entry in games.values_mut() {
                if let Err(e) = entry.game.load_players(players.clone()) {
                    log::warn!("Session has no round after load: {}", e);
                }
            }
            if let Ok(mut dataset) = state.dataset.write() {
                *dataset = Dataset::Loaded(players);
            }
        }
        Err(reason) => {
            log::error!("Failed to load players: {}", reason);
            for entry in games.values_mut() {
                entry.game.load_failed(reason.clone());
            }
            if let Ok(mut dataset) = state.dataset.write() {
                *dataset = Dataset::Failed(reason);
            }
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_players_file() -> String {
    "static/players.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let players_file = std::env::var("PLAYERS_FILE").unwrap_or_else(|_| default_players_file());
    let seed: Option<u64> = std::env::var("GAME_SEED").ok().and_then(|s| s.parse().ok());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    if let Some(seed) = seed {
        log::info!("Using fixed game seed {}", seed);
    }

    let state = Data::new(Shared {
        dataset: RwLock::new(Dataset::Loading),
        games: RwLock::new(HashMap::new()),
        seed,
        sessions_created: AtomicU64::new(0),
    });

    actix_web::rt::spawn(load_dataset(state.clone(), players_file));

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.games.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive game(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_game)
            .service(api_get_game)
            .service(api_set_filter)
            .service(api_submit_guess)
            .service(api_reveal_clue)
            .service(api_next_round)
            .service(api_restart_game)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
