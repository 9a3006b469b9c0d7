//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, SESSION_TTL_HOURS (idle sessions are dropped after this).

use actix_files::Files;
use actix_session::{
    config::PersistentSession, storage::CookieSessionStore, Session as CookieSession, SessionMiddleware,
};
use actix_web::{
    cookie::{time, Key},
    get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use lobby_rotation_web::{
    apply_event, create_session, parse_roster_csv, restart_session, EliminateEvent, EventOutcome,
    FacedEvent, PlayerId, Session, SessionError, SessionEvent, SessionId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-session entry: rotation state + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory state: many sessions by id. Nothing is persisted.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Cookie key holding the browser's current session id.
const CURRENT_SESSION_KEY: &str = "session_id";

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Roster as a JSON list or as one CSV line; `names` wins when both are given.
#[derive(Deserialize)]
struct CreateSessionBody {
    #[serde(default)]
    names: Option<Vec<String>>,
    #[serde(default)]
    names_csv: Option<String>,
    /// 1-indexed position of the tracked player in the roster.
    self_index: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum OutcomeKind {
    Applied,
    Ignored,
}

#[derive(Serialize)]
struct EventResponse {
    outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    session: lobby_rotation_web::SessionView,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player id (e.g. /api/sessions/{id}/faced/{player_id})
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

fn error_json(e: impl std::fmt::Display) -> serde_json::Value {
    serde_json::json!({ "error": e.to_string() })
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "lobby-rotation-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a session from 8 names and the tracked player's index. 400 on bad configuration.
#[post("/api/sessions")]
async fn api_create_session(
    state: AppState,
    cookie: CookieSession,
    body: Json<CreateSessionBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let names = match (body.names, body.names_csv) {
        (Some(names), _) => names,
        (None, Some(csv)) => match parse_roster_csv(&csv) {
            Ok(names) => names,
            Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
        },
        (None, None) => return HttpResponse::BadRequest().json(error_json(SessionError::EmptyRoster)),
    };
    let session = match create_session(&names, body.self_index) {
        Ok(s) => s,
        Err(e) => return HttpResponse::BadRequest().json(error_json(e)),
    };
    let id = session.id();
    let view = session.view();
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.insert(
        id,
        SessionEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    if let Err(e) = cookie.insert(CURRENT_SESSION_KEY, id) {
        log::warn!("Could not store session id in cookie: {}", e);
    }
    HttpResponse::Ok().json(view)
}

/// Session remembered by this browser's cookie (404 if none or expired).
#[get("/api/sessions/current")]
async fn api_current_session(state: AppState, cookie: CookieSession) -> HttpResponse {
    let id = match cookie.get::<SessionId>(CURRENT_SESSION_KEY) {
        Ok(Some(id)) => id,
        _ => return HttpResponse::NotFound().json(error_json("No session")),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.session.view())
        }
        None => {
            cookie.remove(CURRENT_SESSION_KEY);
            HttpResponse::NotFound().json(error_json("No session"))
        }
    }
}

/// Get a session snapshot by id. Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(entry.session.view())
        }
        None => HttpResponse::NotFound().json(error_json("No session")),
    }
}

/// Dispatch one event into the session held under `id`.
fn dispatch(state: &AppState, id: SessionId, event: SessionEvent) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No session")),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match apply_event(s, event) {
        Ok(EventOutcome::Applied(_)) => HttpResponse::Ok().json(EventResponse {
            outcome: OutcomeKind::Applied,
            reason: None,
            session: s.view(),
        }),
        Ok(EventOutcome::Ignored(reason)) => HttpResponse::Ok().json(EventResponse {
            outcome: OutcomeKind::Ignored,
            reason: Some(reason.to_string()),
            session: s.view(),
        }),
        Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
    }
}

/// The tracked player just fought `player_id`.
#[post("/api/sessions/{id}/faced/{player_id}")]
async fn api_faced(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    dispatch(
        &state,
        path.id,
        FacedEvent {
            player_id: path.player_id,
        }
        .into(),
    )
}

/// `player_id` has been knocked out.
#[post("/api/sessions/{id}/eliminate/{player_id}")]
async fn api_eliminate(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    dispatch(
        &state,
        path.id,
        EliminateEvent {
            player_id: path.player_id,
        }
        .into(),
    )
}

/// Restart: same names and tracked player, everyone alive again.
#[post("/api/sessions/{id}/restart")]
async fn api_restart_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No session")),
    };
    entry.last_activity = Instant::now();
    restart_session(&mut entry.session);
    HttpResponse::Ok().json(entry.session.view())
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_ttl_hours() -> u64 {
    12
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let ttl_hours: u64 = std::env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .filter(|&h| h > 0)
        .unwrap_or_else(default_ttl_hours);
    let inactivity_timeout = Duration::from_secs(ttl_hours * 3600);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Background task: every 30 minutes, drop sessions idle longer than the TTL
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for {}h)", removed, ttl_hours);
            }
        }
    });

    // Cookies only carry the session id; a fresh key per process is enough.
    let cookie_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), cookie_key.clone())
                    .cookie_secure(false)
                    .session_lifecycle(
                        PersistentSession::default().session_ttl(time::Duration::hours(ttl_hours as i64)),
                    )
                    .build(),
            )
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_session)
            .service(api_current_session)
            .service(api_get_session)
            .service(api_faced)
            .service(api_eliminate)
            .service(api_restart_session)
            .service(Files::new("/static", "static").show_files_listing())
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
