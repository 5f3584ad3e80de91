use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use crate::error::ScoreboardError;
use crate::scoreboard::MatchRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: MatchRegistry,
    /// Rows shown on the HTML page; the JSON summary is never truncated
    pub summary_limit: Option<usize>,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/matches", post(start_match_handler))
        .route("/api/matches/:id", get(get_match_handler))
        .route("/api/matches/:id/score", put(update_score_handler))
        .route("/api/matches/:id/finish", post(finish_match_handler))
        .route("/api/conflict", get(conflict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

#[derive(Debug, Deserialize)]
pub struct NewMatchRequest {
    pub home_team: String,
    pub away_team: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Deserialize)]
pub struct ConflictQuery {
    pub home_team: String,
    pub away_team: String,
}

#[derive(Debug, Serialize)]
pub struct ConflictResponse {
    pub active: bool,
}

/// JSON error body with a status derived from the error kind.
pub struct ApiError(ScoreboardError);

impl From<ScoreboardError> for ApiError {
    fn from(e: ScoreboardError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ScoreboardError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScoreboardError::Conflict(_) => StatusCode::CONFLICT,
            ScoreboardError::NotFound(_) => StatusCode::NOT_FOUND,
            ScoreboardError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Serve the scoreboard page, injecting the row limit.
async fn index_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let limit = state
        .summary_limit
        .map(|l| l.to_string())
        .unwrap_or_default();
    let html = DASHBOARD_HTML.replace(
        r#"<body>"#,
        &format!(r#"<body data-limit="{}">"#, limit),
    );
    Html(html)
}

/// GET /api/summary
async fn summary_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.registry.in_progress_summary().await?;
    Ok(Json(summary))
}

/// POST /api/matches
async fn start_match_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewMatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let m = state
        .registry
        .start_new_match(&req.home_team, &req.away_team)
        .await?;
    Ok((StatusCode::CREATED, Json(m)))
}

/// GET /api/matches/:id
async fn get_match_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    match state.registry.get_match(id).await? {
        Some(m) => Ok(Json(m)),
        None => Err(ScoreboardError::NotFound(id).into()),
    }
}

/// PUT /api/matches/:id/score
async fn update_score_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<ScoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .registry
        .update_score(id, req.home_score, req.away_score)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/matches/:id/finish
async fn finish_match_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.registry.finish_match(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/conflict?home_team=..&away_team=..
async fn conflict_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ConflictQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let active = state
        .registry
        .has_active_conflict(&q.home_team, &q.away_team)
        .await?;
    Ok(Json(ConflictResponse { active }))
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Live Scoreboard</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  .status-dot { width: 10px; height: 10px; border-radius: 50%; background: var(--green); display: inline-block; animation: pulse 1.5s infinite; }
  @keyframes pulse { 0%,100% { opacity: 1; } 50% { opacity: .3; } }
  main { padding: 1.5rem 2rem; display: grid; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; display: flex; justify-content: space-between; align-items: center; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  td.score { font-weight: 700; font-size: 1.1rem; }
  td input { width: 3.5rem; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 4px; padding: .2rem .4rem; }
  form.new-match { display: flex; gap: .8rem; padding: 1rem 1.2rem; }
  form.new-match input { flex: 1; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .5rem .7rem; }
  button { background: none; border: 1px solid var(--border); color: var(--muted); padding: .3rem .8rem; border-radius: 6px; cursor: pointer; font-size: .8rem; }
  button:hover { border-color: var(--accent); color: var(--accent); }
  button.finish:hover { border-color: var(--red); color: var(--red); }
  .error { color: var(--red); padding: 0 1.2rem 1rem; font-size: .85rem; min-height: 1rem; }
  .empty { color: var(--muted); text-align: center; padding: 2rem; font-size: .9rem; }
</style>
</head>
<body>
<header>
  <span class="status-dot"></span>
  <h1>Live Scoreboard</h1>
  <span style="margin-left:auto;color:var(--muted);font-size:.8rem;" id="last-updated"></span>
</header>

<main>
  <div class="panel">
    <div class="panel-header">New Match</div>
    <form class="new-match" id="new-match">
      <input name="home_team" placeholder="Home team" required>
      <input name="away_team" placeholder="Away team" required>
      <button type="submit">Kick off</button>
    </form>
    <div class="error" id="form-error"></div>
  </div>

  <div class="panel">
    <div class="panel-header">In Progress <button onclick="loadSummary()">↻ Refresh</button></div>
    <table>
      <thead><tr><th>#</th><th>Home</th><th>Score</th><th>Away</th><th>Started</th><th>Update</th><th></th></tr></thead>
      <tbody id="summary-tbody"><tr><td colspan="7" class="empty">Loading…</td></tr></tbody>
    </table>
  </div>
</main>

<script>
const limit = parseInt(document.body.dataset.limit, 10);
const esc = s => s.replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));

async function failure(r) {
  try { return (await r.json()).error; } catch (_) { return r.statusText; }
}

async function loadSummary() {
  const r = await fetch('/api/summary');
  if (!r.ok) return;
  let rows = await r.json();
  if (Number.isFinite(limit)) rows = rows.slice(0, limit);
  const tbody = document.getElementById('summary-tbody');
  if (!rows.length) {
    tbody.innerHTML = '<tr><td colspan="7" class="empty">No matches in progress</td></tr>';
  } else {
    tbody.innerHTML = rows.map((m, i) => `<tr>
      <td>${i + 1}</td>
      <td>${esc(m.home_team)}</td>
      <td class="score">${m.home_score} – ${m.away_score}</td>
      <td>${esc(m.away_team)}</td>
      <td>${new Date(m.started_at).toLocaleTimeString()}</td>
      <td>
        <input type="number" min="0" id="h-${m.id}" value="${m.home_score}">
        <input type="number" min="0" id="a-${m.id}" value="${m.away_score}">
        <button onclick="updateScore('${m.id}')">Save</button>
      </td>
      <td><button class="finish" onclick="finishMatch('${m.id}')">Finish</button></td>
    </tr>`).join('');
  }
  document.getElementById('last-updated').textContent = 'Updated ' + new Date().toLocaleTimeString();
}

async function updateScore(id) {
  const body = {
    home_score: parseInt(document.getElementById('h-' + id).value, 10),
    away_score: parseInt(document.getElementById('a-' + id).value, 10),
  };
  const r = await fetch(`/api/matches/${id}/score`, {
    method: 'PUT', headers: {'Content-Type': 'application/json'}, body: JSON.stringify(body),
  });
  if (!r.ok) alert(await failure(r));
  loadSummary();
}

async function finishMatch(id) {
  const r = await fetch(`/api/matches/${id}/finish`, { method: 'POST' });
  if (!r.ok) alert(await failure(r));
  loadSummary();
}

document.getElementById('new-match').addEventListener('submit', async ev => {
  ev.preventDefault();
  const form = new FormData(ev.target);
  const body = { home_team: form.get('home_team'), away_team: form.get('away_team') };
  const err = document.getElementById('form-error');
  const r = await fetch('/api/matches', {
    method: 'POST', headers: {'Content-Type': 'application/json'}, body: JSON.stringify(body),
  });
  if (r.ok) {
    err.textContent = '';
    ev.target.reset();
  } else {
    err.textContent = await failure(r);
  }
  loadSummary();
});

loadSummary();
setInterval(loadSummary, 10000);
</script>
</body>
</html>
"#;
