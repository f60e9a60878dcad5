//! Development server with live reload

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use percent_encoding::percent_decode_str;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::SiteConfig;
use crate::view::Route;
use crate::Folio;

/// Path of the live reload websocket
const RELOAD_ENDPOINT: &str = "/__livereload";

/// Text frame telling connected pages to refresh
const RELOAD_MESSAGE: &str = "reload";

/// Snippet placed before `</body>` of served pages when watching
const LIVE_RELOAD_SCRIPT: &str = r#"<script>
(function () {
  var scheme = location.protocol === 'https:' ? 'wss://' : 'ws://';
  var socket = new WebSocket(scheme + location.host + '/__livereload');
  socket.addEventListener('message', function (event) {
    if (event.data === 'reload') location.reload();
  });
  socket.addEventListener('close', function () {
    setTimeout(function () { location.reload(); }, 1000);
  });
})();
</script>
"#;

struct ServerState {
    public_dir: PathBuf,
    config: SiteConfig,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the public directory, optionally regenerating and reloading on change
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    let state = Arc::new(ServerState {
        public_dir: folio.public_dir.clone(),
        config: folio.config.clone(),
        reload_tx: reload_tx.clone(),
        live_reload: watch,
    });

    let app = Router::new()
        .route(RELOAD_ENDPOINT, get(livereload_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // SocketAddr does not parse host names
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", ip, port))?;

    let url = format!("http://{}:{}{}", ip, port, folio.config.root);
    println!("Serving {:?} at {}", folio.public_dir, url);
    if watch {
        println!("Watching {:?} for changes", folio.source_dir);
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Could not open {} in a browser: {}", url, e);
        }
    }

    if watch {
        let folio = folio.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_and_reload(folio, reload_tx).await {
                tracing::error!("Watcher stopped: {:#}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Regenerate on source or config changes and signal connected pages
async fn watch_and_reload(folio: Folio, reload_tx: broadcast::Sender<()>) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    let config_path = folio.base_dir.join("_config.yml");
    let targets = [
        (&folio.source_dir, RecursiveMode::Recursive),
        (&config_path, RecursiveMode::NonRecursive),
    ];
    for (path, mode) in targets {
        if path.exists() {
            debouncer.watcher().watch(path, mode)?;
            tracing::debug!("Watching: {:?}", path);
        }
    }

    while let Ok(batch) = rx.recv() {
        let events = match batch {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed: Vec<&Path> = events
            .iter()
            .map(|e| e.path.as_path())
            .filter(|p| !is_noise(&folio.base_dir, p))
            .collect();
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("Changed: {}", path.display());
        }

        if regenerate(&folio) {
            // No subscribers is fine
            let _ = reload_tx.send(());
        }
    }

    tracing::debug!("Watcher channel closed");
    Ok(())
}

/// Rebuild with a freshly read config; false when the build failed
fn regenerate(folio: &Folio) -> bool {
    let result = crate::commands::generate::reload(folio)
        .and_then(|fresh| crate::commands::generate::run(&fresh));
    match result {
        Ok(()) => {
            tracing::info!("Site regenerated");
            true
        }
        Err(e) => {
            tracing::error!("Regeneration failed: {:#}", e);
            false
        }
    }
}

/// Editor swap files, VCS metadata and hidden files never trigger a rebuild
fn is_noise(base_dir: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(base_dir).unwrap_or(path);
    let hidden = relative.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    });
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    hidden || name.ends_with('~') || name.ends_with(".swp") || name.ends_with(".tmp")
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| relay_reloads(socket, reload_rx))
}

/// Forward reload signals to one page until either side goes away
async fn relay_reloads(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            signal = reload_rx.recv() => match signal {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    let frame = Message::Text(RELOAD_MESSAGE.to_string());
                    if socket.send(frame).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Ping(payload))) => {
                    if socket.send(Message::Pong(payload)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// Serve generated files; misses get the not-found page with status 404
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();
    tracing::debug!("{} -> {:?}", path, Route::parse(&path, &state.config));

    let Some(file_path) = resolve_file(&state.public_dir, &state.config.root, &path) else {
        return not_found(&state).await;
    };

    if is_html(&file_path) {
        match tokio::fs::read_to_string(&file_path).await {
            Ok(content) if state.live_reload => Html(inject_live_reload(&content)).into_response(),
            Ok(content) => Html(content).into_response(),
            Err(_) => not_found(&state).await,
        }
    } else {
        // Serve static file using tower-http
        let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
        match service.try_call(strip_root(request, &state.config.root)).await {
            Ok(response) => response.into_response(),
            Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
        }
    }
}

/// The generated not-found page, or a plain message when it is missing
async fn not_found(state: &ServerState) -> Response {
    match tokio::fs::read_to_string(state.public_dir.join("404.html")).await {
        Ok(content) => {
            let body = if state.live_reload {
                inject_live_reload(&content)
            } else {
                content
            };
            (StatusCode::NOT_FOUND, Html(body)).into_response()
        }
        Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Map a request path to a file under the public directory
///
/// The site root is stripped and the path percent-decoded. Paths that try
/// to climb out of the public directory resolve to nothing.
fn resolve_file(public_dir: &Path, root: &str, path: &str) -> Option<PathBuf> {
    let root = root.trim_end_matches('/');
    let rest = path.strip_prefix(root)?;
    let decoded = percent_decode_str(rest).decode_utf8().ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));

    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }

    let candidate = public_dir.join(relative);

    // If it's a directory, look for index.html
    if candidate.is_dir() {
        let index = candidate.join("index.html");
        return index.is_file().then_some(index);
    }
    if candidate.is_file() {
        return Some(candidate);
    }

    // Try adding .html extension
    let with_html = candidate.with_extension("html");
    with_html.is_file().then_some(with_html)
}

/// Drop the site root from a request so ServeDir sees public-relative paths
fn strip_root(mut request: Request<Body>, root: &str) -> Request<Body> {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return request;
    }
    let stripped = request
        .uri()
        .path_and_query()
        .and_then(|pq| pq.as_str().strip_prefix(root))
        .and_then(|rest| rest.parse().ok());
    if let Some(uri) = stripped {
        *request.uri_mut() = uri;
    }
    request
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "html" || ext == "htm")
        .unwrap_or(false)
}

/// Put the live reload snippet before the closing body tag
fn inject_live_reload(html: &str) -> String {
    match html.rfind("</body>") {
        Some(at) => format!("{}{}{}", &html[..at], LIVE_RELOAD_SCRIPT, &html[at..]),
        None => format!("{}{}", html, LIVE_RELOAD_SCRIPT),
    }
}

/// Hand the URL to the platform's opener
fn open_browser(url: &str) -> Result<()> {
    let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
        ("open", &[])
    } else if cfg!(target_os = "windows") {
        ("cmd", &["/c", "start"])
    } else {
        ("xdg-open", &[])
    };

    std::process::Command::new(program)
        .args(args)
        .arg(url)
        .spawn()
        .with_context(|| format!("Failed to run {}", program))?;
    Ok(())
}
