mod config;
mod controller;
mod protocol;

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use tracing_subscriber::prelude::*;
use uuid::Uuid;

use config::ServerConfig;
use controller::{PointerEvent, SessionController};
use protocol::{format_error, format_update, ClientCommand};

/// Frames buffered per client before slow receivers start skipping.
const UPDATE_BUFFER: usize = 64;

// Application State
struct AppState {
    controller: RwLock<SessionController>,
    /// Frame updates fanned out to every connected client.
    updates: broadcast::Sender<String>,
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,backend=debug,linecross_core=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let config = ServerConfig::from_env()?;
    info!(
        "Canvas {}x{}, tolerance {}, parallel test {:?}",
        config.canvas.width,
        config.canvas.height,
        config.tolerance,
        config.intersect_options().parallel
    );

    let (updates, _) = broadcast::channel(UPDATE_BUFFER);
    let shared_state = Arc::new(AppState {
        controller: RwLock::new(SessionController::new(config.canvas, config.intersect_options())),
        updates,
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    info!("listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn root() -> String {
    format!("linecross backend {}", linecross_core::version())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let client = Uuid::new_v4();
    info!("Client {} connected", client);

    let (mut sender, mut receiver) = socket.split();
    let mut updates = state.updates.subscribe();
    // Replies meant for this client only.
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<String>();

    let initial = {
        let controller = state.controller.read().await;
        format_update("FRAME_UPDATE", &controller.session().frame())
    };
    if sender.send(Message::Text(initial)).await.is_err() {
        return;
    }

    let mut send_task = tokio::spawn(async move {
        loop {
            let text = tokio::select! {
                update = updates.recv() => match update {
                    Ok(text) => text,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!("Client {} skipped {} frame(s)", client, skipped);
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                reply = reply_rx.recv() => match reply {
                    Some(text) => text,
                    None => break,
                },
            };
            if sender.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => handle_command(&recv_state, &text, &reply_tx).await,
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
    info!("Client {} disconnected", client);
}

async fn handle_command(state: &AppState, text: &str, reply: &mpsc::UnboundedSender<String>) {
    let command = match ClientCommand::parse(text) {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected message: {}", e);
            let _ = reply.send(format_error(e.code(), &e.to_string(), "warning"));
            return;
        }
    };

    match command {
        ClientCommand::Pointer(event) => {
            let mut controller = state.controller.write().await;
            apply_pointer(&mut controller, &event, &state.updates);
        }
        ClientCommand::Resize(size) => {
            let mut controller = state.controller.write().await;
            controller.resize(size);
            let canvas = controller.canvas();
            info!("Canvas is now {}x{}", canvas.width, canvas.height);
        }
        ClientCommand::Verify => {
            let report = state.controller.read().await.session().verify();
            if report.consistent {
                info!(
                    "Verified {} intersection(s) across {} segment(s)",
                    report.incremental, report.segments
                );
            } else {
                warn!(
                    "Incremental intersections ({}) differ from full recompute ({})",
                    report.incremental, report.recomputed
                );
            }
            let _ = reply.send(format_update("VERIFY_RESULT", &report));
        }
        ClientCommand::Frame => {
            let frame = state.controller.read().await.session().frame();
            let _ = reply.send(format_update("FRAME_UPDATE", &frame));
        }
    }
}

/// Apply a pointer event and publish the new frame if it changed.
///
/// Takes the controller already locked so the broadcast happens before the
/// lock is released and frames go out in mutation order.
fn apply_pointer(
    controller: &mut SessionController,
    event: &PointerEvent,
    updates: &broadcast::Sender<String>,
) -> bool {
    if !controller.handle_pointer(event) {
        return false;
    }
    // No receivers just means nobody is connected to see it.
    let _ = updates.send(format_update("FRAME_UPDATE", &controller.session().frame()));
    true
}
