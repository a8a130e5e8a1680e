//! HTTP front end for the JSON-RPC interface

use super::protocol::{
    GetBlockTemplateResult, GetHeightResult, GetInfoResult, RpcError, RpcMethod, RpcRequest,
    RpcResponse, SubmitBlockResult, STATUS_OK,
};
use crate::core::constants::EXPECTED_REWARD;
use crate::core::ChainState;
use crate::error::{Error, Result};
use crate::utils::wide_difficulty;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde::Serialize;
use serde_json::Value;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

/// Path the daemon serves JSON-RPC on
pub const JSON_RPC_PATH: &str = "/json_rpc";

/// Build the router over a shared chain state
pub fn router(state: Arc<ChainState>) -> Router {
    Router::new()
        .route(JSON_RPC_PATH, post(json_rpc_handler))
        .route("/", post(json_rpc_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for JSON-RPC POSTs
async fn json_rpc_handler(State(state): State<Arc<ChainState>>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            warn!("Rejecting malformed JSON body: {}", e);
            return (StatusCode::BAD_REQUEST, "Invalid JSON").into_response();
        }
    };

    let response = match RpcRequest::from_value(value) {
        Ok(request) => dispatch(&state, request),
        Err(error) => RpcResponse::error(Value::from(0), error),
    };

    Json(response).into_response()
}

/// Route a request to the chain state and wrap the outcome
pub fn dispatch(state: &ChainState, request: RpcRequest) -> RpcResponse {
    debug!(method = %request.method, "Dispatching RPC call");

    let result = match request.method_enum() {
        RpcMethod::GetBlockTemplate => {
            let template = state.block_template(request.wallet_address());
            let wide_difficulty = wide_difficulty(template.difficulty);
            to_value(GetBlockTemplateResult {
                template,
                difficulty_top64: 0,
                expected_reward: EXPECTED_REWARD,
                status: STATUS_OK.to_string(),
                untrusted: false,
                wide_difficulty,
            })
        }
        RpcMethod::SubmitBlock => {
            let status = state.submit_block(&request.block_blob());
            to_value(SubmitBlockResult {
                status: status.as_str().to_string(),
            })
        }
        RpcMethod::GetInfo => {
            let info = state.info();
            to_value(GetInfoResult {
                height: info.height,
                difficulty: info.difficulty,
                status: STATUS_OK.to_string(),
                testnet: true,
                stagenet: true,
            })
        }
        RpcMethod::GetHeight => to_value(GetHeightResult {
            height: state.height(),
            status: STATUS_OK.to_string(),
        }),
        RpcMethod::Unknown(method) => {
            debug!(%method, "Unknown RPC method");
            return RpcResponse::error(request.id, RpcError::method_not_found(&method));
        }
    };

    RpcResponse::success(request.id, result)
}

// Results are plain structs of strings and integers.
fn to_value<T: Serialize>(result: T) -> Value {
    serde_json::to_value(result).unwrap_or(Value::Null)
}

/// Bind `addr` and serve until `shutdown` resolves
pub async fn serve<F>(addr: SocketAddr, state: Arc<ChainState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::network(format!("Failed to bind to {}: {}", addr, e)))?;

    serve_listener(listener, state, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves
pub async fn serve_listener<F>(
    listener: TcpListener,
    state: Arc<ChainState>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("Mock daemon RPC listening on {}", addr);

    axum::serve(listener, router(Arc::clone(&state)))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::network(format!("HTTP server error: {}", e)))?;

    info!(
        blocks_accepted = state.submitted_count(),
        final_height = state.height(),
        "Mock daemon RPC stopped"
    );
    Ok(())
}
