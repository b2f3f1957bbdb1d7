//! RPC Method Implementations
//!
//! Each method corresponds to a JSON-RPC call the entry form (or any other
//! client) can make against the ledger.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::constants::CHAIN_NAME;
use crate::error::LedgerError;
use crate::node::{LedgerSession, ReportCardEntry};
use crate::storage::ChainStore;

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<serde_json::Value>,
    pub id: serde_json::Value,
}

/// JSON-RPC 2.0 Response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<JsonRpcError>,
    pub id: serde_json::Value,
}

/// JSON-RPC Error
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const ENTRY_REJECTED: i32 = -1;
pub const NOT_SAVED: i32 = -2;
pub const OUT_OF_RANGE: i32 = -8;

impl JsonRpcResponse {
    pub fn success(id: serde_json::Value, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: serde_json::Value, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(JsonRpcError { code, message }),
            id,
        }
    }

    fn serialized<T: Serialize>(id: serde_json::Value, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(result) => Self::success(id, result),
            Err(e) => Self::error(id, INTERNAL_ERROR, e.to_string()),
        }
    }
}

/// Session shared between request handlers
pub type SharedSession = Arc<Mutex<LedgerSession<Box<dyn ChainStore + Send>>>>;

/// RPC Handler State
pub struct RpcState {
    pub session: SharedSession,
}

impl RpcState {
    pub fn new(session: LedgerSession<Box<dyn ChainStore + Send>>) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LedgerSession<Box<dyn ChainStore + Send>>> {
        // Appends complete before any fallible step, so a poisoned session is still consistent
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Process a JSON-RPC request and return a response
pub fn handle_request(state: &RpcState, request: JsonRpcRequest) -> JsonRpcResponse {
    tracing::debug!(method = %request.method, "RPC request");
    match request.method.as_str() {
        "getblockcount" => get_block_count(state, request.id),
        "getblockhash" => get_block_hash(state, request.id, request.params),
        "getblock" => get_block(state, request.id, request.params),
        "listblocks" => list_blocks(state, request.id),
        "addentry" => add_entry(state, request.id, request.params),
        "validatechain" => validate_chain(state, request.id),
        "getinfo" => get_info(state, request.id),
        _ => JsonRpcResponse::error(
            request.id,
            METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    }
}

/// Extract a chain position from `[n]` or `n`
fn position_param(params: Option<serde_json::Value>) -> Option<usize> {
    let value = match params {
        Some(serde_json::Value::Array(arr)) => arr.into_iter().next()?,
        Some(other) => other,
        None => return None,
    };
    value.as_u64().and_then(|n| usize::try_from(n).ok())
}

/// Returns the number of blocks, genesis included
fn get_block_count(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.lock();
    JsonRpcResponse::success(id, serde_json::json!(session.len()))
}

/// Returns the block hash at a given position
fn get_block_hash(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let position = match position_param(params) {
        Some(p) => p,
        None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block index".into()),
    };

    let session = state.lock();
    match session.block(position) {
        Some(block) => JsonRpcResponse::success(id, serde_json::json!(block.hash())),
        None => JsonRpcResponse::error(id, OUT_OF_RANGE, format!("Block index {} out of range", position)),
    }
}

/// Returns the full block record at a given position
fn get_block(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let position = match position_param(params) {
        Some(p) => p,
        None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Invalid params: expected block index".into()),
    };

    let session = state.lock();
    match session.block(position) {
        Some(block) => JsonRpcResponse::serialized(id, block),
        None => JsonRpcResponse::error(id, OUT_OF_RANGE, format!("Block index {} out of range", position)),
    }
}

/// Returns every block in chain order
fn list_blocks(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let session = state.lock();
    JsonRpcResponse::serialized(id, &session.list_blocks())
}

/// Adds a report-card entry
/// Params: {"student", "subject", "grade"} or [student, subject, grade]
fn add_entry(
    state: &RpcState,
    id: serde_json::Value,
    params: Option<serde_json::Value>,
) -> JsonRpcResponse {
    let entry = match params {
        Some(serde_json::Value::Object(map)) => {
            match serde_json::from_value::<ReportCardEntry>(serde_json::Value::Object(map)) {
                Ok(entry) => entry,
                Err(e) => return JsonRpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e)),
            }
        }
        Some(serde_json::Value::Array(arr)) => {
            let field = |i: usize| arr.get(i).and_then(|v| v.as_str()).unwrap_or("").to_string();
            ReportCardEntry::new(field(0), field(1), field(2))
        }
        _ => {
            return JsonRpcResponse::error(
                id,
                INVALID_PARAMS,
                "Invalid params: expected {student, subject, grade}".into(),
            )
        }
    };

    let mut session = state.lock();
    match session.submit(&entry) {
        Ok(block) => JsonRpcResponse::success(
            id,
            serde_json::json!({
                "message": "Report card entry added successfully!",
                "index": block.index(),
                "hash": block.hash(),
            }),
        ),
        Err(e @ LedgerError::InvalidEntry { .. }) => {
            JsonRpcResponse::error(id, ENTRY_REJECTED, e.to_string())
        }
        Err(e) => JsonRpcResponse::error(
            id,
            NOT_SAVED,
            format!("Entry added to the chain but not saved: {}", e),
        ),
    }
}

/// Recomputes every hash and reports violations
fn validate_chain(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let report = state.lock().validate();
    let mut result = match serde_json::to_value(&report) {
        Ok(value) => value,
        Err(e) => return JsonRpcResponse::error(id, INTERNAL_ERROR, e.to_string()),
    };
    result["valid"] = serde_json::json!(report.is_valid());
    JsonRpcResponse::success(id, result)
}

/// Returns general ledger information
fn get_info(state: &RpcState, id: serde_json::Value) -> JsonRpcResponse {
    let stats = state.lock().stats();

    let info = serde_json::json!({
        "chain": CHAIN_NAME,
        "blocks": stats.blocks,
        "entries": stats.entries,
        "tip": stats.tip_hash,
        "genesis": stats.genesis_hash,
        "last_updated": stats.last_updated,
        "version": env!("CARGO_PKG_VERSION"),
    });

    JsonRpcResponse::success(id, info)
}
