//! `POST /api/quote`: swap quote.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use market_data::SwapQuoteRequest;
use serde::Serialize;
use serde_json::Value;

use super::{lenient_json, string_field};
use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_SLIPPAGE_BPS: u16 = 50;

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub ok: bool,
    pub data: QuoteData,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
    pub out_amount: String,
    pub route_count: usize,
}

/// Body: `{inputMint, outputMint, amount, slippageBps?}`.
///
/// `amount` may be a string or a number of base units.
pub async fn quote(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<QuoteResponse>, ApiError> {
    let request = parse_request(&lenient_json(&body)).ok_or(ApiError::BadRequest("Missing swap params"))?;

    let quote = state.quotes.quote(&request).await?;

    Ok(Json(QuoteResponse {
        ok: true,
        data: QuoteData {
            out_amount: quote.out_amount,
            route_count: quote.route_count,
        },
    }))
}

fn parse_request(body: &Value) -> Option<SwapQuoteRequest> {
    let input_mint = string_field(body, "inputMint")?;
    let output_mint = string_field(body, "outputMint")?;
    let amount = match body.get("amount")? {
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Number(n) if n.as_u64().is_some_and(|v| v > 0) => n.to_string(),
        _ => return None,
    };
    let slippage_bps = body
        .get("slippageBps")
        .and_then(Value::as_u64)
        .and_then(|v| u16::try_from(v).ok())
        .unwrap_or(DEFAULT_SLIPPAGE_BPS);

    Some(SwapQuoteRequest {
        input_mint: input_mint.to_string(),
        output_mint: output_mint.to_string(),
        amount,
        slippage_bps,
    })
}
