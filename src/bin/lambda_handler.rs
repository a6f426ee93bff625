//! AWS Lambda handler for property projections
//!
//! Accepts a property input as JSON and returns the three scenario results.
//! When a `scenarioId` is supplied the matching `scenario_results` rows are
//! returned as well, ready to be stored by the caller.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use property_evaluator::export::ScenarioResultRecord;
use property_evaluator::{ProjectInput, ScenarioResult, ScenarioRunner};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Request body: the property fields plus an optional record key
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationRequest {
    #[serde(default)]
    pub scenario_id: Option<String>,

    #[serde(flatten)]
    pub input: ProjectInput,
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub scenarios: Vec<ScenarioResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub records: Option<Vec<ScenarioResultRecord>>,
    pub execution_time_ms: u64,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = json!({ "error": message }).to_string();
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body))?)
}

fn json_response(body: &EvaluationResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Turn a request method and body into the HTTP response
fn respond(method: &str, body: &str) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // CORS preflight
    if method == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let request: EvaluationRequest = match serde_json::from_str(body) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e)),
    };

    let runner = ScenarioRunner::new();
    let results = match runner.run_validated(&request.input) {
        Ok(results) => results,
        Err(e) => return error_response(400, &format!("Invalid input: {}", e)),
    };

    let records = request
        .scenario_id
        .as_deref()
        .map(|id| ScenarioResultRecord::from_results(id, &results));

    log::info!(
        "evaluated property over {} years in {:?}",
        request.input.project_duration_years,
        start.elapsed()
    );

    let response = EvaluationResponse {
        scenarios: results.to_vec(),
        records,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(&response)
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let body = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };
    respond(event.method().as_str(), &body)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
