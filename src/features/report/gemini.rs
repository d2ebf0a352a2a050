//! Gemini-backed summarizer and exporter.
//!
//! Talks to the `generateContent` REST endpoint. The report asks for a JSON
//! body matching a response schema; the export asks the model to call a
//! `create_spreadsheet` function and reads the rows from its arguments.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::types::{ExportInput, ExportRow, Report, SummaryInput};
use super::{Exporter, Summarizer};
use crate::config::CollaboratorConfig;
use crate::error::CollaboratorError;

/// Base URL of the Gemini models API.
pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const SPREADSHEET_FUNCTION: &str = "create_spreadsheet";

/// Gemini API client.
pub struct GeminiCollaborator {
    http: reqwest::Client,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
}

impl fmt::Debug for GeminiCollaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiCollaborator")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiCollaborator {
    /// Create a client from configuration, reading the API key from the
    /// configured environment variable.
    ///
    /// A missing key is reported when a call is made, not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &CollaboratorConfig) -> Result<Self, CollaboratorError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!(env = %config.api_key_env, "no Gemini API key set");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(CollaboratorError::ClientBuild)?;

        Ok(Self {
            http,
            api_key,
            api_key_env: config.api_key_env.clone(),
            model: config.model.clone(),
        })
    }

    async fn generate(&self, body: &Value) -> Result<GenerateResponse, CollaboratorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| CollaboratorError::MissingApiKey(self.api_key_env.clone()))?;
        let url = format!("{GEMINI_API_URL}/{}:generateContent", self.model);

        tracing::debug!(model = %self.model, "sending generateContent request");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(&text)
                .unwrap_or_else(|| CollaboratorError::Api(format!("status {status}: {text}"))));
        }

        serde_json::from_str(&text).map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl Summarizer for GeminiCollaborator {
    async fn summarize(&self, tasks: Vec<SummaryInput>) -> Result<Report, CollaboratorError> {
        let body = report_request(&tasks)?;
        let response = self.generate(&body).await?;
        let text = response.text().ok_or_else(|| {
            CollaboratorError::InvalidResponse("missing text content".to_string())
        })?;
        parse_report(&text)
    }
}

#[async_trait]
impl Exporter for GeminiCollaborator {
    async fn export(&self, tasks: Vec<ExportInput>) -> Result<Vec<ExportRow>, CollaboratorError> {
        let body = export_request(&tasks)?;
        let response = self.generate(&body).await?;
        rows_from_response(response)
    }
}

fn report_request(tasks: &[SummaryInput]) -> Result<Value, CollaboratorError> {
    let data = serde_json::to_string(tasks)
        .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
    let prompt = format!(
        "You are a productivity analysis assistant.\n\
         Analyze the following list of tasks and their durations provided in a JSON array.\n\n\
         Data:\n{data}\n\n\
         Based on this data, provide a summary. Your response MUST be a valid JSON object that adheres to the provided schema.\n\
         Calculate the total time tracked in hours and minutes.\n\
         Identify the category where the most time was spent.\n\
         Provide a brief, one-sentence, encouraging summary statement about the user's productivity."
    );

    Ok(json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "totalHours": {
                        "type": "NUMBER",
                        "description": "Total hours tracked, rounded down to the nearest whole number."
                    },
                    "totalMinutes": {
                        "type": "NUMBER",
                        "description": "The remaining minutes after calculating total hours."
                    },
                    "topCategory": {
                        "type": "STRING",
                        "description": "The name of the category with the highest cumulative duration."
                    },
                    "summary": {
                        "type": "STRING",
                        "description": "A brief, encouraging summary statement."
                    }
                },
                "required": ["totalHours", "totalMinutes", "topCategory", "summary"]
            }
        }
    }))
}

fn export_request(tasks: &[ExportInput]) -> Result<Value, CollaboratorError> {
    let data = serde_json::to_string(tasks)
        .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
    let prompt = format!(
        "You are a data processing assistant. Your task is to process the following list of tasks and their metadata.\n\
         For each task, convert the duration from seconds to minutes (rounded to two decimal places).\n\
         Format the timestamp into separate date (YYYY-MM-DD) and time (HH:MM:SS) strings from the ISO 8601 timestamp.\n\
         Then, call the '{SPREADSHEET_FUNCTION}' function with the processed data.\n\n\
         Task Data:\n{data}"
    );

    Ok(json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
        "tools": [{
            "functionDeclarations": [{
                "name": SPREADSHEET_FUNCTION,
                "description": "Creates a spreadsheet from a list of formatted task data.",
                "parameters": {
                    "type": "OBJECT",
                    "properties": {
                        "tasks": {
                            "type": "ARRAY",
                            "description": "A list of tasks to be included in the spreadsheet.",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "taskName": { "type": "STRING" },
                                    "category": { "type": "STRING" },
                                    "durationInMinutes": { "type": "NUMBER" },
                                    "date": { "type": "STRING", "description": "Format: YYYY-MM-DD" },
                                    "time": { "type": "STRING", "description": "Format: HH:MM:SS" }
                                },
                                "required": ["taskName", "category", "durationInMinutes", "date", "time"]
                            }
                        }
                    },
                    "required": ["tasks"]
                }
            }]
        }]
    }))
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

impl GenerateResponse {
    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .iter()
            .take(1)
            .filter_map(|c| c.content.as_ref())
            .flat_map(|c| c.parts.iter())
    }

    fn text(&self) -> Option<String> {
        let pieces: Vec<&str> = self.parts().filter_map(|p| p.text.as_deref()).collect();
        (!pieces.is_empty()).then(|| pieces.concat())
    }

    fn function_call(&self) -> Option<&FunctionCall> {
        self.parts().find_map(|p| p.function_call.as_ref())
    }
}

/// Numbers may come back as floats; they must still be whole and non-negative.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    total_hours: f64,
    total_minutes: f64,
    top_category: String,
    summary: String,
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole(name: &str, value: f64) -> Result<u64, CollaboratorError> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Ok(value as u64)
    } else {
        Err(CollaboratorError::InvalidResponse(format!(
            "{name} is not a non-negative integer: {value}"
        )))
    }
}

fn parse_report(text: &str) -> Result<Report, CollaboratorError> {
    let raw: RawReport = serde_json::from_str(text.trim()).map_err(|e| {
        tracing::error!(response = %text, "failed to parse report response");
        CollaboratorError::InvalidResponse(e.to_string())
    })?;

    let report = Report {
        total_hours: whole("totalHours", raw.total_hours)?,
        total_minutes: whole("totalMinutes", raw.total_minutes)?,
        top_category: raw.top_category,
        summary: raw.summary,
    };
    report.validate()?;
    Ok(report)
}

fn rows_from_response(response: GenerateResponse) -> Result<Vec<ExportRow>, CollaboratorError> {
    #[derive(Deserialize)]
    struct SpreadsheetArgs {
        tasks: Vec<ExportRow>,
    }

    let call = response
        .function_call()
        .filter(|call| call.name == SPREADSHEET_FUNCTION)
        .ok_or_else(|| {
            CollaboratorError::InvalidResponse(format!("no {SPREADSHEET_FUNCTION} call"))
        })?;

    let args: SpreadsheetArgs = serde_json::from_value(call.args.clone())
        .map_err(|e| CollaboratorError::InvalidResponse(e.to_string()))?;
    for row in &args.tasks {
        row.validate()?;
    }
    Ok(args.tasks)
}

fn parse_api_error(body: &str) -> Option<CollaboratorError> {
    #[derive(Deserialize)]
    struct ErrorPayload {
        error: ErrorDetails,
    }

    #[derive(Deserialize)]
    struct ErrorDetails {
        message: String,
    }

    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .map(|payload| CollaboratorError::Api(payload.error.message))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(value: Value) -> GenerateResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_report() {
        let report = parse_report(
            r#"{"totalHours": 2.0, "totalMinutes": 5, "topCategory": "Docs", "summary": "Well done."}"#,
        )
        .unwrap();
        assert_eq!(report.total_hours, 2);
        assert_eq!(report.total_minutes, 5);
        assert_eq!(report.top_category, "Docs");
    }

    #[test]
    fn test_parse_report_rejects_bad_shape() {
        assert!(parse_report("not json").is_err());
        assert!(parse_report(
            r#"{"totalHours": 1.5, "totalMinutes": 5, "topCategory": "Docs", "summary": "x"}"#
        )
        .is_err());
        assert!(parse_report(
            r#"{"totalHours": 1, "totalMinutes": 75, "topCategory": "Docs", "summary": "x"}"#
        )
        .is_err());
        assert!(parse_report(r#"{"totalHours": 1, "totalMinutes": 5}"#).is_err());
    }

    #[test]
    fn test_response_text() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }));
        assert_eq!(resp.text().as_deref(), Some("{\"a\":1}"));

        let empty = response(json!({ "candidates": [] }));
        assert!(empty.text().is_none());
    }

    #[test]
    fn test_rows_from_function_call() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{
                "functionCall": {
                    "name": "create_spreadsheet",
                    "args": { "tasks": [{
                        "taskName": "A,B",
                        "category": "X",
                        "durationInMinutes": 1.5,
                        "date": "2024-01-01",
                        "time": "09:00:00"
                    }] }
                }
            }] } }]
        }));
        let rows = rows_from_response(resp).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].task_name, "A,B");
    }

    #[test]
    fn test_rows_require_function_call() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }]
        }));
        assert!(rows_from_response(resp).is_err());

        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{
                "functionCall": { "name": "something_else", "args": { "tasks": [] } }
            }] } }]
        }));
        assert!(rows_from_response(resp).is_err());
    }

    #[test]
    fn test_rows_reject_bad_dates() {
        let resp = response(json!({
            "candidates": [{ "content": { "parts": [{
                "functionCall": {
                    "name": "create_spreadsheet",
                    "args": { "tasks": [{
                        "taskName": "A",
                        "category": "X",
                        "durationInMinutes": 1.5,
                        "date": "Jan 1",
                        "time": "09:00:00"
                    }] }
                }
            }] } }]
        }));
        assert!(rows_from_response(resp).is_err());
    }

    #[test]
    fn test_request_bodies() {
        let body = report_request(&[SummaryInput {
            task_name: "Write".to_string(),
            category: "Docs".to_string(),
            duration_in_seconds: 60,
        }])
        .unwrap();
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("\"durationInSeconds\":60"));
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );

        let body = export_request(&[]).unwrap();
        assert_eq!(
            body["tools"][0]["functionDeclarations"][0]["name"],
            SPREADSHEET_FUNCTION
        );
    }

    #[test]
    fn test_parse_api_error() {
        let err = parse_api_error(r#"{"error": {"code": 400, "message": "API key not valid"}}"#);
        assert!(matches!(err, Some(CollaboratorError::Api(m)) if m == "API key not valid"));
        assert!(parse_api_error("<html>").is_none());
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let config = CollaboratorConfig {
            api_key_env: "FOCUSLOG_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..CollaboratorConfig::default()
        };
        let gemini = GeminiCollaborator::from_config(&config).unwrap();
        let err = gemini.summarize(vec![]).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::MissingApiKey(_)));
    }
}
