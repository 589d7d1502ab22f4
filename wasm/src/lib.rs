//! WebAssembly module for the Ingres groundwater assistant
//!
//! Browser-side helpers for the chat client:
//! - Sentinel command classification of model replies
//! - Forecast reply parsing
//! - `**bold**` rendering and input validation
//! - Dataset slices for charting

use std::sync::OnceLock;

use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{Dataset, Intent};

fn dataset() -> &'static Dataset {
    static DATASET: OnceLock<Dataset> = OnceLock::new();
    DATASET.get_or_init(Dataset::embedded)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "ingres-wasm ready: {} records",
        dataset().records().len()
    )));
}

/// Classify a model reply. Returns JSON such as
/// `{"intent":"show_graph","district":"Chennai"}`.
#[wasm_bindgen]
pub fn classify_reply(reply: &str) -> Result<String, JsValue> {
    let intent: Intent = shared::classify(reply);
    to_json(&intent)
}

/// Parse a raw forecast reply for `district` into a forecast record JSON
#[wasm_bindgen]
pub fn parse_forecast(raw: &str, district: &str) -> Result<String, JsValue> {
    let record = parse_forecast_reply(raw, district, dataset().forecast_year())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_json(&record)
}

/// Escape HTML and turn `**text**` spans into `<strong>` elements
#[wasm_bindgen]
pub fn render_emphasis(text: &str) -> String {
    shared::render_emphasis(text)
}

/// Text handed to speech synthesis: emphasis markers removed
#[wasm_bindgen]
pub fn speakable_text(text: &str) -> String {
    shared::strip_emphasis(text)
}

/// Returns the trimmed message, or throws the reason it was rejected
#[wasm_bindgen]
pub fn check_user_input(text: &str) -> Result<String, JsValue> {
    validate_user_input(text)
        .map(str::to_string)
        .map_err(JsValue::from_str)
}

/// Language table for the selector, as JSON
#[wasm_bindgen]
pub fn languages_json() -> Result<String, JsValue> {
    to_json(LANGUAGES)
}

/// Speech voice for a locale code; English for unknown codes
#[wasm_bindgen]
pub fn voice_for(code: &str) -> String {
    LanguageOption::from_code(code).voice_name.to_string()
}

/// District names in dataset order
#[wasm_bindgen]
pub fn district_names() -> js_sys::Array {
    dataset()
        .districts()
        .into_iter()
        .map(JsValue::from_str)
        .collect()
}

/// Historical rows for one district as JSON, ascending by year.
/// An unknown district yields `[]`.
#[wasm_bindgen]
pub fn district_records(district: &str) -> Result<String, JsValue> {
    to_json(&dataset().for_district(district))
}

/// Year every forecast targets
#[wasm_bindgen]
pub fn forecast_year() -> i32 {
    dataset().forecast_year()
}
