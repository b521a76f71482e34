//! WASM bindings for sharewise
//!
//! This module provides JavaScript-friendly bindings for the split/combine
//! commands. Image decoding and rendering stay on the JavaScript side: images
//! cross the boundary as raw RGBA bytes (e.g. `ImageData.data`).

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::commands::{self, SchemeParams, SplitOutcome, SplitSummary};
use crate::domain::{ShareIndex, ThresholdScheme};
use crate::pixels::{Dimensions, PixelBuffer, PixelLayout};

/// Initialize panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Result of a split operation (for JSON serialization)
#[derive(Serialize, Deserialize)]
pub struct SplitResult {
    /// The shares in the persisted text format
    pub document: String,
    #[serde(flatten)]
    pub summary: SplitSummary,
}

impl From<SplitOutcome> for SplitResult {
    fn from(outcome: SplitOutcome) -> Self {
        Self {
            document: outcome.document,
            summary: outcome.summary,
        }
    }
}

/// Parses scheme parameters such as `{"threshold":3,"shares":5}`
///
/// `modulus` is optional and defaults to 2^31 - 1.
fn scheme(params: &str) -> Result<ThresholdScheme, JsValue> {
    let params: SchemeParams = serde_json::from_str(params)
        .map_err(|e| JsValue::from_str(&format!("Invalid scheme parameters: {e}")))?;
    params
        .scheme()
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))
}

fn participants(xs: &[u32]) -> Result<Vec<ShareIndex>, JsValue> {
    xs.iter()
        .map(|&x| ShareIndex::new(x).map_err(|e| JsValue::from_str(&e.to_string())))
        .collect()
}

fn to_json(result: SplitResult) -> Result<String, JsValue> {
    serde_json::to_string(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}

/// Split a text secret into shares
///
/// # Returns
/// JSON string containing the share document and metadata, or an error message
///
/// # Example (JavaScript)
/// ```javascript
/// const result = JSON.parse(wasm_split_text("launch code", '{"threshold":3,"shares":5}'));
/// console.log(`Shared ${result.units} bytes with threshold ${result.threshold}`);
/// download("shares.txt", result.document);
/// ```
#[wasm_bindgen]
pub fn wasm_split_text(secret: &str, params: &str) -> Result<String, JsValue> {
    let scheme = scheme(params)?;
    let outcome = commands::split_text(secret, &scheme)
        .map_err(|e| JsValue::from_str(&format!("Split failed: {e:#}")))?;
    to_json(outcome.into())
}

/// Combine a text share document back into the secret
///
/// `participants` lists the share holders to use; pass an empty array to use
/// the stored shares as they are.
#[wasm_bindgen]
pub fn wasm_combine_text(
    document: &str,
    params: &str,
    participants: Vec<u32>,
) -> Result<String, JsValue> {
    let scheme = scheme(params)?;
    let participants = self::participants(&participants)?;
    commands::combine_text(document, &scheme, &participants)
        .map(|secret| secret.as_str().to_owned())
        .map_err(|e| JsValue::from_str(&format!("Combine failed: {e:#}")))
}

/// Split the grayscale levels of an RGBA image into shares
///
/// # Example (JavaScript)
/// ```javascript
/// const { data, width, height } = ctx.getImageData(0, 0, w, h);
/// const result = JSON.parse(wasm_split_image(data, width, height, '{"threshold":3,"shares":5,"modulus":257}'));
/// ```
#[wasm_bindgen]
pub fn wasm_split_image(
    rgba: Vec<u8>,
    width: u32,
    height: u32,
    params: &str,
) -> Result<String, JsValue> {
    let scheme = scheme(params)?;
    let image = PixelBuffer::new(Dimensions::new(width, height), PixelLayout::Rgba, rgba)
        .map_err(|e| JsValue::from_str(&format!("Invalid image: {e}")))?;
    let outcome = commands::split_image(&image, &scheme)
        .map_err(|e| JsValue::from_str(&format!("Split failed: {e:#}")))?;
    to_json(outcome.into())
}

/// Combine an image share document into opaque grayscale RGBA bytes
///
/// The dimensions are stored in the document; read them with `wasm_document_dimensions`.
#[wasm_bindgen]
pub fn wasm_combine_image(
    document: &str,
    params: &str,
    participants: Vec<u32>,
) -> Result<Vec<u8>, JsValue> {
    let scheme = scheme(params)?;
    let participants = self::participants(&participants)?;
    commands::combine_image(document, &scheme, &participants)
        .map(PixelBuffer::into_data)
        .map_err(|e| JsValue::from_str(&format!("Combine failed: {e:#}")))
}

/// Image dimensions stored in a share document, as JSON (`null` for text shares)
#[wasm_bindgen]
pub fn wasm_document_dimensions(document: &str) -> Result<String, JsValue> {
    let parsed = crate::codec::load(document)
        .map_err(|e| JsValue::from_str(&format!("Parse failed: {e}")))?;
    serde_json::to_string(&parsed.dimensions)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {e}")))
}
