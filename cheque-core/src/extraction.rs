//! Extraction adapter: image bytes in, validated `ChequeRecord` out.
//!
//! The vision model is a black box behind [`VisionModel`]. One attempt per
//! call; no retry and no timeout are applied at this layer.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ExtractionError, Result};
use crate::payload::find_json_span;
use crate::record::ChequeRecord;
use crate::validator::validate;

/// Instruction sent alongside every cheque image.
pub const EXTRACTION_PROMPT: &str = "\
Extract cheque details like payee, amount, bank, MICR code, branch, IFSC code, \
account number, cheque number, date, and signature verification.
Return JSON format with the keys: payee, amount, bank, micr_code, branch, \
ifsc_code, account_number, cheque_number, date, signature_verified.";

/// A document-understanding service that answers a prompt about an image.
pub trait VisionModel {
    /// Returns the model's text, or `None` when it produced no text at all.
    fn generate(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> std::result::Result<Option<String>, ExtractionError>;
}

/// Successful extraction: the normalized record and the payload it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub record: ChequeRecord,
    pub payload: Value,
}

pub struct ChequeExtractor<M: VisionModel> {
    model: M,
}

impl<M: VisionModel> ChequeExtractor<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    #[cfg(test)]
    fn model(&self) -> &M {
        &self.model
    }

    /// Send one image to the model and normalize its answer.
    pub fn extract(&self, image: &[u8], mime_type: &str) -> Result<Extraction> {
        info!(bytes = image.len(), mime_type, "extracting cheque details");
        let text = self.model.generate(image, mime_type, EXTRACTION_PROMPT)?;
        parse_response(text.as_deref())
    }
}

/// Turn raw model output into an [`Extraction`].
pub fn parse_response(text: Option<&str>) -> Result<Extraction> {
    let text = match text {
        Some(t) if !t.is_empty() => t,
        _ => {
            warn!("extraction model returned no text");
            return Err(ExtractionError::EmptyResponse);
        }
    };

    let Some(span) = find_json_span(text) else {
        warn!(len = text.len(), "no JSON object in extraction response");
        return Err(ExtractionError::Unstructured {
            raw: text.to_string(),
        });
    };
    debug!(span_len = span.len(), "isolated JSON span");

    let payload: Value = serde_json::from_str(span)?;
    let record = validate(&payload)?;
    Ok(Extraction { record, payload })
}
