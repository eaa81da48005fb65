//! cheque-core: cheque record types, model-output validation, and reporting.

pub mod dashboard;
pub mod error;
pub mod extraction;
pub mod payload;
pub mod record;
pub mod report;
pub mod validator;

pub use dashboard::{dashboard_rows, filter_rows, DashboardRow};
pub use error::{ExtractionError, ValidationError};
pub use extraction::{parse_response, ChequeExtractor, Extraction, VisionModel, EXTRACTION_PROMPT};
pub use payload::find_json_span;
pub use record::{ChequeRecord, ChequeRow, ChequeStatus, Fetched};
pub use report::{summarize, summarize_rows, BankCount, ReportSummary};
pub use validator::validate;
