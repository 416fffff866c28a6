//! Text → structured values: OCR term correction, the lab-parameter bank and
//! extractor, document type and organ sniffing, medication mentions.

pub mod correction;
pub mod extractor;
pub mod medications;
pub mod patterns;
pub mod report_type;

pub use correction::correct_lab_terms;
pub use extractor::{extract_parameters, ExtractedValue, ExtractedValues};
pub use medications::{extract_medications, MedicationMention};
pub use patterns::{pattern_for, ParameterPattern, LAB_PATTERNS};
pub use report_type::{detect_primary_organ, detect_report_type};
