//! Constants used throughout the symptom core crate.
//!
//! Scoring thresholds and fixed response text live here so the matcher and composer agree on
//! them and tests can refer to them by name.

/// Closing line of every response produced by the core.
pub const SAFETY_DISCLAIMER: &str =
    "EDUCATIONAL TOOL ONLY. Consult a qualified healthcare provider for medical advice.";

/// Appended to reports for serious conditions and to the general-advice report.
pub const EMERGENCY_ADVICE: &str = "SEEK IMMEDIATE MEDICAL ATTENTION if experiencing: chest pain, difficulty breathing, severe pain, confusion, or loss of consciousness.";

/// Closing line of the emergency template, placed before the safety disclaimer.
pub const NOT_A_SUBSTITUTE: &str = "THIS IS NOT A SUBSTITUTE FOR EMERGENCY MEDICAL CARE.";

/// Header marking the emergency template.
pub const EMERGENCY_HEADER: &str = "**EMERGENCY MEDICAL ALERT**";

/// Section heading where the differential report's excerpt of the top match begins.
pub const SELF_CARE_HEADING: &str = "Self-Care Recommendations:";

/// A condition must reach this score to be considered at all on the general path.
pub const MIN_INCLUSION_SCORE: u32 = 3;

/// If the best general-path score is below this, the whole result is discarded.
pub const MIN_CONFIDENT_SCORE: u32 = 4;

/// Most matches returned by the matcher.
pub const MAX_MATCHES: usize = 3;

/// Most stars shown next to a candidate in the differential report.
pub const MAX_STARS: u32 = 5;

/// Characters of the top-match report embedded in the differential report.
pub const DEFAULT_EXCERPT_CHARS: usize = 500;

/// Characters of the user's input echoed at the top of the differential report.
pub const INPUT_ECHO_CHARS: usize = 100;

/// Default facility named in the emergency-contact block.
pub const DEFAULT_FACILITY_NAME: &str = "Suwa Setha Hospital";

/// Default location line of the emergency-contact block.
pub const DEFAULT_EMERGENCY_LOCATION: &str = "SuwaSetha Hospital Colombo";

/// Default phone line of the emergency-contact block.
pub const DEFAULT_EMERGENCY_PHONE: &str = "1990 or 0112 691 111";

/// Default emergency-services line named in the emergency template's call-to-action.
pub const DEFAULT_EMERGENCY_SERVICES: &str = "1990 in Sri Lanka";
