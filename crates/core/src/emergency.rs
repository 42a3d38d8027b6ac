//! Red-flag phrase detection.
//!
//! Matching is plain substring containment on the lower-cased input with no word-boundary
//! checks. Over-triggering is accepted; a missed emergency is the worse failure.

/// Phrases that send the caller straight to the emergency template.
pub const EMERGENCY_PHRASES: &[&str] = &[
    "chest pain",
    "pressure chest",
    "tight chest",
    "can't breathe",
    "difficulty breathing",
    "short breath",
    "severe pain",
    "unbearable pain",
    "unconscious",
    "passed out",
    "fainted",
    "confused",
    "disoriented",
    "slurred speech",
    "severe headache",
    "worst headache",
    "bleeding won't stop",
    "heavy bleeding",
    "poison",
    "overdose",
];

/// Returns the emergency phrases found in `text`, in list order.
pub fn detect_emergencies(text: &str) -> Vec<&'static str> {
    let lowered = text.to_lowercase();
    let found: Vec<&'static str> = EMERGENCY_PHRASES
        .iter()
        .copied()
        .filter(|phrase| lowered.contains(phrase))
        .collect();

    if !found.is_empty() {
        tracing::warn!(count = found.len(), phrases = ?found, "emergency phrases detected");
    }
    found
}
