//! Response composition.
//!
//! Turns the detector and matcher output into one of four markdown-flavoured reports:
//!
//! - **Emergency**: red-flag phrases were found; matches are ignored.
//! - **Single condition**: exactly one candidate.
//! - **Differential**: several candidates, with an excerpt of the top one's report.
//! - **General advice**: nothing matched.
//!
//! Every report ends with [`SAFETY_DISCLAIMER`]. Rendering is deterministic.

use crate::catalog::{Catalog, ConditionId};
use crate::config::CoreConfig;
use crate::constants::{
    EMERGENCY_ADVICE, EMERGENCY_HEADER, INPUT_ECHO_CHARS, MAX_MATCHES, MAX_STARS,
    NOT_A_SUBSTITUTE, SAFETY_DISCLAIMER, SELF_CARE_HEADING,
};
use crate::matcher::MatchResult;
use crate::IntakeResult;

/// Keyword-triggered guidance for the general-advice report, in display order.
const GENERAL_BLOCKS: &[(&[&str], &str, &str)] = &[
    (
        &["fever", "temperature", "hot"],
        "For fever: Rest, stay hydrated, monitor temperature",
        "Seek care if fever exceeds 102°F or persists beyond 3 days",
    ),
    (
        &["pain", "ache", "hurt"],
        "For pain: Rest affected area, consider OTC pain relievers",
        "Seek care if pain is severe, sudden, or worsening",
    ),
    (
        &["cough", "breath", "chest"],
        "For respiratory symptoms: Stay hydrated, use humidifier",
        "Seek care if experiencing difficulty breathing",
    ),
    (
        &["stomach", "nausea", "vomit", "diarrhea"],
        "For digestive symptoms: BRAT diet, clear fluids",
        "Seek care if signs of dehydration or severe pain",
    ),
];

const WELLNESS_TIPS: &[&str] = &[
    "Stay hydrated with water throughout the day",
    "Ensure adequate rest and sleep",
    "Monitor symptoms for changes or worsening",
    "Avoid self-medication without professional advice",
    "Consider keeping a symptom diary",
];

const WHEN_TO_SEEK_CARE: &[&str] = &[
    "Symptoms are severe or worsening",
    "New or concerning symptoms develop",
    "Symptoms persist beyond expected duration",
    "You have underlying health conditions",
];

const DIFFERENTIAL_RECOMMENDATIONS: &[&str] = &[
    "The condition with highest match is most likely",
    "Each condition has different management approaches",
    "Professional evaluation is needed for accurate diagnosis",
];

/// Compose the response for one query.
///
/// `emergencies` takes priority over `matches`. `raw_text` is only consulted by the
/// differential echo and the general-advice keyword blocks.
///
/// # Errors
///
/// Returns [`crate::IntakeError::UnknownCondition`] if a match names a condition that
/// `catalog` does not hold.
pub fn compose_response(
    catalog: &Catalog,
    config: &CoreConfig,
    matches: &[MatchResult],
    emergencies: &[&str],
    raw_text: &str,
) -> IntakeResult<String> {
    if !emergencies.is_empty() {
        return Ok(render_emergency(config, emergencies));
    }

    match matches {
        [] => Ok(render_general_advice(config, raw_text)),
        [only] => render_condition_report(catalog, config, only.condition_id),
        _ => render_differential(catalog, config, matches, raw_text),
    }
}

/// Full single-condition report for `id`.
pub fn render_condition_report(
    catalog: &Catalog,
    config: &CoreConfig,
    id: ConditionId,
) -> IntakeResult<String> {
    let record = catalog.get(id)?;
    let mut output = String::new();

    output.push_str(&format!("**{} - Medical Information**\n\n", record.display_name));

    output.push_str("**Common Symptoms:**\n");
    for symptom in record.symptom_keywords {
        output.push_str(&format!("• {}\n", title_case(symptom)));
    }

    output.push_str(&format!("\n**{}**\n", SELF_CARE_HEADING));
    for (i, step) in record.self_care_steps.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, step));
    }

    output.push_str("\n**Additional Information:**\n");
    output.push_str(&format!("• Typical Duration: {}\n", record.typical_duration));
    output.push_str(&format!("• Common Causes: {}\n", record.causes));

    output.push_str(&format!("\n**When to Consult {}:**\n", config.facility_name()));
    output.push_str(&format!("• {}\n", record.escalation_criteria));
    output.push_str(&format!(
        "• Severity Level: {}\n",
        record.severity.guidance()
    ));

    if record.severity.warrants_emergency_advice() {
        output.push_str(&format!("\n{}\n", EMERGENCY_ADVICE));
    }

    output.push_str(&format!("\n{}", SAFETY_DISCLAIMER));
    Ok(output)
}

fn render_emergency(config: &CoreConfig, emergencies: &[&str]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", EMERGENCY_HEADER));
    output.push_str(&format!(
        "Based on your description of: {}\n\n",
        emergencies.join(", ")
    ));

    output.push_str("**IMMEDIATE ACTION REQUIRED:**\n");
    output.push_str(&format!(
        "• Call emergency services ({}) or go to nearest hospital\n",
        config.emergency_services()
    ));
    output.push_str("• Do not wait for symptoms to improve\n");
    output.push_str("• Do not drive yourself if experiencing these symptoms\n\n");

    output.push_str("**Emergency Symptoms Detected:**\n");
    for emergency in emergencies {
        output.push_str(&format!("• {}\n", title_case(emergency)));
    }

    output.push_str(&format!(
        "\n**{} Emergency Department**\n",
        config.facility_name()
    ));
    output.push_str(&format!("Location: {}\n", config.emergency_location()));
    output.push_str(&format!("Emergency: {}\n", config.emergency_phone()));
    output.push_str("24/7 Emergency Services Available\n\n");

    output.push_str(&format!("{}\n\n", NOT_A_SUBSTITUTE));
    output.push_str(SAFETY_DISCLAIMER);
    output
}

fn render_differential(
    catalog: &Catalog,
    config: &CoreConfig,
    matches: &[MatchResult],
    raw_text: &str,
) -> IntakeResult<String> {
    let mut output = String::new();

    output.push_str(&format!("**{} - Symptom Analysis**\n\n", config.facility_name()));
    output.push_str(&format!(
        "Based on your symptoms: *{}*\n\n",
        echo_input(raw_text)
    ));
    output.push_str("**Possible Conditions to Consider:**\n\n");

    for (i, candidate) in matches.iter().take(MAX_MATCHES).enumerate() {
        // Fail fast on ids the catalog does not know, even though the name is carried along.
        catalog.get(candidate.condition_id)?;
        output.push_str(&format!("{}. **{}**\n", i + 1, candidate.display_name));
        output.push_str(&format!(
            "   Match Confidence: {}\n",
            stars(candidate.score)
        ));
        if !candidate.matched_keywords.is_empty() {
            output.push_str(&format!(
                "   Matching Symptoms: {}\n",
                candidate.matched_keywords.join(", ")
            ));
        }
        output.push('\n');
    }

    output.push_str("**Recommendations:**\n");
    for (i, line) in DIFFERENTIAL_RECOMMENDATIONS.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, line));
    }
    output.push('\n');

    let top = &matches[0];
    output.push_str(&format!(
        "**Detailed Information for {}:**\n",
        top.display_name
    ));
    let detailed = render_condition_report(catalog, config, top.condition_id)?;
    if let Some(start) = detailed.find(SELF_CARE_HEADING) {
        let excerpt: String = detailed[start..].chars().take(config.excerpt_chars()).collect();
        output.push_str(&format!("{}...\n\n", excerpt));
    }

    output.push_str("**Next Steps:**\n");
    output.push_str("• Monitor symptoms closely\n");
    output.push_str("• Follow general self-care recommendations\n");
    output.push_str(&format!(
        "• Schedule appointment at {} for proper diagnosis\n\n",
        config.facility_name()
    ));

    output.push_str(SAFETY_DISCLAIMER);
    Ok(output)
}

fn render_general_advice(config: &CoreConfig, raw_text: &str) -> String {
    let lowered = raw_text.to_lowercase();
    let mut output = String::new();

    output.push_str(&format!("**{} Health Assistant**\n\n", config.facility_name()));
    output.push_str("Based on your symptoms, here's general health guidance:\n\n");

    for (triggers, advice, escalation) in GENERAL_BLOCKS {
        if triggers.iter().any(|word| lowered.contains(word)) {
            output.push_str(&format!("• {}\n", advice));
            output.push_str(&format!("• {}\n\n", escalation));
        }
    }

    output.push_str("\n**General Wellness Recommendations:**\n");
    for (i, tip) in WELLNESS_TIPS.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, tip));
    }

    output.push_str("\n**When to Seek Medical Care:**\n");
    for line in WHEN_TO_SEEK_CARE {
        output.push_str(&format!("• {}\n", line));
    }

    output.push_str(&format!("\n{}\n\n", EMERGENCY_ADVICE));
    output.push_str(SAFETY_DISCLAIMER);
    output
}

/// `min(5, score)` filled stars.
fn stars(score: u32) -> String {
    "★".repeat(score.min(MAX_STARS) as usize)
}

/// First [`INPUT_ECHO_CHARS`] characters of the input, always followed by "...".
fn echo_input(raw_text: &str) -> String {
    let head: String = raw_text.chars().take(INPUT_ECHO_CHARS).collect();
    format!("{}...", head)
}

/// Capitalise the first letter of each whitespace-separated word.
fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SeverityTier;
    use crate::matcher::match_conditions;
    use crate::IntakeError;

    fn cfg() -> CoreConfig {
        CoreConfig::default()
    }

    fn candidate(id: ConditionId, score: u32, keywords: &[&str]) -> MatchResult {
        let record = Catalog::standard().get(id).expect("standard record").clone();
        MatchResult {
            condition_id: id,
            display_name: record.display_name.to_string(),
            score,
            matched_keywords: keywords.iter().map(|k| k.to_string()).collect(),
            severity: record.severity,
        }
    }

    #[test]
    fn emergency_template_lists_phrases_and_ignores_matches() {
        let matches = vec![candidate(ConditionId::CommonCold, 4, &["runny nose"])];
        let out = compose_response(
            &Catalog::standard(),
            &cfg(),
            &matches,
            &["chest pain", "can't breathe"],
            "chest pain and can't breathe",
        )
        .expect("compose");

        assert!(out.starts_with(EMERGENCY_HEADER));
        assert!(out.contains("Based on your description of: chest pain, can't breathe"));
        assert!(out.contains("• Chest Pain\n"));
        assert!(out.contains("• Can't Breathe\n"));
        assert!(out.contains("• Call emergency services (1990 in Sri Lanka) or go to nearest hospital\n"));
        assert!(out.contains("Emergency: 1990 or 0112 691 111\n"));
        assert!(out.contains("Suwa Setha Hospital Emergency Department"));
        assert!(out.contains(NOT_A_SUBSTITUTE));
        assert!(!out.contains("Common Cold"));
        assert!(out.ends_with(SAFETY_DISCLAIMER));
    }

    #[test]
    fn emergency_template_uses_configured_contacts() {
        let config = CoreConfig::new(
            "Riverside Clinic".into(),
            "12 River Road".into(),
            "112".into(),
            500,
        )
        .expect("valid config")
        .with_emergency_services("112".into());
        let out = compose_response(&Catalog::standard(), &config, &[], &["overdose"], "overdose")
            .expect("compose");
        assert!(out.contains("**Riverside Clinic Emergency Department**"));
        assert!(out.contains("Location: 12 River Road"));
        assert!(out.contains("Call emergency services (112)"));
    }

    #[test]
    fn single_condition_report_has_every_section_in_order() {
        let out = render_condition_report(&Catalog::standard(), &cfg(), ConditionId::CommonCold)
            .expect("render");

        let sections = [
            "**Common Cold - Medical Information**",
            "**Common Symptoms:**",
            "• Runny Nose",
            "**Self-Care Recommendations:**",
            "1. Rest and stay hydrated with warm fluids",
            "5. Use a humidifier to ease breathing",
            "• Typical Duration: 7-10 days",
            "• Common Causes: Viral infection (rhinovirus, coronavirus)",
            "**When to Consult Suwa Setha Hospital:**",
            "• Severity Level: Generally manageable with self-care",
        ];
        let mut cursor = 0;
        for section in sections {
            let pos = out[cursor..]
                .find(section)
                .unwrap_or_else(|| panic!("missing or out of order: {section}"));
            cursor += pos + section.len();
        }
        assert!(!out.contains(EMERGENCY_ADVICE));
        assert!(out.ends_with(SAFETY_DISCLAIMER));
    }

    #[test]
    fn serious_conditions_carry_emergency_advice() {
        let record = Catalog::standard()
            .get(ConditionId::Hypertension)
            .expect("present")
            .clone();
        assert_eq!(record.severity, SeverityTier::ModerateSevere);

        let out = render_condition_report(&Catalog::standard(), &cfg(), ConditionId::Hypertension)
            .expect("render");
        assert!(out.contains(EMERGENCY_ADVICE));
        assert!(out.contains("• Severity Level: Medical evaluation recommended"));
        assert!(out.ends_with(SAFETY_DISCLAIMER));
    }

    #[test]
    fn one_match_renders_single_report() {
        let matches = vec![candidate(ConditionId::TensionHeadache, 10, &["headache"])];
        let out = compose_response(&Catalog::standard(), &cfg(), &matches, &[], "headache")
            .expect("compose");
        assert!(out.starts_with("**Tension Headache - Medical Information**"));
    }

    #[test]
    fn differential_report_ranks_candidates_with_capped_stars() {
        let matches = vec![
            candidate(ConditionId::Migraine, 16, &["headache", "throbbing"]),
            candidate(ConditionId::TensionHeadache, 5, &["headache"]),
            candidate(ConditionId::Hypertension, 4, &[]),
        ];
        let out = compose_response(
            &Catalog::standard(),
            &cfg(),
            &matches,
            &[],
            "throbbing headache",
        )
        .expect("compose");

        assert!(out.contains("Based on your symptoms: *throbbing headache...*"));
        assert!(out.contains("1. **Migraine Headache**\n   Match Confidence: ★★★★★\n"));
        assert!(out.contains("   Matching Symptoms: headache, throbbing\n"));
        assert!(out.contains("2. **Tension Headache**\n   Match Confidence: ★★★★★\n"));
        assert!(out.contains("3. **High Blood Pressure**\n   Match Confidence: ★★★★\n\n"));
        assert!(out.contains("3. Professional evaluation is needed for accurate diagnosis"));
        assert!(out.contains("**Detailed Information for Migraine Headache:**\nSelf-Care Recommendations:**\n1. Rest in dark, quiet room"));
        assert!(out.contains("• Schedule appointment at Suwa Setha Hospital for proper diagnosis"));
        assert!(out.ends_with(SAFETY_DISCLAIMER));
    }

    #[test]
    fn differential_excerpt_is_bounded_by_configured_length() {
        let config = CoreConfig::new("Clinic".into(), "here".into(), "999".into(), 40)
            .expect("valid config");
        let matches = vec![
            candidate(ConditionId::CommonCold, 6, &[]),
            candidate(ConditionId::AllergicRhinitis, 6, &[]),
        ];
        let out = compose_response(&Catalog::standard(), &config, &matches, &[], "sneezing")
            .expect("compose");

        let report = render_condition_report(&Catalog::standard(), &config, ConditionId::CommonCold)
            .expect("render");
        let start = report.find(SELF_CARE_HEADING).expect("heading present");
        let expected: String = report[start..].chars().take(40).collect();
        assert!(out.contains(&format!("{expected}...\n\n**Next Steps:**")));
    }

    #[test]
    fn long_input_echo_is_shortened() {
        let long = "sneezing ".repeat(20);
        let matches = vec![
            candidate(ConditionId::CommonCold, 6, &[]),
            candidate(ConditionId::AllergicRhinitis, 6, &[]),
        ];
        let out = compose_response(&Catalog::standard(), &cfg(), &matches, &[], &long)
            .expect("compose");
        let echoed: String = long.chars().take(INPUT_ECHO_CHARS).collect();
        assert!(out.contains(&format!("*{echoed}...*")));
    }

    #[test]
    fn short_input_echo_still_ends_with_ellipsis() {
        assert_eq!(echo_input("sneezing"), "sneezing...");
        assert_eq!(echo_input(""), "...");
    }

    #[test]
    fn general_advice_without_triggers_has_only_fixed_sections() {
        let out = compose_response(&Catalog::standard(), &cfg(), &[], &[], "I feel a bit off today")
            .expect("compose");
        assert!(out.starts_with("**Suwa Setha Hospital Health Assistant**"));
        assert!(!out.contains("For fever"));
        assert!(!out.contains("For pain"));
        assert!(!out.contains("For respiratory symptoms"));
        assert!(!out.contains("For digestive symptoms"));
        assert!(out.contains("5. Consider keeping a symptom diary"));
        assert!(out.contains("• You have underlying health conditions"));
        assert!(out.contains(EMERGENCY_ADVICE));
        assert!(out.ends_with(SAFETY_DISCLAIMER));
    }

    #[test]
    fn general_advice_blocks_trigger_independently_in_fixed_order() {
        let out = compose_response(
            &Catalog::standard(),
            &cfg(),
            &[],
            &[],
            "upset stomach and a temperature",
        )
        .expect("compose");
        let fever = out.find("For fever").expect("fever block");
        let digestive = out.find("For digestive symptoms").expect("digestive block");
        assert!(fever < digestive);
        assert!(!out.contains("For pain"));
        assert!(!out.contains("For respiratory symptoms"));
    }

    #[test]
    fn unknown_match_fails_fast() {
        let cold = Catalog::standard()
            .get(ConditionId::CommonCold)
            .expect("present")
            .clone();
        let catalog = Catalog::new(vec![cold]).expect("substitute catalog");
        let matches = vec![candidate(ConditionId::Acne, 8, &["pimples"])];
        let err = compose_response(&catalog, &cfg(), &matches, &[], "pimples")
            .expect_err("acne is not in this catalog");
        assert!(matches!(err, IntakeError::UnknownCondition(ConditionId::Acne)));

        let pair = vec![
            candidate(ConditionId::CommonCold, 6, &[]),
            candidate(ConditionId::Acne, 6, &[]),
        ];
        let err = compose_response(&catalog, &cfg(), &pair, &[], "x").expect_err("acne unknown");
        assert!(matches!(err, IntakeError::UnknownCondition(ConditionId::Acne)));
    }

    #[test]
    fn migraine_scenario_leads_differential_with_migraine() {
        let text = "severe throbbing headache on one side with nausea and light sensitivity";
        let catalog = Catalog::standard();
        let matches = match_conditions(&catalog, text).expect("match");
        let out = compose_response(&catalog, &cfg(), &matches, &[], text).expect("compose");
        assert!(out.contains("1. **Migraine Headache**"));
        assert!(out.contains("2. **Tension Headache**"));
    }

    #[test]
    fn title_case_capitalises_each_word() {
        assert_eq!(title_case("can't breathe"), "Can't Breathe");
        assert_eq!(title_case("sensitivity to light/sound"), "Sensitivity To Light/sound");
        assert_eq!(title_case("band-like pressure"), "Band-like Pressure");
    }

    #[test]
    fn stars_are_capped_at_five() {
        assert_eq!(stars(3), "★★★");
        assert_eq!(stars(19), "★★★★★");
        assert_eq!(stars(0), "");
    }
}
