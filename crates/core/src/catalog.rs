//! The condition catalog.
//!
//! A [`Catalog`] is an immutable list of [`ConditionRecord`]s built once at startup and shared
//! by reference with the matcher and composer. [`Catalog::standard`] holds the fourteen
//! conditions the assistant knows about; tests may build substitute catalogs with
//! [`Catalog::new`].
//!
//! Declaration order matters: the matcher breaks score ties in catalog order.

use crate::{IntakeError, IntakeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identifier of a condition known to the assistant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionId {
    CommonCold,
    Influenza,
    Bronchitis,
    Gastroenteritis,
    AcidReflux,
    Migraine,
    TensionHeadache,
    BackPain,
    Arthritis,
    Eczema,
    Acne,
    Hypertension,
    Diabetes,
    AllergicRhinitis,
}

impl ConditionId {
    pub const ALL: [ConditionId; 14] = [
        ConditionId::CommonCold,
        ConditionId::Influenza,
        ConditionId::Bronchitis,
        ConditionId::Gastroenteritis,
        ConditionId::AcidReflux,
        ConditionId::Migraine,
        ConditionId::TensionHeadache,
        ConditionId::BackPain,
        ConditionId::Arthritis,
        ConditionId::Eczema,
        ConditionId::Acne,
        ConditionId::Hypertension,
        ConditionId::Diabetes,
        ConditionId::AllergicRhinitis,
    ];

    /// The stable snake_case token for this condition.
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionId::CommonCold => "common_cold",
            ConditionId::Influenza => "influenza",
            ConditionId::Bronchitis => "bronchitis",
            ConditionId::Gastroenteritis => "gastroenteritis",
            ConditionId::AcidReflux => "acid_reflux",
            ConditionId::Migraine => "migraine",
            ConditionId::TensionHeadache => "tension_headache",
            ConditionId::BackPain => "back_pain",
            ConditionId::Arthritis => "arthritis",
            ConditionId::Eczema => "eczema",
            ConditionId::Acne => "acne",
            ConditionId::Hypertension => "hypertension",
            ConditionId::Diabetes => "diabetes",
            ConditionId::AllergicRhinitis => "allergic_rhinitis",
        }
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConditionId {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        ConditionId::ALL
            .into_iter()
            .find(|id| id.as_str() == token)
            .ok_or_else(|| IntakeError::UnknownConditionId(token.to_string()))
    }
}

/// How seriously a condition should be taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    Mild,
    Moderate,
    Severe,
    MildModerate,
    ModerateSevere,
}

impl SeverityTier {
    /// Sentence shown as the "Severity Level" of a single-condition report.
    pub fn guidance(self) -> &'static str {
        match self {
            SeverityTier::Mild => "Generally manageable with self-care",
            SeverityTier::Moderate => "May require medical evaluation",
            SeverityTier::Severe => "Requires medical attention",
            SeverityTier::MildModerate => "Monitor closely, seek care if worsens",
            SeverityTier::ModerateSevere => "Medical evaluation recommended",
        }
    }

    /// Whether reports for this tier carry the emergency-advice line.
    pub fn warrants_emergency_advice(self) -> bool {
        matches!(self, SeverityTier::Severe | SeverityTier::ModerateSevere)
    }
}

/// Reference data for one condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConditionRecord {
    pub id: ConditionId,
    pub display_name: &'static str,
    /// Phrases scored by the matcher and listed under "Common Symptoms".
    pub symptom_keywords: &'static [&'static str],
    /// Synonyms and colloquialisms that add to the score but are not listed.
    pub related_keywords: &'static [&'static str],
    pub causes: &'static str,
    pub self_care_steps: &'static [&'static str],
    pub typical_duration: &'static str,
    pub escalation_criteria: &'static str,
    pub severity: SeverityTier,
}

/// Immutable, ordered collection of condition records.
#[derive(Clone, Debug)]
pub struct Catalog {
    records: Vec<ConditionRecord>,
    index: HashMap<ConditionId, usize>,
}

impl Catalog {
    /// Build a catalog from `records`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::DuplicateCondition`] if two records share an id.
    pub fn new(records: Vec<ConditionRecord>) -> IntakeResult<Self> {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            if index.insert(record.id, pos).is_some() {
                return Err(IntakeError::DuplicateCondition(record.id));
            }
        }
        Ok(Self { records, index })
    }

    /// The built-in catalog of fourteen common conditions.
    pub fn standard() -> Self {
        let records = standard_records();
        let index = records
            .iter()
            .enumerate()
            .map(|(pos, record)| (record.id, pos))
            .collect();
        Self { records, index }
    }

    /// Look up a record.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownCondition`] if this catalog does not hold `id`.
    pub fn get(&self, id: ConditionId) -> IntakeResult<&ConditionRecord> {
        self.index
            .get(&id)
            .map(|&pos| &self.records[pos])
            .ok_or(IntakeError::UnknownCondition(id))
    }

    pub fn contains(&self, id: ConditionId) -> bool {
        self.index.contains_key(&id)
    }

    /// Records in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConditionRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn standard_records() -> Vec<ConditionRecord> {
    vec![
        // Respiratory
        ConditionRecord {
            id: ConditionId::CommonCold,
            display_name: "Common Cold",
            symptom_keywords: &[
                "runny nose",
                "sneezing",
                "sore throat",
                "mild cough",
                "congestion",
                "mild fatigue",
            ],
            related_keywords: &["cold", "sniffles", "stuffy nose"],
            causes: "Viral infection (rhinovirus, coronavirus)",
            self_care_steps: &[
                "Rest and stay hydrated with warm fluids",
                "Use saline nasal spray for congestion",
                "Gargle with warm salt water for sore throat",
                "Over-the-counter cold medications as directed",
                "Use a humidifier to ease breathing",
            ],
            typical_duration: "7-10 days",
            escalation_criteria: "If symptoms last more than 10 days, fever exceeds 101°F, or breathing difficulties occur",
            severity: SeverityTier::Mild,
        },
        ConditionRecord {
            id: ConditionId::Influenza,
            display_name: "Influenza (Flu)",
            symptom_keywords: &[
                "high fever",
                "body aches",
                "chills",
                "severe fatigue",
                "headache",
                "dry cough",
            ],
            related_keywords: &["flu", "influenza", "body ache"],
            causes: "Influenza virus",
            self_care_steps: &[
                "Rest and plenty of fluids",
                "Antiviral medication (if prescribed early)",
                "Over-the-counter fever reducers (acetaminophen, ibuprofen)",
                "Stay home to prevent spreading",
                "Annual flu vaccination for prevention",
            ],
            typical_duration: "1-2 weeks",
            escalation_criteria: "High fever, difficulty breathing, chest pain, or symptoms worsening",
            severity: SeverityTier::Moderate,
        },
        ConditionRecord {
            id: ConditionId::Bronchitis,
            display_name: "Acute Bronchitis",
            symptom_keywords: &[
                "persistent cough",
                "mucus production",
                "chest discomfort",
                "mild fever",
                "fatigue",
            ],
            related_keywords: &["bronchitis", "chest cough"],
            causes: "Viral infection (usually), sometimes bacterial",
            self_care_steps: &[
                "Increase fluid intake to thin mucus",
                "Use honey in warm tea to soothe cough",
                "Avoid smoke and irritants",
                "Over-the-counter cough suppressants if needed",
                "Rest to support immune system",
            ],
            typical_duration: "3 weeks typically",
            escalation_criteria: "Fever over 100.4°F, blood in mucus, or symptoms beyond 3 weeks",
            severity: SeverityTier::Moderate,
        },
        // Gastrointestinal
        ConditionRecord {
            id: ConditionId::Gastroenteritis,
            display_name: "Gastroenteritis (Stomach Flu)",
            symptom_keywords: &[
                "diarrhea",
                "nausea",
                "vomiting",
                "abdominal cramps",
                "low-grade fever",
            ],
            related_keywords: &["stomach flu", "food poisoning", "vomiting"],
            causes: "Viral or bacterial infection, food poisoning",
            self_care_steps: &[
                "Oral rehydration solution or clear fluids",
                "BRAT diet (bananas, rice, applesauce, toast)",
                "Avoid dairy, fatty, or spicy foods",
                "Rest the digestive system with small, frequent meals",
                "Wash hands frequently to prevent spread",
            ],
            typical_duration: "1-3 days typically",
            escalation_criteria: "Signs of dehydration, blood in stool, fever over 102°F, or symptoms beyond 3 days",
            severity: SeverityTier::Moderate,
        },
        ConditionRecord {
            id: ConditionId::AcidReflux,
            display_name: "GERD/Acid Reflux",
            symptom_keywords: &[
                "heartburn",
                "regurgitation",
                "chest pain",
                "difficulty swallowing",
                "chronic cough",
            ],
            related_keywords: &["gerd", "heartburn", "indigestion"],
            causes: "Stomach acid flowing back into esophagus",
            self_care_steps: &[
                "Eat smaller, more frequent meals",
                "Avoid trigger foods (spicy, fatty, citrus, chocolate)",
                "Don't lie down for 2-3 hours after eating",
                "Elevate head of bed 6-8 inches",
                "Over-the-counter antacids as needed",
            ],
            typical_duration: "Chronic condition",
            escalation_criteria: "Frequent symptoms, weight loss, severe pain, or difficulty swallowing",
            severity: SeverityTier::MildModerate,
        },
        // Neurological
        ConditionRecord {
            id: ConditionId::Migraine,
            display_name: "Migraine Headache",
            symptom_keywords: &[
                "severe headache",
                "sensitivity to light/sound",
                "nausea",
                "aura",
                "throbbing pain",
            ],
            related_keywords: &["migraine", "aura", "sensitivity light", "throbbing"],
            causes: "Neurological condition with various triggers",
            self_care_steps: &[
                "Rest in dark, quiet room",
                "Cold compress on forehead or neck",
                "Stay hydrated",
                "Prescription migraine medications if diagnosed",
                "Identify and avoid triggers (stress, certain foods, lack of sleep)",
            ],
            typical_duration: "4-72 hours",
            escalation_criteria: "First migraine, change in pattern, or severe symptoms",
            severity: SeverityTier::ModerateSevere,
        },
        ConditionRecord {
            id: ConditionId::TensionHeadache,
            display_name: "Tension Headache",
            symptom_keywords: &[
                "band-like pressure around head",
                "tight neck muscles",
                "mild to moderate pain",
            ],
            related_keywords: &["tension headache", "stress headache", "pressure head"],
            causes: "Muscle tension, stress, poor posture",
            self_care_steps: &[
                "Gentle neck and shoulder stretches",
                "Stress reduction techniques",
                "Over-the-counter pain relievers (ibuprofen, acetaminophen)",
                "Apply heat to tense muscles",
                "Improve posture and take regular breaks",
            ],
            typical_duration: "30 minutes to several hours",
            escalation_criteria: "Frequent headaches, not relieved by OTC medications",
            severity: SeverityTier::MildModerate,
        },
        // Musculoskeletal
        ConditionRecord {
            id: ConditionId::BackPain,
            display_name: "Non-Specific Back Pain",
            symptom_keywords: &[
                "lower back pain",
                "muscle stiffness",
                "limited mobility",
                "muscle spasms",
            ],
            related_keywords: &["backache", "lower back", "spinal"],
            causes: "Muscle strain, poor posture, injury",
            self_care_steps: &[
                "Gentle stretching and walking",
                "Apply ice first 48 hours, then heat",
                "Over-the-counter anti-inflammatories",
                "Improve posture and ergonomics",
                "Avoid heavy lifting and sudden movements",
            ],
            typical_duration: "Few days to weeks",
            escalation_criteria: "Severe pain, leg weakness, numbness, or bowel/bladder changes",
            severity: SeverityTier::MildModerate,
        },
        ConditionRecord {
            id: ConditionId::Arthritis,
            display_name: "Osteoarthritis",
            symptom_keywords: &["joint pain", "stiffness", "swelling", "reduced range of motion"],
            related_keywords: &["joint pain", "arthritic"],
            causes: "Joint wear and tear",
            self_care_steps: &[
                "Low-impact exercise (swimming, cycling)",
                "Weight management to reduce joint stress",
                "Heat therapy for stiffness",
                "Over-the-counter pain relievers",
                "Assistive devices if needed",
            ],
            typical_duration: "Chronic condition",
            escalation_criteria: "Severe pain, joint deformity, or significant mobility loss",
            severity: SeverityTier::Moderate,
        },
        // Skin
        ConditionRecord {
            id: ConditionId::Eczema,
            display_name: "Atopic Dermatitis (Eczema)",
            symptom_keywords: &[
                "itchy skin",
                "red patches",
                "dry skin",
                "scaling",
                "inflammation",
            ],
            related_keywords: &["dermatitis", "skin rash", "itchy skin"],
            causes: "Genetic, environmental triggers, immune system",
            self_care_steps: &[
                "Moisturize regularly with fragrance-free creams",
                "Use mild, fragrance-free soaps",
                "Avoid known triggers (certain fabrics, soaps, foods)",
                "Cool compresses for itching",
                "Prescription creams for flare-ups",
            ],
            typical_duration: "Chronic with flare-ups",
            escalation_criteria: "Infected skin, severe symptoms, or not controlled with OTC treatments",
            severity: SeverityTier::MildModerate,
        },
        ConditionRecord {
            id: ConditionId::Acne,
            display_name: "Acne Vulgaris",
            symptom_keywords: &[
                "pimples",
                "blackheads",
                "whiteheads",
                "oiliness",
                "inflammation",
            ],
            related_keywords: &["pimples", "blackheads", "breakout"],
            causes: "Hormonal changes, bacteria, excess oil",
            self_care_steps: &[
                "Gentle cleansing twice daily",
                "Oil-free, non-comedogenic products",
                "Don't pick or squeeze lesions",
                "Over-the-counter benzoyl peroxide or salicylic acid",
                "Healthy diet and stress management",
            ],
            typical_duration: "Variable, often teenage years",
            escalation_criteria: "Severe acne, scarring, or not responding to OTC treatments",
            severity: SeverityTier::MildModerate,
        },
        // Metabolic and chronic
        ConditionRecord {
            id: ConditionId::Hypertension,
            display_name: "High Blood Pressure",
            symptom_keywords: &[
                "often none",
                "headaches",
                "shortness of breath",
                "nosebleeds (rare)",
            ],
            related_keywords: &["high blood pressure", "hypertension", "bp high"],
            causes: "Various factors including diet, genetics, lifestyle",
            self_care_steps: &[
                "Reduce sodium intake",
                "Regular aerobic exercise",
                "Maintain healthy weight",
                "Limit alcohol and caffeine",
                "Monitor blood pressure regularly",
            ],
            typical_duration: "Chronic condition",
            escalation_criteria: "New diagnosis, uncontrolled readings, or medication side effects",
            severity: SeverityTier::ModerateSevere,
        },
        ConditionRecord {
            id: ConditionId::Diabetes,
            display_name: "Type 2 Diabetes",
            symptom_keywords: &[
                "increased thirst",
                "frequent urination",
                "fatigue",
                "blurred vision",
                "slow healing",
            ],
            related_keywords: &["high sugar", "diabetic", "blood glucose"],
            causes: "Insulin resistance, genetic, lifestyle factors",
            self_care_steps: &[
                "Regular blood sugar monitoring",
                "Balanced diet with controlled carbohydrates",
                "Regular physical activity",
                "Medication adherence if prescribed",
                "Foot care and regular check-ups",
            ],
            typical_duration: "Chronic condition",
            escalation_criteria: "Abnormal blood sugar readings, new symptoms, or medication adjustments needed",
            severity: SeverityTier::ModerateSevere,
        },
        // Allergies
        ConditionRecord {
            id: ConditionId::AllergicRhinitis,
            display_name: "Hay Fever (Allergic Rhinitis)",
            symptom_keywords: &[
                "sneezing",
                "runny nose",
                "itchy eyes",
                "congestion",
                "postnasal drip",
            ],
            related_keywords: &["hay fever", "allergies", "seasonal allergies"],
            causes: "Allergens (pollen, dust, pet dander)",
            self_care_steps: &[
                "Avoid known allergens when possible",
                "Over-the-counter antihistamines",
                "Nasal corticosteroid sprays",
                "Saline nasal rinses",
                "Keep windows closed during high pollen seasons",
            ],
            typical_duration: "Seasonal or perennial",
            escalation_criteria: "Symptoms not controlled with OTC medications or affecting quality of life",
            severity: SeverityTier::MildModerate,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_holds_every_condition_once() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), ConditionId::ALL.len());
        for id in ConditionId::ALL {
            let record = catalog.get(id).expect("standard catalog is complete");
            assert_eq!(record.id, id);
        }
    }

    #[test]
    fn standard_catalog_keeps_declaration_order() {
        let ids: Vec<ConditionId> = Catalog::standard().iter().map(|r| r.id).collect();
        assert_eq!(ids, ConditionId::ALL.to_vec());
    }

    #[test]
    fn every_record_has_five_self_care_steps() {
        for record in Catalog::standard().iter() {
            assert_eq!(record.self_care_steps.len(), 5, "{}", record.id);
            assert!(!record.symptom_keywords.is_empty(), "{}", record.id);
        }
    }

    #[test]
    fn rejects_duplicate_ids() {
        let cold = Catalog::standard()
            .get(ConditionId::CommonCold)
            .expect("cold present")
            .clone();
        let err = Catalog::new(vec![cold.clone(), cold]).expect_err("duplicates rejected");
        assert!(matches!(err, IntakeError::DuplicateCondition(ConditionId::CommonCold)));
    }

    #[test]
    fn substitute_catalog_reports_missing_conditions() {
        let cold = Catalog::standard()
            .get(ConditionId::CommonCold)
            .expect("cold present")
            .clone();
        let catalog = Catalog::new(vec![cold]).expect("single record catalog");
        assert!(catalog.contains(ConditionId::CommonCold));
        let err = catalog
            .get(ConditionId::Migraine)
            .expect_err("migraine absent");
        assert!(matches!(err, IntakeError::UnknownCondition(ConditionId::Migraine)));
    }

    #[test]
    fn condition_ids_round_trip_through_tokens() {
        for id in ConditionId::ALL {
            let parsed: ConditionId = id.as_str().parse().expect("own token parses");
            assert_eq!(parsed, id);
            assert_eq!(
                serde_json::to_string(&id).expect("serialize id"),
                format!("\"{}\"", id.as_str())
            );
        }
    }

    #[test]
    fn unknown_token_is_rejected() {
        let err = "dragon_pox".parse::<ConditionId>().expect_err("unknown id");
        assert!(matches!(err, IntakeError::UnknownConditionId(token) if token == "dragon_pox"));
    }

    #[test]
    fn only_serious_tiers_carry_emergency_advice() {
        assert!(SeverityTier::Severe.warrants_emergency_advice());
        assert!(SeverityTier::ModerateSevere.warrants_emergency_advice());
        assert!(!SeverityTier::Moderate.warrants_emergency_advice());
        assert!(!SeverityTier::MildModerate.warrants_emergency_advice());
        assert!(!SeverityTier::Mild.warrants_emergency_advice());
    }
}
