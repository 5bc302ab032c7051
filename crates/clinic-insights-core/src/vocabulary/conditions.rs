//! Condition vocabulary.

/// A canonical condition and the phrases that count as a mention of it.
///
/// Phrases are lower-case and matched on word boundaries. Order matters:
/// the detector tries them in registration order.
#[derive(Debug, Clone, Copy)]
pub struct SynonymEntry {
    pub condition: &'static str,
    pub synonyms: &'static [&'static str],
}

/// Conditions tracked by the analytics dashboard, in registration order.
pub static CONDITION_SYNONYMS: &[SynonymEntry] = &[
    SynonymEntry {
        condition: "Fever",
        synonyms: &["fever", "pyrexia", "high temperature", "temp", "viral fever"],
    },
    SynonymEntry {
        condition: "Cough",
        synonyms: &["cough", "coughing", "dry cough", "wet cough", "productive cough"],
    },
    SynonymEntry {
        condition: "Cold",
        synonyms: &["cold", "common cold", "running nose", "nasal congestion"],
    },
    SynonymEntry {
        condition: "Headache",
        synonyms: &["headache", "head ache", "head pain", "cephalalgia"],
    },
    SynonymEntry {
        condition: "Hypertension",
        synonyms: &["hypertension", "high bp", "high blood pressure", "hbp", "bp high"],
    },
    SynonymEntry {
        condition: "Diabetes",
        synonyms: &["diabetes", "sugar", "high sugar", "blood sugar", "dm", "diabetic"],
    },
    SynonymEntry {
        condition: "Stomach Pain",
        synonyms: &["stomach pain", "stomach ache", "abdominal pain", "belly pain", "tummy pain"],
    },
    SynonymEntry {
        condition: "Throat Infection",
        synonyms: &["throat infection", "sore throat", "throat pain", "pharyngitis"],
    },
    SynonymEntry {
        condition: "Chest Pain",
        synonyms: &["chest pain", "chest discomfort", "angina"],
    },
    SynonymEntry {
        condition: "Back Pain",
        synonyms: &["back pain", "backache", "lower back pain", "upper back pain"],
    },
];

/// Conditions offered by diagnosis autocomplete.
pub static COMMON_CONDITIONS: &[&str] = &[
    "Fever",
    "Cough",
    "Cold",
    "Flu",
    "Headache",
    "Migraine",
    "Diabetes",
    "Hypertension",
    "High Blood Pressure",
    "Asthma",
    "Allergy",
    "Chest Pain",
    "Back Pain",
    "Stomach Pain",
    "Abdominal Pain",
    "Throat Infection",
    "Sore Throat",
    "Diarrhea",
    "Vomiting",
    "Nausea",
    "Weakness",
    "Fatigue",
    "Dizziness",
    "Infection",
    "Viral Fever",
    "Bacterial Infection",
    "Skin Rash",
    "Joint Pain",
    "Arthritis",
    "Acidity",
    "Gastritis",
    "Constipation",
    "Anxiety",
    "Depression",
    "Insomnia",
    "Dengue",
    "Malaria",
    "Typhoid",
    "COVID-19",
    "Pneumonia",
    "Bronchitis",
];
