use crate::models::{ReasonProfile, UrgencyLevel};

/// Reason table, highest acuity first. The classifier takes the first profile
/// with any keyword contained in the reason, so a more serious profile must
/// stay above a milder one that shares vocabulary.
pub static REASON_PROFILES: &[ReasonProfile] = &[
    ReasonProfile {
        id: "cardiac",
        category: "Cardiac Evaluation",
        urgency_level: UrgencyLevel::Critical,
        priority_score: 5,
        keywords: &[
            "chest pain",
            "chest tightness",
            "shortness of breath",
            "heart attack",
            "palpitation",
            "irregular heartbeat",
        ],
        recommended_specialties: &["Cardiology", "Emergency Medicine"],
        message: "Possible cardiac symptoms. If pain is severe or spreading, seek emergency care immediately.",
    },
    ReasonProfile {
        id: "neurological",
        category: "Neurological Emergency",
        urgency_level: UrgencyLevel::Critical,
        priority_score: 5,
        keywords: &[
            "stroke",
            "seizure",
            "unconscious",
            "fainted",
            "numbness",
            "slurred speech",
            "paralysis",
        ],
        recommended_specialties: &["Neurology", "Emergency Medicine"],
        message: "Neurological warning signs need urgent attention. Call emergency services if symptoms are sudden.",
    },
    ReasonProfile {
        id: "respiratory",
        category: "Respiratory Distress",
        urgency_level: UrgencyLevel::High,
        priority_score: 4,
        keywords: &[
            "difficulty breathing",
            "breathing problem",
            "wheezing",
            "asthma",
            "persistent cough",
            "coughing blood",
        ],
        recommended_specialties: &["Pulmonology", "General Medicine"],
        message: "Breathing difficulties are prioritised. Keep any inhalers or current medication at hand.",
    },
    ReasonProfile {
        id: "injury",
        category: "Injury & Trauma",
        urgency_level: UrgencyLevel::High,
        priority_score: 4,
        keywords: &[
            "fracture",
            "broken bone",
            "heavy bleeding",
            "deep cut",
            "head injury",
            "accident",
            "severe burn",
            "dislocat",
        ],
        recommended_specialties: &["Orthopedics", "Emergency Medicine"],
        message: "Injuries are prioritised. Keep the affected area still and bring any imaging you already have.",
    },
    ReasonProfile {
        id: "mental_health",
        category: "Mental Health Support",
        urgency_level: UrgencyLevel::High,
        priority_score: 4,
        keywords: &[
            "suicid",
            "self harm",
            "self-harm",
            "panic attack",
            "depression",
            "depressed",
            "anxiety",
            "mental health",
        ],
        recommended_specialties: &["Psychiatry", "Psychology"],
        message: "You will be matched with a mental health professional. If you are in immediate danger, contact a crisis line.",
    },
    ReasonProfile {
        id: "fever_infection",
        category: "Fever & Infection",
        urgency_level: UrgencyLevel::Medium,
        priority_score: 3,
        keywords: &[
            "fever",
            "infection",
            "flu",
            "cold",
            "sore throat",
            "cough",
            "chills",
        ],
        recommended_specialties: &["General Medicine", "Internal Medicine"],
        message: "Note your temperature readings and how long symptoms have lasted.",
    },
    ReasonProfile {
        id: "digestive",
        category: "Digestive Health",
        urgency_level: UrgencyLevel::Medium,
        priority_score: 3,
        keywords: &[
            "stomach",
            "abdominal",
            "nausea",
            "vomit",
            "diarrhea",
            "diarrhoea",
            "constipation",
            "acidity",
        ],
        recommended_specialties: &["Gastroenterology", "General Medicine"],
        message: "Keep a note of meals and symptom timing before the visit.",
    },
    ReasonProfile {
        id: "musculoskeletal",
        category: "Musculoskeletal Assessment",
        urgency_level: UrgencyLevel::Medium,
        priority_score: 3,
        keywords: &[
            "back pain",
            "joint pain",
            "knee",
            "shoulder",
            "neck pain",
            "sprain",
            "arthritis",
        ],
        recommended_specialties: &["Orthopedics", "Physiotherapy"],
        message: "Wear comfortable clothing so the affected joint can be examined.",
    },
    ReasonProfile {
        id: "womens_health",
        category: "Women's Health",
        urgency_level: UrgencyLevel::Medium,
        priority_score: 3,
        keywords: &[
            "pregnan",
            "period",
            "menstrua",
            "pcos",
            "pelvic",
            "gynec",
            "gynaec",
        ],
        recommended_specialties: &["Gynecology", "Obstetrics"],
        message: "Bring dates of your last cycle and any previous reports.",
    },
    ReasonProfile {
        id: "dermatology",
        category: "Dermatology Review",
        urgency_level: UrgencyLevel::Routine,
        priority_score: 2,
        keywords: &["rash", "acne", "itching", "itchy", "skin", "eczema", "hair loss"],
        recommended_specialties: &["Dermatology"],
        message: "Photos of how the condition has changed over time help the review.",
    },
    ReasonProfile {
        id: "prescription",
        category: "Prescription & Follow-up",
        urgency_level: UrgencyLevel::Routine,
        priority_score: 2,
        keywords: &[
            "prescription",
            "refill",
            "follow up",
            "follow-up",
            "followup",
            "test results",
            "lab report",
        ],
        recommended_specialties: &["General Medicine"],
        message: "Have your current prescriptions and latest reports ready.",
    },
    ReasonProfile {
        id: "preventive",
        category: "Preventive Checkup",
        urgency_level: UrgencyLevel::Routine,
        priority_score: 1,
        keywords: &[
            "checkup",
            "check-up",
            "check up",
            "annual physical",
            "routine exam",
            "vaccination",
            "vaccine",
            "screening",
        ],
        recommended_specialties: &["General Medicine", "Family Medicine"],
        message: "Fasting for 8-10 hours beforehand may be needed if blood tests are planned.",
    },
];
