use crate::forecast::{CandidateRecord, ConversionScorer, SignupChannel};

pub(super) const REFERENCE_YEAR: i32 = 2025;

pub(super) fn scorer() -> ConversionScorer {
    ConversionScorer::new(REFERENCE_YEAR)
}

pub(super) fn candidate(
    city: &str,
    signup_channel: SignupChannel,
    days_to_background_check: u32,
    days_to_vehicle_added: u32,
    vehicle_year: i32,
) -> CandidateRecord {
    CandidateRecord {
        city: city.to_string(),
        signup_channel,
        signup_os: "ios".to_string(),
        days_to_background_check,
        days_to_vehicle_added,
        vehicle_year,
    }
}

/// Fast Wrouver referral with a recent vehicle; scores 9 against both top rules.
pub(super) fn wrouver_referral() -> CandidateRecord {
    candidate("Wrouver", SignupChannel::Referral, 2, 3, 2021)
}

/// Slow, old, paid signup in a city no rule prefers.
pub(super) fn nowhereville_paid() -> CandidateRecord {
    candidate("Nowhereville", SignupChannel::Paid, 1000, 1000, 1990)
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
