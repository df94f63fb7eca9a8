use driver_forecast::forecast::{
    CandidateForm, CandidateIntake, ClusterClassifier, ClusterLabel, ClusterRule,
    ConversionScorer, IntakeError, SignupChannel, CLUSTER_RULES, PROBABILITY_CEILING,
};

fn form(city: &str, channel: &str, bgc: f64, vehicle: f64, year: i32) -> CandidateForm {
    CandidateForm {
        city: city.to_string(),
        signup_channel: channel.to_string(),
        signup_os: "android".to_string(),
        days_to_background_check: bgc,
        days_to_vehicle_added: vehicle,
        vehicle_year: year,
        vehicle_make: Some("Toyota".to_string()),
        vehicle_model: Some("Corolla".to_string()),
    }
}

#[test]
fn form_to_prediction_round_trip() {
    let record = CandidateIntake
        .record_from_form(form("Wrouver", " Referral ", 2.0, 3.0, 2021))
        .expect("form is valid");
    let result = ConversionScorer::new(2025).score(&record);

    assert_eq!(result.cluster, ClusterLabel::VeryHigh);
    assert!((result.probability - 0.77).abs() < 1e-9);
    assert_eq!(result.explanation.first().map(String::as_str), Some("Base cluster rate: 44.0%"));
    assert_eq!(
        result.summary(),
        "Very High cluster, 77.0% conversion probability"
    );
}

#[test]
fn unmatched_candidate_falls_back_to_low() {
    let record = CandidateIntake
        .record_from_form(form("Nowhereville", "Paid", 1000.0, 1000.0, 1990))
        .expect("form is valid");

    assert_eq!(ClusterClassifier::default().classify(&record), ClusterLabel::Low);
}

#[test]
fn catch_all_rule_is_last_and_unbounded() {
    let last: &ClusterRule = CLUSTER_RULES.last().expect("rules present");
    assert_eq!(last.label, ClusterLabel::Low);
    assert_eq!(last.max_background_check_days, None);
    assert_eq!(last.max_vehicle_days, None);
    assert_eq!(last.min_vehicle_year, 0);
    assert!(last.preferred_channels.is_empty());
    assert!(last.preferred_cities.is_empty());
    assert_eq!(ClusterRule::MAX_SCORE, 9);
}

#[test]
fn classification_is_total_over_odd_inputs() {
    let scorer = ConversionScorer::new(2025);
    let cities = ["", "wrouver", "Strark ", "Ünïcödé", "Berton"];

    for channel in SignupChannel::ordered() {
        for city in cities {
            for days in [0.0, 0.9, 3.5, 1e6] {
                let mut raw = form("placeholder", channel.label(), days, days, 1900);
                raw.city = format!("{city}x");
                let record = CandidateIntake.record_from_form(raw).expect("form is valid");
                let result = scorer.score(&record);
                assert!(ClusterLabel::ordered().contains(&result.cluster));
                assert!(result.probability <= PROBABILITY_CEILING);
            }
        }
    }
}

#[test]
fn intake_rejects_what_the_scorer_cannot_use() {
    let intake = CandidateIntake;

    assert_eq!(
        intake.record_from_form(form("", "Paid", 1.0, 1.0, 2020)),
        Err(IntakeError::MissingCity)
    );
    assert!(matches!(
        intake.record_from_form(form("Strark", "TV", 1.0, 1.0, 2020)),
        Err(IntakeError::UnknownChannel(_))
    ));
    assert!(matches!(
        intake.record_from_form(form("Strark", "Paid", f64::INFINITY, 1.0, 2020)),
        Err(IntakeError::InvalidDays {
            field: "days_to_background_check",
            ..
        })
    ));
}
