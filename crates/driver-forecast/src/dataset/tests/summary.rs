use super::common::*;
use crate::dataset::{DatasetOverview, SignupDataset};
use crate::forecast::SignupChannel;

#[test]
fn overview_counts_signups_and_conversions() {
    let overview = fixture().overview();

    assert_eq!(overview.total_signups, 8);
    assert_eq!(overview.active_drivers, 4);
    assert_close(overview.conversion_rate, 0.5);
    assert_eq!(overview.referral_conversions, 2);
}

#[test]
fn channel_lift_is_measured_against_overall_rate() {
    let overview = fixture().overview();

    let channels: Vec<SignupChannel> = overview.channels.iter().map(|c| c.channel).collect();
    assert_eq!(
        channels,
        vec![SignupChannel::Organic, SignupChannel::Referral, SignupChannel::Paid]
    );

    let organic = overview.channel(SignupChannel::Organic).expect("organic present");
    assert_eq!((organic.signups, organic.conversions), (2, 0));
    assert_close(organic.lift, -50.0);

    let referral = overview.channel(SignupChannel::Referral).expect("referral present");
    assert_eq!((referral.signups, referral.conversions), (3, 2));
    assert_close(referral.conversion_rate, 2.0 / 3.0);
    assert_close(referral.lift, (2.0 / 3.0 - 0.5) * 100.0);
}

#[test]
fn median_averages_middle_pair_for_even_counts() {
    // converted days_to_vehicle: 5, 3, 6, 4
    assert_eq!(fixture().overview().median_days_to_vehicle, Some(4.5));
}

#[test]
fn top_city_and_risk_bands() {
    let overview = fixture().overview();

    let top = overview.top_city.expect("someone converted");
    assert_eq!(top.city, "Strark");
    assert_eq!(top.conversions, 2);

    assert_close(overview.risk.low, 37.5);
    assert_close(overview.risk.medium, 37.5);
    assert_close(overview.risk.high, 25.0);
}

#[test]
fn top_city_ties_go_to_the_first_city_to_convert() {
    let csv = "\
id,city_name,signup_os,signup_channel,signup_date,days_to_bgc,days_to_vehicle,vehicle_make,vehicle_model,vehicle_year,first_completed_date,started_driving
1,Berton,ios,Paid,2016-01-01,2,4,,,,,false
2,Wrouver,ios,Paid,2016-01-02,2,5,,,,2016-01-20,true
3,Berton,ios,Paid,2016-01-02,2,7,,,,2016-01-21,true
";
    let overview = SignupDataset::from_reader(csv.as_bytes())
        .expect("csv parses")
        .overview();

    assert_eq!(overview.top_city.map(|top| top.city).as_deref(), Some("Wrouver"));
    assert_eq!(overview.median_days_to_vehicle, Some(6.0));
}

#[test]
fn top_city_prefers_higher_count_over_earlier_conversion() {
    let csv = "\
id,city_name,signup_os,signup_channel,signup_date,days_to_bgc,days_to_vehicle,vehicle_make,vehicle_model,vehicle_year,first_completed_date,started_driving
1,Wrouver,ios,Paid,2016-01-02,2,5,,,,2016-01-20,true
2,Berton,ios,Paid,2016-01-02,2,7,,,,2016-01-21,true
3,Berton,ios,Referral,2016-01-03,1,3,,,,2016-01-22,true
";
    let top = SignupDataset::from_reader(csv.as_bytes())
        .expect("csv parses")
        .overview()
        .top_city
        .expect("someone converted");

    assert_eq!(top.city, "Berton");
    assert_eq!(top.conversions, 2);
}

#[test]
fn monthly_completions_skip_sentinel_and_blank_dates() {
    let months: Vec<(String, usize)> = fixture()
        .overview()
        .monthly_completions
        .into_iter()
        .map(|entry| (entry.month, entry.completions))
        .collect();

    assert_eq!(
        months,
        vec![("2016-01".to_string(), 2), ("2016-02".to_string(), 2)]
    );
}

#[test]
fn empty_dataset_has_zeroed_overview() {
    let overview = DatasetOverview::from_records(&[]);

    assert_eq!(overview.total_signups, 0);
    assert_eq!(overview.conversion_rate, 0.0);
    assert!(overview.channels.is_empty());
    assert_eq!(overview.median_days_to_vehicle, None);
    assert!(overview.top_city.is_none());
    assert_eq!(overview.risk.low, 0.0);
    assert!(overview.monthly_completions.is_empty());
}

#[test]
fn bundled_dataset_loads() {
    let dataset = SignupDataset::bundled().expect("bundled csv parses");
    assert!(!dataset.is_empty());

    let overview = dataset.overview();
    assert_eq!(overview.total_signups, dataset.len());
    assert!(overview.active_drivers <= overview.total_signups);
    let bands = overview.risk.low + overview.risk.medium + overview.risk.high;
    assert_close(bands, 100.0);
}
