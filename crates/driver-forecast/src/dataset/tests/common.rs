use crate::dataset::SignupDataset;

/// Eight signups across three cities; four of them started driving.
pub(super) const FIXTURE_CSV: &str = "\
id,city_name,signup_os,signup_channel,signup_date,days_to_bgc,days_to_vehicle,vehicle_make,vehicle_model,vehicle_year,first_completed_date,started_driving
1,Strark,ios,Paid,2016-01-02,2,5,Toyota,Prius,2014,2016-01-20,true
2,Wrouver,android,Referral,2016-01-03,1,3,Honda,Civic,2015,2016-01-25,true
3,Berton,,Organic,2016-01-05,9,20,,,,1900-01-01,false
4,Strark,Mac,Referral,2016-01-08,5,6,Toyota,Camry,2012,2016-02-03,true
5,Strark,Windows,Organic,2016-01-10,4,12,Ford,Focus,2010,,false
6,Berton,ios,Paid,2016-01-12,3,4,Honda,Accord,2016,2016-02-10,true
7,Wrouver,android,Paid,2016-01-15,12,30,Toyota,Corolla,2008,,false
8,Strark,ios,Referral,2016-01-20,7,9,Ford,Fusion,2013,1900-01-01,false
";

pub(super) fn fixture() -> SignupDataset {
    SignupDataset::from_reader(FIXTURE_CSV.as_bytes()).expect("fixture parses")
}

pub(super) fn ids(records: &[crate::dataset::SignupRecord]) -> Vec<u32> {
    records.iter().map(|record| record.id).collect()
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
