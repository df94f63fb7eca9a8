use serde::Serialize;
use std::collections::BTreeMap;

use super::SignupRecord;
use crate::forecast::SignupChannel;

const LOW_RISK_MAX_BGC_DAYS: u32 = 3;
const MEDIUM_RISK_MAX_BGC_DAYS: u32 = 7;

/// Headline aggregates shown on the dataset overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub total_signups: usize,
    pub active_drivers: usize,
    pub conversion_rate: f64,
    pub channels: Vec<ChannelConversion>,
    /// Median `days_to_vehicle` across drivers who started driving.
    pub median_days_to_vehicle: Option<f64>,
    /// City with the most conversions; ties go to the city whose first conversion comes earliest.
    pub top_city: Option<TopCity>,
    pub referral_conversions: usize,
    pub risk: RiskDistribution,
    pub monthly_completions: Vec<MonthlyCompletions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelConversion {
    pub channel: SignupChannel,
    pub signups: usize,
    pub conversions: usize,
    pub conversion_rate: f64,
    /// Channel rate minus the overall rate, in percentage points.
    pub lift: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCity {
    pub city: String,
    pub conversions: usize,
}

/// Share of signups per background-check delay band, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RiskDistribution {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCompletions {
    /// `YYYY-MM`
    pub month: String,
    pub completions: usize,
}

impl DatasetOverview {
    pub fn from_records(records: &[SignupRecord]) -> Self {
        let total_signups = records.len();
        let active_drivers = records.iter().filter(|r| r.started_driving).count();
        let conversion_rate = ratio(active_drivers, total_signups);

        Self {
            total_signups,
            active_drivers,
            conversion_rate,
            channels: channel_conversions(records, conversion_rate),
            median_days_to_vehicle: median_days_to_vehicle(records),
            top_city: top_city(records),
            referral_conversions: records
                .iter()
                .filter(|r| r.started_driving && r.signup_channel == SignupChannel::Referral)
                .count(),
            risk: risk_distribution(records),
            monthly_completions: monthly_completions(records),
        }
    }

    pub fn channel(&self, channel: SignupChannel) -> Option<&ChannelConversion> {
        self.channels.iter().find(|entry| entry.channel == channel)
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

fn channel_conversions(records: &[SignupRecord], overall_rate: f64) -> Vec<ChannelConversion> {
    SignupChannel::ordered()
        .into_iter()
        .filter_map(|channel| {
            let (signups, conversions) = records
                .iter()
                .filter(|r| r.signup_channel == channel)
                .fold((0, 0), |(signups, conversions), r| {
                    (signups + 1, conversions + usize::from(r.started_driving))
                });
            if signups == 0 {
                return None;
            }

            let conversion_rate = ratio(conversions, signups);
            Some(ChannelConversion {
                channel,
                signups,
                conversions,
                conversion_rate,
                lift: (conversion_rate - overall_rate) * 100.0,
            })
        })
        .collect()
}

fn median_days_to_vehicle(records: &[SignupRecord]) -> Option<f64> {
    let mut days: Vec<u32> = records
        .iter()
        .filter(|r| r.started_driving)
        .map(|r| r.days_to_vehicle)
        .collect();
    if days.is_empty() {
        return None;
    }
    days.sort_unstable();

    let mid = days.len() / 2;
    let median = if days.len() % 2 == 0 {
        (f64::from(days[mid - 1]) + f64::from(days[mid])) / 2.0
    } else {
        f64::from(days[mid])
    };
    Some(median)
}

fn top_city(records: &[SignupRecord]) -> Option<TopCity> {
    // Cities in the order their first conversion appears.
    let mut by_city: Vec<(&str, usize)> = Vec::new();
    for record in records.iter().filter(|r| r.started_driving) {
        match by_city
            .iter_mut()
            .find(|(city, _)| *city == record.city_name.as_str())
        {
            Some((_, conversions)) => *conversions += 1,
            None => by_city.push((record.city_name.as_str(), 1)),
        }
    }

    // Strict comparison: on ties the city that converted first wins.
    let mut best: Option<(&str, usize)> = None;
    for (city, conversions) in by_city {
        if best.map_or(true, |(_, top)| conversions > top) {
            best = Some((city, conversions));
        }
    }

    best.map(|(city, conversions)| TopCity {
        city: city.to_string(),
        conversions,
    })
}

fn risk_distribution(records: &[SignupRecord]) -> RiskDistribution {
    let total = records.len();
    let mut low = 0;
    let mut medium = 0;
    let mut high = 0;
    for record in records {
        match record.days_to_bgc {
            days if days <= LOW_RISK_MAX_BGC_DAYS => low += 1,
            days if days <= MEDIUM_RISK_MAX_BGC_DAYS => medium += 1,
            _ => high += 1,
        }
    }

    RiskDistribution {
        low: ratio(low, total) * 100.0,
        medium: ratio(medium, total) * 100.0,
        high: ratio(high, total) * 100.0,
    }
}

fn monthly_completions(records: &[SignupRecord]) -> Vec<MonthlyCompletions> {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for date in records.iter().filter_map(|r| r.first_completed_date) {
        *by_month.entry(date.format("%Y-%m").to_string()).or_default() += 1;
    }

    by_month
        .into_iter()
        .map(|(month, completions)| MonthlyCompletions { month, completions })
        .collect()
}
