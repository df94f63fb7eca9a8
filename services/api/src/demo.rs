use crate::infra::{load_service, percent, print_json};
use clap::Args;
use driver_forecast::dataset::{
    DatasetOverview, ExplorePage, ExploreQuery, SortDirection, SortField, DEFAULT_PAGE_SIZE,
};
use driver_forecast::error::AppError;
use driver_forecast::forecast::{CandidateForm, PredictionResult};
use driver_forecast::service::ClusterCatalog;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// City the driver signed up in
    #[arg(long)]
    pub(crate) city: String,
    /// Signup channel: Organic, Referral or Paid
    #[arg(long)]
    pub(crate) channel: String,
    /// Signup OS (defaults to Other)
    #[arg(long, default_value = "")]
    pub(crate) os: String,
    /// Days from signup to background check consent
    #[arg(long)]
    pub(crate) days_to_bgc: f64,
    /// Days from signup to vehicle added
    #[arg(long)]
    pub(crate) days_to_vehicle: f64,
    #[arg(long)]
    pub(crate) vehicle_year: i32,
    #[arg(long)]
    pub(crate) make: Option<String>,
    #[arg(long)]
    pub(crate) model: Option<String>,
    /// Year the "recent vehicle" adjustment is measured from (defaults to this year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
    /// Print the prediction as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OverviewArgs {
    /// Signup CSV export to use instead of the bundled dataset
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BrowseArgs {
    /// Signup CSV export to use instead of the bundled dataset
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Case-insensitive text matched against every column except the id
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Column to sort by, e.g. city_name, days_to_bgc, vehicle_year
    #[arg(long, default_value_t = SortField::CityName)]
    pub(crate) sort: SortField,
    /// Sort descending
    #[arg(long)]
    pub(crate) desc: bool,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) limit: usize,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Year the "recent vehicle" adjustment is measured from (defaults to this year)
    #[arg(long)]
    pub(crate) reference_year: Option<i32>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let service = load_service(None, args.reference_year)?;
    let form = CandidateForm {
        city: args.city,
        signup_channel: args.channel,
        signup_os: args.os,
        days_to_background_check: args.days_to_bgc,
        days_to_vehicle_added: args.days_to_vehicle,
        vehicle_year: args.vehicle_year,
        vehicle_make: args.make,
        vehicle_model: args.model,
    };

    let result = service.predict(form)?;
    if args.json {
        return print_json(&result);
    }

    render_prediction(&result);
    Ok(())
}

pub(crate) fn run_dataset_overview(args: OverviewArgs) -> Result<(), AppError> {
    let service = load_service(args.csv, None)?;
    let overview = service.overview();
    if args.json {
        return print_json(&overview);
    }

    render_overview(&overview);
    Ok(())
}

pub(crate) fn run_dataset_browse(args: BrowseArgs) -> Result<(), AppError> {
    let service = load_service(args.csv, None)?;
    let query = ExploreQuery {
        search: args.search,
        sort: args.sort,
        direction: if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        },
        limit: args.limit,
    };

    let page = service.explore(&query);
    if args.json {
        return print_json(&page);
    }

    render_page(&page, &query);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = load_service(None, args.reference_year)?;

    println!("Driver conversion forecast demo");
    println!(
        "Reference year {} | {} historical signups loaded",
        service.scorer().reference_year(),
        service.dataset().len()
    );

    render_catalog(&service.clusters());
    render_overview(&service.overview());

    println!("\nSample forecasts");
    for form in sample_candidates(service.scorer().reference_year()) {
        let heading = format!(
            "{} / {} / bgc {} days / vehicle {} days / {}",
            form.city,
            form.signup_channel,
            form.days_to_background_check,
            form.days_to_vehicle_added,
            form.vehicle_year
        );
        let result = service.predict(form)?;
        println!("\n{heading}");
        render_prediction(&result);
    }

    let options = service.options(None);
    println!(
        "\nForm options: {} cities, {} signup OS values, {} vehicle makes",
        options.cities.len(),
        options.signup_os.len(),
        options.vehicle_makes.len()
    );

    let query = ExploreQuery {
        search: Some("Referral".to_string()),
        sort: SortField::DaysToBgc,
        direction: SortDirection::Asc,
        limit: 5,
    };
    render_page(&service.explore(&query), &query);

    Ok(())
}

fn sample_candidates(reference_year: i32) -> Vec<CandidateForm> {
    let candidate = |city: &str, channel: &str, os: &str, bgc: f64, vehicle: f64, year: i32| {
        CandidateForm {
            city: city.to_string(),
            signup_channel: channel.to_string(),
            signup_os: os.to_string(),
            days_to_background_check: bgc,
            days_to_vehicle_added: vehicle,
            vehicle_year: year,
            vehicle_make: None,
            vehicle_model: None,
        }
    };

    vec![
        candidate("Wrouver", "Referral", "ios", 2.0, 3.0, reference_year - 4),
        candidate("Berton", "Organic", "Mac", 4.0, 6.0, reference_year - 7),
        candidate("Strark", "Paid", "android", 9.0, 21.0, reference_year - 15),
    ]
}

fn render_prediction(result: &PredictionResult) {
    println!(
        "Cluster: {} | conversion probability {}",
        result.cluster_label,
        percent(result.probability)
    );
    println!(
        "Base rate {} + adjustments {}",
        percent(result.base_rate),
        percent(result.total_adjustment)
    );
    for line in &result.explanation {
        println!("- {line}");
    }
}

fn render_catalog(catalog: &ClusterCatalog) {
    println!("\nClusters (evaluation order)");
    for entry in &catalog.clusters {
        println!(
            "- {} ({}): base rate {} | bgc <= {} | vehicle <= {} | year >= {}",
            entry.profile.cluster_label,
            entry.profile.display_name,
            percent(entry.base_rate),
            bound(entry.rule.max_background_check_days),
            bound(entry.rule.max_vehicle_days),
            entry.rule.min_vehicle_year
        );
        for item in entry.profile.traits {
            println!("    * {item}");
        }
    }

    println!("\nFeature importance");
    for feature in &catalog.feature_importance {
        println!(
            "- {}: {:.3} ({:.0}% of strongest)",
            feature.feature, feature.importance, feature.relative_pct
        );
    }
}

fn bound(days: Option<u32>) -> String {
    days.map_or_else(|| "any".to_string(), |days| days.to_string())
}

fn render_overview(overview: &DatasetOverview) {
    println!("\nDataset overview");
    println!(
        "- {} signups | {} active drivers | {} conversion",
        overview.total_signups,
        overview.active_drivers,
        percent(overview.conversion_rate)
    );
    match overview.median_days_to_vehicle {
        Some(days) => println!("- Median days to vehicle for converted drivers: {days:.1}"),
        None => println!("- Median days to vehicle: no conversions"),
    }
    if let Some(top) = &overview.top_city {
        println!("- Top city: {} ({} conversions)", top.city, top.conversions);
    }
    println!("- Referral conversions: {}", overview.referral_conversions);

    println!("Channel conversion");
    for channel in &overview.channels {
        println!(
            "  - {}: {}/{} converted ({}) | lift {:+.1} pts",
            channel.channel,
            channel.conversions,
            channel.signups,
            percent(channel.conversion_rate),
            channel.lift
        );
    }

    println!(
        "Background check risk: low {:.1}% | medium {:.1}% | high {:.1}%",
        overview.risk.low, overview.risk.medium, overview.risk.high
    );

    if !overview.monthly_completions.is_empty() {
        println!("First completed trips by month");
        for month in &overview.monthly_completions {
            println!("  - {}: {}", month.month, month.completions);
        }
    }
}

fn render_page(page: &ExplorePage, query: &ExploreQuery) {
    println!(
        "\nSignup records sorted by {} ({:?}), showing {} of {}",
        query.sort,
        query.direction,
        page.records.len(),
        page.total_matches
    );
    for record in &page.records {
        println!(
            "- #{} {} | {} | {} | bgc {} | vehicle {} | {} {} | {} | {}",
            record.id,
            record.city_name,
            record.signup_os,
            record.signup_channel,
            record.days_to_bgc,
            record.days_to_vehicle,
            record.vehicle_make.as_deref().unwrap_or("-"),
            record.vehicle_model.as_deref().unwrap_or("-"),
            record
                .vehicle_year
                .map_or_else(|| "-".to_string(), |year| year.to_string()),
            if record.started_driving {
                "driving"
            } else {
                "not driving"
            }
        );
    }
    if page.has_more {
        println!(
            "... {} more; rerun with --limit {}",
            page.total_matches - page.records.len(),
            query.load_more().limit
        );
    }
}
