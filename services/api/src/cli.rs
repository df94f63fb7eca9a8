use crate::demo::{
    run_dataset_browse, run_dataset_overview, run_demo, run_predict, BrowseArgs, DemoArgs,
    OverviewArgs, PredictArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use driver_forecast::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "driver-forecast",
    about = "Forecast driver signup conversion and explore the historical signup data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single candidate and print the explanation
    Predict(PredictArgs),
    /// Inspect the historical signup dataset
    Dataset {
        #[command(subcommand)]
        command: DatasetCommand,
    },
    /// Walk through clusters, dataset headlines and a few sample forecasts
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum DatasetCommand {
    /// Print headline aggregates (conversion, channels, risk bands)
    Overview(OverviewArgs),
    /// Search, sort and list signup records
    Browse(BrowseArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Dataset {
            command: DatasetCommand::Overview(args),
        } => run_dataset_overview(args),
        Command::Dataset {
            command: DatasetCommand::Browse(args),
        } => run_dataset_browse(args),
        Command::Demo(args) => run_demo(args),
    }
}
