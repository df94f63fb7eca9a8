mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use driver_forecast::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
