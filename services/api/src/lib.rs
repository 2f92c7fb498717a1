mod cli;
mod infra;
mod report;
mod routes;
mod server;

use pavement_condition::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
