mod cli;
mod infra;
mod routes;
mod screening;
mod server;

use internlink::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
