use anyhow::Context;
use clap::Parser;

use users_api_client::cli::{
    Cli, build_service, execute_command, init_logger_from_settings, load_and_merge_config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_and_merge_config(&cli).context("Failed to load configuration")?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(
        version = users_api_client::pkg_version(),
        base_url = %settings.client.base_url,
        "starting users-api"
    );

    let service = build_service(&settings).context("Failed to build HTTP client")?;

    let output = match execute_command(&cli, service).await {
        Ok(output) => output,
        Err(err) => {
            if let Some(api_error) = err.as_api_error() {
                tracing::error!(
                    code = api_error.code(),
                    context = %serde_json::Value::Object(api_error.context().clone()),
                    "{}",
                    api_error.message()
                );
            }
            return Err(anyhow::Error::new(err));
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
