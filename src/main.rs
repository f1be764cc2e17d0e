use anyhow::{Context, Result};
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quakequery::cli::{Cli, Command};
use quakequery::config::ConfigManager;
use quakequery::output::Output;
use quakequery::QuakeQuery;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.verbosity().log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigManager::load_config(&cli).context("Failed to load configuration")?;

    let mut client =
        QuakeQuery::with_http_config(&config.endpoint.base_url, config.http_client_config())
            .context("Failed to discover service parameters")?;
    info!(parameters = client.params().len(), "client ready");

    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Query {
            start,
            end,
            updated_after,
            format,
        } => {
            if let Some(format) = format {
                client.set_format(format.as_str())?;
            }
            client.occur_between(start, end)?;
            if let Some(updated_after) = updated_after {
                client.updated_after(updated_after)?;
            }

            let response = client.execute().context("Request failed")?;
            let body = response.text().context("Failed to read response body")?;
            writeln!(stdout, "{}", body)?;
        }
        Command::Params { output } => {
            write!(stdout, "{}", Output::new(output).format_params(client.registry()))?;
        }
        Command::Describe { name, output } => {
            let definition = client.describe(&name)?;
            write!(stdout, "{}", Output::new(output).format_definition(definition))?;
        }
    }

    Ok(())
}
