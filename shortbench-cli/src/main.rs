use anyhow::{Context, Result};
use clap::Parser;
use shortbench_config::domains::logging::LogFormat;
use shortbench_config::{BenchConfig, ConfigLoader};
use shortbench_dataset::{generate_dataset, load_dataset};
use shortbench_http::{ClientConfig, ShortenerClient};
use shortbench_workload::WorkloadRunner;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

mod cli;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("Failed to load configuration")?;

    init_tracing(cli.log_level.as_ref(), &config);

    match cli.command {
        Commands::Generate {
            count,
            concurrency,
            urls_file,
            aliases_file,
        } => {
            let mut config = config;
            if let Some(count) = count {
                config.dataset.count = count;
            }
            if let Some(concurrency) = concurrency {
                config.dataset.concurrency = concurrency;
            }
            if let Some(urls_file) = urls_file {
                config.dataset.urls_file = urls_file;
            }
            if let Some(aliases_file) = aliases_file {
                config.dataset.aliases_file = aliases_file;
            }
            config
                .validate_all()
                .context("Invalid configuration")?;

            let client = target_client(&config)?;
            let summary = generate_dataset(&config.dataset, client)
                .await
                .context("Dataset generation failed")?;

            println!(
                "Generated {} links in {:.1}s ({} and {})",
                summary.count,
                summary.elapsed.as_secs_f64(),
                config.dataset.urls_file.display(),
                config.dataset.aliases_file.display(),
            );
        }

        Commands::Run { users, duration } => {
            let mut config = config;
            if let Some(users) = users {
                config.workload.users = users;
            }
            if let Some(duration) = duration {
                config.workload.duration = Duration::from_secs(duration);
            }
            config
                .validate_all()
                .context("Invalid configuration")?;

            let dataset = load_dataset(&config.dataset.urls_file, &config.dataset.aliases_file)
                .context("Failed to load dataset files; run `shortbench generate` first")?;

            let base_url = Url::parse(&config.target.base_url)
                .context("Invalid target base URL")?;
            let runner = WorkloadRunner::new(
                config.workload,
                ClientConfig::from(config.http),
                base_url,
                dataset,
            );
            let summary = runner.run().await.context("Replay failed")?;

            println!(
                "Replayed {} requests in {:.1}s ({:.1} req/s, {} failures)",
                summary.total_requests,
                summary.elapsed.as_secs_f64(),
                summary.requests_per_second,
                summary.total_failures,
            );
        }

        Commands::CheckConfig => {
            config
                .validate_all()
                .context("Invalid configuration")?;

            // Effective configuration as YAML, reusable as a config file
            print!("{}", render_config(&config)?);
        }
    }

    Ok(())
}

/// Render the effective configuration, every domain included, as YAML
fn render_config(config: &BenchConfig) -> Result<String> {
    serde_yaml::to_string(config).context("Failed to render configuration")
}

/// Build a client for the configured target service
fn target_client(config: &BenchConfig) -> Result<ShortenerClient> {
    let client_config = ClientConfig::from(config.http.clone());
    ShortenerClient::from_str(&config.target.base_url, &client_config)
        .context("Failed to build HTTP client for target")
}

/// Initialize tracing, preferring the CLI flag over the configured level
fn init_tracing(log_level: Option<&String>, config: &BenchConfig) {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to 'info'", level);
            EnvFilter::new("info")
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_filter_str())),
    };

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    match config.logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
    debug!("Tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_config_covers_every_domain_and_round_trips() {
        let config = BenchConfig::default();
        let yaml = render_config(&config).unwrap();

        for domain in ["target", "http", "dataset", "workload", "logging"] {
            assert!(yaml.contains(domain), "missing domain {domain}:\n{yaml}");
        }
        assert!(yaml.contains("think_time_min"));
        assert!(yaml.contains("top_alias_bias"));

        // The printed output must itself be loadable as a config file
        let parsed: BenchConfig = serde_yaml::from_str(&yaml).unwrap();
        assert!(parsed.validate_all().is_ok());
        assert_eq!(parsed.workload.users, config.workload.users);
    }
}
