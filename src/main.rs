use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use reqwest::Client;

use catalog_harvester::client::ProductsClient;
use catalog_harvester::collector::Collector;
use catalog_harvester::common::PriceRange;
use catalog_harvester::config::Settings;
use catalog_harvester::logging;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

/// Command line arguments for the harvester.
#[derive(Debug, Parser)]
#[clap(name = "catalog-harvester")]
struct HarvesterArgs {
    /// Optional path to the configuration file. If not provided, it is expected
    /// that all parameters are provided via environment variables.
    #[clap(short = 'c', long, required = false)]
    config: Option<PathBuf>,

    #[clap(short = 'o', long = "output-format", default_value = "pretty")]
    output_format: Option<LogOutputFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = HarvesterArgs::parse();

    let pretty = matches!(args.output_format, Some(LogOutputFormat::Pretty));
    logging::setup_logging(pretty);

    let settings = Settings::new_from_path(args.config)?;
    tracing::info!(
        base_url = %settings.api.base_url,
        "starting the catalog harvester"
    );

    let domain = PriceRange::new(settings.domain.min_price, settings.domain.max_price);
    let client = ProductsClient::new(Client::new(), settings.api.base_url.clone());
    let collector = Collector::new(client, settings.api.max_results);

    let products = collector.collect_all(domain).await?;

    tracing::info!(products = products.len(), "writing products to stdout");
    serde_json::to_writer(std::io::stdout().lock(), &products)?;
    println!();

    Ok(())
}
