use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use generator::profile::GeneratorConfig;
use gui_bridge::bridge::ChartBridge;
use intensitycore::time::ForecastDateBound;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use upstream::IntensityClient;
use workflow::config::{DashboardConfig, DEFAULT_API_BASE, DEFAULT_BRIDGE_PORT};
use workflow::request::{View, ViewRequest};
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod upstream;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "UK carbon-intensity forecast chart driver")]
struct Args {
    /// Day to chart (YYYY-MM-DD); defaults to today in the display zone
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long, value_enum, default_value_t = View::National)]
    view: View,
    /// Load a dashboard config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Shape a saved upstream `{"data": [...]}` response instead of fetching
    #[arg(long)]
    input: Option<PathBuf>,
    /// Shape a seeded synthetic day instead of fetching
    #[arg(long, default_value_t = false)]
    synthetic: bool,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 1)]
    primary_region: u32,
    #[arg(long, default_value_t = 2)]
    secondary_region: u32,
    /// Display offset east of UTC in minutes; defaults to this machine's offset
    #[arg(long, allow_hyphen_values = true)]
    utc_offset: Option<i32>,
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,
    #[arg(long, default_value_t = DEFAULT_BRIDGE_PORT)]
    port: u16,
    /// Write the shaped chart payload as JSON
    #[arg(long)]
    output: Option<PathBuf>,
    /// Keep the chart bridge alive for renderer requests
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config.as_ref() {
        DashboardConfig::load(path)?
    } else {
        DashboardConfig::from_args(
            args.api_base.clone(),
            args.utc_offset,
            args.primary_region,
            args.secondary_region,
            args.port,
        )
    };

    let now = Utc::now();
    let zone = config.display_zone()?;
    let date = args.date.unwrap_or_else(|| zone.local_date(now));
    ForecastDateBound::ensure_selectable(date, now).context("validating selected date")?;

    let runner = Arc::new(Runner::new(config.clone())?);
    let client = Arc::new(IntensityClient::new(&config.api_base_url)?);
    let chart_bridge = ChartBridge::new(runner.clone(), client.clone());
    let request = ViewRequest::new(args.view, date, &config);

    let runtime = TokioBuilder::new_current_thread()
        .enable_all()
        .build()
        .context("creating runtime for upstream requests")?;

    let ticket = chart_bridge.begin(date);
    let model = if let Some(path) = args.input.as_ref() {
        let body = fs::read_to_string(path)
            .with_context(|| format!("reading upstream response {}", path.display()))?;
        runner.shape_body(&request, &body, now)?
    } else if args.synthetic {
        let generator = GeneratorConfig {
            seed: args.seed,
            ..Default::default()
        };
        runner.shape_synthetic(&request, &generator, now)?
    } else {
        runtime
            .block_on(runner.fetch(&client, &request, now))
            .with_context(|| format!("fetching {} forecast for {}", request.view, date))?
    };

    println!("{} run -> {}", request.view, model.summary());
    if model.is_empty() {
        chart_bridge.publish_status("No forecast data for the selected day.");
    }

    if let Some(output) = args.output.as_ref() {
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&model).context("serializing chart payload")?;
        fs::write(output, json)
            .with_context(|| format!("writing chart payload {}", output.display()))?;
    }

    chart_bridge.publish(&ticket, model);

    if args.serve {
        chart_bridge.serve(config.bridge_port);
        chart_bridge.publish_status(&format!(
            "HTTP bridge running on port {} (Ctrl+C to stop)...",
            config.bridge_port
        ));
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    let metrics = runner.metrics();
    println!(
        "metrics -> shaped {}, fallbacks {}, non-finite deviations {}, stale {}",
        metrics.records_shaped,
        metrics.region_fallbacks,
        metrics.non_finite_deviations,
        metrics.stale_results
    );

    Ok(())
}
