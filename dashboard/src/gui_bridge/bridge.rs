use crate::gui_bridge::model::VisualizationModel;
use crate::upstream::IntensityClient;
use crate::workflow::request::{View, ViewRequest};
use crate::workflow::runner::Runner;
use chrono::{NaiveDate, Utc};
use intensitycore::api::{Envelope, NationalForecastEntry, RegionalForecastEntry, SettlementPeriod};
use intensitycore::session::{SelectionGate, SelectionTicket};
use intensitycore::time::ForecastDateBound;
use serde::Deserialize;
use serde_json::json;
use std::{net::SocketAddr, sync::Arc, thread};
use tokio::runtime::Builder;
use warp::{http::StatusCode, Filter};

fn bridge_bind_address(port: u16) -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], port))
}

#[derive(Debug)]
struct WarpError;

impl warp::reject::Reject for WarpError {}

#[derive(Debug, Deserialize)]
struct SelectQuery {
    view: View,
    date: NaiveDate,
    primary: Option<u32>,
    secondary: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct IngestQuery {
    date: Option<NaiveDate>,
    primary: Option<u32>,
    secondary: Option<u32>,
}

#[derive(Clone)]
struct BridgeContext {
    gate: Arc<SelectionGate<VisualizationModel>>,
    runner: Arc<Runner>,
    client: Arc<IntensityClient>,
}

impl BridgeContext {
    fn request(&self, view: View, date: NaiveDate, primary: Option<u32>, secondary: Option<u32>) -> ViewRequest {
        ViewRequest::new(view, date, self.runner.config()).with_regions(primary, secondary)
    }

    /// Explicit date, else the UTC day of the first period, else today locally.
    fn ingest_date(&self, requested: Option<NaiveDate>, first: Option<&SettlementPeriod>) -> NaiveDate {
        requested
            .or_else(|| {
                first
                    .and_then(SettlementPeriod::start)
                    .map(|start| start.date_naive())
            })
            .unwrap_or_else(|| self.runner.zone().local_date(Utc::now()))
    }

    fn current_model(&self) -> VisualizationModel {
        self.gate
            .current()
            .map(|selection| selection.value)
            .unwrap_or_default()
    }

    fn accept(&self, ticket: &SelectionTicket, model: VisualizationModel) -> bool {
        let summary = model.summary();
        if self.gate.accept(ticket, model) {
            println!("[GUI] {}", summary);
            true
        } else {
            self.runner.record_stale();
            false
        }
    }
}

fn status_reply(kept: bool, date: NaiveDate) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&json!({
            "status": if kept { "ok" } else { "stale" },
            "date": date.to_string(),
        })),
        StatusCode::OK,
    )
}

fn routes(
    context: BridgeContext,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
{
    let context_filter = warp::any().map(move || context.clone());

    let get_route = warp::path("payload")
        .and(warp::path::end())
        .and(warp::get())
        .and(context_filter.clone())
        .map(|context: BridgeContext| warp::reply::json(&context.current_model()));

    let select_route = warp::path("select")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<SelectQuery>())
        .and(context_filter.clone())
        .and_then(|query: SelectQuery, context: BridgeContext| async move {
            let now = Utc::now();
            if let Err(err) = ForecastDateBound::ensure_selectable(query.date, now) {
                return Ok::<_, warp::Rejection>(warp::reply::with_status(
                    warp::reply::json(&json!({"status": "rejected", "error": err.to_string()})),
                    StatusCode::BAD_REQUEST,
                ));
            }
            let request = context.request(query.view, query.date, query.primary, query.secondary);
            let ticket = context.gate.begin(request.date);
            match context.runner.fetch(&context.client, &request, now).await {
                Ok(model) => Ok(status_reply(context.accept(&ticket, model), request.date)),
                Err(err) => {
                    log::error!("select error: {:#}", err);
                    Err(warp::reject::custom(WarpError))
                }
            }
        });

    let national_route = warp::path!("ingest" / "national")
        .and(warp::post())
        .and(warp::query::<IngestQuery>())
        .and(warp::body::json())
        .and(context_filter.clone())
        .map(
            |query: IngestQuery, envelope: Envelope<NationalForecastEntry>, context: BridgeContext| {
                let date = context.ingest_date(
                    query.date,
                    envelope.data.first().map(|entry| &entry.period),
                );
                let ticket = context.gate.begin(date);
                let chart = context.runner.national(&envelope.data, date, Utc::now());
                let kept = context.accept(&ticket, VisualizationModel::National(chart));
                status_reply(kept, date)
            },
        );

    let regional_route = warp::path!("ingest" / "regional")
        .and(warp::post())
        .and(warp::query::<IngestQuery>())
        .and(warp::body::json())
        .and(context_filter)
        .map(
            |query: IngestQuery, envelope: Envelope<RegionalForecastEntry>, context: BridgeContext| {
                let date = context.ingest_date(
                    query.date,
                    envelope.data.first().map(|entry| &entry.period),
                );
                let request = context.request(View::Regional, date, query.primary, query.secondary);
                let ticket = context.gate.begin(date);
                let comparison = context.runner.regional(&envelope.data, &request);
                let kept = context.accept(&ticket, VisualizationModel::Regional(comparison));
                status_reply(kept, date)
            },
        );

    get_route
        .or(select_route)
        .or(national_route)
        .or(regional_route)
}

/// Bridge that serves the latest accepted chart payload to the renderer.
///
/// Every selection goes through the shared [`SelectionGate`], so a slow
/// upstream response for an old date never replaces a newer chart.
pub struct ChartBridge {
    context: BridgeContext,
}

impl ChartBridge {
    pub fn new(runner: Arc<Runner>, client: Arc<IntensityClient>) -> Self {
        Self {
            context: BridgeContext {
                gate: Arc::new(SelectionGate::new()),
                runner,
                client,
            },
        }
    }

    pub fn begin(&self, date: NaiveDate) -> SelectionTicket {
        self.context.gate.begin(date)
    }

    /// Publishes `model` if `ticket` is still the latest selection.
    pub fn publish(&self, ticket: &SelectionTicket, model: VisualizationModel) -> bool {
        self.context.accept(ticket, model)
    }

    pub fn publish_status(&self, message: &str) {
        println!("[GUI] {}", message);
    }

    /// Starts the HTTP endpoint on its own thread and runtime.
    pub fn serve(&self, port: u16) {
        let routes = routes(self.context.clone());
        thread::spawn(move || {
            let runtime = match Builder::new_current_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    log::error!("failed to build bridge runtime: {}", err);
                    return;
                }
            };
            runtime.block_on(async move {
                warp::serve(routes).run(bridge_bind_address(port)).await;
            });
        });
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> VisualizationModel {
        self.context.current_model()
    }
}
