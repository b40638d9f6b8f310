//! Background weather lookups
//!
//! Each submitted query runs as its own tokio task and reports back to the main
//! loop over a channel. Messages carry the generation of the query that produced
//! them so the app can ignore results from queries it has since replaced.

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::data::demo::demo_report;
use crate::data::{LocationQuery, WeatherClient, WeatherError, WeatherReport};

/// Progress of a running lookup past its initial phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    /// Coordinates are known; fetching current conditions and forecast
    Fetching,
}

/// Messages sent from lookup tasks to the main app
#[derive(Debug)]
pub enum LookupMessage {
    /// The lookup moved to a new phase
    Phase { generation: u64, phase: QueryPhase },
    /// The lookup finished
    Finished {
        generation: u64,
        outcome: Result<WeatherReport, WeatherError>,
    },
}

impl LookupMessage {
    pub fn generation(&self) -> u64 {
        match self {
            Self::Phase { generation, .. } | Self::Finished { generation, .. } => *generation,
        }
    }
}

/// Where reports come from
#[derive(Debug, Clone)]
pub enum LookupSource {
    /// The OpenWeatherMap API
    Live(WeatherClient),
    /// Built-in demo data
    Demo,
}

/// Spawns lookups and collects their messages
pub struct QueryDispatcher {
    source: LookupSource,
    sender: mpsc::Sender<LookupMessage>,
    receiver: mpsc::Receiver<LookupMessage>,
}

impl QueryDispatcher {
    pub fn new(source: LookupSource) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self {
            source,
            sender,
            receiver,
        }
    }

    /// Starts a lookup for `query` tagged with `generation`
    pub fn dispatch(&self, generation: u64, query: LocationQuery) -> JoinHandle<()> {
        let source = self.source.clone();
        let tx = self.sender.clone();

        tokio::spawn(async move {
            tracing::debug!(generation, query = %query.label(), "Lookup started");
            let outcome = match &source {
                LookupSource::Live(client) => run_lookup(client, generation, &query, &tx).await,
                LookupSource::Demo => Ok(demo_report(&query.label(), Utc::now())),
            };

            if let Err(e) = &outcome {
                tracing::warn!(generation, error = %e, "Lookup failed");
            }

            // The receiver only goes away on shutdown
            let _ = tx.send(LookupMessage::Finished { generation, outcome }).await;
        })
    }

    /// Returns the next pending message without blocking
    pub fn try_recv(&mut self) -> Option<LookupMessage> {
        self.receiver.try_recv().ok()
    }

    /// Waits for the next message
    pub async fn recv(&mut self) -> Option<LookupMessage> {
        self.receiver.recv().await
    }
}

/// Resolve then fetch, announcing the switch to the fetching phase
async fn run_lookup(
    client: &WeatherClient,
    generation: u64,
    query: &LocationQuery,
    tx: &mpsc::Sender<LookupMessage>,
) -> Result<WeatherReport, WeatherError> {
    let coordinates = client.coordinates_for(query).await?;

    if matches!(query, LocationQuery::City(_)) {
        let _ = tx
            .send(LookupMessage::Phase {
                generation,
                phase: QueryPhase::Fetching,
            })
            .await;
    }

    client.fetch_report(query, coordinates).await
}
