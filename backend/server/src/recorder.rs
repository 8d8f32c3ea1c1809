use std::time::Instant;

use chrono::{SubsecRound, Utc};
use records::{
    ClientMetadata, ResponseRecord, message_or_default,
    payloads::{HEALTH_OK, HealthPayload},
};
use tracing::{error, info, warn};

use crate::store::RecordStore;

/// In-memory response log mirrored to a [`RecordStore`] after every append.
pub struct Recorder {
    responses: Vec<ResponseRecord>,
    store: Box<dyn RecordStore>,
    started_at: Instant,
    last_id: u64,
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub record: ResponseRecord,
    pub total: usize,
}

impl Recorder {
    /// Rehydrates from `store`. Never fails: an unreadable log starts empty.
    pub fn open(store: Box<dyn RecordStore>) -> Self {
        let responses = match store.load() {
            Ok(Some(responses)) => responses,
            Ok(None) => {
                info!("No response log at {}, starting empty", store.describe());
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Failed to load response log at {}, starting empty: {e}",
                    store.describe()
                );
                Vec::new()
            }
        };

        // Ids ahead of the clock are foreign to this recorder and do not seed it.
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let last_id = responses
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .filter(|&id| id <= now)
            .max()
            .unwrap_or(0);

        Self {
            responses,
            store,
            started_at: Instant::now(),
            last_id,
        }
    }

    pub fn record(&mut self, message: Option<String>, client: ClientMetadata) -> Recorded {
        // Stored timestamps carry millisecond precision.
        let timestamp = Utc::now().trunc_subsecs(3);
        let id = self.next_id(timestamp.timestamp_millis());

        let record = ResponseRecord {
            id: id.to_string(),
            timestamp,
            message: message_or_default(message),
            client,
        };

        self.responses.push(record.clone());
        self.flush();

        Recorded {
            record,
            total: self.responses.len(),
        }
    }

    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn health(&self) -> HealthPayload {
        HealthPayload {
            status: HEALTH_OK.to_string(),
            uptime: self.started_at.elapsed().as_secs_f64(),
            timestamp: Utc::now(),
            total_responses: self.responses.len(),
        }
    }

    /// Writes the full log. Failures are logged; memory stays authoritative.
    pub fn flush(&self) {
        if let Err(e) = self.store.persist(&self.responses) {
            error!("Failed to save responses to {}: {e}", self.store.describe());
        }
    }

    fn next_id(&mut self, now_millis: i64) -> u64 {
        let candidate = u64::try_from(now_millis).unwrap_or(0);

        self.last_id = candidate.max(self.last_id.saturating_add(1));
        self.last_id
    }
}
