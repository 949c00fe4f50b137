use crate::models::BusinessRecord;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{info, warn};

/// Storage API used when `STORAGE_API_URL` is not set.
pub const DEFAULT_STORAGE_API: &str = "http://localhost:5000";

/// What the storage API did with one submitted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored as a new company
    Inserted,
    /// Rejected with 409; the company is already on file
    DuplicateSkipped,
    /// Any other rejection or a transport failure, with the reason
    Failed(String),
}

/// Client for the company storage API.
///
/// Submission never fails the walk: every response maps to an outcome and
/// the caller decides what to count.
pub struct RecordSink {
    client: Client,
    endpoint: String,
}

impl RecordSink {
    /// Sink posting to `{base}/company`.
    pub fn new(client: Client, base: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/company", base.trim_end_matches('/')),
        }
    }

    /// Sink for the API named by `STORAGE_API_URL`, or the local default.
    pub fn from_env(client: Client) -> Self {
        let base =
            std::env::var("STORAGE_API_URL").unwrap_or_else(|_| DEFAULT_STORAGE_API.to_string());
        Self::new(client, &base)
    }

    /// Submit one record, returning what the API did with it.
    pub async fn submit(&self, record: &BusinessRecord) -> SubmitOutcome {
        let payload = CompanyPayload::from(record);
        let response = match self.client.post(&self.endpoint).json(&payload).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Storage API unreachable: {err}");
                return SubmitOutcome::Failed(err.to_string());
            }
        };

        match response.status() {
            StatusCode::OK => {
                info!("Inserted: {}", record.name);
                SubmitOutcome::Inserted
            }
            StatusCode::CONFLICT => {
                info!("Skipping duplicate: {}", record.name);
                SubmitOutcome::DuplicateSkipped
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!("Insert error ({status}): {body}");
                SubmitOutcome::Failed(body)
            }
        }
    }
}

/// Wire shape the storage API expects for a company.
#[derive(Serialize)]
struct CompanyPayload<'a> {
    company_name: &'a str,
    website_url: &'a str,
    phone_number: &'a str,
    email_address: &'a str,
    street_address: &'a str,
    city: &'a str,
    state: &'a str,
    postal_code: &'a str,
    notes: &'a str,
}

impl<'a> From<&'a BusinessRecord> for CompanyPayload<'a> {
    fn from(record: &'a BusinessRecord) -> Self {
        Self {
            company_name: &record.name,
            website_url: &record.website,
            phone_number: &record.phone,
            email_address: &record.email,
            street_address: &record.street,
            city: &record.city,
            state: &record.state,
            postal_code: &record.postal_code,
            notes: &record.notes,
        }
    }
}
