use crate::domain::model::Participant;
use crate::domain::ports::ParticipantSource;
use crate::utils::error::{Result, SorteoError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_NAME_COLUMN: &str = "Nombre";
pub const DEFAULT_PHONE_COLUMN: &str = "Telefono";
pub const DEFAULT_EMAIL_COLUMN: &str = "Email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetColumns {
    pub name: String,
    pub phone: String,
    /// Optional column; a sheet without it simply yields no emails.
    pub email: String,
}

impl Default for SheetColumns {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_COLUMN.to_string(),
            phone: DEFAULT_PHONE_COLUMN.to_string(),
            email: DEFAULT_EMAIL_COLUMN.to_string(),
        }
    }
}

/// Participant list exported from a spreadsheet as CSV, either published at
/// an http(s) URL or saved to disk.
pub struct SheetSource {
    location: String,
    columns: SheetColumns,
    client: Client,
}

impl SheetSource {
    pub fn new(location: impl Into<String>, columns: SheetColumns, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            location: location.into(),
            columns,
            client,
        })
    }

    fn is_remote(&self) -> bool {
        self.location.starts_with("http://") || self.location.starts_with("https://")
    }

    async fn read_csv(&self) -> Result<String> {
        if !self.is_remote() {
            tracing::debug!("Reading participants from file: {}", self.location);
            return Ok(tokio::fs::read_to_string(&self.location).await?);
        }

        tracing::debug!("Downloading participants from: {}", self.location);
        let response = self.client.get(&self.location).send().await?;
        tracing::debug!("Sheet response status: {}", response.status());

        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ParticipantSource for SheetSource {
    async fn fetch(&self) -> Result<Vec<Participant>> {
        let csv_text = self.read_csv().await?;
        parse_participants(&csv_text, &self.columns)
    }
}

pub fn parse_participants(csv_text: &str, columns: &SheetColumns) -> Result<Vec<Participant>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers()?.clone();
    let position = |column: &str| {
        headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == column)
    };

    let name_idx = position(columns.name.as_str()).ok_or_else(|| SorteoError::MissingColumnError {
        column: columns.name.clone(),
    })?;
    let phone_idx = position(columns.phone.as_str()).ok_or_else(|| SorteoError::MissingColumnError {
        column: columns.phone.clone(),
    })?;
    let email_idx = position(columns.email.as_str());

    let mut participants = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // Header is line 1.
        let line = row + 2;

        let name = record.get(name_idx).unwrap_or_default();
        let phone = record.get(phone_idx).unwrap_or_default();

        if name.is_empty() && phone.is_empty() {
            tracing::warn!("Skipping blank row at line {}", line);
            continue;
        }
        if name.is_empty() {
            return Err(SorteoError::ValidationError {
                message: format!("line {} has a phone number but no name", line),
            });
        }
        if phone.is_empty() {
            return Err(SorteoError::ValidationError {
                message: format!("line {}: '{}' has no phone number", line, name),
            });
        }

        let email = email_idx
            .and_then(|idx| record.get(idx))
            .filter(|e| !e.is_empty())
            .map(str::to_string);

        participants.push(Participant {
            name: name.to_string(),
            phone: phone.to_string(),
            email,
        });
    }

    tracing::debug!("Parsed {} participants", participants.len());
    Ok(participants)
}
