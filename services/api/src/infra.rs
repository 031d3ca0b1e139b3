use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use study_portal::error::AppError;
use study_portal::workflows::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, RepositoryError,
};
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Insert-ordered store backing the HTTP export routes.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    pub(crate) fn seeded(
        records: impl IntoIterator<Item = ApplicationRecord>,
    ) -> Result<Self, RepositoryError> {
        let repository = Self::default();
        for record in records {
            repository.insert(record)?;
        }
        Ok(repository)
    }

    fn guard(&self) -> Result<MutexGuard<'_, Vec<ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.guard()?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.guard()?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.guard()?.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ApplicationsFile {
    Many(Vec<ApplicationRecord>),
    One(Box<ApplicationRecord>),
}

/// Reads either a JSON array of applications or a single application object.
pub(crate) fn load_applications(path: &Path) -> Result<Vec<ApplicationRecord>, AppError> {
    let reader = BufReader::new(File::open(path)?);
    let records = match serde_json::from_reader(reader)? {
        ApplicationsFile::Many(records) => records,
        ApplicationsFile::One(record) => vec![*record],
    };
    debug!(path = %path.display(), count = records.len(), "loaded applications");
    Ok(records)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
