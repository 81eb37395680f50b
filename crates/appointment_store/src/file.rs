//! Single-file JSON backend.

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use entities::{Appointment, User};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::{find_overlap, SchedulingBackend, StoreError, StoreResult};

/// The whole persisted dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileDocument {
    #[serde(default)]
    pub appointments: Vec<Appointment>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Backend that keeps every appointment and user in one JSON document.
///
/// Each call reads the file, and each mutation writes it back whole, under a
/// single lock held for the full read-modify-write cycle. The lock only
/// serializes callers within this process: two processes writing the same
/// file can lose each other's updates.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileBackend {
    /// Creates a backend over `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Reads a consistent copy of the whole document.
    pub async fn load(&self) -> StoreResult<FileDocument> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Reads the document. Callers must hold `lock`.
    async fn read(&self) -> StoreResult<FileDocument> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FileDocument::default()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(FileDocument::default());
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replaces the file with `document`. Callers must hold `lock`.
    ///
    /// The document is written to a sibling file first and renamed into
    /// place, so readers never observe a partial write.
    async fn save(&self, document: &FileDocument) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(
            path = %self.path.display(),
            appointments = document.appointments.len(),
            users = document.users.len(),
            "Saved document"
        );
        Ok(())
    }
}

#[async_trait]
impl SchedulingBackend for FileBackend {
    async fn create_appointment(&self, appointment: &Appointment) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        if document.appointments.iter().any(|a| a.id == appointment.id) {
            return Err(StoreError::already_exists(
                "Appointment",
                appointment.id.to_string(),
            ));
        }

        if let Some(existing) = find_overlap(&document.appointments, appointment) {
            debug!(existing_id = %existing.id, "Appointment overlaps stored appointment");
            return Err(StoreError::overlap(Some(existing.id)));
        }

        document.appointments.push(appointment.clone());
        self.save(&document).await
    }

    async fn get_appointment(&self, id: Uuid) -> StoreResult<Option<Appointment>> {
        let document = self.load().await?;
        Ok(document.appointments.into_iter().find(|a| a.id == id))
    }

    async fn list_appointments_by_user(&self, user_id: Uuid) -> StoreResult<Vec<Appointment>> {
        let document = self.load().await?;
        let mut result: Vec<Appointment> = document
            .appointments
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect();
        result.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn delete_appointment(&self, id: Uuid) -> StoreResult<bool> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        let before = document.appointments.len();
        document.appointments.retain(|a| a.id != id);
        if document.appointments.len() == before {
            return Ok(false);
        }

        self.save(&document).await?;
        Ok(true)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let document = self.load().await?;
        Ok(document.users.into_iter().find(|u| u.email == email))
    }

    async fn upsert_user(&self, user: &User) -> StoreResult<User> {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;

        if let Some(index) = document.users.iter().position(|u| u.email == user.email) {
            let existing = &mut document.users[index];
            if existing.name == user.name {
                return Ok(existing.clone());
            }
            existing.name = user.name.clone();
            let stored = existing.clone();
            self.save(&document).await?;
            return Ok(stored);
        }

        document.users.push(user.clone());
        self.save(&document).await?;
        Ok(user.clone())
    }
}
