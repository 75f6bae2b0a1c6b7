//! In-memory session store.
//!
//! Every mutation takes the write lock, applies the change and recomputes the layout
//! order before releasing it, so readers never observe data and order out of step.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ResumeData;
use crate::sections::{reorder, sync_order, SectionId};

/// One editable resume and its layout order.
#[derive(Debug, Clone)]
pub struct ResumeSession {
    pub id: Uuid,
    pub data: ResumeData,
    /// Present sections in display order. Always a permutation of the present set.
    pub order: Vec<SectionId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct ResumeStore {
    sessions: Arc<RwLock<HashMap<Uuid, ResumeSession>>>,
    max_sessions: usize,
}

impl ResumeStore {
    pub fn new(max_sessions: usize) -> Self {
        ResumeStore {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions,
        }
    }

    pub async fn create(&self, data: ResumeData) -> Result<ResumeSession, AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(AppError::Validation(format!(
                "Session limit of {} reached",
                self.max_sessions
            )));
        }

        let now = Utc::now();
        let session = ResumeSession {
            id: Uuid::new_v4(),
            order: sync_order(&[], &data),
            data,
            created_at: now,
            updated_at: now,
        };
        sessions.insert(session.id, session.clone());

        info!(
            session_id = %session.id,
            sections = session.order.len(),
            active_sessions = sessions.len(),
            "Resume session created"
        );
        Ok(session)
    }

    /// Snapshot of a session; later edits do not affect the returned copy.
    pub async fn get(&self, id: Uuid) -> Result<ResumeSession, AppError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Replaces the resume data and re-syncs the order against it.
    pub async fn replace(&self, id: Uuid, data: ResumeData) -> Result<ResumeSession, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;

        let order = sync_order(&session.order, &data);
        if order != session.order {
            debug!(
                session_id = %id,
                before = ?session.order,
                after = ?order,
                "section order re-synced"
            );
        }
        session.order = order;
        session.data = data;
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    /// Moves the section at `from` to position `to`. Out-of-range indices leave the
    /// order unchanged.
    pub async fn reorder(
        &self,
        id: Uuid,
        from: usize,
        to: usize,
    ) -> Result<ResumeSession, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;

        session.order = reorder(&session.order, from, to)?;
        session.updated_at = Utc::now();
        debug!(session_id = %id, from, to, order = ?session.order, "sections reordered");
        Ok(session.clone())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if self.sessions.write().await.remove(&id).is_none() {
            return Err(not_found(id));
        }
        info!(session_id = %id, "Resume session deleted");
        Ok(())
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Resume session {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;

    fn resume() -> ResumeData {
        ResumeData {
            summary: "Engineer".to_string(),
            skills: "Rust".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_seeds_canonical_order() {
        let store = ResumeStore::new(10);
        let session = store.create(resume()).await.unwrap();
        assert_eq!(session.order, vec![SectionId::Summary, SectionId::Skills]);
        assert_eq!(store.get(session.id).await.unwrap().data, resume());
    }

    #[tokio::test]
    async fn test_session_limit_is_enforced() {
        let store = ResumeStore::new(1);
        store.create(resume()).await.unwrap();
        let err = store.create(resume()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_replace_keeps_user_order_and_adds_new_sections() {
        let store = ResumeStore::new(10);
        let session = store.create(resume()).await.unwrap();
        let moved = store.reorder(session.id, 1, 0).await.unwrap();
        assert_eq!(moved.order, vec![SectionId::Skills, SectionId::Summary]);

        let mut data = resume();
        data.experience = vec![ExperienceEntry {
            role: "Engineer".to_string(),
            ..Default::default()
        }];
        let updated = store.replace(session.id, data).await.unwrap();
        assert_eq!(
            updated.order,
            vec![SectionId::Skills, SectionId::Experience, SectionId::Summary]
        );
        assert!(updated.updated_at >= session.updated_at);
    }

    #[tokio::test]
    async fn test_replace_drops_sections_that_became_empty() {
        let store = ResumeStore::new(10);
        let session = store.create(resume()).await.unwrap();
        let data = ResumeData {
            skills: "Rust".to_string(),
            ..Default::default()
        };
        let updated = store.replace(session.id, data).await.unwrap();
        assert_eq!(updated.order, vec![SectionId::Skills]);
    }

    #[tokio::test]
    async fn test_out_of_range_reorder_leaves_order_untouched() {
        let store = ResumeStore::new(10);
        let session = store.create(resume()).await.unwrap();
        let err = store.reorder(session.id, 0, 5).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.get(session.id).await.unwrap().order, session.order);
    }

    #[tokio::test]
    async fn test_missing_session_is_not_found() {
        let store = ResumeStore::new(10);
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let store = ResumeStore::new(10);
        let session = store.create(resume()).await.unwrap();
        store.delete(session.id).await.unwrap();
        assert!(matches!(
            store.get(session.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
