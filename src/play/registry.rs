use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    play::{
        engine::PlaySession,
        models::{PlayError, SessionView},
    },
    quiz::models::Quiz,
};

struct TrackedSession {
    session: PlaySession,
    touched_at: DateTime<Utc>,
}

/// Live play sessions, one entry per player attempt.
pub struct SessionRegistry {
    sessions: DashMap<Uuid, TrackedSession>,
    ttl: chrono::Duration,
}

impl SessionRegistry {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    pub fn open(&self, quiz: Quiz) -> Result<SessionView, PlayError> {
        let session = PlaySession::start(quiz)?;
        let session_id = Uuid::new_v4();
        let view = SessionView::from_session(session_id, &session);

        self.sessions.insert(
            session_id,
            TrackedSession {
                session,
                touched_at: Utc::now(),
            },
        );

        debug!("Opened play session {}", session_id);
        Ok(view)
    }

    pub fn view(&self, session_id: &Uuid) -> Result<SessionView, PlayError> {
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or(PlayError::UnknownSession(*session_id))?;

        entry.touched_at = Utc::now();
        Ok(SessionView::from_session(*session_id, &entry.session))
    }

    /// Runs one engine operation against the session and returns the resulting view.
    pub fn apply<F>(&self, session_id: &Uuid, op: F) -> Result<SessionView, PlayError>
    where
        F: FnOnce(&mut PlaySession) -> bool,
    {
        self.apply_tracked(session_id, op).map(|(_, view)| view)
    }

    /// Like `apply`, but also reports whether the operation changed the session.
    pub fn apply_tracked<F>(
        &self,
        session_id: &Uuid,
        op: F,
    ) -> Result<(bool, SessionView), PlayError>
    where
        F: FnOnce(&mut PlaySession) -> bool,
    {
        let mut entry = self
            .sessions
            .get_mut(session_id)
            .ok_or(PlayError::UnknownSession(*session_id))?;

        let applied = op(&mut entry.session);
        if !applied {
            debug!("Ignored out of order operation on session {}", session_id);
        }

        entry.touched_at = Utc::now();
        Ok((applied, SessionView::from_session(*session_id, &entry.session)))
    }

    pub fn close(&self, session_id: &Uuid) -> Result<(), PlayError> {
        self.sessions
            .remove(session_id)
            .map(|_| ())
            .ok_or(PlayError::UnknownSession(*session_id))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn evict_stale(&self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, tracked| now - tracked.touched_at <= self.ttl);

        before.saturating_sub(self.sessions.len())
    }

    pub fn spawn_cleanup(self: Arc<Self>, every: Duration) {
        let mut interval = tokio::time::interval(every);

        tokio::spawn(async move {
            loop {
                interval.tick().await;
                let evicted = self.evict_stale(Utc::now());
                if evicted > 0 {
                    info!("Evicted {} stale play sessions", evicted);
                }
            }
        });
    }
}
