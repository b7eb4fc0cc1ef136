use tokio::time::Instant;

use crate::domain::draft_session::{DraftKey, DraftSession};
use crate::repository::{
    DraftReader, DraftWriter, InMemoryRepository, RepositoryResult, StoredDraft,
};

impl DraftReader for InMemoryRepository {
    fn get_draft(&self, key: &DraftKey) -> RepositoryResult<Option<DraftSession>> {
        let mut drafts = self.drafts()?;

        if drafts
            .get(key)
            .is_some_and(|stored| stored.is_idle(self.idle_ttl))
        {
            drafts.remove(key);
            log::debug!("Evicted idle product draft {key}");
            return Ok(None);
        }

        Ok(drafts.get_mut(key).map(|stored| {
            stored.touched_at = Instant::now();
            stored.session.clone()
        }))
    }
}

impl DraftWriter for InMemoryRepository {
    fn store_draft(&self, session: &DraftSession) -> RepositoryResult<()> {
        let mut drafts = self.drafts()?;

        let before = drafts.len();
        drafts.retain(|_, stored| !stored.is_idle(self.idle_ttl));
        let evicted = before - drafts.len();
        if evicted > 0 {
            log::debug!("Evicted {evicted} idle product drafts");
        }

        if !drafts.contains_key(&session.key) && drafts.len() >= self.max_drafts {
            let oldest = drafts
                .iter()
                .min_by_key(|(_, stored)| stored.touched_at)
                .map(|(key, _)| *key);
            if let Some(oldest) = oldest {
                drafts.remove(&oldest);
                log::warn!(
                    "Draft limit of {} reached, evicted product draft {oldest}",
                    self.max_drafts
                );
            }
        }

        drafts.insert(
            session.key,
            StoredDraft {
                session: session.clone(),
                touched_at: Instant::now(),
            },
        );
        Ok(())
    }

    fn discard_draft(&self, key: &DraftKey) -> RepositoryResult<Option<DraftSession>> {
        let mut drafts = self.drafts()?;
        Ok(drafts.remove(key).map(|stored| stored.session))
    }
}
