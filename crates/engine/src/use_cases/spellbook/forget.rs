//! Forget spell use case. Hard delete; there is no undo.

use std::sync::Arc;

use grimoire_domain::LearnedSpellId;

use crate::infrastructure::ports::LearnedSpellRepo;

use super::error::SpellbookError;

pub struct ForgetSpell {
    learned: Arc<dyn LearnedSpellRepo>,
}

impl ForgetSpell {
    pub fn new(learned: Arc<dyn LearnedSpellRepo>) -> Self {
        Self { learned }
    }

    pub async fn execute(&self, id: LearnedSpellId) -> Result<(), SpellbookError> {
        self.learned.delete(id).await.map_err(|e| {
            tracing::warn!(learned_spell_id = %id, error = %e, "Failed to forget spell");
            SpellbookError::from(e)
        })?;
        tracing::info!(learned_spell_id = %id, "Spell forgotten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockLearnedSpellRepo, RepoError};

    #[tokio::test]
    async fn deletes_the_record() {
        let id = LearnedSpellId::new();
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_delete()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(|_| Ok(()));

        ForgetSpell::new(Arc::new(learned)).execute(id).await.unwrap();
    }

    #[tokio::test]
    async fn when_record_missing_returns_not_found() {
        let mut learned = MockLearnedSpellRepo::new();
        learned
            .expect_delete()
            .returning(|id| Err(RepoError::not_found("LearnedSpell", id)));

        let result = ForgetSpell::new(Arc::new(learned))
            .execute(LearnedSpellId::new())
            .await;
        assert!(matches!(result, Err(SpellbookError::NotFound { .. })));
    }
}
