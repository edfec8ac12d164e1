//! Application state and composition.

use std::sync::Arc;

use grimoire_domain::PreparationPolicy;

use crate::infrastructure::{
    ports::{CatalogSpellRepo, ClockPort, LearnedSpellRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases;

/// Main application state.
///
/// Holds the spell stores and every use case wired against them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub catalog: Arc<dyn CatalogSpellRepo>,
    pub learned: Arc<dyn LearnedSpellRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub spellbook: use_cases::SpellbookUseCases,
    pub catalog: use_cases::CatalogUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repos: SqliteRepositories,
        clock: Arc<dyn ClockPort>,
        policy: PreparationPolicy,
    ) -> Self {
        let catalog_repo: Arc<dyn CatalogSpellRepo> = repos.catalog;
        let learned_repo: Arc<dyn LearnedSpellRepo> = repos.learned;

        let spellbook = use_cases::SpellbookUseCases::new(
            Arc::new(use_cases::spellbook::LearnSpell::new(
                catalog_repo.clone(),
                learned_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::spellbook::CreatePersonalSpell::new(
                learned_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::spellbook::EditLearnedSpell::new(
                learned_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::spellbook::ForgetSpell::new(learned_repo.clone())),
            Arc::new(use_cases::spellbook::SetPrepared::new(
                learned_repo.clone(),
                clock.clone(),
                policy,
            )),
            Arc::new(use_cases::spellbook::PromoteToCatalog::new(
                catalog_repo.clone(),
                learned_repo.clone(),
                clock.clone(),
            )),
            Arc::new(use_cases::spellbook::SpellbookView::new(learned_repo.clone())),
        );

        let catalog = use_cases::CatalogUseCases::new(Arc::new(
            use_cases::catalog::CatalogOps::new(catalog_repo.clone(), clock),
        ));

        Self {
            repositories: Repositories {
                catalog: catalog_repo,
                learned: learned_repo,
            },
            use_cases: UseCases { spellbook, catalog },
        }
    }
}
