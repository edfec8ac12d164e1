//! Spellbook use cases.
//!
//! The lifecycle of a character's learned spells: learning from the catalog,
//! personal spells, overrides, preparation and promotion.

use std::sync::Arc;

mod create_personal;
mod edit;
mod error;
mod forget;
mod learn;
mod prepare;
mod promote;
mod view;

pub use create_personal::CreatePersonalSpell;
pub use edit::EditLearnedSpell;
pub use error::SpellbookError;
pub use forget::ForgetSpell;
pub use learn::LearnSpell;
pub use prepare::SetPrepared;
pub use promote::PromoteToCatalog;
pub use view::SpellbookView;

/// Container for spellbook use cases.
pub struct SpellbookUseCases {
    pub learn: Arc<LearnSpell>,
    pub create_personal: Arc<CreatePersonalSpell>,
    pub edit: Arc<EditLearnedSpell>,
    pub forget: Arc<ForgetSpell>,
    pub prepare: Arc<SetPrepared>,
    pub promote: Arc<PromoteToCatalog>,
    pub view: Arc<SpellbookView>,
}

impl SpellbookUseCases {
    pub fn new(
        learn: Arc<LearnSpell>,
        create_personal: Arc<CreatePersonalSpell>,
        edit: Arc<EditLearnedSpell>,
        forget: Arc<ForgetSpell>,
        prepare: Arc<SetPrepared>,
        promote: Arc<PromoteToCatalog>,
        view: Arc<SpellbookView>,
    ) -> Self {
        Self {
            learn,
            create_personal,
            edit,
            forget,
            prepare,
            promote,
            view,
        }
    }
}
