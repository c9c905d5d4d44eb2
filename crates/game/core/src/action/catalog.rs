use super::{ActionKind, AttackAction, GameAction};

/// Registry of action implementations keyed by kind.
#[derive(Debug, Default)]
pub struct ActionCatalog {
    actions: Vec<Box<dyn GameAction>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog with the stock melee attack.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog.register(AttackAction::default());
        catalog
    }

    /// Registers `action`, replacing any action of the same kind.
    pub fn register(&mut self, action: impl GameAction + 'static) {
        self.actions.retain(|existing| existing.kind() != action.kind());
        self.actions.push(Box::new(action));
    }

    pub fn get(&self, kind: ActionKind) -> Option<&dyn GameAction> {
        self.actions
            .iter()
            .find(|action| action.kind() == kind)
            .map(|action| action.as_ref())
    }

    pub fn kinds(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.actions.iter().map(|action| action.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::name;

    #[test]
    fn register_replaces_same_kind() {
        let mut catalog = ActionCatalog::standard();
        catalog.register(AttackAction::with_hit_effect(name("spark").unwrap()));

        assert_eq!(catalog.kinds().count(), 1);
        let action = catalog.get(ActionKind::MeleeAttack).unwrap();
        assert_eq!(action.hit_effect(), Some(name("spark").unwrap()));
    }

    #[test]
    fn empty_catalog_has_no_actions() {
        assert!(ActionCatalog::new().get(ActionKind::MeleeAttack).is_none());
    }
}
