//! Identity-bearing domain objects.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// An object defined by its identity rather than its attributes.
///
/// Two entities of the same type are the same entity iff their ids match,
/// whatever the rest of their state says. Use [`entity_identity!`] to derive
/// `PartialEq`, `Eq` and `Hash` accordingly.
///
/// [`entity_identity!`]: crate::entity_identity
pub trait Entity {
    /// Strongly-typed identifier. Each entity type has its own id type, so
    /// entities of different types can never compare equal.
    type Id: Copy + Eq + Hash + Debug + Display + Send + Sync + 'static;

    /// Returns the entity identifier. It never changes after creation.
    fn id(&self) -> Self::Id;
}

/// Implements identity-based `PartialEq`, `Eq` and `Hash` for an [`Entity`].
#[macro_export]
macro_rules! entity_identity {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::Entity::id(self) == $crate::Entity::id(other)
            }
        }

        impl Eq for $ty {}

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&$crate::Entity::id(self), state);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    common::uuid_id!(WidgetId);

    #[derive(Debug)]
    struct Widget {
        id: WidgetId,
        label: String,
    }

    impl Entity for Widget {
        type Id = WidgetId;

        fn id(&self) -> WidgetId {
            self.id
        }
    }

    crate::entity_identity!(Widget);

    #[test]
    fn same_id_different_state_is_equal() {
        let id = WidgetId::new();
        let a = Widget {
            id,
            label: "left".to_string(),
        };
        let b = Widget {
            id,
            label: "right".to_string(),
        };

        assert_eq!(a, b);
        assert_ne!(a.label, b.label);
    }

    #[test]
    fn different_id_same_state_is_not_equal() {
        let a = Widget {
            id: WidgetId::new(),
            label: "same".to_string(),
        };
        let b = Widget {
            id: WidgetId::new(),
            label: "same".to_string(),
        };

        assert_ne!(a, b);
    }

    #[test]
    fn hash_follows_identity() {
        let id = WidgetId::new();
        let mut set = HashSet::new();
        set.insert(Widget {
            id,
            label: "first".to_string(),
        });
        let inserted = set.insert(Widget {
            id,
            label: "second".to_string(),
        });

        assert!(!inserted);
        assert_eq!(set.len(), 1);
    }
}
