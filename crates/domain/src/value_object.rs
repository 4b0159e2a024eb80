//! Structurally compared, immutable domain values.

use std::hash::Hash;

/// An immutable value compared by its significant fields, never by identity.
///
/// Implementors expose their significant fields, in order, as a tuple of
/// borrows. [`value_object!`] derives `PartialEq`, `Eq` and `Hash` from that
/// sequence so equality can't drift from the declared components.
///
/// [`value_object!`]: crate::value_object
pub trait ValueObject {
    /// The ordered significant fields.
    type Components<'a>: PartialEq + Hash
    where
        Self: 'a;

    /// Returns the significant fields in declaration order.
    fn components(&self) -> Self::Components<'_>;
}

/// Implements component-based `PartialEq`, `Eq` and `Hash` for a [`ValueObject`].
#[macro_export]
macro_rules! value_object {
    ($ty:ty) => {
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::ValueObject::components(self) == $crate::ValueObject::components(other)
            }
        }

        impl Eq for $ty {}

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&$crate::ValueObject::components(self), state);
            }
        }
    };
}
