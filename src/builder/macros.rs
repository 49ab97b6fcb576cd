//! Macros for declaring state identifiers.

/// Declare a fieldless enum usable wherever a [`StateId`](crate::StateId)
/// is expected.
///
/// Variants get consecutive ids starting at 0, plus a `name()` for logs and
/// a reverse lookup from `StateId`.
///
/// # Example
///
/// ```
/// use tickfsm::{state_ids, StateId};
///
/// state_ids! {
///     pub enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// assert_eq!(StateId::from(Light::Yellow), StateId::new(2));
/// assert_eq!(Light::from_state_id(StateId::new(1)), Some(Light::Green));
/// assert_eq!(Light::Red.name(), "Red");
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        #[repr(u32)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        #[allow(dead_code)]
        impl $name {
            /// Every variant, in id order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            pub fn from_state_id(id: $crate::StateId) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|state| $crate::StateId::from(*state) == id)
            }
        }

        impl From<$name> for $crate::StateId {
            fn from(state: $name) -> Self {
                $crate::StateId::new(state as u32)
            }
        }
    };
}
