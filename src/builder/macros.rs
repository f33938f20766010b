//! Macros for naming states without stringly-typed call sites.

/// Declare an enum whose variants name the states of a machine.
///
/// The generated enum gets a `name()` method returning the variant name, an
/// `ALL` constant listing the variants in declaration order, a `Display`
/// impl, and a conversion into [`Target`](crate::Target) so variants can be
/// passed straight to `change_state`.
///
/// # Example
///
/// ```
/// use tickstate::{state_names, StateMachine, StateRegistry, core::StateDefinition};
///
/// state_names! {
///     pub enum Guard {
///         Idle,
///         Patrol,
///         Chase,
///     }
/// }
///
/// let mut fsm: StateMachine = StateMachine::builder()
///     .registry(StateRegistry::shared())
///     .build()
///     .unwrap();
/// for state in Guard::ALL {
///     fsm.add_state(StateDefinition::indefinite(state.name())).unwrap();
/// }
///
/// fsm.change_state(Guard::Chase).unwrap();
/// assert_eq!(fsm.current_state(), Some(Guard::Chase.name()));
/// ```
#[macro_export]
macro_rules! state_names {
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
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::convert::From<$name> for $crate::Target {
            fn from(state: $name) -> Self {
                $crate::Target::Name(state.name().to_string())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::Target;

    state_names! {
        enum Patrol {
            Idle,
            Walking,
            Attack,
        }
    }

    #[test]
    fn state_names_macro_generates_names() {
        assert_eq!(Patrol::Idle.name(), "Idle");
        assert_eq!(Patrol::Attack.to_string(), "Attack");
        assert_eq!(Patrol::ALL, &[Patrol::Idle, Patrol::Walking, Patrol::Attack]);
    }

    #[test]
    fn state_names_convert_to_targets() {
        assert_eq!(Target::from(Patrol::Walking), Target::Name("Walking".to_string()));
    }

    #[test]
    fn state_names_supports_visibility() {
        state_names! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_eq!(PublicState::ALL.len(), 2);
    }
}
