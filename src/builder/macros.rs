//! Macros for declaring state enums.

/// Generate a `State` implementation for a plain enum.
///
/// Variants may carry a custom name with `= "label"`; otherwise the
/// variant identifier is used.
///
/// # Example
///
/// ```
/// use statekeeper::state_enum;
/// use statekeeper::core::State;
///
/// state_enum! {
///     pub enum OrderState {
///         New = "new",
///         Paid = "paid",
///         Shipped,
///         Cancelled,
///     }
///     final: [Shipped, Cancelled]
/// }
///
/// assert_eq!(OrderState::New.name(), "new");
/// assert_eq!(OrderState::Shipped.name(), "Shipped");
/// assert!(OrderState::Cancelled.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (@name $variant:ident) => {
        stringify!($variant)
    };
    (@name $variant:ident, $label:literal) => {
        $label
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::state_enum!(@name $variant $(, $label)?)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
