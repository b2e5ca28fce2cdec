//! Helper macro for generating domain port error enums.

/// Expand an enum of `Variant { message: String }` failures into a
/// `thiserror` error type with snake_case convenience constructors that
/// accept anything convertible into the message string.
macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { message: String } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    /// Adapter-supplied failure description.
                    message: String,
                },
            )*
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>](message: impl Into<String>) -> Self {
                        Self::$variant { message: message.into() }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;
