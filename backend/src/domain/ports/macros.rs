//! `define_port_error!`: `thiserror` enums for driven port failures.
//!
//! Each variant gets a snake_case constructor taking `impl Into<_>` for its
//! fields, and the enum gets `kind()` returning the variant name for logs.
//!
//! ```ignore
//! define_port_error! {
//!     pub enum StoreError {
//!         Offline { message: String } => "store offline: {message}",
//!         Duplicate => "duplicate key",
//!     }
//! }
//! let err = StoreError::offline("timeout");
//! assert_eq!(err.kind(), "Offline");
//! ```

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };
    (@ctor $variant:ident { $($field:ident : $ty:ty),+ }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                Self::$variant { $($field: $field.into()),+ }
            }
        }
    };
    (@pattern $variant:ident) => { Self::$variant };
    (@pattern $variant:ident { $($field:ident : $ty:ty),+ }) => { Self::$variant { .. } };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $({ $($field:ident : $ty:ty),+ $(,)? })? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $({ $($field: $ty),+ })?,
            )+
        }

        impl $name {
            $(define_port_error!(@ctor $variant $({ $($field : $ty),+ })?);)+

            /// Variant name, for structured log fields.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(define_port_error!(@pattern $variant $({ $($field : $ty),+ })?) => stringify!($variant),)+
                }
            }
        }
    };
}

pub(crate) use define_port_error;
