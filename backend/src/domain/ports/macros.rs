//! `define_port_error!` declares a port's error enum once and derives its
//! `thiserror` messages plus one snake_case constructor per variant.
//!
//! Constructor arguments are `impl Into<Field>`, so adapters pass `&str` for
//! message fields and domain ids for typed ones.

macro_rules! define_port_error {
    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build the [`Self::", stringify!($variant), "`] variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Build the [`Self::", stringify!($variant), "`] variant.")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructors and messages of generated port errors.
    use crate::domain::ports::{ApplicationRepositoryError, SettingsRepositoryError};
    use crate::domain::{ApplicationType, UserId};

    define_port_error! {
        /// Quiz answer feed used only to cover field-less variants.
        pub enum AnswerFeedError {
            /// The feed was closed before the quiz finished.
            Closed => "answer feed closed",
        }
    }

    #[test]
    fn field_less_variants_get_constructors() {
        assert_eq!(AnswerFeedError::closed(), AnswerFeedError::Closed);
        assert_eq!(AnswerFeedError::closed().to_string(), "answer feed closed");
    }

    #[test]
    fn message_fields_accept_str() {
        let err = SettingsRepositoryError::connection("pool exhausted");
        assert_eq!(
            err,
            SettingsRepositoryError::Connection {
                message: "pool exhausted".to_owned()
            }
        );
        assert_eq!(
            err.to_string(),
            "settings repository connection failed: pool exhausted"
        );
    }

    #[test]
    fn typed_fields_keep_domain_values() {
        let owner = UserId::from_stored(7);
        let err = ApplicationRepositoryError::pending_conflict(owner, ApplicationType::Police);
        assert!(matches!(
            err,
            ApplicationRepositoryError::PendingConflict {
                owner: stored,
                kind: ApplicationType::Police,
            } if stored == owner
        ));
        assert_eq!(err.to_string(), "user 7 already has a pending police application");
    }
}
