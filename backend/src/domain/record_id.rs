//! Serial integer identifiers for stored records.

/// Raised when an identifier is not a positive serial value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a positive integer, got {0}")]
pub struct InvalidRecordId(pub i64);

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Validate a raw serial value.
            ///
            /// # Errors
            /// Returns [`InvalidRecordId`] when the value is zero, negative or
            /// outside the 32-bit serial range.
            pub fn new(raw: i64) -> Result<Self, $crate::domain::InvalidRecordId> {
                i32::try_from(raw)
                    .ok()
                    .filter(|value| *value > 0)
                    .map(Self)
                    .ok_or($crate::domain::InvalidRecordId(raw))
            }

            /// Wrap a value read back from storage.
            #[must_use]
            pub const fn from_stored(raw: i32) -> Self {
                Self(raw)
            }

            /// Raw serial value.
            #[must_use]
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use record_id;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    record_id! {
        /// Identifier used only by these tests.
        SampleId
    }

    #[rstest]
    #[case(1)]
    #[case(2_147_483_647)]
    fn accepts_positive_serials(#[case] raw: i64) {
        let id = SampleId::new(raw).expect("positive id");
        assert_eq!(i64::from(id.get()), raw);
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    #[case(2_147_483_648)]
    fn rejects_out_of_range_serials(#[case] raw: i64) {
        assert_eq!(SampleId::new(raw), Err(super::InvalidRecordId(raw)));
    }
}
