use derive_more::Deref;
use uuid::Uuid;

macro_rules! uuid_id {
    ($name: ident) => {
        #[derive(
            Deref,
            Debug,
            Default,
            Clone,
            Copy,
            Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[must_use]
            pub fn nil() -> Self {
                Self(Uuid::nil())
            }

            #[must_use]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<u128> for $name {
            fn from(value: u128) -> Self {
                Self(Uuid::from_bytes(value.to_be_bytes()))
            }
        }
    };
}

uuid_id!(SessionID);
uuid_id!(PlanID);
uuid_id!(DayID);
