#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StringIdentifierError {
    #[error("identifier is empty")]
    Empty,

    #[error("bad character `{0:?}`. Control characters are not allowed")]
    ControlCharacter(std::primitive::char),
}

#[macro_export]
macro_rules! string_type {
    ($x:ident) => {
        paste::item! {
            pub fn [<validate_ $x:snake>](s: &str) -> Result<(), $crate::entities::StringIdentifierError> {
                if s.is_empty() {
                    return Err($crate::entities::StringIdentifierError::Empty);
                }

                if let Some(c) = s.chars().find(|c| c.is_control()) {
                    return Err($crate::entities::StringIdentifierError::ControlCharacter(c));
                }

                Ok(())
            }
        }

        #[derive(
            Debug, Clone, $crate::entities::serde::Serialize, Hash, Eq, PartialEq, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $x {
            inner: $crate::entities::SmolStr,
        }

        paste::item! {
            struct [<$x Visitor>];
        }

        paste::item! {
            impl<'de> $crate::entities::serde::Deserialize<'de> for $x {
                fn deserialize<D>(deserializer: D) -> Result<$x, D::Error>
                where
                    D: $crate::entities::serde::Deserializer<'de>,
                {
                    deserializer.deserialize_str([<$x Visitor>])
                }
            }
        }

        paste::item! {
            impl<'de> $crate::entities::serde::de::Visitor<'de> for [<$x Visitor>] {
                type Value = $x;

                fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                    formatter.write_str("a non-empty string without control characters")
                }

                fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                where
                    E: $crate::entities::serde::de::Error,
                {
                    use std::str::FromStr;

                    $x::from_str(value)
                        .map_err(|e| $crate::entities::serde::de::Error::custom(e.to_string()))
                }
            }
        }

        impl std::fmt::Display for $x {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.inner)
            }
        }

        paste::item! {
            impl std::str::FromStr for $x {
                type Err = $crate::entities::StringIdentifierError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    [<validate_ $x:snake>](s)?;
                    Ok($x { inner: s.into() })
                }
            }
        }

        impl std::ops::Deref for $x {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.inner.as_str()
            }
        }

        impl $x {
            pub fn as_str(&self) -> &str {
                &self
            }
        }

        impl From<$x> for String {
            fn from(v: $x) -> Self {
                v.inner.to_string()
            }
        }
    };
}
