// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw nested visibility data as delivered with an assembly.

use alloc::string::String;
use alloc::vec::Vec;

use crate::IconState;

/// Nested visibility data: every value is either a leaf marker holding the
/// `[shape, edges]` state pair, or another nested mapping.
///
/// Branch entries keep their input order; that order is the display order of
/// the resulting tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NestedVisibilityData {
    /// A leaf shape with its `[shape, edges]` states.
    Leaf([IconState; 2]),
    /// A branch with ordered `(name, value)` entries.
    Branch(Vec<(String, NestedVisibilityData)>),
}

impl NestedVisibilityData {
    /// The value malformed input is coerced to.
    pub const DISABLED: Self = Self::Leaf([IconState::Disabled, IconState::Disabled]);

    /// Creates a leaf from its two states.
    #[must_use]
    pub const fn leaf(shape: IconState, edges: IconState) -> Self {
        Self::Leaf([shape, edges])
    }

    /// Creates a branch from `(name, value)` pairs, preserving their order.
    #[must_use]
    pub fn branch<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Self)>,
        S: Into<String>,
    {
        Self::Branch(
            entries
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    /// Creates a leaf from raw codes, coercing anything out of range to a
    /// disabled leaf.
    #[must_use]
    pub fn from_codes(shape: u8, edges: u8) -> Self {
        match (IconState::try_from(shape), IconState::try_from(edges)) {
            (Ok(shape), Ok(edges)) => Self::Leaf([shape, edges]),
            _ => Self::DISABLED,
        }
    }
}

// The derived drop would recurse once per nesting level; unnest onto a work
// stack instead so arbitrarily deep input can be dropped.
impl Drop for NestedVisibilityData {
    fn drop(&mut self) {
        let Self::Branch(entries) = self else {
            return;
        };
        let mut stack = core::mem::take(entries);
        while let Some((_, mut value)) = stack.pop() {
            if let Self::Branch(children) = &mut value {
                stack.append(children);
            }
        }
    }
}

#[cfg(feature = "serde")]
mod de {
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::fmt;

    use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

    use super::NestedVisibilityData;

    // Every shape the input can take maps onto a value; malformed shapes
    // become a disabled leaf so a build can never fail.
    struct DataVisitor;

    impl<'de> Visitor<'de> for DataVisitor {
        type Value = NestedVisibilityData;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a nested visibility mapping or a two-element state array")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some((key, value)) = map.next_entry::<String, NestedVisibilityData>()? {
                entries.push((key, value));
            }
            Ok(NestedVisibilityData::Branch(entries))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut codes = Vec::new();
            while let Some(code) = seq.next_element::<Code>()? {
                codes.push(code.0);
            }
            Ok(match codes.as_slice() {
                [Some(shape), Some(edges)] => NestedVisibilityData::from_codes(*shape, *edges),
                _ => NestedVisibilityData::DISABLED,
            })
        }

        fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }

        fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }

        fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }

        fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }

        fn visit_str<E: de::Error>(self, _: &str) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(NestedVisibilityData::DISABLED)
        }
    }

    impl<'de> Deserialize<'de> for NestedVisibilityData {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(DataVisitor)
        }
    }

    /// A single element of a leaf marker; anything that is not a small
    /// unsigned integer becomes `None`.
    struct Code(Option<u8>);

    impl<'de> Deserialize<'de> for Code {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct CodeVisitor;

            impl<'de> Visitor<'de> for CodeVisitor {
                type Value = Code;

                fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str("a state code")
                }

                fn visit_u64<E: de::Error>(self, v: u64) -> Result<Code, E> {
                    Ok(Code(u8::try_from(v).ok()))
                }

                fn visit_i64<E: de::Error>(self, v: i64) -> Result<Code, E> {
                    Ok(Code(u8::try_from(v).ok()))
                }

                fn visit_f64<E: de::Error>(self, _: f64) -> Result<Code, E> {
                    Ok(Code(None))
                }

                fn visit_bool<E: de::Error>(self, _: bool) -> Result<Code, E> {
                    Ok(Code(None))
                }

                fn visit_str<E: de::Error>(self, _: &str) -> Result<Code, E> {
                    Ok(Code(None))
                }

                fn visit_unit<E: de::Error>(self) -> Result<Code, E> {
                    Ok(Code(None))
                }

                fn visit_seq<A>(self, mut seq: A) -> Result<Code, A::Error>
                where
                    A: SeqAccess<'de>,
                {
                    while seq.next_element::<IgnoredAny>()?.is_some() {}
                    Ok(Code(None))
                }

                fn visit_map<A>(self, mut map: A) -> Result<Code, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
                    Ok(Code(None))
                }
            }

            deserializer.deserialize_any(CodeVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deep_nesting_drops_without_recursion() {
        let mut data = NestedVisibilityData::leaf(IconState::Selected, IconState::Selected);
        for depth in 0..200_000 {
            data = NestedVisibilityData::Branch(alloc::vec![(alloc::format!("n{depth}"), data)]);
        }
        // A wide level under the chain goes through the same work stack.
        let wide = (0..1_000).map(|i| (alloc::format!("w{i}"), NestedVisibilityData::DISABLED));
        data = NestedVisibilityData::branch([
            ("deep", data),
            ("wide", NestedVisibilityData::branch(wide)),
        ]);
        drop(data);
    }

    #[test]
    fn from_codes_coerces_out_of_range() {
        assert_eq!(
            NestedVisibilityData::from_codes(1, 0),
            NestedVisibilityData::leaf(IconState::Selected, IconState::Unselected)
        );
        assert_eq!(
            NestedVisibilityData::from_codes(7, 0),
            NestedVisibilityData::DISABLED
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_keeps_order_and_coerces_malformed_values() {
        let data: NestedVisibilityData = serde_json::from_str(
            r#"{ "zeta": [1, 1], "alpha": { "bad": "x", "short": [1], "empty": {} } }"#,
        )
        .unwrap();
        let NestedVisibilityData::Branch(entries) = &data else {
            panic!("root should be a branch");
        };
        assert_eq!(entries[0].0, "zeta");
        assert_eq!(entries[1].0, "alpha");
        let NestedVisibilityData::Branch(inner) = &entries[1].1 else {
            panic!("alpha should be a branch");
        };
        assert_eq!(inner[0].1, NestedVisibilityData::DISABLED);
        assert_eq!(inner[1].1, NestedVisibilityData::DISABLED);
        assert_eq!(inner[2].1, NestedVisibilityData::Branch(Vec::new()));
    }
}
