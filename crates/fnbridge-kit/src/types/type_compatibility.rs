use super::types::{ObjectDefinition, Type};

/// Static compatibility between argument types and declared parameter types
pub struct TypeChecker;

impl TypeChecker {
    /// Check whether an argument of type `actual` may be passed where `expected` is declared
    pub fn types_compatible(actual: &Type, expected: &Type) -> bool {
        match (actual, expected) {
            // Not resolved on either side: decided at call time
            (Type::Dynamic, _) | (_, Type::Dynamic) => true,

            // A null literal fits any slot, nullability is checked per call
            (Type::Null, _) => true,

            // Any provider type matches any other provider type
            (Type::Provider(_), Type::Provider(_)) => true,

            (Type::Array(actual_inner), Type::Array(expected_inner)) => {
                Self::types_compatible(actual_inner, expected_inner)
            }

            // Arbitrary definitions accept any shape of the same kind
            (Type::Object(_), Type::Object(ObjectDefinition::Arbitrary(_)))
            | (Type::Map(_), Type::Map(ObjectDefinition::Arbitrary(_))) => true,

            // Otherwise require exact match
            _ => actual == expected,
        }
    }
}
