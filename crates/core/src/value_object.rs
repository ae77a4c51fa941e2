//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are domain objects that are **immutable** and **compared by value**.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: `Money { amount: 100.00, currency: EUR }`, two instances with
///   the same amount and currency are interchangeable
/// - **Entity**: `Customer { id: CustomerId(...), name: "..." }`, renaming a customer
///   does not make it a different customer
///
/// ## Immutability
///
/// To "modify" a value object, create a new one with the new values. Arithmetic on
/// money therefore always returns a fresh value and leaves its operands untouched.
///
/// ## Design Constraints
///
/// The trait requires:
/// - **Clone**: Value objects are passed around by value
/// - **PartialEq**: Value objects are compared by their attribute values
/// - **Debug**: Value objects show up in logs and test failures
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
