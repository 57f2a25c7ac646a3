//! Element domains supported by the sequence kernel.
//!
//! Every domain maps its native value to a signed 64-bit "ordinal" used for all
//! step and length arithmetic, and maps an ordinal offset back onto a native value.
//! The set of domains is closed: [`IntegerDomain`], [`DateDomain`] and
//! [`TimestampDomain`].

use arrow_array::{
    ArrowPrimitiveType,
    types::{Date32Type, Int64Type, TimestampMillisecondType},
};

/// Identifies an element domain at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// 64-bit signed integers (`bigint`).
    Integer,
    /// Calendar dates, counted in days since 1970-01-01.
    Date,
    /// Timestamps, counted in milliseconds since the Unix epoch.
    Timestamp,
}

impl DomainKind {
    #[inline]
    pub fn is_date(&self) -> bool {
        matches!(self, DomainKind::Date)
    }

    /// Name of the domain as used in function signatures.
    pub fn name(&self) -> &'static str {
        match self {
            DomainKind::Integer => "bigint",
            DomainKind::Date => "date",
            DomainKind::Timestamp => "timestamp",
        }
    }
}

impl std::fmt::Display for DomainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion between a domain's native values and the common ordinal
/// representation.
pub trait ElementDomain: Send + Sync + 'static {
    /// Arrow type holding the start, stop and output element values.
    type ArrowType: ArrowPrimitiveType;

    /// Runtime tag of this domain.
    const KIND: DomainKind;

    /// Lossless mapping of a native value onto its ordinal.
    fn to_ordinal(value: Native<Self>) -> i64;

    /// Returns `base + step_count` in domain units.
    ///
    /// Callers guarantee that the mathematically exact result lies between two
    /// valid values of the domain (the start and stop of a validated sequence),
    /// so the result is always representable. The addition wraps, which keeps
    /// the result exact even when `step_count` alone does not fit the native type.
    fn from_ordinal(base: Native<Self>, step_count: i64) -> Native<Self>;
}

/// Shorthand for the native value type of a domain.
pub type Native<D> = <<D as ElementDomain>::ArrowType as ArrowPrimitiveType>::Native;

/// `bigint` values: the ordinal is the value itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerDomain;

impl ElementDomain for IntegerDomain {
    type ArrowType = Int64Type;
    const KIND: DomainKind = DomainKind::Integer;

    #[inline]
    fn to_ordinal(value: i64) -> i64 {
        value
    }

    #[inline]
    fn from_ordinal(base: i64, step_count: i64) -> i64 {
        base.wrapping_add(step_count)
    }
}

/// Dates stored as days since the epoch; the ordinal unit is one day.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateDomain;

impl ElementDomain for DateDomain {
    type ArrowType = Date32Type;
    const KIND: DomainKind = DomainKind::Date;

    #[inline]
    fn to_ordinal(value: i32) -> i64 {
        value as i64
    }

    #[inline]
    fn from_ordinal(base: i32, step_count: i64) -> i32 {
        (base as i64).wrapping_add(step_count) as i32
    }
}

/// Timestamps stored as milliseconds since the epoch; the ordinal unit is one
/// millisecond.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampDomain;

impl ElementDomain for TimestampDomain {
    type ArrowType = TimestampMillisecondType;
    const KIND: DomainKind = DomainKind::Timestamp;

    #[inline]
    fn to_ordinal(value: i64) -> i64 {
        value
    }

    #[inline]
    fn from_ordinal(base: i64, step_count: i64) -> i64 {
        base.wrapping_add(step_count)
    }
}
