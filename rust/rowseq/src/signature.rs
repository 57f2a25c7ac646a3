//! Accepted argument types of the `sequence` function and their resolution to
//! an element domain.

use arrow_schema::{DataType, IntervalUnit, TimeUnit};
use rowseq_common::{Result, error::Error};

use crate::domain::DomainKind;

/// One registered form of `sequence`: the element domain and whether an explicit
/// step argument is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceSignature {
    pub domain: DomainKind,
    pub has_step: bool,
}

/// All registered forms. Timestamps require an explicit step.
pub const SIGNATURES: [SequenceSignature; 5] = [
    SequenceSignature::new(DomainKind::Integer, false),
    SequenceSignature::new(DomainKind::Integer, true),
    SequenceSignature::new(DomainKind::Date, false),
    SequenceSignature::new(DomainKind::Date, true),
    SequenceSignature::new(DomainKind::Timestamp, true),
];

impl SequenceSignature {
    pub const fn new(domain: DomainKind, has_step: bool) -> SequenceSignature {
        SequenceSignature { domain, has_step }
    }

    /// Number of arguments of this form.
    pub fn arity(&self) -> usize {
        if self.has_step { 3 } else { 2 }
    }

    /// Argument type names, e.g. `["date", "date", "interval day to second"]`.
    pub fn argument_types(&self) -> Vec<&'static str> {
        let mut types = vec![self.domain.name(), self.domain.name()];
        if self.has_step {
            types.push(Self::step_type_name(self.domain));
        }
        types
    }

    /// Return type name, e.g. `array(bigint)`.
    pub fn return_type(&self) -> String {
        format!("array({})", self.domain.name())
    }

    fn step_type_name(domain: DomainKind) -> &'static str {
        match domain {
            DomainKind::Integer => "bigint",
            DomainKind::Date | DomainKind::Timestamp => "interval day to second",
        }
    }

    /// Finds the registered form matching the given Arrow argument types.
    pub fn resolve(arg_types: &[DataType]) -> Result<SequenceSignature> {
        if !(2..=3).contains(&arg_types.len()) {
            return Err(Error::invalid_arg(
                "arguments",
                format!("sequence takes 2 or 3 arguments, got {}", arg_types.len()),
            ));
        }
        let domain = domain_of(&arg_types[0])?;
        if arg_types[1] != arg_types[0] {
            return Err(Error::invalid_arg(
                "stop",
                format!(
                    "type {} does not match start type {}",
                    arg_types[1], arg_types[0]
                ),
            ));
        }
        if let Some(step_type) = arg_types.get(2) {
            if !is_step_type(domain, step_type) {
                return Err(Error::invalid_arg(
                    "step",
                    format!("type {step_type} is not a valid step for {domain} sequences"),
                ));
            }
        }

        let candidate = SequenceSignature::new(domain, arg_types.len() == 3);
        if SIGNATURES.contains(&candidate) {
            Ok(candidate)
        } else {
            Err(Error::invalid_arg(
                "arguments",
                format!("no matching signature for {candidate}"),
            ))
        }
    }
}

impl std::fmt::Display for SequenceSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sequence({}) -> {}",
            self.argument_types().join(", "),
            self.return_type()
        )
    }
}

/// Maps a start/stop Arrow type onto its element domain.
pub fn domain_of(data_type: &DataType) -> Result<DomainKind> {
    match data_type {
        DataType::Int64 => Ok(DomainKind::Integer),
        DataType::Date32 => Ok(DomainKind::Date),
        DataType::Timestamp(TimeUnit::Millisecond, _) => Ok(DomainKind::Timestamp),
        other => Err(Error::invalid_arg(
            "start",
            format!("unsupported sequence element type {other}"),
        )),
    }
}

/// Returns `true` if `data_type` is an accepted step type for `domain`.
pub fn is_step_type(domain: DomainKind, data_type: &DataType) -> bool {
    match domain {
        DomainKind::Integer => matches!(data_type, DataType::Int64),
        DomainKind::Date | DomainKind::Timestamp => matches!(
            data_type,
            DataType::Duration(TimeUnit::Millisecond) | DataType::Interval(IntervalUnit::DayTime)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(tz: Option<&str>) -> DataType {
        DataType::Timestamp(TimeUnit::Millisecond, tz.map(Into::into))
    }

    #[test]
    fn test_registered_signatures() {
        let rendered = SIGNATURES.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            rendered,
            vec![
                "sequence(bigint, bigint) -> array(bigint)",
                "sequence(bigint, bigint, bigint) -> array(bigint)",
                "sequence(date, date) -> array(date)",
                "sequence(date, date, interval day to second) -> array(date)",
                "sequence(timestamp, timestamp, interval day to second) -> array(timestamp)",
            ]
        );
        assert_eq!(SIGNATURES[0].arity(), 2);
        assert_eq!(SIGNATURES[4].arity(), 3);
    }

    #[test]
    fn test_resolve_valid() {
        assert_eq!(
            SequenceSignature::resolve(&[DataType::Int64, DataType::Int64]).unwrap(),
            SequenceSignature::new(DomainKind::Integer, false)
        );
        assert_eq!(
            SequenceSignature::resolve(&[DataType::Int64, DataType::Int64, DataType::Int64])
                .unwrap(),
            SequenceSignature::new(DomainKind::Integer, true)
        );
        assert_eq!(
            SequenceSignature::resolve(&[
                DataType::Date32,
                DataType::Date32,
                DataType::Interval(IntervalUnit::DayTime)
            ])
            .unwrap(),
            SequenceSignature::new(DomainKind::Date, true)
        );
        assert_eq!(
            SequenceSignature::resolve(&[
                ts(Some("UTC")),
                ts(Some("UTC")),
                DataType::Duration(TimeUnit::Millisecond)
            ])
            .unwrap(),
            SequenceSignature::new(DomainKind::Timestamp, true)
        );
    }

    #[test]
    fn test_resolve_rejects() {
        // Two-argument timestamp form is not registered.
        assert!(SequenceSignature::resolve(&[ts(None), ts(None)]).is_err());
        assert!(SequenceSignature::resolve(&[DataType::Int32, DataType::Int32]).is_err());
        assert!(SequenceSignature::resolve(&[DataType::Int64]).is_err());
        assert!(SequenceSignature::resolve(&[DataType::Int64, DataType::Date32]).is_err());
        assert!(
            SequenceSignature::resolve(&[DataType::Date32, DataType::Date32, DataType::Int64])
                .is_err()
        );
        assert!(
            SequenceSignature::resolve(&[
                DataType::Timestamp(TimeUnit::Microsecond, None),
                DataType::Timestamp(TimeUnit::Microsecond, None),
                DataType::Duration(TimeUnit::Millisecond)
            ])
            .is_err()
        );
        assert!(SequenceSignature::resolve(&[ts(Some("UTC")), ts(None)]).is_err());
    }
}
