//! Day code identifier type.

use std::fmt;

/// Error returned when an identifier cannot be derived from a feed id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {reason}")]
pub struct InvalidId {
    reason: &'static str,
}

impl InvalidId {
    pub(crate) fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Returns the last colon-separated part of a namespaced feed id.
///
/// Feed ids look like `ATB:DayType:12_3`; the local part is `12_3`.
pub(crate) fn local_part(raw: &str) -> &str {
    raw.rsplit(':').next().unwrap_or(raw)
}

/// A sanitized day code identifier.
///
/// Built from a GTFS `service_id` by keeping its local part and dropping every
/// character that is not alphanumeric, so the id is usable as a bare atom in
/// the fact output. Ordering is plain string ordering, which is what canonical
/// representative selection relies on.
///
/// # Examples
///
/// ```
/// use gtfs_facts::domain::DayCodeId;
///
/// let id = DayCodeId::from_service_id("ATB:DayType:12_3").unwrap();
/// assert_eq!(id.as_str(), "123");
///
/// assert!(DayCodeId::from_service_id("ATB:DayType:__").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayCodeId(String);

impl DayCodeId {
    /// Derive a day code id from a raw GTFS service id.
    pub fn from_service_id(raw: &str) -> Result<Self, InvalidId> {
        let sanitized: String = local_part(raw)
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect();
        if sanitized.is_empty() {
            return Err(InvalidId::new("service id has no alphanumeric local part"));
        }
        Ok(DayCodeId(sanitized))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for DayCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DayCodeId({})", self.0)
    }
}

impl fmt::Display for DayCodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
