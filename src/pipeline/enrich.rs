//! Enrichment: fill in the shipment details a bare row does not carry.
//!
//! A [`TrackingResolver`] maps a tracking number to a full
//! [`TrackingDetails`] set. The bundled [`PlaceholderResolver`] produces
//! deterministic stand-in values; a real deployment would implement the
//! trait against a carrier API and plug it into the config.
//!
//! Merging is resolver-first: the resolved details seed the record, then
//! the row's own fields are laid on top. A value present in the input
//! always wins, and input columns outside the known detail set are carried
//! through untouched.

use crate::pipeline::input::Record;

/// Column holding the shipment identifier in the input table.
pub const TRACKING_FIELD: &str = "tracking_number";

const RECIPIENT_FIELD: &str = "recipient_name";
const FROM_FIELD: &str = "from_address";
const TO_FIELD: &str = "to_address";
const STATUS_FIELD: &str = "status";
const LAST_UPDATE_FIELD: &str = "last_update";
const NOTES_FIELD: &str = "notes";

/// The full detail set a resolver returns for one shipment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingDetails {
    pub tracking_number: String,
    pub recipient_name: String,
    pub from_address: String,
    pub to_address: String,
    pub status: String,
    pub last_update: String,
    pub notes: String,
}

impl TrackingDetails {
    fn into_pairs(self) -> Vec<(String, String)> {
        vec![
            (TRACKING_FIELD.to_string(), self.tracking_number),
            (RECIPIENT_FIELD.to_string(), self.recipient_name),
            (FROM_FIELD.to_string(), self.from_address),
            (TO_FIELD.to_string(), self.to_address),
            (STATUS_FIELD.to_string(), self.status),
            (LAST_UPDATE_FIELD.to_string(), self.last_update),
            (NOTES_FIELD.to_string(), self.notes),
        ]
    }
}

/// Source of shipment details for a tracking number.
///
/// Resolution is infallible by contract: a resolver that cannot reach its
/// backend should degrade to placeholder values rather than abort the run.
pub trait TrackingResolver: Send + Sync {
    fn resolve(&self, tracking_number: &str) -> TrackingDetails;
}

/// Default resolver: deterministic placeholder details, no I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderResolver;

impl TrackingResolver for PlaceholderResolver {
    fn resolve(&self, tracking_number: &str) -> TrackingDetails {
        TrackingDetails {
            tracking_number: tracking_number.to_string(),
            recipient_name: format!("Recipient for {tracking_number}"),
            from_address: "Sender Address XYZ".to_string(),
            to_address: "Receiver Address XYZ".to_string(),
            status: "In Transit".to_string(),
            last_update: "2025-11-08".to_string(),
            notes: String::new(),
        }
    }
}

/// A record merged with its resolved details, ready for rendering.
///
/// Accessors return `""` for a field that somehow ended up absent, so the
/// renderer never branches on missing data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedRecord {
    record: Record,
}

impl EnrichedRecord {
    pub fn tracking_number(&self) -> &str {
        self.field(TRACKING_FIELD)
    }

    pub fn recipient_name(&self) -> &str {
        self.field(RECIPIENT_FIELD)
    }

    pub fn from_address(&self) -> &str {
        self.field(FROM_FIELD)
    }

    pub fn to_address(&self) -> &str {
        self.field(TO_FIELD)
    }

    pub fn status(&self) -> &str {
        self.field(STATUS_FIELD)
    }

    pub fn last_update(&self) -> &str {
        self.field(LAST_UPDATE_FIELD)
    }

    pub fn notes(&self) -> &str {
        self.field(NOTES_FIELD)
    }

    /// All fields in merged order, extras included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.record.iter()
    }

    fn field(&self, name: &str) -> &str {
        self.record.get(name).unwrap_or("")
    }
}

/// Merge one input record with its resolved details.
///
/// The tracking number is read from the [`TRACKING_FIELD`] column; a record
/// without that column resolves against the empty string.
pub fn enrich(record: &Record, resolver: &dyn TrackingResolver) -> EnrichedRecord {
    let tracking_number = record.get(TRACKING_FIELD).unwrap_or("");
    let details = resolver.resolve(tracking_number);

    let mut merged = Record::from_pairs(details.into_pairs());
    for (name, value) in record.iter() {
        merged.set(name, value);
    }
    EnrichedRecord { record: merged }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        Record::from_pairs(
            pairs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn placeholder_resolver_values() {
        let details = PlaceholderResolver.resolve("TRK-42");
        assert_eq!(details.tracking_number, "TRK-42");
        assert_eq!(details.recipient_name, "Recipient for TRK-42");
        assert_eq!(details.from_address, "Sender Address XYZ");
        assert_eq!(details.to_address, "Receiver Address XYZ");
        assert_eq!(details.status, "In Transit");
        assert_eq!(details.last_update, "2025-11-08");
        assert_eq!(details.notes, "");
    }

    #[test]
    fn input_values_win_over_resolved_ones() {
        let r = record(&[("tracking_number", "TRK-1"), ("status", "Delivered")]);
        let enriched = enrich(&r, &PlaceholderResolver);
        assert_eq!(enriched.status(), "Delivered");
        assert_eq!(enriched.last_update(), "2025-11-08");
    }

    #[test]
    fn every_detail_field_is_present_after_enrichment() {
        let r = record(&[("tracking_number", "TRK-1")]);
        let enriched = enrich(&r, &PlaceholderResolver);
        let names: Vec<&str> = enriched.iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                "tracking_number",
                "recipient_name",
                "from_address",
                "to_address",
                "status",
                "last_update",
                "notes",
            ]
        );
    }

    #[test]
    fn extra_input_columns_are_carried_through() {
        let r = record(&[("tracking_number", "TRK-1"), ("carrier", "UPS")]);
        let enriched = enrich(&r, &PlaceholderResolver);
        let carrier = enriched.iter().find(|(n, _)| *n == "carrier").map(|(_, v)| v);
        assert_eq!(carrier, Some("UPS"));
    }

    #[test]
    fn empty_tracking_number_still_resolves() {
        let r = record(&[("tracking_number", "")]);
        let enriched = enrich(&r, &PlaceholderResolver);
        assert_eq!(enriched.recipient_name(), "Recipient for ");
    }

    #[test]
    fn missing_tracking_column_resolves_against_empty() {
        let r = record(&[("order_id", "9001")]);
        let enriched = enrich(&r, &PlaceholderResolver);
        assert_eq!(enriched.tracking_number(), "");
        assert_eq!(enriched.recipient_name(), "Recipient for ");
    }

    #[test]
    fn custom_resolver_is_used() {
        struct Fixed;
        impl TrackingResolver for Fixed {
            fn resolve(&self, tracking_number: &str) -> TrackingDetails {
                TrackingDetails {
                    tracking_number: tracking_number.to_string(),
                    status: "Out for Delivery".to_string(),
                    ..TrackingDetails::default()
                }
            }
        }

        let r = record(&[("tracking_number", "TRK-1")]);
        let enriched = enrich(&r, &Fixed);
        assert_eq!(enriched.status(), "Out for Delivery");
    }
}
