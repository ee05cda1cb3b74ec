use chrono::NaiveDate;
use serde::Serialize;

use super::{ClientId, Quantities, UnitPrices, ValidationError};

pub type VisitId = i64;

/// One delivery to a client on a given day.
/// The subtotal is frozen when the visit is recorded; later price changes never touch it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub id: VisitId,
    /// Looked up, not owned: the client may have been deleted since.
    #[serde(rename = "clienteId")]
    pub client_id: ClientId,
    pub fardos: i64,
    pub botellones: i64,
    pub subtotal: f64,
    #[serde(rename = "nota")]
    pub note: Option<String>,
    /// Serialized as `YYYY-MM-DD`
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

impl Visit {
    /// Price a draft against the client's current prices.
    /// The id is assigned by the repository when the visit is stored.
    /// Fails when the subtotal is not a finite amount.
    pub fn priced(
        draft: &VisitDraft,
        prices: &UnitPrices,
        date: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let subtotal = prices.subtotal(&draft.quantities);
        if !subtotal.is_finite() {
            return Err(ValidationError::SubtotalOutOfRange { subtotal });
        }

        Ok(Self {
            id: 0,
            client_id: draft.client_id,
            fardos: draft.quantities.fardos,
            botellones: draft.quantities.botellones,
            subtotal,
            note: draft.note.clone(),
            date,
        })
    }
}

/// Input for recording a visit.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitDraft {
    pub client_id: ClientId,
    pub quantities: Quantities,
    pub note: Option<String>,
}

impl VisitDraft {
    pub fn new(client_id: ClientId, quantities: Quantities) -> Self {
        Self {
            client_id,
            quantities,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn normalized(self) -> Result<Self, ValidationError> {
        self.quantities.validate()?;
        Ok(Self {
            note: self
                .note
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            ..self
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_priced_computes_subtotal() {
        let draft = VisitDraft::new(1, Quantities::new(3, 2)).with_note("dejar en porteria");
        let visit =
            Visit::priced(&draft, &UnitPrices::new(10.0, 5.0), date("2024-05-02")).unwrap();

        assert_eq!(visit.client_id, 1);
        assert_eq!(visit.subtotal, 40.0);
        assert_eq!((visit.fardos, visit.botellones), (3, 2));
        assert_eq!(visit.note.as_deref(), Some("dejar en porteria"));
        assert_eq!(visit.date, date("2024-05-02"));
    }

    #[test]
    fn test_priced_rejects_overflowing_subtotal() {
        let draft = VisitDraft::new(1, Quantities::new(10, 0));
        let result = Visit::priced(&draft, &UnitPrices::new(1e308, 5.0), date("2024-05-02"));
        assert_eq!(
            result,
            Err(ValidationError::SubtotalOutOfRange {
                subtotal: f64::INFINITY
            })
        );
    }

    #[test]
    fn test_normalized_drops_blank_note() {
        let draft = VisitDraft::new(1, Quantities::new(1, 0))
            .with_note("  ")
            .normalized()
            .unwrap();
        assert_eq!(draft.note, None);
    }

    #[test]
    fn test_normalized_rejects_negative_quantities() {
        let result = VisitDraft::new(1, Quantities::new(-1, 0)).normalized();
        assert!(matches!(
            result,
            Err(ValidationError::NegativeQuantity { .. })
        ));
    }

    #[test]
    fn test_visit_wire_names() {
        let visit = Visit {
            id: 3,
            client_id: 9,
            fardos: 2,
            botellones: 1,
            subtotal: 25.0,
            note: None,
            date: date("2024-01-05"),
        };
        let json = serde_json::to_value(&visit).unwrap();
        assert_eq!(json["clienteId"], 9);
        assert_eq!(json["fecha"], "2024-01-05");
        assert_eq!(json["subtotal"], 25.0);
        assert!(json["nota"].is_null());
    }
}
