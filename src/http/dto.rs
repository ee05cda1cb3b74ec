//! Wire shapes for the JSON API.
//!
//! Front-ends built for this API post form values straight through, so
//! numeric fields arrive either as JSON numbers or as strings ("10", "2.5").
//! Both are accepted; a missing, null or blank value counts as zero.
//! Text fields such as `telefono` may likewise arrive as bare numbers.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::domain::{ClientId, NewClient, Quantities, UnitPrices, VisitDraft};

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub sqlite: bool,
}

/// Body of `POST /clientes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub telefono: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub direccion: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precio_fardo: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub precio_botellon: f64,
}

impl From<CreateClientRequest> for NewClient {
    fn from(req: CreateClientRequest) -> Self {
        NewClient {
            name: req.nombre.unwrap_or_default(),
            phone: req.telefono,
            address: req.direccion,
            prices: UnitPrices::new(req.precio_fardo, req.precio_botellon),
        }
    }
}

/// Body of `POST /visitas`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    pub cliente_id: Option<ClientId>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub fardos: i64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub botellones: i64,
    #[serde(default)]
    pub nota: Option<String>,
}

impl CreateVisitRequest {
    /// `None` when no client was referenced.
    pub fn into_draft(self) -> Option<VisitDraft> {
        let client_id = self.cliente_id?;
        Some(VisitDraft {
            client_id,
            quantities: Quantities::new(self.fardos, self.botellones),
            note: self.nota,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(NumberOrText::Int(n)) => Ok(n as f64),
        Some(NumberOrText::Float(n)) => Ok(n),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(0.0),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| de::Error::custom(format!("not a number: {:?}", s))),
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_whole(Option::<NumberOrText>::deserialize(deserializer)?)?.unwrap_or(0))
}

/// Text that may have been sent as a JSON number (a phone typed into a numeric field).
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrText::Int(n)) => Some(n.to_string()),
        Some(NumberOrText::Float(n)) => Some(n.to_string()),
        Some(NumberOrText::Text(s)) => Some(s),
    })
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<ClientId>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_whole(Option::<NumberOrText>::deserialize(deserializer)?)
}

fn lenient_whole<E: de::Error>(value: Option<NumberOrText>) -> Result<Option<i64>, E> {
    let float = match value {
        None => return Ok(None),
        Some(NumberOrText::Int(n)) => return Ok(Some(n)),
        Some(NumberOrText::Float(n)) => n,
        Some(NumberOrText::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Some(n));
            }
            s.parse::<f64>()
                .map_err(|_| E::custom(format!("not a whole number: {:?}", s)))?
        }
    };

    if float.is_finite() && float.fract() == 0.0 && float.abs() < i64::MAX as f64 {
        Ok(Some(float as i64))
    } else {
        Err(E::custom(format!("not a whole number: {}", float)))
    }
}
