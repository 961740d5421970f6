//! Domain types shared by storage and the HTTP layer.
//!
//! JSON shapes use camelCase fields and SCREAMING_SNAKE_CASE enum values,
//! which is what the front end consumes.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Declares a closed set of textual values that round-trips through JSON
/// and SQLite as the same string.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(#[serde(rename = $text)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::model::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err($crate::model::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl rusqlite::types::ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<rusqlite::types::ToSqlOutput<'_>> {
                Ok(rusqlite::types::ToSqlOutput::from(self.as_str()))
            }
        }

        impl rusqlite::types::FromSql for $name {
            fn column_result(
                value: rusqlite::types::ValueRef<'_>,
            ) -> rusqlite::types::FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| rusqlite::types::FromSqlError::Other(Box::new(e)))
            }
        }
    };
}

pub mod aviso;
pub mod chamado;
pub mod condominio;
pub mod dashboard;
pub mod documento;
pub mod encomenda;
pub mod evento;
pub mod prestador;
pub mod reserva;

/// A textual value outside an enum's closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("valor inválido para {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Just the display name of a related row (`{ "nome": ... }`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NomeRef {
    pub nome: String,
}

/// Deserializes a field that distinguishes "absent" from "explicit null".
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: absent leaves the column alone, `null` clears it.
pub fn nullable<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// A timestamp accepted from clients as RFC 3339 or a bare `YYYY-MM-DD`
/// (midnight UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientDateTime(pub DateTime<Utc>);

impl LenientDateTime {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|date| Self(date.and_time(NaiveTime::MIN).and_utc()))
    }
}

impl<'de> Deserialize<'de> for LenientDateTime {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(de)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(InvalidDate(raw)))
    }
}

/// A calendar date accepted as `YYYY-MM-DD` or a full RFC 3339 timestamp
/// (its UTC date is kept).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LenientDate(pub NaiveDate);

impl LenientDate {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(Self(date));
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc).date_naive()))
    }
}

impl<'de> Deserialize<'de> for LenientDate {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(de)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(InvalidDate(raw)))
    }
}

struct InvalidDate(String);

impl fmt::Display for InvalidDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data inválida: {}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    text_enum!(Cor {
        Verde => "VERDE",
        Azul => "AZUL_CLARO",
    });

    #[test]
    fn text_enum_round_trips_strings() {
        assert_eq!(Cor::Azul.as_str(), "AZUL_CLARO");
        assert_eq!("VERDE".parse::<Cor>().unwrap(), Cor::Verde);
        assert_eq!(Cor::ALL.len(), 2);
    }

    #[test]
    fn text_enum_rejects_unknown() {
        let err = "verde".parse::<Cor>().unwrap_err();
        assert_eq!(err.kind, "Cor");
        assert!(err.to_string().contains("verde"));
    }

    #[test]
    fn text_enum_json_uses_text() {
        assert_eq!(serde_json::to_string(&Cor::Azul).unwrap(), "\"AZUL_CLARO\"");
        let cor: Cor = serde_json::from_str("\"VERDE\"").unwrap();
        assert_eq!(cor, Cor::Verde);
    }

    #[test]
    fn lenient_datetime_accepts_date_only() {
        let dt = LenientDateTime::parse("2025-01-03").unwrap();
        assert_eq!(dt.0.to_rfc3339(), "2025-01-03T00:00:00+00:00");
    }

    #[test]
    fn lenient_datetime_normalizes_offset() {
        let dt = LenientDateTime::parse("2025-01-03T19:00:00-03:00").unwrap();
        assert_eq!(dt.0.to_rfc3339(), "2025-01-03T22:00:00+00:00");
    }

    #[test]
    fn lenient_datetime_rejects_garbage() {
        assert!(LenientDateTime::parse("amanhã").is_none());
        let err = serde_json::from_str::<LenientDateTime>("\"03/01/2025\"").unwrap_err();
        assert!(err.to_string().contains("data inválida"));
    }

    #[test]
    fn lenient_date_keeps_utc_day() {
        let d = LenientDate::parse("2025-02-10T23:30:00-03:00").unwrap();
        assert_eq!(d.0, NaiveDate::from_ymd_opt(2025, 2, 11).unwrap());
        assert_eq!(
            LenientDate::parse("2025-02-10").unwrap().0,
            NaiveDate::from_ymd_opt(2025, 2, 10).unwrap()
        );
    }

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "nullable")]
        campo: Option<Option<i64>>,
    }

    #[test]
    fn nullable_distinguishes_absent_and_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.campo, None);
        let null: Patch = serde_json::from_str(r#"{"campo":null}"#).unwrap();
        assert_eq!(null.campo, Some(None));
        let set: Patch = serde_json::from_str(r#"{"campo":7}"#).unwrap();
        assert_eq!(set.campo, Some(Some(7)));
    }
}
