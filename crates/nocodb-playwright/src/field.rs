// Field input values for the expanded form
//
// Each column type is filled through a different widget. `FieldInput`
// carries a value already shaped for its widget so malformed input fails
// before any browser interaction happens.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4}-\d{2}-\d{2})[ T](\d{2}):(\d{2})").expect("date-time pattern is valid")
});

/// Latitude/longitude pair as typed into the geodata popover.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPoint {
    pub latitude: String,
    pub longitude: String,
}

impl GeoPoint {
    /// Parses `"lat,long"`.
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.split(',').map(str::trim);
        let (Some(latitude), Some(longitude), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::invalid_field(
                "geodata",
                value,
                "expected 'latitude,longitude'",
            ));
        };

        for (name, coordinate, limit) in [("latitude", latitude, 90.0), ("longitude", longitude, 180.0)]
        {
            let parsed: f64 = coordinate.parse().map_err(|_| {
                Error::invalid_field("geodata", value, format!("{} is not a number", name))
            })?;
            if !(-limit..=limit).contains(&parsed) {
                return Err(Error::invalid_field(
                    "geodata",
                    value,
                    format!("{} out of range", name),
                ));
            }
        }

        Ok(Self {
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        })
    }
}

/// Date and time as picked in the date-time cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeInput {
    /// `YYYY-MM-DD`, matching the calendar cell titles.
    pub date: String,
    pub hour: u8,
    pub minute: u8,
}

impl DateTimeInput {
    /// Parses `"YYYY-MM-DD HH:mm"`. A `T` separator and trailing seconds or
    /// offset are accepted and ignored.
    pub fn parse(value: &str) -> Result<Self> {
        let captures = DATE_TIME.captures(value).ok_or_else(|| {
            Error::invalid_field("dateTime", value, "expected 'YYYY-MM-DD HH:mm'")
        })?;

        let hour: u8 = captures[2]
            .parse()
            .map_err(|_| Error::invalid_field("dateTime", value, "invalid hour"))?;
        let minute: u8 = captures[3]
            .parse()
            .map_err(|_| Error::invalid_field("dateTime", value, "invalid minute"))?;

        if hour > 23 {
            return Err(Error::invalid_field("dateTime", value, "hour out of range"));
        }
        if minute > 59 {
            return Err(Error::invalid_field("dateTime", value, "minute out of range"));
        }

        Ok(Self {
            date: captures[1].to_string(),
            hour,
            minute,
        })
    }
}

/// A value to enter into one expanded-form field, tagged by widget type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Plain text input.
    Text(String),
    /// Geodata popover with latitude/longitude inputs.
    GeoData(GeoPoint),
    /// Link a single parent record by its display value.
    BelongsTo(String),
    /// Link a child record through the child list.
    HasMany(String),
    /// Link a record through the many-to-many child list.
    ManyToMany(String),
    /// Date and time picker.
    DateTime(DateTimeInput),
}

impl FieldInput {
    /// Builds an input from a field type name and its raw string value.
    ///
    /// Type names follow the application's column types: `text`, `geodata`,
    /// `belongsTo`, `hasMany`, `manyToMany`, `dateTime`.
    pub fn parse(field_type: &str, value: &str) -> Result<Self> {
        match field_type {
            "text" => Ok(FieldInput::Text(value.to_string())),
            "geodata" => GeoPoint::parse(value).map(FieldInput::GeoData),
            "belongsTo" => Ok(FieldInput::BelongsTo(value.to_string())),
            "hasMany" => Ok(FieldInput::HasMany(value.to_string())),
            "manyToMany" => Ok(FieldInput::ManyToMany(value.to_string())),
            "dateTime" => DateTimeInput::parse(value).map(FieldInput::DateTime),
            other => Err(Error::UnknownFieldType(other.to_string())),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldInput::Text(value.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldInput::Text(_) => "text",
            FieldInput::GeoData(_) => "geodata",
            FieldInput::BelongsTo(_) => "belongsTo",
            FieldInput::HasMany(_) => "hasMany",
            FieldInput::ManyToMany(_) => "manyToMany",
            FieldInput::DateTime(_) => "dateTime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_parse() {
        let point = GeoPoint::parse("50.4501, 30.5234").unwrap();
        assert_eq!(point.latitude, "50.4501");
        assert_eq!(point.longitude, "30.5234");
    }

    #[test]
    fn test_geo_point_rejects_malformed() {
        assert!(GeoPoint::parse("50.4501").is_err());
        assert!(GeoPoint::parse("1,2,3").is_err());
        assert!(GeoPoint::parse("north,30").is_err());
        assert!(GeoPoint::parse("91,30").is_err());
        assert!(GeoPoint::parse("10,-181").is_err());
    }

    #[test]
    fn test_date_time_parse() {
        let dt = DateTimeInput::parse("2022-12-12 10:30").unwrap();
        assert_eq!(dt.date, "2022-12-12");
        assert_eq!(dt.hour, 10);
        assert_eq!(dt.minute, 30);

        let iso = DateTimeInput::parse("2023-01-02T07:05:00+00:00").unwrap();
        assert_eq!(iso.date, "2023-01-02");
        assert_eq!(iso.hour, 7);
        assert_eq!(iso.minute, 5);
    }

    #[test]
    fn test_date_time_rejects_out_of_range() {
        assert!(DateTimeInput::parse("2022-12-12").is_err());
        assert!(DateTimeInput::parse("2022-12-12 24:00").is_err());
        assert!(DateTimeInput::parse("2022-12-12 10:60").is_err());
        assert!(DateTimeInput::parse("12/12/2022 10:30").is_err());
    }

    #[test]
    fn test_field_input_parse_by_type_name() {
        assert_eq!(
            FieldInput::parse("text", "Afghanistan").unwrap(),
            FieldInput::Text("Afghanistan".to_string())
        );
        assert_eq!(
            FieldInput::parse("hasMany", "Kabul").unwrap(),
            FieldInput::HasMany("Kabul".to_string())
        );
        assert!(matches!(
            FieldInput::parse("dateTime", "2022-12-12 10:30").unwrap(),
            FieldInput::DateTime(_)
        ));

        let err = FieldInput::parse("rating", "5").unwrap_err();
        assert!(matches!(err, Error::UnknownFieldType(ref t) if t == "rating"));
    }

    #[test]
    fn test_type_name_round_trips_through_parse() {
        let input = FieldInput::parse("manyToMany", "Actor 1").unwrap();
        assert_eq!(input.type_name(), "manyToMany");
    }
}
