//! Request types and validation for the ship endpoints.
//!
//! Wire shapes keep every field optional so a missing field becomes a 400
//! Problem with a precise message instead of a generic deserialization error.
//! Each type converts into the matching `shipyard-lib` input only after its
//! fields pass the range checks below.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use shipyard_lib::ship::{
    prod_year, CREW_SIZE_MAX, CREW_SIZE_MIN, NAME_MAX_LEN, PROD_YEAR_MAX, PROD_YEAR_MIN,
    SPEED_MAX, SPEED_MIN,
};
use shipyard_lib::{PageRequest, ShipDraft, ShipFilter, ShipId, ShipOrder, ShipPatch, ShipType};

use crate::ProblemDetails;

/// Validation trait for request types.
///
/// Implementations should validate all fields and return a `ProblemDetails`
/// error for invalid input.
pub trait Validate {
    /// Validate the request, returning an error if invalid.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`.
    ///
    /// Returns a boxed `ProblemDetails` to avoid large `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

fn invalid(detail: impl Into<String>, request_id: &str) -> Box<ProblemDetails> {
    Box::new(ProblemDetails::bad_request(detail, request_id))
}

fn required<T>(value: Option<T>, field: &str, request_id: &str) -> Result<T, Box<ProblemDetails>> {
    value.ok_or_else(|| invalid(format!("The '{}' field is required", field), request_id))
}

fn check_text(value: &str, field: &str, request_id: &str) -> Result<(), Box<ProblemDetails>> {
    if value.is_empty() {
        return Err(invalid(
            format!("The '{}' field cannot be empty", field),
            request_id,
        ));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(invalid(
            format!(
                "The '{}' field cannot exceed {} characters",
                field, NAME_MAX_LEN
            ),
            request_id,
        ));
    }
    Ok(())
}

fn parse_ship_type(value: &str, request_id: &str) -> Result<ShipType, Box<ProblemDetails>> {
    value
        .parse()
        .map_err(|e: shipyard_lib::Error| invalid(e.to_string(), request_id))
}

fn parse_millis(
    millis: i64,
    field: &str,
    request_id: &str,
) -> Result<DateTime<Utc>, Box<ProblemDetails>> {
    DateTime::<Utc>::from_timestamp_millis(millis).ok_or_else(|| {
        invalid(
            format!("The '{}' field is not a representable timestamp", field),
            request_id,
        )
    })
}

fn parse_prod_date(millis: i64, request_id: &str) -> Result<DateTime<Utc>, Box<ProblemDetails>> {
    let prod_date = parse_millis(millis, "prodDate", request_id)?;
    let year = prod_year(&prod_date);
    if !(PROD_YEAR_MIN..=PROD_YEAR_MAX).contains(&year) {
        return Err(invalid(
            format!(
                "The 'prodDate' year must be between {} and {}, got {}",
                PROD_YEAR_MIN, PROD_YEAR_MAX, year
            ),
            request_id,
        ));
    }
    Ok(prod_date)
}

fn check_speed(speed: f64, request_id: &str) -> Result<f64, Box<ProblemDetails>> {
    if !(SPEED_MIN..=SPEED_MAX).contains(&speed) {
        return Err(invalid(
            format!(
                "The 'speed' field must be between {} and {}",
                SPEED_MIN, SPEED_MAX
            ),
            request_id,
        ));
    }
    Ok(speed)
}

fn check_crew_size(crew_size: i64, request_id: &str) -> Result<i32, Box<ProblemDetails>> {
    i32::try_from(crew_size)
        .ok()
        .filter(|size| (CREW_SIZE_MIN..=CREW_SIZE_MAX).contains(size))
        .ok_or_else(|| {
            invalid(
                format!(
                    "The 'crewSize' field must be between {} and {}",
                    CREW_SIZE_MIN, CREW_SIZE_MAX
                ),
                request_id,
            )
        })
}

/// Parse a path segment as a ship id. Only positive integers are ids.
pub fn parse_ship_id(raw: &str, request_id: &str) -> Result<ShipId, Box<ProblemDetails>> {
    raw.parse::<ShipId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            invalid(
                format!("Ship id must be a positive integer, got '{}'", raw),
                request_id,
            )
        })
}

/// Body of `POST /rest/ships`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipRequest {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    /// Epoch milliseconds.
    pub prod_date: Option<i64>,
    /// Defaults to `false` when omitted.
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i64>,
}

impl CreateShipRequest {
    /// Validate every field and build the catalog input.
    pub fn to_draft(&self, request_id: &str) -> Result<ShipDraft, Box<ProblemDetails>> {
        let name = required(self.name.as_deref(), "name", request_id)?;
        check_text(name, "name", request_id)?;

        let planet = required(self.planet.as_deref(), "planet", request_id)?;
        check_text(planet, "planet", request_id)?;

        let ship_type = parse_ship_type(
            required(self.ship_type.as_deref(), "shipType", request_id)?,
            request_id,
        )?;
        let prod_date = parse_prod_date(
            required(self.prod_date, "prodDate", request_id)?,
            request_id,
        )?;
        let speed = check_speed(required(self.speed, "speed", request_id)?, request_id)?;
        let crew_size =
            check_crew_size(required(self.crew_size, "crewSize", request_id)?, request_id)?;

        Ok(ShipDraft {
            name: name.to_string(),
            planet: planet.to_string(),
            ship_type,
            prod_date,
            is_used: self.is_used,
            speed,
            crew_size,
        })
    }
}

impl Validate for CreateShipRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.to_draft(request_id).map(drop)
    }
}

/// Body of `POST /rest/ships/{id}`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShipRequest {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    /// Epoch milliseconds.
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i64>,
}

impl UpdateShipRequest {
    /// Validate the present fields and build the catalog patch.
    pub fn to_patch(&self, request_id: &str) -> Result<ShipPatch, Box<ProblemDetails>> {
        if let Some(name) = &self.name {
            check_text(name, "name", request_id)?;
        }
        if let Some(planet) = &self.planet {
            check_text(planet, "planet", request_id)?;
        }

        Ok(ShipPatch {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: self
                .ship_type
                .as_deref()
                .map(|ty| parse_ship_type(ty, request_id))
                .transpose()?,
            prod_date: self
                .prod_date
                .map(|millis| parse_prod_date(millis, request_id))
                .transpose()?,
            is_used: self.is_used,
            speed: self
                .speed
                .map(|speed| check_speed(speed, request_id))
                .transpose()?,
            crew_size: self
                .crew_size
                .map(|size| check_crew_size(size, request_id))
                .transpose()?,
        })
    }
}

impl Validate for UpdateShipRequest {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.to_patch(request_id).map(drop)
    }
}

/// Query string of `GET /rest/ships` and `GET /rest/ships/count`.
///
/// The count endpoint accepts the paging fields and ignores them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipQueryParams {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    /// Epoch milliseconds, inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub after: Option<i64>,
    /// Epoch milliseconds, inclusive.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub before: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub is_used: Option<bool>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_speed: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_speed: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_crew_size: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_crew_size: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_rating: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_rating: Option<f64>,
    pub order: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_number: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page_size: Option<i64>,
}

/// An empty or blank query value means the parameter is absent.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => raw.parse().map(Some).map_err(de::Error::custom),
        _ => Ok(None),
    }
}

/// Blank enum parameters are treated as absent.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn non_negative(
    value: Option<i64>,
    field: &str,
    request_id: &str,
) -> Result<Option<u64>, Box<ProblemDetails>> {
    value
        .map(|v| {
            u64::try_from(v).map_err(|_| {
                invalid(
                    format!("The '{}' parameter cannot be negative", field),
                    request_id,
                )
            })
        })
        .transpose()
}

impl ShipQueryParams {
    pub fn to_filter(&self, request_id: &str) -> Result<ShipFilter, Box<ProblemDetails>> {
        Ok(ShipFilter {
            name: self.name.clone(),
            planet: self.planet.clone(),
            ship_type: non_blank(&self.ship_type)
                .map(|ty| parse_ship_type(ty, request_id))
                .transpose()?,
            after: self
                .after
                .map(|millis| parse_millis(millis, "after", request_id))
                .transpose()?,
            before: self
                .before
                .map(|millis| parse_millis(millis, "before", request_id))
                .transpose()?,
            is_used: self.is_used,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            min_crew_size: self.min_crew_size,
            max_crew_size: self.max_crew_size,
            min_rating: self.min_rating,
            max_rating: self.max_rating,
        })
    }

    /// Paging and ordering, with `default_page_size` for an absent `pageSize`.
    pub fn to_page_request(
        &self,
        default_page_size: u64,
        request_id: &str,
    ) -> Result<PageRequest, Box<ProblemDetails>> {
        let order = non_blank(&self.order)
            .map(|order| {
                order
                    .parse::<ShipOrder>()
                    .map_err(|e| invalid(e.to_string(), request_id))
            })
            .transpose()?
            .unwrap_or_default();
        let page_number = non_negative(self.page_number, "pageNumber", request_id)?;
        let page_size = non_negative(self.page_size, "pageSize", request_id)?;

        let defaults = PageRequest::default();
        Ok(PageRequest::new(
            page_number.unwrap_or(defaults.page_number),
            page_size.unwrap_or(default_page_size),
            order,
        ))
    }
}

impl Validate for ShipQueryParams {
    fn validate(&self, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        self.to_filter(request_id)?;
        self.to_page_request(PageRequest::default().page_size, request_id)
            .map(drop)
    }
}
