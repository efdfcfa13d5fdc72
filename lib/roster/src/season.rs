//! Seasons.

use chrono::{DateTime, NaiveDate, Utc};
use league_portal_core::SeasonId;
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, non_blank};

/// A stored season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: SeasonId,
    /// Unique display label.
    pub name: String,
    /// Sort position in listings.
    pub display_order: i32,
    /// At most one season league-wide has this set.
    pub is_current: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Season {
    /// Builds the row for a validated creation request.
    #[must_use]
    pub fn new(new_season: NewSeason) -> Self {
        let now = Utc::now();
        Self {
            id: SeasonId::new(),
            name: new_season.name,
            display_order: new_season.display_order,
            is_current: new_season.is_current,
            start_date: new_season.start_date,
            end_date: new_season.end_date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies validated changes in place.
    pub fn apply(&mut self, changes: &SeasonChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(display_order) = changes.display_order {
            self.display_order = display_order;
        }
        if let Some(is_current) = changes.is_current {
            self.is_current = is_current;
        }
        if let Some(start_date) = changes.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            self.end_date = end_date;
        }
        self.updated_at = Utc::now();
    }
}

fn check_date_order(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new(
            "endDate",
            "End date cannot be before start date",
        )),
        _ => Ok(()),
    }
}

/// Body of `POST /seasons`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub is_current: Option<bool>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// A validated season creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSeason {
    pub name: String,
    pub display_order: i32,
    pub is_current: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl CreateSeasonRequest {
    /// Validates the request. `isCurrent` defaults to false.
    ///
    /// # Errors
    ///
    /// Fails when the name is blank, the display order is missing, or the
    /// end date precedes the start date.
    pub fn validate(self) -> Result<NewSeason, ValidationError> {
        let name = non_blank(self.name)
            .ok_or_else(|| ValidationError::new("name", "Season name is required"))?;
        let display_order = self
            .display_order
            .ok_or_else(|| ValidationError::new("displayOrder", "Display order is required"))?;
        check_date_order(self.start_date, self.end_date)?;

        Ok(NewSeason {
            name,
            display_order,
            is_current: self.is_current.unwrap_or(false),
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Body of `PATCH /seasons/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSeasonRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub is_current: Option<bool>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

/// Validated changes to a season.
///
/// For the date fields `None` leaves the column alone and `Some(None)`
/// writes null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeasonChanges {
    pub name: Option<String>,
    pub display_order: Option<i32>,
    pub is_current: Option<bool>,
    pub start_date: Option<Option<NaiveDate>>,
    pub end_date: Option<Option<NaiveDate>>,
}

impl SeasonChanges {
    /// Changes that only flip the current flag.
    #[must_use]
    pub fn current_flag(is_current: bool) -> Self {
        Self {
            is_current: Some(is_current),
            ..Default::default()
        }
    }
}

impl UpdateSeasonRequest {
    /// Validates the request.
    ///
    /// Dates missing from the body are written as null, so a partial update
    /// never leaves an earlier date in place by accident.
    ///
    /// # Errors
    ///
    /// Fails when a present name is blank or the dates are out of order.
    pub fn validate(self) -> Result<SeasonChanges, ValidationError> {
        let name = match self.name {
            Some(name) => Some(
                non_blank(Some(name))
                    .ok_or_else(|| ValidationError::new("name", "Season name cannot be empty"))?,
            ),
            None => None,
        };
        check_date_order(self.start_date, self.end_date)?;

        Ok(SeasonChanges {
            name,
            display_order: self.display_order,
            is_current: self.is_current,
            start_date: Some(self.start_date),
            end_date: Some(self.end_date),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn create_requires_name_and_display_order() {
        let err = CreateSeasonRequest {
            display_order: Some(1),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "name");

        let err = CreateSeasonRequest {
            name: Some("Season 4".to_string()),
            is_current: Some(true),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "displayOrder");
        assert_eq!(err.message, "Display order is required");
    }

    #[test]
    fn create_defaults_is_current_to_false() {
        let new_season = CreateSeasonRequest {
            name: Some(" Season 4 ".to_string()),
            display_order: Some(4),
            ..Default::default()
        }
        .validate()
        .expect("valid");
        assert_eq!(new_season.name, "Season 4");
        assert!(!new_season.is_current);
    }

    #[test]
    fn create_rejects_reversed_dates() {
        let err = CreateSeasonRequest {
            name: Some("S".to_string()),
            display_order: Some(1),
            start_date: Some(date(2025, 3, 1)),
            end_date: Some(date(2025, 1, 1)),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field, "endDate");
    }

    #[test]
    fn update_normalizes_missing_dates_to_null() {
        let changes = UpdateSeasonRequest {
            is_current: Some(true),
            ..Default::default()
        }
        .validate()
        .expect("valid");
        assert_eq!(changes.start_date, Some(None));
        assert_eq!(changes.end_date, Some(None));
        assert_eq!(changes.name, None);
    }

    #[test]
    fn current_flag_leaves_dates_alone() {
        let changes = SeasonChanges::current_flag(true);
        assert_eq!(changes.start_date, None);
        assert_eq!(changes.end_date, None);
    }

    #[test]
    fn apply_updates_given_fields() {
        let mut season = Season::new(NewSeason {
            name: "S1".to_string(),
            display_order: 1,
            is_current: false,
            start_date: Some(date(2024, 1, 1)),
            end_date: None,
        });
        season.apply(&SeasonChanges {
            display_order: Some(7),
            start_date: Some(None),
            ..Default::default()
        });
        assert_eq!(season.display_order, 7);
        assert_eq!(season.start_date, None);
        assert_eq!(season.name, "S1");
    }

    #[test]
    fn request_parses_wire_names() {
        let request: CreateSeasonRequest = serde_json::from_str(
            r#"{"name":"Season 4","displayOrder":4,"isCurrent":true,"startDate":"2025-01-06"}"#,
        )
        .expect("parse");
        let new_season = request.validate().expect("valid");
        assert!(new_season.is_current);
        assert_eq!(new_season.start_date, Some(date(2025, 1, 6)));
    }
}
