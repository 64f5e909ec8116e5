use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::season::Season;
use crate::errors::AppError;

const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Fruit {
    pub id: i32,
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A fruit together with its owner's name and the seasons it is in.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitDetail {
    #[serde(flatten)]
    pub fruit: Fruit,
    pub owner: Option<String>,
    pub seasons: Vec<Season>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFruit {
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
    pub user_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FruitChanges {
    pub name: String,
    pub color: String,
    pub ready_to_eat: bool,
    /// Season to associate with the fruit as part of the update.
    pub season_id: Option<i32>,
}

/// Raw fields of the new/edit fruit forms.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub ready_to_eat: Option<String>,
    pub user_id: Option<String>,
    pub season: Option<String>,
}

/// An HTML checkbox submits "on" when ticked and nothing otherwise.
pub fn ready_to_eat_from_checkbox(value: Option<&str>) -> bool {
    value == Some("on")
}

impl FruitForm {
    pub fn into_new_fruit(self) -> Result<NewFruit, AppError> {
        let (name, color) = validate_text(&self.name, &self.color)?;

        Ok(NewFruit {
            name,
            color,
            ready_to_eat: ready_to_eat_from_checkbox(self.ready_to_eat.as_deref()),
            user_id: parse_optional_id("userId", self.user_id.as_deref())?,
        })
    }

    pub fn into_changes(self) -> Result<FruitChanges, AppError> {
        let (name, color) = validate_text(&self.name, &self.color)?;

        Ok(FruitChanges {
            name,
            color,
            ready_to_eat: ready_to_eat_from_checkbox(self.ready_to_eat.as_deref()),
            season_id: parse_optional_id("season", self.season.as_deref())?,
        })
    }
}

fn validate_text(name: &str, color: &str) -> Result<(String, String), AppError> {
    let name = name.trim();
    let color = color.trim();

    if name.is_empty() {
        return Err(AppError::BadRequest("Fruit name is required".into()));
    }
    if name.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::BadRequest(format!(
            "Fruit name must be at most {} characters",
            MAX_TEXT_LEN
        )));
    }
    if color.chars().count() > MAX_TEXT_LEN {
        return Err(AppError::BadRequest(format!(
            "Fruit color must be at most {} characters",
            MAX_TEXT_LEN
        )));
    }

    Ok((name.to_string(), color.to_string()))
}

fn parse_optional_id(field: &str, raw: Option<&str>) -> Result<Option<i32>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| AppError::BadRequest(format!("Invalid {}: '{}'", field, value))),
    }
}
