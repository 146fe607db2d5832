use crate::error::ApiError;
use chrono::NaiveDate;
use common::parse_date_input;
use model::entities::exercise;
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Select};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Raw query string of the log endpoint. All parameters are optional and an
/// empty value counts as absent.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    /// Earliest date to include, inclusive (YYYY-MM-DD)
    pub from: Option<String>,
    /// Latest date to include, inclusive (YYYY-MM-DD)
    pub to: Option<String>,
    /// Maximum number of entries to return
    pub limit: Option<String>,
}

/// Which exercises of a single user a log request selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFilter {
    pub user_id: i32,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u64>,
}

impl LogFilter {
    pub fn for_user(user_id: i32) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
        }
    }

    /// Parse the optional bounds of a log request.
    pub fn from_query(user_id: i32, query: &LogQuery) -> Result<Self, ApiError> {
        let from = present(&query.from).map(parse_date_input).transpose()?;
        let to = present(&query.to).map(parse_date_input).transpose()?;
        let limit = present(&query.limit).map(parse_limit).transpose()?;

        Ok(Self {
            from,
            to,
            limit,
            ..Self::for_user(user_id)
        })
    }

    /// Row predicate: owned by the user and inside the inclusive date range.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all().add(exercise::Column::UserId.eq(self.user_id));
        if let Some(from) = self.from {
            condition = condition.add(exercise::Column::Date.gte(from));
        }
        if let Some(to) = self.to {
            condition = condition.add(exercise::Column::Date.lte(to));
        }
        condition
    }

    /// The full select, oldest exercise first. Ties on the same day keep
    /// insertion order.
    pub fn select(&self) -> Select<exercise::Entity> {
        let select = exercise::Entity::find()
            .filter(self.condition())
            .order_by_asc(exercise::Column::Date)
            .order_by_asc(exercise::Column::Id);

        match self.limit {
            Some(limit) => select.limit(limit),
            None => select,
        }
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn parse_limit(raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(ApiError::bad_request(format!(
            "invalid limit '{}', expected a positive integer",
            raw
        ))),
    }
}
