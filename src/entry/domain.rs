//! Shared domain types for income and outcome records.

use serde::{Deserialize, Serialize};
use time::{Date, Month, util::days_in_year_month};

use crate::{
    Error,
    database_id::DatabaseId,
    endpoints::{self, EntryEndpoints},
};

/// Selects which of the two structurally identical record tables an
/// operation runs against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryTable {
    /// Money received.
    Income,
    /// Money spent.
    Outcome,
}

impl EntryTable {
    /// The SQL name of the table.
    pub fn table_name(self) -> &'static str {
        match self {
            EntryTable::Income => "income",
            EntryTable::Outcome => "outcome",
        }
    }

    /// The routes that serve this table.
    pub fn endpoints(self) -> &'static EntryEndpoints {
        match self {
            EntryTable::Income => &endpoints::INCOMES,
            EntryTable::Outcome => &endpoints::OUTCOMES,
        }
    }
}

/// A validated monetary amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Amount(f64);

impl Amount {
    /// The smallest accepted amount.
    pub const MIN: f64 = 0.01;
    /// The largest accepted amount.
    pub const MAX: f64 = 1_000_000.0;

    /// Create an amount.
    ///
    /// # Errors
    /// Returns [Error::AmountOutOfRange] if `amount` is not between
    /// [Amount::MIN] and [Amount::MAX] (inclusive). NaN is rejected.
    pub fn new(amount: f64) -> Result<Self, Error> {
        if !(Self::MIN..=Self::MAX).contains(&amount) {
            return Err(Error::AmountOutOfRange(amount));
        }

        Ok(Self(amount))
    }

    /// Create an amount without validation.
    ///
    /// The caller should ensure the value is within [Amount::MIN] and
    /// [Amount::MAX].
    pub fn new_unchecked(amount: f64) -> Self {
        Self(amount)
    }

    /// The amount as a plain float.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

/// The fields of an income or outcome record without its ID.
#[derive(Clone, Debug, PartialEq)]
pub struct NewEntry {
    /// The source the record is attributed to.
    pub source_id: DatabaseId,
    /// The amount of money received or spent.
    pub amount: Amount,
    /// The date the money was received or spent.
    pub date_received: Date,
}

/// The request body for creating or replacing an income or outcome record.
///
/// Relationships are set by ID only, the body never embeds a source object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryData {
    /// The record ID. Ignored on create, must match the path ID on update.
    #[serde(default)]
    pub id: DatabaseId,
    /// The ID of the source the record is attributed to.
    pub source_id: DatabaseId,
    /// The amount of money received or spent.
    pub amount: f64,
    /// The date the money was received or spent.
    pub date_received: Date,
}

impl EntryData {
    /// Validate the client-supplied fields into a [NewEntry].
    ///
    /// # Errors
    /// Returns an error if the amount is outside the accepted range.
    pub fn to_new_entry(&self) -> Result<NewEntry, Error> {
        Ok(NewEntry {
            source_id: self.source_id,
            amount: Amount::new(self.amount)?,
            date_received: self.date_received,
        })
    }
}

/// An income or outcome record joined with the name of its source.
///
/// This is the only read shape the API exposes, flattening the source into
/// an ID/name pair instead of nesting it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    /// The record's ID in the database.
    pub id: DatabaseId,
    /// The ID of the source the record is attributed to.
    pub source_id: DatabaseId,
    /// The display name of the source.
    pub source_name: String,
    /// The amount of money received or spent.
    pub amount: f64,
    /// The date the money was received or spent.
    pub date_received: Date,
}

/// An inclusive range of dates used to filter aggregation queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    /// First date in the range (inclusive).
    pub start: Date,
    /// Last date in the range (inclusive).
    pub end: Date,
}

impl DateRange {
    /// Check that the range runs forwards.
    ///
    /// # Errors
    /// Returns [Error::InvalidDateRange] if the start date comes after the
    /// end date.
    pub fn validate(&self) -> Result<(), Error> {
        if self.start > self.end {
            return Err(Error::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }

        Ok(())
    }

    /// The range covering one calendar month.
    ///
    /// # Errors
    /// Returns [Error::InvalidMonth] for month numbers outside 1-12 and
    /// [Error::InvalidDate] for years outside the supported calendar range.
    pub fn month(year: i32, month: u8) -> Result<Self, Error> {
        let month = Month::try_from(month).map_err(|_| Error::InvalidMonth(month))?;

        let start = Date::from_calendar_date(year, month, 1).map_err(|_| Error::InvalidDate)?;
        let end = Date::from_calendar_date(year, month, days_in_year_month(year, month))
            .map_err(|_| Error::InvalidDate)?;

        Ok(Self { start, end })
    }

    /// The range covering one calendar year.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] for years outside the supported calendar
    /// range.
    pub fn year(year: i32) -> Result<Self, Error> {
        let start =
            Date::from_calendar_date(year, Month::January, 1).map_err(|_| Error::InvalidDate)?;
        let end =
            Date::from_calendar_date(year, Month::December, 31).map_err(|_| Error::InvalidDate)?;

        Ok(Self { start, end })
    }
}
