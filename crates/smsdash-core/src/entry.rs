//! Validation for the "add a day" form: a date, optional manual totals, and
//! the SMS messages sent that day.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;

use crate::CoreError;

/// Decimal places kept for money columns (`NUMERIC(12, 2)`).
const AMOUNT_SCALE: u32 = 2;
/// Decimal places kept for click rates (`NUMERIC(6, 4)`).
const RATE_SCALE: u32 = 4;

/// Largest value a `NUMERIC(12, 2)` column holds.
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, AMOUNT_SCALE)
}

/// Raw message input as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageEntryForm {
    pub content: String,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub click_rate: Option<Decimal>,
    pub num_sent: i32,
    #[serde(default)]
    pub est_cost: Option<Decimal>,
}

/// Raw day input as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyEntryForm {
    pub date: String,
    #[serde(default)]
    pub sms_cost: Option<Decimal>,
    #[serde(default)]
    pub revenue: Option<Decimal>,
    #[serde(default)]
    pub messages: Vec<MessageEntryForm>,
}

/// A message ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEntry {
    pub content: String,
    pub link_url: Option<String>,
    pub click_rate: Option<Decimal>,
    pub num_sent: i32,
    pub est_cost: Decimal,
}

/// A day ready to insert, with defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub sms_cost: Decimal,
    pub revenue: Decimal,
    pub messages: Vec<MessageEntry>,
}

impl DailyEntryForm {
    /// Validate the form and resolve defaults.
    ///
    /// Amounts are rounded to cents and click rates to four places, half
    /// away from zero, matching how the store rounds them. When `sms_cost`
    /// is omitted it becomes the sum of the rounded message costs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] naming the first offending field.
    pub fn validate(self) -> Result<DailyEntry, CoreError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| {
            CoreError::validation("date", format!("expected YYYY-MM-DD, got '{}'", self.date))
        })?;

        let revenue = amount("revenue", self.revenue)?;
        let sms_cost = amount("sms_cost", self.sms_cost)?;

        let messages = self
            .messages
            .into_iter()
            .enumerate()
            .map(|(index, message)| message.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        let sms_cost = match sms_cost {
            Some(cost) => cost,
            None => {
                let total: Decimal = messages.iter().map(|m| m.est_cost).sum();
                if total > max_amount() {
                    return Err(CoreError::validation(
                        "sms_cost",
                        format!("message costs sum to {total}, above the maximum {}", max_amount()),
                    ));
                }
                total
            }
        };

        Ok(DailyEntry {
            date,
            sms_cost,
            revenue: revenue.unwrap_or(Decimal::ZERO),
            messages,
        })
    }
}

impl MessageEntryForm {
    fn validate(self, index: usize) -> Result<MessageEntry, CoreError> {
        let field = |name: &str| format!("messages[{index}].{name}");

        let content = self.content.trim().to_owned();
        if content.is_empty() {
            return Err(CoreError::validation(field("content"), "must not be empty"));
        }

        if self.num_sent < 0 {
            return Err(CoreError::validation(
                field("num_sent"),
                format!("must be non-negative, got {}", self.num_sent),
            ));
        }

        // The form leaves click rate blank by sending 0; rates that round to
        // zero are blank too.
        let click_rate = self
            .click_rate
            .map(|rate| rate.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero))
            .filter(|rate| !rate.is_zero());
        if let Some(rate) = click_rate {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(CoreError::validation(
                    field("click_rate"),
                    format!("must be a fraction between 0 and 1, got {rate}"),
                ));
            }
        }

        let est_cost = amount(&field("est_cost"), self.est_cost)?;

        let link_url = self
            .link_url
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty());
        if let Some(ref url) = link_url {
            url::Url::parse(url).map_err(|_| {
                CoreError::validation(field("link_url"), format!("must be an absolute URL, got '{url}'"))
            })?;
        }

        Ok(MessageEntry {
            content,
            link_url,
            click_rate,
            num_sent: self.num_sent,
            est_cost: est_cost.unwrap_or(Decimal::ZERO),
        })
    }
}

/// Check a money field against the column bounds and round it to cents.
fn amount(field: &str, value: Option<Decimal>) -> Result<Option<Decimal>, CoreError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value < Decimal::ZERO {
        return Err(CoreError::validation(
            field,
            format!("must be non-negative, got {value}"),
        ));
    }
    let rounded = value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > max_amount() {
        return Err(CoreError::validation(
            field,
            format!("must be at most {}, got {value}", max_amount()),
        ));
    }
    Ok(Some(rounded))
}
