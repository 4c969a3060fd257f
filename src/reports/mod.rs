//! Aggregate reports computed over subscription records.
//!
//! Every function here is a pure transformation of its inputs plus an
//! injected rate table; callers supply one reference date per logical
//! request so all reports agree on "now".

pub mod forecast;
pub mod reminders;
pub mod stats;
pub mod trends;
pub mod upcoming;

pub use forecast::{compute_month_forecast, ForecastRenewal, MonthForecast};
pub use reminders::{compute_reminder_digest, ReminderDigest};
pub use stats::{compute_stats, StatsReport};
pub use trends::{compute_trend, TrendPoint, TrendSeries, DEFAULT_TREND_MONTHS};
pub use upcoming::{compute_upcoming, UpcomingRenewal};
