//! Reminder scheduling for journal notifications
//!
//! The core never delivers notifications itself; it computes when a
//! reminder should fire and hands intent to a [`ReminderScheduler`] port.
//! The embedding application wires the port to a real delivery mechanism.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How often the journal reminds the user to write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    Daily,
    Weekly,
}

impl std::fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReminderFrequency::Daily => write!(f, "daily"),
            ReminderFrequency::Weekly => write!(f, "weekly"),
        }
    }
}

/// When a reminder fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSettings {
    pub frequency: ReminderFrequency,

    /// Hour of day, 0-23
    pub hour: u32,

    /// Minute, 0-59
    pub minute: u32,

    /// Day of week for weekly reminders, 1 = Sunday through 7 = Saturday
    pub weekday: u8,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            frequency: ReminderFrequency::Daily,
            hour: 9,
            minute: 0,
            weekday: 1,
        }
    }
}

impl ReminderSettings {
    /// Check field ranges
    pub fn validate(&self) -> Result<()> {
        if self.hour > 23 {
            return Err(Error::invalid_input(format!("hour out of range: {}", self.hour)));
        }
        if self.minute > 59 {
            return Err(Error::invalid_input(format!(
                "minute out of range: {}",
                self.minute
            )));
        }
        if !(1..=7).contains(&self.weekday) {
            return Err(Error::invalid_input(format!(
                "weekday out of range: {} (1 = Sunday .. 7 = Saturday)",
                self.weekday
            )));
        }
        Ok(())
    }

    /// The next moment this reminder should fire, strictly after `now`
    pub fn next_fire_after(&self, now: DateTime<Local>) -> Option<DateTime<Local>> {
        match self.frequency {
            ReminderFrequency::Daily => {
                let today = at_time(now.date_naive(), self.hour, self.minute)?;
                if today > now {
                    Some(today)
                } else {
                    at_time(now.date_naive() + Duration::days(1), self.hour, self.minute)
                }
            }
            ReminderFrequency::Weekly => {
                for offset in 0..=7 {
                    let date = now.date_naive() + Duration::days(offset);
                    if weekday_number(date.weekday()) != self.weekday {
                        continue;
                    }
                    if let Some(fire) = at_time(date, self.hour, self.minute) {
                        if fire > now {
                            return Some(fire);
                        }
                    }
                }
                None
            }
        }
    }
}

fn at_time(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    date.and_hms_opt(hour, minute, 0)?
        .and_local_timezone(Local)
        .earliest()
}

/// Calendar weekday as 1 = Sunday .. 7 = Saturday
fn weekday_number(weekday: chrono::Weekday) -> u8 {
    weekday.number_from_sunday() as u8
}

/// Fire-and-forget port to the external notification scheduler. The core
/// calls in on lifecycle events and never consumes a return value.
pub trait ReminderScheduler: Send + Sync {
    /// Replace any pending reminder with one matching `settings`
    fn reschedule(&self, settings: &ReminderSettings);

    /// Cancel every pending reminder
    fn cancel_all(&self);

    /// A memory was just added; reset any inactivity reminder
    fn memory_added(&self) {}
}

/// Default scheduler: records scheduling intent in the log and leaves
/// delivery to the embedding application
pub struct LoggingScheduler;

impl ReminderScheduler for LoggingScheduler {
    fn reschedule(&self, settings: &ReminderSettings) {
        match settings.next_fire_after(Local::now()) {
            Some(fire) => {
                tracing::info!("Reminder scheduled: {} at {}", settings.frequency, fire)
            }
            None => tracing::warn!("Reminder settings produced no next fire time"),
        }
    }

    fn cancel_all(&self) {
        tracing::info!("All pending reminders cancelled");
    }

    fn memory_added(&self) {
        tracing::debug!("Inactivity reminder reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn daily(hour: u32, minute: u32) -> ReminderSettings {
        ReminderSettings {
            frequency: ReminderFrequency::Daily,
            hour,
            minute,
            weekday: 1,
        }
    }

    #[test]
    fn daily_fires_today_when_time_is_ahead() {
        let now = local(2026, 3, 4, 8, 0);
        let fire = daily(9, 30).next_fire_after(now).unwrap();
        assert_eq!(fire, local(2026, 3, 4, 9, 30));
    }

    #[test]
    fn daily_rolls_to_tomorrow_when_time_has_passed() {
        let now = local(2026, 3, 4, 10, 0);
        let fire = daily(9, 30).next_fire_after(now).unwrap();
        assert_eq!(fire, local(2026, 3, 5, 9, 30));
    }

    #[test]
    fn daily_fire_is_strictly_after_now() {
        let now = local(2026, 3, 4, 9, 30);
        let fire = daily(9, 30).next_fire_after(now).unwrap();
        assert_eq!(fire, local(2026, 3, 5, 9, 30));
    }

    #[test]
    fn weekly_lands_on_the_requested_weekday() {
        let now = local(2026, 3, 4, 8, 0);
        let target = (now.date_naive() + Duration::days(3)).weekday();

        let settings = ReminderSettings {
            frequency: ReminderFrequency::Weekly,
            hour: 9,
            minute: 0,
            weekday: weekday_number(target),
        };

        let fire = settings.next_fire_after(now).unwrap();
        assert_eq!(fire.date_naive(), now.date_naive() + Duration::days(3));
        assert_eq!(fire.weekday(), target);
    }

    #[test]
    fn weekly_same_day_with_passed_time_waits_a_week() {
        let now = local(2026, 3, 4, 10, 0);

        let settings = ReminderSettings {
            frequency: ReminderFrequency::Weekly,
            hour: 9,
            minute: 0,
            weekday: weekday_number(now.date_naive().weekday()),
        };

        let fire = settings.next_fire_after(now).unwrap();
        assert_eq!(fire.date_naive(), now.date_naive() + Duration::days(7));
    }

    #[test]
    fn validate_rejects_out_of_range_fields() {
        assert!(daily(24, 0).validate().is_err());
        assert!(daily(9, 60).validate().is_err());

        let bad_weekday = ReminderSettings {
            weekday: 8,
            ..ReminderSettings::default()
        };
        assert!(bad_weekday.validate().is_err());

        assert!(ReminderSettings::default().validate().is_ok());
    }
}
