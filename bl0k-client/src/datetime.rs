use chrono_tz::Tz;

use crate::api::Time;

/// A date as displayed inline, plus the full-precision value for its tooltip
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisplayDate {
    pub text: String,
    pub title: String,
}

/// Formats `t` relative to `now`: only the time for today, `včera` for yesterday, the
/// day and month otherwise
pub fn format_date(t: Time, now: Time, tz: Tz) -> DisplayDate {
    let local = t.with_timezone(&tz);
    let today = now.with_timezone(&tz).date_naive();
    let time = local.format("%H:%M");
    let text = match local.date_naive() {
        d if d == today => format!("{time}"),
        d if Some(d) == today.pred_opt() => format!("včera {time}"),
        _ => format!("{} {time}", local.format("%-d.%-m.")),
    };
    DisplayDate {
        text,
        title: format_full(t, tz),
    }
}

pub fn format_full(t: Time, tz: Tz) -> String {
    t.with_timezone(&tz).format("%-d.%-m.%Y %H:%M").to_string()
}

fn plural(n: i64, one: &str, many: &str) -> String {
    match n {
        1 => format!("1 {one}"),
        n => format!("{n} {many}"),
    }
}

/// Human distance between `t` and `now`, on the same thresholds as date-fns' `formatDistance`
pub fn distance_to_now(t: Time, now: Time) -> String {
    const MINUTES_IN_DAY: i64 = 1440;
    const MINUTES_IN_MONTH: i64 = 43200;

    let seconds = (now - t).num_seconds().abs();
    let minutes = (seconds as f64 / 60.).round() as i64;
    match minutes {
        m if m < 1 => String::from("less than a minute"),
        m if m < 45 => plural(m, "minute", "minutes"),
        m if m < 90 => String::from("about 1 hour"),
        m if m < MINUTES_IN_DAY => {
            let hours = (m as f64 / 60.).round() as i64;
            format!("about {}", plural(hours, "hour", "hours"))
        }
        m if m < 42 * 60 => String::from("1 day"),
        m if m < 30 * MINUTES_IN_DAY => {
            let days = (m as f64 / MINUTES_IN_DAY as f64).round() as i64;
            plural(days, "day", "days")
        }
        m if m < 2 * MINUTES_IN_MONTH => {
            let months = (m as f64 / MINUTES_IN_MONTH as f64).round() as i64;
            format!("about {}", plural(months, "month", "months"))
        }
        m => {
            let months = m / MINUTES_IN_MONTH;
            if months < 12 {
                return plural(months, "month", "months");
            }
            let years = months / 12;
            match months % 12 {
                r if r < 3 => format!("about {}", plural(years, "year", "years")),
                r if r < 9 => format!("over {}", plural(years, "year", "years")),
                _ => format!("almost {}", plural(years + 1, "year", "years")),
            }
        }
    }
}

/// Full date followed by how long ago it was
pub fn format_full_with_distance(t: Time, now: Time, tz: Tz) -> String {
    format!("{} ({} zpět)", format_full(t, tz), distance_to_now(t, now))
}
