// =============================================================================
// Schedule Gate — 09:00 New York on NYSE trading days
// =============================================================================
//
// The bot wakes on a coarse external schedule and decides here whether this
// wake-up is the one that sends the digest: New York wall time must be
// exactly 09:00 and the date must be a NYSE trading day.
//
// Full-closure NYSE holidays: New Year's Day, Martin Luther King Jr. Day,
// Washington's Birthday, Good Friday, Memorial Day, Juneteenth,
// Independence Day, Labor Day, Thanksgiving, Christmas. A holiday landing
// on Saturday is observed the Friday before; on Sunday, the Monday after.
// =============================================================================

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc, Weekday};
use chrono_tz::America::New_York;
use chrono_tz::Tz;

/// Current New York wall-clock time.
pub fn now_new_york() -> DateTime<Tz> {
    Utc::now().with_timezone(&New_York)
}

/// True iff `now` reads 09:00 on a New York clock.
pub fn is_nine_am(now: &DateTime<Tz>) -> bool {
    now.hour() == 9 && now.minute() == 0
}

/// True iff the NYSE is open on `date` (weekday, not a full-closure
/// holiday).
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
        && !nyse_holidays(date.year()).contains(&date)
}

/// All observed full-closure NYSE holidays for `year`.
pub fn nyse_holidays(year: i32) -> Vec<NaiveDate> {
    let fixed = [
        ymd(year, 1, 1),   // New Year's Day
        ymd(year, 6, 19),  // Juneteenth
        ymd(year, 7, 4),   // Independence Day
        ymd(year, 12, 25), // Christmas
    ];

    let mut holidays: Vec<NaiveDate> = fixed.iter().filter_map(|&d| observed(d)).collect();

    holidays.push(nth_weekday(year, 1, Weekday::Mon, 3)); // MLK Day
    holidays.push(nth_weekday(year, 2, Weekday::Mon, 3)); // Washington's Birthday
    holidays.push(easter_sunday(year) - chrono::Days::new(2)); // Good Friday
    holidays.push(last_weekday(year, 5, Weekday::Mon)); // Memorial Day
    holidays.push(nth_weekday(year, 9, Weekday::Mon, 1)); // Labor Day
    holidays.push(nth_weekday(year, 11, Weekday::Thu, 4)); // Thanksgiving

    holidays.sort_unstable();
    holidays
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Shift a fixed-date holiday to its observed weekday.
///
/// Saturday holidays are observed the Friday before; Sunday holidays the
/// Monday after. A Saturday New Year's Day would shift into the prior
/// year — the exchange does not observe it in that case, so it drops out.
fn observed(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat => {
            let shifted = date - chrono::Days::new(1);
            (shifted.year() == date.year()).then_some(shifted)
        }
        Weekday::Sun => Some(date + chrono::Days::new(1)),
        _ => Some(date),
    }
}

/// The `n`-th `weekday` of `month` (n is 1-based).
fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> NaiveDate {
    let first = ymd(year, month, 1);
    let offset = (7 + weekday.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
    first + chrono::Days::new((offset + (n - 1) * 7) as u64)
}

/// The last `weekday` of `month`.
fn last_weekday(year: i32, month: u32, weekday: Weekday) -> NaiveDate {
    let next_month = if month == 12 {
        ymd(year + 1, 1, 1)
    } else {
        ymd(year, month + 1, 1)
    };
    let last = next_month - chrono::Days::new(1);
    let offset = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last - chrono::Days::new(offset as u64)
}

/// Easter Sunday for `year`, via the anonymous Gregorian computus.
fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}
