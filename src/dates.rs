//! Date handling: ISO-8601 instants and the Jalali (Solar Hijri) calendar.
//!
//! Timestamps stay opaque strings everywhere else in the crate; this
//! module is the single place they are parsed. Calendar-day comparisons
//! use a fixed Tehran offset so results do not depend on the host
//! timezone.

use chrono::{DateTime, Datelike, FixedOffset, SecondsFormat, TimeZone, Utc};

/// Display offset for calendar-day comparisons and Jalali rendering.
pub fn display_offset() -> FixedOffset {
    // UTC+03:30, always in range
    FixedOffset::east_opt(3 * 3600 + 30 * 60).unwrap()
}

/// Parse an ISO-8601 instant string. Returns `None` for anything that
/// does not parse; callers treat such values as absent.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Epoch milliseconds for sorting. Absent or unparseable dates sort as 0.
pub fn epoch_ms(s: Option<&str>) -> i64 {
    s.and_then(parse_instant)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

/// Whether two instants fall on the same calendar day in the display
/// timezone.
pub fn same_display_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    let off = display_offset();
    a.with_timezone(&off).date_naive() == b.with_timezone(&off).date_naive()
}

/// Render an ISO instant as a Jalali `yyyy/mm/dd` date, or `-` when the
/// value is absent or unparseable.
pub fn to_jalali(iso: Option<&str>) -> String {
    let Some(instant) = iso.and_then(parse_instant) else {
        return "-".to_string();
    };
    let local = instant.with_timezone(&display_offset());
    match gregorian_to_jalali(local.year() as i64, local.month() as i64, local.day() as i64) {
        Some((jy, jm, jd)) => format!("{jy}/{jm:02}/{jd:02}"),
        None => iso.unwrap_or("-").to_string(),
    }
}

/// Convert a Jalali `yyyy/mm/dd` date to an RFC 3339 instant.
///
/// The instant is anchored at 03:30 UTC, which is 07:00 in Tehran:
/// safely inside the same local day, so the calendar date survives a
/// round trip through [`to_jalali`].
pub fn jalali_to_iso(jalali: &str) -> Option<String> {
    let mut parts = jalali.split('/');
    let jy: i64 = parts.next()?.trim().parse().ok()?;
    let jm: i64 = parts.next()?.trim().parse().ok()?;
    let jd: i64 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() || !(1..=12).contains(&jm) || !(1..=31).contains(&jd) {
        return None;
    }

    let (gy, gm, gd) = jalali_to_gregorian(jy, jm, jd)?;
    let instant = Utc
        .with_ymd_and_hms(gy as i32, gm as u32, gd as u32, 3, 30, 0)
        .single()?;
    Some(instant.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Replace ASCII digits with Persian digits for display.
pub fn persian_digits(s: &str) -> String {
    const DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
    s.chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => DIGITS[d as usize],
            None => c,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Jalali calendar arithmetic, ported from the jalaali-js reference
// implementation (valid for Jalali years -61..=3177).
// ---------------------------------------------------------------------------

/// Convert a Gregorian calendar date to Jalali.
pub fn gregorian_to_jalali(gy: i64, gm: i64, gd: i64) -> Option<(i64, i64, i64)> {
    d2j(g2d(gy, gm, gd))
}

/// Convert a Jalali calendar date to Gregorian.
pub fn jalali_to_gregorian(jy: i64, jm: i64, jd: i64) -> Option<(i64, i64, i64)> {
    Some(d2g(j2d(jy, jm, jd)?))
}

struct JalCal {
    leap: i64,
    gy: i64,
    march: i64,
}

/// Leap-year data for a Jalali year: whether it is leap, the Gregorian
/// year its Farvardin 1 falls in, and the March day of that new year.
fn jal_cal(jy: i64) -> Option<JalCal> {
    const BREAKS: [i64; 20] = [
        -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
        2394, 2456, 3178,
    ];

    if jy < BREAKS[0] || jy >= BREAKS[BREAKS.len() - 1] {
        return None;
    }

    let gy = jy + 621;
    let mut leap_j = -14_i64;
    let mut jp = BREAKS[0];
    let mut jump = 0_i64;

    for &jm in &BREAKS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        jp = jm;
    }
    let mut n = jy - jp;

    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gy / 4 - (gy / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(JalCal { leap, gy, march })
}

/// Julian day number of a Jalali date.
fn j2d(jy: i64, jm: i64, jd: i64) -> Option<i64> {
    let r = jal_cal(jy)?;
    Some(g2d(r.gy, 3, r.march) + (jm - 1) * 31 - jm / 7 * (jm - 7) + jd - 1)
}

/// Jalali date of a Julian day number.
fn d2j(jdn: i64) -> Option<(i64, i64, i64)> {
    let (gy, _, _) = d2g(jdn);
    let mut jy = gy - 621;
    let r = jal_cal(jy)?;
    let jdn1f = g2d(gy, 3, r.march);
    let mut k = jdn - jdn1f;

    if k >= 0 {
        if k <= 185 {
            let jm = 1 + k / 31;
            let jd = k % 31 + 1;
            return Some((jy, jm, jd));
        }
        k -= 186;
    } else {
        jy -= 1;
        k += 179;
        if r.leap == 1 {
            k += 1;
        }
    }
    let jm = 7 + k / 30;
    let jd = k % 30 + 1;
    Some((jy, jm, jd))
}

/// Julian day number of a Gregorian date.
fn g2d(gy: i64, gm: i64, gd: i64) -> i64 {
    let d = (gy + (gm - 8) / 6 + 100100) * 1461 / 4 + (153 * ((gm + 9) % 12) + 2) / 5 + gd
        - 34840408;
    d - (gy + 100100 + (gm - 8) / 6) / 100 * 3 / 4 + 752
}

/// Gregorian date of a Julian day number.
fn d2g(jdn: i64) -> (i64, i64, i64) {
    let mut j = 4 * jdn + 139361631;
    j += (4 * jdn + 183187720) / 146097 * 3 / 4 * 4 - 3908;
    let i = j % 1461 / 4 * 5 + 308;
    let gd = i % 153 / 5 + 1;
    let gm = i / 153 % 12 + 1;
    let gy = j / 1461 - 100100 + (8 - gm) / 6;
    (gy, gm, gd)
}
