//! Formatting of dates and times with mask strings like `yyyy-mm-dd HH:MM`.

use chrono::{DateTime, Datelike, NaiveDateTime, Offset, TimeZone, Timelike, Utc};

/// Abbreviated and full day names, starting at Sunday.
pub const DAY_NAMES: [&str; 14] = [
	"Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat",
	"Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
];

/// Abbreviated and full month names, starting at January.
pub const MONTH_NAMES: [&str; 24] = [
	"Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
	"January", "February", "March", "April", "May", "June",
	"July", "August", "September", "October", "November", "December",
];

/// Named masks that can be passed to [`format()`] instead of a mask string.
pub const MASKS: [(&str, &str); 12] = [
	("default", "ddd mmm dd yyyy HH:MM:ss"),
	("shortDate", "m/d/yy"),
	("mediumDate", "mmm d, yyyy"),
	("longDate", "mmmm d, yyyy"),
	("fullDate", "dddd, mmmm d, yyyy"),
	("shortTime", "h:MM TT"),
	("mediumTime", "h:MM:ss TT"),
	("longTime", "h:MM:ss TT Z"),
	("isoDate", "yyyy-mm-dd"),
	("isoTime", "HH:MM:ss"),
	("isoDateTime", "yyyy-mm-dd'T'HH:MM:ss"),
	("isoUtcDateTime", "UTC:yyyy-mm-dd'T'HH:MM:ss'Z'"),
];

/// Look up a named mask.
pub fn named_mask(name: &str) -> Option<&'static str> {
	MASKS.iter().find(|(key, _)| *key == name).map(|(_, mask)| *mask)
}

/// Format a date using a mask.
///
/// The mask can be one of the names in [`MASKS`], or a mask string.
/// An empty mask selects the `default` mask.
///
/// If `utc` is true, or the mask starts with `UTC:`, the date is converted to UTC first.
/// Otherwise the date is formatted in its own time zone.
///
/// Supported tokens:
/// * `d`, `dd`: day of the month, without and with leading zero.
/// * `ddd`, `dddd`: abbreviated and full day name.
/// * `m`, `mm`: month number, without and with leading zero.
/// * `mmm`, `mmmm`: abbreviated and full month name.
/// * `yy`, `yyyy`: year, without and with century.
/// * `h`, `hh`: hour on a 12 hour clock, without and with leading zero.
/// * `H`, `HH`: hour on a 24 hour clock, without and with leading zero.
/// * `M`, `MM`: minutes, without and with leading zero.
/// * `s`, `ss`: seconds, without and with leading zero.
/// * `l`: milliseconds, three digits.
/// * `L`: centiseconds, two digits.
/// * `t`, `tt`, `T`, `TT`: `a`/`p`, `am`/`pm`, `A`/`P` and `AM`/`PM`.
/// * `Z`: `UTC` in UTC mode, or the offset as `GMT+0200`.
/// * `o`: the offset from UTC as `+0200`.
/// * `S`: the English ordinal suffix of the day (`st`, `nd`, `rd` or `th`).
///
/// Text between single or double quotes is copied without the quotes.
/// Any other text is copied as it is.
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// let offset = FixedOffset::east_opt(2 * 3600).unwrap();
/// let date = offset.with_ymd_and_hms(2026, 10, 18, 14, 5, 9).unwrap();
/// assert_eq!(pformat::date::format(&date, "dddd, mmmm dS 'at' h:MM TT", false), "Sunday, October 18th at 2:05 PM");
/// assert_eq!(pformat::date::format(&date, "isoUtcDateTime", false), "2026-10-18T12:05:09Z");
/// ```
pub fn format<Tz: TimeZone>(date: &DateTime<Tz>, mask: &str, utc: bool) -> String {
	let mask = match named_mask(mask) {
		Some(mask) => mask,
		None if mask.is_empty() => named_mask("default").unwrap_or_default(),
		None => mask,
	};
	let (mask, utc) = match mask.strip_prefix("UTC:") {
		Some(mask) => (mask, true),
		None => (mask, utc),
	};

	let fields = if utc {
		Fields {
			local: date.naive_utc(),
			offset_minutes: 0,
			utc: true,
		}
	} else {
		Fields {
			local: date.naive_local(),
			offset_minutes: date.offset().fix().local_minus_utc() / 60,
			utc: false,
		}
	};

	let mut output = String::with_capacity(mask.len() * 2);
	let mut rest = mask;
	while let Some(c) = rest.chars().next() {
		let len = match c {
			'd' | 'm' => run_length(rest, c).min(4),
			'y' if rest.starts_with("yyyy") => 4,
			'y' if rest.starts_with("yy") => 2,
			'H' | 'h' | 'M' | 's' | 'T' | 't' => run_length(rest, c).min(2),
			'L' | 'l' | 'o' | 'S' | 'Z' => 1,
			'"' | '\'' => {
				if let Some(end) = rest[1..].find(c) {
					output.push_str(&rest[1..end + 1]);
					rest = &rest[end + 2..];
					continue;
				}
				0
			},
			_ => 0,
		};
		if len == 0 {
			output.push(c);
			rest = &rest[c.len_utf8()..];
		} else {
			fields.write_token(&mut output, &rest[..len]);
			rest = &rest[len..];
		}
	}
	output
}

/// Count how often a character repeats at the start of a string.
fn run_length(text: &str, c: char) -> usize {
	text.chars().take_while(|&x| x == c).count()
}

/// The date and time fields used by the mask tokens.
struct Fields {
	/// The date and time in the selected time zone.
	local: NaiveDateTime,

	/// The offset of the selected time zone east of UTC.
	offset_minutes: i32,

	/// Format as UTC.
	utc: bool,
}

impl Fields {
	fn write_token(&self, output: &mut String, token: &str) {
		use std::fmt::Write;

		let day = self.local.day();
		let weekday = self.local.weekday().num_days_from_sunday() as usize;
		let month = self.local.month0() as usize;
		let hour = self.local.hour();
		let hour12 = match hour % 12 {
			0 => 12,
			x => x,
		};
		let millis = (self.local.nanosecond() / 1_000_000).min(999);

		// Writing to a String can not fail.
		let _ = match token {
			"d" => write!(output, "{day}"),
			"dd" => write!(output, "{day:02}"),
			"ddd" => write!(output, "{}", DAY_NAMES[weekday]),
			"dddd" => write!(output, "{}", DAY_NAMES[weekday + 7]),
			"m" => write!(output, "{}", month + 1),
			"mm" => write!(output, "{:02}", month + 1),
			"mmm" => write!(output, "{}", MONTH_NAMES[month]),
			"mmmm" => write!(output, "{}", MONTH_NAMES[month + 12]),
			"yy" => write!(output, "{}", self.local.year().to_string().get(2..).unwrap_or_default()),
			"yyyy" => write!(output, "{}", self.local.year()),
			"h" => write!(output, "{hour12}"),
			"hh" => write!(output, "{hour12:02}"),
			"H" => write!(output, "{hour}"),
			"HH" => write!(output, "{hour:02}"),
			"M" => write!(output, "{}", self.local.minute()),
			"MM" => write!(output, "{:02}", self.local.minute()),
			"s" => write!(output, "{}", self.local.second()),
			"ss" => write!(output, "{:02}", self.local.second()),
			"l" => write!(output, "{millis:03}"),
			"L" => write!(output, "{:02}", if millis > 99 { (millis + 5) / 10 } else { millis }),
			"t" => output.write_str(if hour < 12 { "a" } else { "p" }),
			"tt" => output.write_str(if hour < 12 { "am" } else { "pm" }),
			"T" => output.write_str(if hour < 12 { "A" } else { "P" }),
			"TT" => output.write_str(if hour < 12 { "AM" } else { "PM" }),
			"Z" if self.utc => output.write_str("UTC"),
			"Z" => write!(output, "GMT{}", offset_text(self.offset_minutes)),
			"o" => output.write_str(&offset_text(self.offset_minutes)),
			"S" => output.write_str(ordinal_suffix(day)),
			other => output.write_str(other),
		};
	}
}

/// Format an offset in minutes east of UTC as `+HHMM`.
fn offset_text(offset_minutes: i32) -> String {
	let sign = if offset_minutes < 0 { '-' } else { '+' };
	let offset = offset_minutes.unsigned_abs();
	format!("{sign}{:02}{:02}", offset / 60, offset % 60)
}

/// Get the English ordinal suffix for a day of the month.
fn ordinal_suffix(day: u32) -> &'static str {
	match (day % 10, day % 100) {
		(_, 11..=13) => "th",
		(1, _) => "st",
		(2, _) => "nd",
		(3, _) => "rd",
		_ => "th",
	}
}

/// Format a date in UTC using a mask.
///
/// Shorthand for [`format()`] with `utc` set to true.
pub fn format_utc<Tz: TimeZone>(date: &DateTime<Tz>, mask: &str) -> String {
	format(&date.with_timezone(&Utc), mask, true)
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{check, let_assert};
	use chrono::FixedOffset;

	fn date(offset_hours: i32, y: i32, m: u32, d: u32, hour: u32, min: u32, sec: u32, millis: u32) -> DateTime<FixedOffset> {
		let_assert!(Some(offset) = FixedOffset::east_opt(offset_hours * 3600));
		let_assert!(Some(date) = offset.with_ymd_and_hms(y, m, d, hour, min, sec).single());
		let_assert!(Some(date) = date.with_nanosecond(millis * 1_000_000));
		date
	}

	#[test]
	fn test_day_and_month_tokens() {
		let date = date(2, 2026, 3, 1, 9, 4, 5, 0);
		check!(format(&date, "d dd ddd dddd", false) == "1 01 Sun Sunday");
		check!(format(&date, "m mm mmm mmmm", false) == "3 03 Mar March");
		check!(format(&date, "yy yyyy", false) == "26 2026");
		check!(format(&date, "ddddd", false) == "Sunday1");
		check!(format(&date, "yyy", false) == "26y");
	}

	#[test]
	fn test_time_tokens() {
		let morning = date(0, 2026, 1, 2, 0, 7, 3, 45);
		check!(format(&morning, "h hh H HH M MM s ss", false) == "12 12 0 00 7 07 3 03");
		check!(format(&morning, "t tt T TT", false) == "a am A AM");
		check!(format(&morning, "l L", false) == "045 45");

		let evening = date(0, 2026, 1, 2, 21, 30, 0, 996);
		check!(format(&evening, "h:MM tt", false) == "9:30 pm");
		check!(format(&evening, "HHH", false) == "2121");
		check!(format(&evening, "l L", false) == "996 100");
	}

	#[test]
	fn test_ordinal_suffix() {
		let suffixes: Vec<_> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 30, 31].into_iter().map(ordinal_suffix).collect();
		check!(suffixes == ["st", "nd", "rd", "th", "th", "th", "th", "st", "nd", "rd", "th", "st"]);
	}

	#[test]
	fn test_named_masks() {
		let date = date(2, 2026, 10, 18, 14, 5, 9, 0);
		check!(format(&date, "default", false) == "Sun Oct 18 2026 14:05:09");
		check!(format(&date, "", false) == "Sun Oct 18 2026 14:05:09");
		check!(format(&date, "shortDate", false) == "10/18/26");
		check!(format(&date, "mediumDate", false) == "Oct 18, 2026");
		check!(format(&date, "longDate", false) == "October 18, 2026");
		check!(format(&date, "fullDate", false) == "Sunday, October 18, 2026");
		check!(format(&date, "shortTime", false) == "2:05 PM");
		check!(format(&date, "mediumTime", false) == "2:05:09 PM");
		check!(format(&date, "longTime", false) == "2:05:09 PM GMT+0200");
		check!(format(&date, "isoDate", false) == "2026-10-18");
		check!(format(&date, "isoTime", false) == "14:05:09");
		check!(format(&date, "isoDateTime", false) == "2026-10-18T14:05:09");
		check!(format(&date, "isoUtcDateTime", false) == "2026-10-18T12:05:09Z");
	}

	#[test]
	fn test_utc() {
		let date = date(-5, 2026, 6, 11, 22, 0, 0, 0);
		check!(format(&date, "yyyy-mm-dd HH:MM Z o", false) == "2026-06-11 22:00 GMT-0500 -0500");
		check!(format(&date, "yyyy-mm-dd HH:MM Z o", true) == "2026-06-12 03:00 UTC +0000");
		check!(format(&date, "UTC:yyyy-mm-dd HH:MM Z", false) == "2026-06-12 03:00 UTC");
		check!(format_utc(&date, "dddd HH") == "Friday 03");
		check!(format(&Utc.timestamp_opt(0, 0).unwrap(), "yyyy-mm-dd'T'HH:MM:ss Z", false) == "1970-01-01T00:00:00 GMT+0000");
	}

	#[test]
	fn test_literals() {
		let date = date(0, 2026, 10, 18, 8, 0, 0, 0);
		check!(format(&date, r#""day" d 'of' mmmm"#, false) == "day 18 of October");
		check!(format(&date, "'dd' \"mm\"", false) == "dd mm");
		check!(format(&date, "x'y d", false) == "x'y 18");
		check!(format(&date, "HH:MM ❤ %", false) == "08:00 ❤ %");
		check!(format(&date, "Week", false) == "Week");
	}
}
