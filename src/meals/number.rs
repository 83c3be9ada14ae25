//! Conversions between draft text and calorie counts, matching how a browser coerces form input with `Number(…)`.

/// Converts `text` to a number the way a browser's `Number(text)` does.
///
/// Blank text is `0`. Text that isn't a numeric literal is NaN rather than an error.
///
/// ```
/// use meal_log::meals::number::coerce_number;
///
/// assert_eq!(coerce_number(" 350 "), 350.0);
/// assert_eq!(coerce_number(""), 0.0);
/// assert_eq!(coerce_number("0x10"), 16.0);
/// assert!(coerce_number("lots").is_nan());
/// ```
#[must_use]
pub fn coerce_number(text: &str) -> f64 {
	let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
	match text {
		"" => return 0.0,
		"Infinity" | "+Infinity" => return f64::INFINITY,
		"-Infinity" => return f64::NEG_INFINITY,
		_ => (),
	}

	for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
		if let Some(digits) = text.strip_prefix(prefix) {
			return parse_radix(digits, radix);
		}
	}

	// Rules out Rust-only spellings like "inf" and "NaN", which `f64::from_str` would accept.
	if !text.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')) {
		return f64::NAN;
	}
	text.parse().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
	if digits.is_empty() {
		return f64::NAN;
	}
	digits
		.chars()
		.try_fold(0.0, |acc: f64, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
		.unwrap_or(f64::NAN)
}

/// Formats `number` for display the way a browser would print it in a template string.
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent notation, like `1e+21` and `1.5e-7`.
///
/// ```
/// use meal_log::meals::number::format_number;
///
/// assert_eq!(format_number(350.5), "350.5");
/// assert_eq!(format_number(2e21), "2e+21");
/// assert_eq!(format_number(0.000_000_15), "1.5e-7");
/// ```
#[must_use]
pub fn format_number(number: f64) -> String {
	if number.is_nan() {
		"NaN".to_string()
	} else if number.is_infinite() {
		(if number > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
	} else if number == 0.0 {
		"0".to_string()
	} else {
		let scientific = format!("{:e}", number);
		match scientific.split_once('e').map(|(mantissa, exponent)| (mantissa, exponent.parse::<i32>())) {
			Some((mantissa, Ok(exponent))) if exponent >= 21 => format!("{}e+{}", mantissa, exponent),
			Some((mantissa, Ok(exponent))) if exponent <= -7 => format!("{}e{}", mantissa, exponent),
			_ => number.to_string(),
		}
	}
}
