//! Log field helpers that honour the `dangerous-logging` and `log-paths` features.

use crate::diff::Path;
use core::fmt::{self, Debug, Display, Formatter};

/// Formats user-entered data only if the `dangerous-logging` feature is enabled.
pub struct Sensitive<'a, T: ?Sized>(pub &'a T);
impl<T: ?Sized + Debug> Debug for Sensitive<'_, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if cfg!(feature = "dangerous-logging") {
			Debug::fmt(self.0, f)
		} else {
			f.write_str("<redacted>")
		}
	}
}
impl<T: ?Sized + Display> Display for Sensitive<'_, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if cfg!(feature = "dangerous-logging") {
			Display::fmt(self.0, f)
		} else {
			f.write_str("<redacted>")
		}
	}
}

/// Formats a VDOM [`Path`] only if the `log-paths` feature is enabled.
pub struct LoggedPath<'a>(pub &'a Path);
impl Display for LoggedPath<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		if cfg!(feature = "log-paths") {
			Display::fmt(self.0, f)
		} else {
			f.write_str("?")
		}
	}
}
