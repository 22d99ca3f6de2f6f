//! Classification of a single request against the last-access cookie.
//!
//! One classification is one pure computation: compare the date recovered
//! from the request's cookie with the current date, produce three flags, and
//! stamp a renewed cookie. Nothing is shared between requests; the whole of
//! the server-side "state" lives in the cookie the client carries around.

use cookie::{AccessDate, RenewedCookie};
use error::*;
use time::Tm;

/// Something that produces the current UTC time.
pub trait Clock {

    /// Get the current UTC time.
    fn now(&self) -> Tm;
}

/// A function that produces the current time in UTC.
pub type ClockFn = fn() -> Tm;

impl Clock for ClockFn {
    fn now(&self) -> Tm {
        self()
    }
}

/// The outcome of classifying one request.
///
/// The flags are computed once and never change; the record is meant to live
/// for the duration of a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    daily_unique: bool,
    monthly_unique: bool,
    no_cookie: bool,
}

impl Access {
    fn new(daily_unique: bool, monthly_unique: bool, no_cookie: bool) -> Access {
        Access {
            daily_unique: daily_unique,
            monthly_unique: monthly_unique,
            no_cookie: no_cookie,
        }
    }

    /// Whether the device is accessing the website for the first time today
    /// and should be counted towards the daily total.
    pub fn daily_unique(&self) -> bool {
        self.daily_unique
    }

    /// Whether the device is accessing the website for the first time this
    /// month and should be counted towards the monthly total.
    pub fn monthly_unique(&self) -> bool {
        self.monthly_unique
    }

    /// Whether the device presented no cookie at all.
    ///
    /// This is distinct from a cookie that was sent but unreadable or
    /// malformed, and is useful as a weak signal for identifying bot
    /// traffic; see the crate documentation.
    pub fn no_cookie(&self) -> bool {
        self.no_cookie
    }
}

/// Classify a request given the current time and the outcome of looking up
/// the last-access cookie on it.
///
/// `cookie` carries the retrieval taxonomy: `ErrorKind::CookieAbsent` means
/// the client sent no cookie under the expected name, any other error means
/// a cookie was present but could not be read, and `Ok` holds the raw
/// value.
///
/// Whatever the outcome, a renewed cookie stamped with the date of `now` is
/// returned alongside the record and should be written to the response, so
/// that even an already-counted device keeps its expiry sliding forward.
///
/// Classification never fails: a missing, unreadable or malformed cookie
/// degrades to "treat as a new device", erring towards over-counting rather
/// than under-counting. Day and month boundaries are those of whatever
/// timezone `now` is expressed in; `source::observe` uses UTC.
pub fn classify(now: Tm, cookie: Result<String>) -> (Access, RenewedCookie) {
    let renewed = RenewedCookie::stamped(now);

    let value = match cookie {
        Ok(value) => value,
        Err(error) => {
            let absent = match *error.kind() {
                ErrorKind::CookieAbsent => true,
                _ => false,
            };
            return (Access::new(true, true, absent), renewed);
        }
    };

    // A value that fails to parse counts the same as an unreadable cookie.
    let last = match AccessDate::parse(&value) {
        Ok(last) => last,
        Err(_) => return (Access::new(true, true, false), renewed),
    };

    let today = AccessDate::from_tm(now);

    let access = if last.year() != today.year() {
        Access::new(true, true, false)
    } else if last.month() != today.month() {
        Access::new(true, true, false)
    } else if last.day() != today.day() {
        Access::new(true, false, false)
    } else {
        Access::new(false, false, false)
    };

    (access, renewed)
}
