//! The last-access cookie: the single piece of client-held state.
//!
//! The cookie stores nothing but a calendar date in a fixed textual layout
//! (`15-Mar-2024`). No identity, session or fingerprint is ever written into
//! it. The server reads the date on each request and immediately overwrites
//! it with the current one, so the value is always the date of the most
//! recent access the server has seen from that device.

use error::*;
use time::{at_utc, now_utc, strftime, strptime, Duration, Tm};

/// Name under which the last-access cookie is stored on the client.
pub const COOKIE_NAME: &'static str = "last_access";

/// Layout of the stored date: two-digit day, three-letter month
/// abbreviation, four-digit year.
const DATE_LAYOUT: &'static str = "%d-%b-%Y";

/// Path scope of every issued cookie.
const COOKIE_PATH: &'static str = "/";

/// How long an issued cookie remains valid on the client.
fn lifetime() -> Duration {
    Duration::days(30)
}

/// A calendar date as carried by the last-access cookie.
///
/// Only the year, month and day are meaningful; the layout holds no time of
/// day and no timezone.
#[derive(Debug, Clone, Copy)]
pub struct AccessDate(Tm);

impl AccessDate {
    /// Parse a cookie value into a date.
    ///
    /// The value must match the layout exactly. Rendering the parsed date
    /// back and comparing against the input rejects anything `strptime`
    /// would quietly tolerate, such as unpadded days, trailing text,
    /// re-cased month names or days that do not exist in the named month.
    pub fn parse(value: &str) -> Result<AccessDate> {
        // The layout is fixed-width; a two-digit year would otherwise
        // survive the round trip below unpadded.
        if value.len() != "15-Mar-2024".len() {
            bail!(ErrorKind::MalformedDate(value.to_owned()));
        }

        // strptime does no calendar validation, so an impossible date such
        // as 31-Feb-2024 parses and re-renders as itself. Normalizing
        // through a timespec rolls it over into the next month, where the
        // comparison below catches it.
        let parsed = strptime(value, DATE_LAYOUT)?;
        let date = AccessDate(at_utc(parsed.to_timespec()));
        if date.to_string() != value {
            bail!(ErrorKind::MalformedDate(value.to_owned()));
        }
        Ok(date)
    }

    /// Take the date portion of a timestamp.
    pub fn from_tm(time: Tm) -> AccessDate {
        AccessDate(time)
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.tm_year + 1900
    }

    /// Month of the year, counted from zero.
    pub fn month(&self) -> i32 {
        self.0.tm_mon
    }

    /// Day of the month.
    pub fn day(&self) -> i32 {
        self.0.tm_mday
    }
}

impl ::std::string::ToString for AccessDate {
    fn to_string(&self) -> String {
        strftime(DATE_LAYOUT, &self.0).unwrap()
    }
}

/// The renewed cookie issued towards the client.
///
/// One of these is produced on every request, whatever the classification
/// outcome, so that the expiry keeps sliding forward while the device keeps
/// visiting.
#[derive(Debug, Clone)]
pub struct RenewedCookie {
    /// The date stamped into the cookie value.
    value: AccessDate,

    /// When the cookie lapses on the client, in UTC.
    expires: Tm,
}

impl RenewedCookie {
    /// Issue a cookie carrying the date of `now`.
    ///
    /// The expiry is taken from the instant of issuance rather than from
    /// `now`, which may be an injected timestamp.
    pub fn stamped(now: Tm) -> RenewedCookie {
        RenewedCookie {
            value: AccessDate::from_tm(now),
            expires: now_utc() + lifetime(),
        }
    }

    /// Name the cookie is stored under.
    pub fn name(&self) -> &str {
        COOKIE_NAME
    }

    /// The stamped date, rendered in the cookie layout.
    pub fn value(&self) -> String {
        self.value.to_string()
    }

    /// Path scope of the cookie.
    pub fn path(&self) -> &str {
        COOKIE_PATH
    }

    /// Expiry time of the cookie in UTC.
    pub fn expires(&self) -> &Tm {
        &self.expires
    }
}

impl ::std::string::ToString for RenewedCookie {
    fn to_string(&self) -> String {
        format!(
            "{}={}; Path={}; Expires={}",
            COOKIE_NAME,
            self.value(),
            COOKIE_PATH,
            strftime("%a, %d %b %Y %T %z", &self.expires).unwrap()
        )
    }
}
