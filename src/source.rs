//! Trait seams towards the HTTP request and response.
//!
//! The crate never touches a concrete HTTP library; instead the two sides of
//! the exchange are abstracted into a source the cookie is read from and a
//! sink the renewed cookie is written into. Adapting any server framework
//! means implementing these two traits over its request and response types.

use access::{classify, Access, Clock, ClockFn};
use cookie::{RenewedCookie, COOKIE_NAME};
use error::*;
use time::now_utc;

/// The request side of an exchange: anything a named cookie can be read
/// from.
pub trait CookieSource {

    /// Look up the value of the cookie stored under `name`.
    ///
    /// Returns `ErrorKind::CookieAbsent` when the client sent no cookie of
    /// that name. Any other error marks the cookie as present but
    /// unreadable, which classifies the same but does not raise the
    /// no-cookie signal.
    fn cookie(&self, name: &str) -> Result<String>;
}

/// The response side of an exchange: anything the renewed cookie can be
/// written to.
pub trait CookieSink {

    /// Add the renewed cookie to the response.
    fn set_cookie(&mut self, cookie: &RenewedCookie);
}

/// Observe one request/response exchange.
///
/// Reads the last-access cookie from the request, classifies the device
/// against the current UTC date, writes the renewed cookie to the response
/// and returns the record. Call this once per inbound request.
pub fn observe<R, W>(request: &R, response: &mut W) -> Access
where
    R: CookieSource,
    W: CookieSink,
{
    observe_at(&(now_utc as ClockFn), request, response)
}

/// Observe an exchange with a specific time source.
///
/// Day and month boundaries follow the timezone of the injected clock, so a
/// deployment that counts in local time rather than UTC supplies its own
/// `Clock` here.
pub fn observe_at<C, R, W>(clock: &C, request: &R, response: &mut W) -> Access
where
    C: Clock,
    R: CookieSource,
    W: CookieSink,
{
    let (access, renewed) = classify(clock.now(), request.cookie(COOKIE_NAME));
    response.set_cookie(&renewed);
    access
}

#[cfg(test)]
mod test {
    use super::*;
    use time::{strptime, Tm};

    /// A request carrying a fixed set of cookies.
    struct Request(Vec<(String, String)>);

    impl CookieSource for Request {
        fn cookie(&self, name: &str) -> Result<String> {
            for &(ref cookie, ref value) in &self.0 {
                if cookie == name {
                    return Ok(value.clone());
                }
            }
            Err(ErrorKind::CookieAbsent.into())
        }
    }

    /// A response recording the cookies set on it.
    #[derive(Default)]
    struct Response(Vec<String>);

    impl CookieSink for Response {
        fn set_cookie(&mut self, cookie: &RenewedCookie) {
            self.0.push(cookie.to_string());
        }
    }

    struct FixedClock(Tm);

    impl Clock for FixedClock {
        fn now(&self) -> Tm {
            self.0
        }
    }

    fn mid_march() -> FixedClock {
        FixedClock(strptime("15-Mar-2024 10:00", "%d-%b-%Y %H:%M").unwrap())
    }

    #[test]
    fn first_contact() {
        let request = Request(vec![]);
        let mut response = Response::default();

        let access = observe_at(&mid_march(), &request, &mut response);

        assert_eq!(access.daily_unique(), true);
        assert_eq!(access.monthly_unique(), true);
        assert_eq!(access.no_cookie(), true);
    }

    #[test]
    fn returning_same_day() {
        let request = Request(vec![
            ("last_access".to_owned(), "15-Mar-2024".to_owned()),
        ]);
        let mut response = Response::default();

        let access = observe_at(&mid_march(), &request, &mut response);

        assert_eq!(access.daily_unique(), false);
        assert_eq!(access.monthly_unique(), false);
        assert_eq!(access.no_cookie(), false);
    }

    #[test]
    fn unrelated_cookies_are_ignored() {
        let request = Request(vec![
            ("session".to_owned(), "15-Mar-2024".to_owned()),
        ]);
        let mut response = Response::default();

        let access = observe_at(&mid_march(), &request, &mut response);

        assert_eq!(access.no_cookie(), true);
    }

    #[test]
    fn renewed_cookie_reaches_the_response() {
        let request = Request(vec![
            ("last_access".to_owned(), "15-Mar-2024".to_owned()),
        ]);
        let mut response = Response::default();

        observe_at(&mid_march(), &request, &mut response);

        assert_eq!(response.0.len(), 1);
        assert!(response.0[0].starts_with("last_access=15-Mar-2024; Path=/"));
    }

    #[test]
    fn two_tabs_race_uncounted() {
        // Two simultaneous requests from one device both read the stale
        // value before either write lands; both come back unique.
        let request = Request(vec![
            ("last_access".to_owned(), "14-Mar-2024".to_owned()),
        ]);
        let mut response = Response::default();

        let first = observe_at(&mid_march(), &request, &mut response);
        let second = observe_at(&mid_march(), &request, &mut response);

        assert_eq!(first.daily_unique(), true);
        assert_eq!(second.daily_unique(), true);
        assert_eq!(response.0.len(), 2);
    }
}
