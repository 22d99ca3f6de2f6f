//! Cookie-based counting of unique devices accessing a website.
//!
//! This is an implementation of [Wikimedia's approach][dataset] to counting
//! the unique devices that access a website per day or per month. Instead of
//! handing every device an identifying cookie and recording its visits in a
//! database, the date of the last access is stored in the cookie itself. The
//! server keeps no per-device state at all; it reads the date back on the
//! next request and decides from that alone whether the device should be
//! counted for the current day or month.
//!
//! Requests that carry no cookie whatsoever are flagged separately, as many
//! of them come from clients that never return cookies (bots among them).
//! See the [last access solution notes][nocookie] for how that signal can be
//! used to offset bot traffic.
//!
//! The crate only makes the counting decision; incrementing whatever counter
//! the flags feed is left to the caller.
//!
//! [dataset]: https://blog.wikimedia.org/2016/03/30/unique-devices-dataset/
//! [nocookie]: https://wikitech.wikimedia.org/wiki/Analytics/Unique_Devices/Last_access_solution#Nocookie_Offset

#![deny(missing_docs)]

#[macro_use]
extern crate error_chain;
#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;
extern crate time;

pub mod access;
pub mod cookie;
pub mod error;
pub mod source;

pub use access::{classify, Access, Clock, ClockFn};
pub use cookie::{AccessDate, RenewedCookie, COOKIE_NAME};
pub use source::{observe, observe_at, CookieSink, CookieSource};
