//! Errors arising from cookie retrieval and parsing.
//!
//! None of these ever reach the caller of `access::classify`; every one of
//! them collapses into a "count as new device" outcome. They
//! exist so that the request boundary can report *why* no usable last-access
//! date was available, which is what separates the no-cookie signal from a
//! cookie that was merely unreadable or malformed.

#![allow(missing_docs)]

error_chain!{
    // Links to other standard errors.
    foreign_links {
        Time(::time::ParseError);
    }

    // Internal error forms.
    errors {
        CookieAbsent {
            description("The client sent no last-access cookie"),
        }
        CookieUnreadable {
            description("A last-access cookie was present but could not be read"),
        }
        MalformedDate(value: String) {
            description("The cookie value is not a date in the expected pattern"),
            display("Not a last-access date: {:?}", value),
        }
    }
}
