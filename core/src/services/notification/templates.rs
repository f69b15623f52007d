//! Email bodies for the notifications this system sends.

use chrono::NaiveDate;

use crate::domain::entities::booking::Booking;
use crate::domain::entities::listing::Listing;
use crate::domain::entities::notification::EmailNotification;

/// Account verification email carrying the one-time code.
pub fn verification_email(recipient: &str, name: &str, otp: &str) -> EmailNotification {
    let subject = "Verify your StayEasy account".to_string();
    let text = format!(
        "Hi {name}, your StayEasy verification code is {otp}. It expires in 10 minutes."
    );
    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; padding: 20px;\">\
           <h2>StayEasy Account Verification</h2>\
           <p>Hi {name}, use this one-time code to verify your account:</p>\
           <div style=\"font-size: 24px; font-weight: bold; padding: 10px; \
                        background: #f9f9f9; text-align: center;\">{otp}</div>\
           <p>This code is valid for 10 minutes.</p>\
         </div>"
    );
    EmailNotification::new(recipient.to_string(), subject, text, html)
}

/// Booking confirmation email sent once a booking is reconciled to paid.
pub fn booking_confirmation_email(
    recipient: &str,
    listing: &Listing,
    booking: &Booking,
) -> EmailNotification {
    let subject = "Booking Confirmed! - StayEasy".to_string();
    let check_in = format_date(booking.check_in);
    let check_out = format_date(booking.check_out);
    let total = format_amount(booking.total_amount_cents);
    let text = format!(
        "Your stay at {} is confirmed for {} to {}. Total paid: {}.",
        listing.title, check_in, check_out, total
    );
    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
           <h1>Pack your bags!</h1>\
           <p>Your reservation at {} is confirmed.</p>\
           <p>Stay confirmed for: {} - {}</p>\
           <p>Total paid: <strong>{}</strong></p>\
         </div>",
        listing.title, check_in, check_out, total
    );
    EmailNotification::new(recipient.to_string(), subject, text, html)
}

fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn format_amount(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::booking::Booking;
    use crate::domain::value_objects::Location;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    #[test]
    fn test_verification_email_carries_code() {
        let email = verification_email("ada@example.com", "Ada", "482913");
        assert_eq!(email.recipient, "ada@example.com");
        assert!(email.body_text.contains("482913"));
        assert!(email.body_html.contains("482913"));
    }

    #[test]
    fn test_confirmation_email_carries_stay_details() {
        let listing = Listing::new(
            Uuid::new_v4(),
            "Harbour loft".to_string(),
            "Bright loft".to_string(),
            10_000,
            Location::new("1 Quay Rd", "Sydney", "Australia", -33.86, 151.21),
        );
        let booking = Booking::new(
            listing.id,
            listing.host_id,
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            2,
            45_000,
            "cs_1".to_string(),
            Utc::now() + Duration::minutes(30),
        );
        let email = booking_confirmation_email("guest@example.com", &listing, &booking);
        assert!(email.body_text.contains("Harbour loft"));
        assert!(email.body_text.contains("$450.00"));
        assert!(email.subject.contains("Confirmed"));
    }
}
