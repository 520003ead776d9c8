//! HTML rendering for the confirmation and thank-you emails.
//!
//! Rendering is a pure function of the typed context: same context, same
//! bytes. The plain-text alternative is derived by stripping markup from
//! the rendered HTML rather than maintained as a second template.

use crate::context::BookingEmailContext;
use tnt_core::ContactMessage;

fn detail_row(label: &str, value: &str) -> String {
    format!(
        "<tr>\
         <td style=\"padding: 6px 12px; color: #666; white-space: nowrap;\">{label}</td>\
         <td style=\"padding: 6px 12px; color: #333;\">{value}</td>\
         </tr>"
    )
}

/// Render the booking-confirmation email body.
#[must_use]
pub fn booking_confirmation(ctx: &BookingEmailContext) -> String {
    let mut rows = String::new();
    rows.push_str(&detail_row("Tour", &ctx.tour_title));
    rows.push_str(&detail_row("Country", &ctx.tour_country));
    rows.push_str(&detail_row("Style", &ctx.tour_adventure_style));
    rows.push_str(&detail_row("Destinations", &ctx.tour_destinations));
    rows.push_str(&detail_row(
        "Cities",
        &format!("{} to {}", ctx.tour_start_city, ctx.tour_end_city),
    ));
    rows.push_str(&detail_row("Duration", &ctx.tour_duration));
    rows.push_str(&detail_row("Departure", &ctx.tour_departure));
    rows.push_str(&detail_row("Tour rating", &ctx.tour_rating));
    rows.push_str(&detail_row("Check-in", &ctx.check_in_date));
    rows.push_str(&detail_row("Check-out", &ctx.check_out_date));
    rows.push_str(&detail_row("Nights", &ctx.nights.to_string()));
    rows.push_str(&detail_row("Travellers", &ctx.traveller_breakdown));
    rows.push_str(&detail_row("Hotel rating", &ctx.hotel_rating));
    rows.push_str(&detail_row("Direct flight", &ctx.direct_flight));
    rows.push_str(&detail_row("Origin country", &ctx.request_country));
    rows.push_str(&detail_row("Nationality", &ctx.traveller_nationality));
    rows.push_str(&detail_row("Phone", &ctx.traveller_phone));
    rows.push_str(&detail_row("Notes", &ctx.notes));

    let pricing_section = match &ctx.pricing {
        Some(pricing) => format!(
            "<table style=\"border-collapse: collapse; margin: 16px 0;\">\
             {original}{discount}{final_price}\
             </table>",
            original = detail_row("Original price", &pricing.original_price),
            discount = detail_row("Discount", &pricing.discount),
            final_price = detail_row("Final price", &pricing.final_price),
        ),
        None => "<p style=\"color: #666;\">Pricing for this tour will be \
                 confirmed separately by our team.</p>"
            .to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Booking Confirmation</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <img src="cid:logo" alt="{company_name}" style="max-height: 60px; margin-bottom: 16px;">
        <h2 style="color: #2563eb;">Booking Received</h2>
        <p>Dear {traveller_name},</p>
        <p>Thank you for booking <strong>{tour_title}</strong> with {company_name}.
        We have received your request and our team will be in touch at
        {traveller_email} shortly.</p>
        <table style="border-collapse: collapse; margin: 16px 0;">{rows}</table>
        {pricing_section}
        <p style="color: #666; font-size: 14px;">Booked on {booked_on}.</p>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            {company_name} · <a href="{company_url}">{company_url}</a>
        </p>
    </div>
</body>
</html>
"#,
        company_name = ctx.company_name,
        traveller_name = ctx.traveller_name,
        tour_title = ctx.tour_title,
        traveller_email = ctx.traveller_email,
        rows = rows,
        pricing_section = pricing_section,
        booked_on = ctx.booked_on,
        company_url = ctx.company_url,
    )
}

/// Render the contact-form thank-you email body.
#[must_use]
pub fn contact_thank_you(message: &ContactMessage, company_name: &str, company_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Thank you for contacting us</title>
</head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">Thank you for reaching out</h2>
        <p>Dear {full_name},</p>
        <p>We have received your message about
        <strong>{subject}</strong> and will get back to you as soon as we
        can.</p>
        <p style="color: #666; font-size: 14px;">
            If you did not contact {company_name}, you can safely ignore this email.
        </p>
        <p style="color: #666; font-size: 12px; margin-top: 40px;">
            {company_name} · <a href="{company_url}">{company_url}</a>
        </p>
    </div>
</body>
</html>
"#,
        full_name = message.full_name,
        subject = message.subject,
    )
}

/// Derive the plain-text alternative by stripping tags from rendered
/// HTML and collapsing the leftover whitespace.
#[must_use]
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let mut lines: Vec<&str> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_removes_markup() {
        let html = "<p>Dear <strong>Asha</strong>,</p>\n<p>Thank you.</p>";
        assert_eq!(strip_tags(html), "Dear Asha,\nThank you.");
    }

    #[test]
    fn strip_tags_drops_blank_lines() {
        let html = "<div>\n\n  <span>one</span>\n\n</div>\n<p>two</p>";
        assert_eq!(strip_tags(html), "one\ntwo");
    }

    #[test]
    fn strip_tags_plain_text_is_identity() {
        assert_eq!(strip_tags("already plain"), "already plain");
    }
}
