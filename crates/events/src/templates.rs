//! Bilingual HTML email bodies.
//!
//! Patient-facing mail is rendered in the patient's locale (Arabic bodies are
//! `dir="rtl"`); staff mail is always English. Every interpolated value is
//! HTML-escaped.

use shifa_core::locale::Locale;
use shifa_core::seo::{DEFAULT_SITE_URL, SITE_NAME, SITE_NAME_AR};

const BRAND_COLOR: &str = "#005b4f";
const WHATSAPP_URL: &str = "https://wa.me/918012345678";
const WHATSAPP_DISPLAY: &str = "+91 80123 45678";
const CONTACT_ADDRESS: &str = "contact@shifaalhind.com";

/// Data for the "consultation received" pair of emails.
#[derive(Debug, Clone, Default)]
pub struct ConsultationEmail {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub treatment: String,
    pub message: Option<String>,
    pub locale: Locale,
}

/// Data for the "booking confirmed" pair of emails.
#[derive(Debug, Clone, Default)]
pub struct BookingEmail {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub treatment: String,
    pub hospital_name: Option<String>,
    pub doctor_name: Option<String>,
    pub preferred_date: Option<String>,
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Escape text for an HTML element or attribute body.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn document(locale: Locale, header: &str, content: &str, footer: &str) -> String {
    let (lang, dir, border_side) = match locale {
        Locale::En => ("en", "ltr", "left"),
        Locale::Ar => ("ar", "rtl", "right"),
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}" dir="{dir}">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<style>
body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; direction: {dir}; }}
.container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
.header {{ background-color: {BRAND_COLOR}; color: white; padding: 20px; text-align: center; border-radius: 5px 5px 0 0; }}
.content {{ background-color: #f9f9f9; padding: 30px; border-radius: 0 0 5px 5px; }}
.info-box {{ background-color: #fff; padding: 15px; border-{border_side}: 4px solid {BRAND_COLOR}; margin: 20px 0; }}
.footer {{ text-align: center; margin-top: 30px; padding-top: 20px; border-top: 1px solid #ddd; font-size: 12px; color: #666; }}
</style>
</head>
<body>
<div class="container">
<div class="header">{header}</div>
<div class="content">{content}</div>
<div class="footer">{footer}</div>
</div>
</body>
</html>"#
    )
}

fn detail(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {}</p>", escape_html(value))
}

fn optional_detail(label: &str, value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| detail(label, v))
        .unwrap_or_default()
}

fn ordered_list(items: &[&str]) -> String {
    let items: String = items.iter().map(|i| format!("<li>{i}</li>")).collect();
    format!("<ol>{items}</ol>")
}

fn language_name(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "English",
        Locale::Ar => "Arabic (العربية)",
    }
}

/// Patient acknowledgement sent right after a lead is captured.
pub fn consultation_confirmation(data: &ConsultationEmail) -> RenderedEmail {
    let name = escape_html(&data.name);
    let message = data.message.as_deref();
    match data.locale {
        Locale::En => {
            let content = format!(
                r#"<h2>Hello {name},</h2>
<p>Thank you for reaching out to {SITE_NAME}. We have received your consultation request and will get back to you as soon as possible.</p>
<div class="info-box"><h3>Your Request Details:</h3>{}{}{}{}</div>
<h3>What Happens Next?</h3>{}
<p>For urgent inquiries, you can reach us at:</p>
<p><strong>WhatsApp:</strong> <a href="{WHATSAPP_URL}">{WHATSAPP_DISPLAY}</a></p>
<p><strong>Email:</strong> <a href="mailto:{CONTACT_ADDRESS}">{CONTACT_ADDRESS}</a></p>
<p><a href="{DEFAULT_SITE_URL}/en">Visit Our Website</a></p>"#,
                detail("Treatment Required", &data.treatment),
                detail("Email", &data.email),
                detail("Phone", &data.phone),
                optional_detail("Your Message", message),
                ordered_list(&[
                    "Our team will contact you within 24 hours",
                    "We'll review your case and provide a detailed treatment plan",
                    "We'll help you choose the best hospital and doctor",
                    "We'll arrange all logistics and travel details",
                ]),
            );
            RenderedEmail {
                subject: format!("Consultation Request Received - {SITE_NAME}"),
                html: document(
                    Locale::En,
                    &format!("<h1>{SITE_NAME}</h1><p>Your Trusted Medical Tourism Partner</p>"),
                    &content,
                    &format!(
                        r#"<p>{SITE_NAME} - Your Trusted Medical Tourism Partner from GCC to India</p>
<p>Bangalore, Karnataka, India</p>
<p><a href="{DEFAULT_SITE_URL}/en/privacy-policy">Privacy Policy</a> | <a href="{DEFAULT_SITE_URL}/en/terms-and-conditions">Terms &amp; Conditions</a></p>"#
                    ),
                ),
            }
        }
        Locale::Ar => {
            let content = format!(
                r#"<h2>مرحباً {name}،</h2>
<p>شكراً لك على التواصل مع {SITE_NAME_AR}. لقد استلمنا طلب استشارتك وسنقوم بالرد عليك في أقرب وقت ممكن.</p>
<div class="info-box"><h3>تفاصيل طلبك:</h3>{}{}{}{}</div>
<h3>ماذا يحدث بعد ذلك؟</h3>{}
<p>في حالة الطوارئ، يمكنك التواصل معنا على:</p>
<p><strong>واتساب:</strong> <a href="{WHATSAPP_URL}">{WHATSAPP_DISPLAY}</a></p>
<p><strong>البريد الإلكتروني:</strong> <a href="mailto:{CONTACT_ADDRESS}">{CONTACT_ADDRESS}</a></p>
<p><a href="{DEFAULT_SITE_URL}/ar">زيارة موقعنا</a></p>"#,
                detail("العلاج المطلوب", &data.treatment),
                detail("البريد الإلكتروني", &data.email),
                detail("رقم الهاتف", &data.phone),
                optional_detail("رسالتك", message),
                ordered_list(&[
                    "سيتواصل معك فريقنا خلال 24 ساعة",
                    "سنقوم بمراجعة حالتك وتقديم خطة علاجية مفصلة",
                    "سنساعدك في اختيار أفضل مستشفى وطبيب",
                    "سنقوم بترتيب جميع التفاصيل اللوجستية",
                ]),
            );
            RenderedEmail {
                subject: format!("تأكيد استلام طلب الاستشارة - {SITE_NAME_AR}"),
                html: document(
                    Locale::Ar,
                    &format!("<h1>{SITE_NAME_AR}</h1><p>شريكك الموثوق للسياحة العلاجية</p>"),
                    &content,
                    &format!(
                        r#"<p>{SITE_NAME_AR} - شريكك الموثوق للسياحة العلاجية من الخليج إلى الهند</p>
<p>بنغالور، كارناتاكا، الهند</p>
<p><a href="{DEFAULT_SITE_URL}/ar/privacy-policy">سياسة الخصوصية</a> | <a href="{DEFAULT_SITE_URL}/ar/terms-and-conditions">الشروط والأحكام</a></p>"#
                    ),
                ),
            }
        }
    }
}

/// Staff alert for a new lead.
pub fn admin_consultation_notification(data: &ConsultationEmail) -> RenderedEmail {
    let email = escape_html(&data.email);
    let phone = escape_html(&data.phone);
    let whatsapp: String = data.phone.chars().filter(char::is_ascii_digit).collect();
    let content = format!(
        r#"<p><strong>Action Required:</strong> A new patient has requested a consultation. Please respond within 24 hours.</p>
<h3>Patient Details:</h3>{}
<p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
<p><strong>Phone:</strong> <a href="tel:{phone}">{phone}</a></p>{}{}{}
<h4>Quick Actions:</h4>
<ul>
<li><a href="https://wa.me/{whatsapp}">Contact via WhatsApp</a></li>
<li><a href="mailto:{email}">Reply via Email</a></li>
<li><a href="{DEFAULT_SITE_URL}/admin/bookings">View in Dashboard</a></li>
</ul>"#,
        detail("Name", &data.name),
        detail("Treatment", &data.treatment),
        detail("Language", language_name(data.locale)),
        optional_detail("Message", data.message.as_deref()),
    );
    RenderedEmail {
        subject: format!("New Consultation Request from {}", data.name),
        html: document(
            Locale::En,
            "<h2>New Consultation Request</h2>",
            &content,
            &format!("<p><em>This is an automated notification from {SITE_NAME}. Do not reply to this email.</em></p>"),
        ),
    }
}

/// Patient confirmation sent when staff move a booking to `CONFIRMED`.
pub fn booking_confirmation(data: &BookingEmail) -> RenderedEmail {
    let name = escape_html(&data.name);
    match data.locale {
        Locale::En => {
            let content = format!(
                r#"<h3>Dear {name},</h3>
<p>Your appointment has been successfully confirmed! We're excited to assist you in your medical journey.</p>
<div class="info-box"><h3>Booking Details:</h3>{}{}{}{}</div>
<h3>Next Steps:</h3>{}
<p><strong>For Urgent Questions:</strong></p>
<p>WhatsApp: <a href="{WHATSAPP_URL}">{WHATSAPP_DISPLAY}</a></p>"#,
                detail("Treatment", &data.treatment),
                optional_detail("Hospital", data.hospital_name.as_deref()),
                optional_detail("Doctor", data.doctor_name.as_deref()),
                optional_detail("Preferred Date", data.preferred_date.as_deref()),
                ordered_list(&[
                    "We'll contact you within 24 hours to confirm your final appointment",
                    "We'll send you a medical visa invitation letter",
                    "We'll help arrange your travel and accommodation",
                    "You'll have a personal coordinator throughout your journey",
                ]),
            );
            RenderedEmail {
                subject: format!("Booking Confirmation - {SITE_NAME}"),
                html: document(
                    Locale::En,
                    "<h1>Booking Confirmed</h1>",
                    &content,
                    &format!("<p>{SITE_NAME} - Your Trusted Medical Tourism Partner</p>"),
                ),
            }
        }
        Locale::Ar => {
            let content = format!(
                r#"<h3>عزيزي/عزيزتي {name}،</h3>
<p>تم تأكيد حجز موعدك بنجاح! نحن متحمسون لمساعدتك في رحلتك العلاجية.</p>
<div class="info-box"><h3>تفاصيل الحجز:</h3>{}{}{}{}</div>
<h3>الخطوات التالية:</h3>{}
<p><strong>للأسئلة العاجلة:</strong></p>
<p>واتساب: <a href="{WHATSAPP_URL}">{WHATSAPP_DISPLAY}</a></p>"#,
                detail("العلاج", &data.treatment),
                optional_detail("المستشفى", data.hospital_name.as_deref()),
                optional_detail("الطبيب", data.doctor_name.as_deref()),
                optional_detail("التاريخ المفضل", data.preferred_date.as_deref()),
                ordered_list(&[
                    "سنتواصل معك خلال 24 ساعة لتأكيد موعدك النهائي",
                    "سنرسل لك خطاب دعوة للتأشيرة الطبية",
                    "سنساعدك في ترتيبات السفر والإقامة",
                    "سيكون لديك منسق شخصي طوال رحلتك",
                ]),
            );
            RenderedEmail {
                subject: format!("تأكيد حجز الموعد - {SITE_NAME_AR}"),
                html: document(
                    Locale::Ar,
                    "<h1>تم تأكيد حجزك</h1>",
                    &content,
                    &format!("<p>{SITE_NAME_AR} - شريكك الموثوق للسياحة العلاجية</p>"),
                ),
            }
        }
    }
}

/// Staff alert for a confirmed booking.
pub fn admin_booking_notification(data: &BookingEmail) -> RenderedEmail {
    let email = escape_html(&data.email);
    let phone = escape_html(&data.phone);
    let content = format!(
        r#"<p><strong>High Priority:</strong> A patient booking has been confirmed. Please process this within 24 hours.</p>
<h3>Patient Details:</h3>{}
<p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
<p><strong>Phone:</strong> <a href="tel:{phone}">{phone}</a></p>{}{}{}{}{}
<p><a href="{DEFAULT_SITE_URL}/admin/bookings">View in Dashboard</a></p>"#,
        detail("Name", &data.name),
        detail("Treatment", &data.treatment),
        optional_detail("Hospital", data.hospital_name.as_deref()),
        optional_detail("Doctor", data.doctor_name.as_deref()),
        optional_detail("Preferred Date", data.preferred_date.as_deref()),
        detail("Language", language_name(data.locale)),
    );
    RenderedEmail {
        subject: format!("New Booking from {} - {}", data.name, data.treatment),
        html: document(Locale::En, "<h2>New Booking Received</h2>", &content, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consultation(locale: Locale) -> ConsultationEmail {
        ConsultationEmail {
            name: "Fatima <Al-Sayed>".to_string(),
            email: "fatima@example.com".to_string(),
            phone: "+973 3600 1234".to_string(),
            treatment: "Knee Replacement".to_string(),
            message: None,
            locale,
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html(r#"<b>"Tom" & 'Jerry'</b>"#), "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
    }

    #[test]
    fn english_confirmation_escapes_patient_name() {
        let email = consultation_confirmation(&consultation(Locale::En));
        assert_eq!(email.subject, "Consultation Request Received - Shifa AlHind");
        assert!(email.html.contains("Hello Fatima &lt;Al-Sayed&gt;,"));
        assert!(!email.html.contains("<Al-Sayed>"));
        assert!(email.html.contains(r#"dir="ltr""#));
        assert!(!email.html.contains("Your Message"));
    }

    #[test]
    fn arabic_confirmation_is_right_to_left() {
        let email = consultation_confirmation(&consultation(Locale::Ar));
        assert!(email.subject.contains("شفاء الهند"));
        assert!(email.html.contains(r#"lang="ar" dir="rtl""#));
        assert!(email.html.contains("border-right"));
    }

    #[test]
    fn admin_notification_links_whatsapp_digits() {
        let mut data = consultation(Locale::Ar);
        data.message = Some("Need a quote".to_string());
        let email = admin_consultation_notification(&data);
        assert!(email.html.contains("https://wa.me/97336001234"));
        assert!(email.html.contains("Arabic (العربية)"));
        assert!(email.html.contains("Need a quote"));
        assert!(email.html.contains(r#"lang="en""#));
    }

    #[test]
    fn booking_confirmation_omits_missing_details() {
        let data = BookingEmail {
            name: "Omar".to_string(),
            treatment: "IVF".to_string(),
            hospital_name: Some("Apollo Chennai".to_string()),
            ..Default::default()
        };
        let email = booking_confirmation(&data);
        assert_eq!(email.subject, "Booking Confirmation - Shifa AlHind");
        assert!(email.html.contains("Apollo Chennai"));
        assert!(!email.html.contains("Doctor:"));

        let admin = admin_booking_notification(&data);
        assert_eq!(admin.subject, "New Booking from Omar - IVF");
    }
}
