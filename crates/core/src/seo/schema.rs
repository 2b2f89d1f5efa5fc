//! schema.org JSON-LD builders.
//!
//! Each builder returns a standalone document carrying its own `@context`.
//! Optional inputs that are `None` are omitted rather than serialized as
//! `null`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{absolute_url, reading_time_minutes, CONTACT_EMAIL, CONTACT_PHONE, SITE_NAME, SITE_NAME_AR, SOCIAL_LINKS};
use crate::locale::Locale;

const CONTEXT: &str = "https://schema.org";

const GCC_COUNTRIES: [&str; 6] = [
    "United Arab Emirates",
    "Saudi Arabia",
    "Qatar",
    "Oman",
    "Kuwait",
    "Bahrain",
];

const SPECIALTIES: [&str; 12] = [
    "Cardiology",
    "Orthopedics",
    "Oncology",
    "Neurology",
    "Fertility",
    "Cosmetic Surgery",
    "Dental Care",
    "Ophthalmology",
    "Gastroenterology",
    "Organ Transplant",
    "ENT",
    "Ayurveda",
];

fn postal_address(street: Option<&str>, locality: &str) -> Value {
    let mut address = json!({
        "@type": "PostalAddress",
        "addressLocality": locality,
        "addressRegion": "Karnataka",
        "addressCountry": "IN",
    });
    if let Some(street) = street {
        address["streetAddress"] = json!(street);
    }
    address
}

fn insert_opt(map: &mut Map<String, Value>, key: &str, value: Option<impl Into<Value>>) {
    if let Some(v) = value {
        map.insert(key.to_string(), v.into());
    }
}

fn into_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// The agency itself, serving the six GCC countries.
pub fn medical_business(site_url: &str, description: &str) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "MedicalBusiness",
        "name": SITE_NAME,
        "alternateName": SITE_NAME_AR,
        "description": description,
        "url": site_url,
        "telephone": CONTACT_PHONE,
        "email": CONTACT_EMAIL,
        "address": postal_address(None, "Bangalore"),
        "areaServed": GCC_COUNTRIES
            .iter()
            .map(|name| json!({ "@type": "Country", "name": name }))
            .collect::<Vec<_>>(),
        "availableLanguage": ["English", "Arabic", "Hindi"],
        "priceRange": "$$",
        "medicalSpecialty": SPECIALTIES,
        "sameAs": SOCIAL_LINKS,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub name: String,
    pub url: String,
}

/// Positions start at 1.
pub fn breadcrumb_list(items: &[BreadcrumbItem]) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items
            .iter()
            .enumerate()
            .map(|(i, item)| json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": item.name,
                "item": item.url,
            }))
            .collect::<Vec<_>>(),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Default)]
pub struct MedicalProcedureInput {
    pub name: String,
    pub description: String,
    pub procedure_type: Option<String>,
    pub url: Option<String>,
    pub cost: Option<CostRange>,
}

pub fn medical_procedure(input: MedicalProcedureInput) -> Value {
    let procedure_type = input.procedure_type.unwrap_or_else(|| input.name.clone());
    let mut doc = into_object(json!({
        "@context": CONTEXT,
        "@type": "MedicalProcedure",
        "name": input.name,
        "description": input.description,
        "procedureType": procedure_type,
    }));
    insert_opt(&mut doc, "url", input.url);
    if let Some(cost) = input.cost {
        doc.insert(
            "cost".to_string(),
            json!({
                "@type": "MonetaryAmount",
                "currency": cost.currency,
                "minValue": cost.min,
                "maxValue": cost.max,
            }),
        );
    }
    Value::Object(doc)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Extract FAQ entries for `locale` from a stored `faq` JSON array.
///
/// Accepts bilingual entries (`q_en`/`a_en`/`q_ar`/`a_ar`) and plain
/// `question`/`answer` entries. Entries missing either half are skipped.
pub fn faq_items_from_json(value: &Value, locale: Locale) -> Vec<FaqItem> {
    let (q_key, a_key) = match locale {
        Locale::En => ("q_en", "a_en"),
        Locale::Ar => ("q_ar", "a_ar"),
    };
    let Some(entries) = value.as_array() else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let field = |keys: [&str; 2]| {
                keys.iter()
                    .find_map(|k| entry.get(*k).and_then(Value::as_str))
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            };
            Some(FaqItem {
                question: field([q_key, "question"])?,
                answer: field([a_key, "answer"])?,
            })
        })
        .collect()
}

pub fn faq_page(faqs: &[FaqItem]) -> Value {
    json!({
        "@context": CONTEXT,
        "@type": "FAQPage",
        "mainEntity": faqs
            .iter()
            .map(|faq| json!({
                "@type": "Question",
                "name": faq.question,
                "acceptedAnswer": { "@type": "Answer", "text": faq.answer },
            }))
            .collect::<Vec<_>>(),
    })
}

#[derive(Debug, Clone, Default)]
pub struct HospitalInput {
    pub name: String,
    pub alternate_name: Option<String>,
    pub description: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub accreditations: Vec<String>,
    pub languages: Vec<String>,
}

pub fn hospital(site_url: &str, input: HospitalInput) -> Value {
    let city = input.city.unwrap_or_else(|| "Bangalore".to_string());
    let image = absolute_url(
        site_url,
        input.image.as_deref().unwrap_or("/hospitals/default.jpg"),
    );
    let mut doc = into_object(json!({
        "@context": CONTEXT,
        "@type": "Hospital",
        "name": input.name,
        "image": image,
        "address": postal_address(input.street_address.as_deref(), &city),
    }));
    insert_opt(&mut doc, "alternateName", input.alternate_name);
    insert_opt(&mut doc, "description", input.description);
    insert_opt(&mut doc, "url", input.url);
    if !input.accreditations.is_empty() {
        doc.insert("accreditation".to_string(), json!(input.accreditations));
    }
    if !input.languages.is_empty() {
        doc.insert("availableLanguage".to_string(), json!(input.languages));
    }
    Value::Object(doc)
}

#[derive(Debug, Clone, Default)]
pub struct PhysicianInput {
    pub name: String,
    pub description: Option<String>,
    pub specialties: Vec<String>,
    pub qualifications: Vec<String>,
    pub hospital_name: Option<String>,
    pub hospital_city: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

pub fn physician(site_url: &str, input: PhysicianInput) -> Value {
    let image = absolute_url(
        site_url,
        input.image.as_deref().unwrap_or("/doctors/default.jpg"),
    );
    let mut doc = into_object(json!({
        "@context": CONTEXT,
        "@type": "Physician",
        "name": input.name,
        "medicalSpecialty": input.specialties,
        "image": image,
        "hasCredential": input
            .qualifications
            .iter()
            .map(|q| json!({
                "@type": "EducationalOccupationalCredential",
                "credentialCategory": q,
            }))
            .collect::<Vec<_>>(),
    }));
    insert_opt(&mut doc, "description", input.description);
    insert_opt(&mut doc, "url", input.url);
    if let Some(name) = input.hospital_name {
        let city = input.hospital_city.unwrap_or_else(|| "Bangalore".to_string());
        doc.insert(
            "workLocation".to_string(),
            json!({
                "@type": "Hospital",
                "name": name,
                "address": postal_address(None, &city),
            }),
        );
    }
    Value::Object(doc)
}

#[derive(Debug, Clone, Default)]
pub struct BlogPostingInput {
    pub headline: String,
    pub description: String,
    pub author: Option<String>,
    /// RFC 3339.
    pub date_published: Option<String>,
    pub date_modified: Option<String>,
    pub image: Option<String>,
    pub url: String,
    pub locale: Locale,
    /// Article body text, used for `wordCount` and `timeRequired`.
    pub body: String,
}

pub fn blog_posting(site_url: &str, input: BlogPostingInput) -> Value {
    let author = input.author.unwrap_or_else(|| SITE_NAME.to_string());
    let mut doc = into_object(json!({
        "@context": CONTEXT,
        "@type": "BlogPosting",
        "headline": input.headline,
        "description": input.description,
        "inLanguage": input.locale.as_str(),
        "author": { "@type": "Person", "name": author },
        "publisher": {
            "@type": "Organization",
            "name": SITE_NAME,
            "logo": { "@type": "ImageObject", "url": absolute_url(site_url, "/logo.png") },
        },
        "mainEntityOfPage": { "@type": "WebPage", "@id": input.url },
    }));
    let modified = input.date_modified.or_else(|| input.date_published.clone());
    insert_opt(&mut doc, "datePublished", input.date_published);
    insert_opt(&mut doc, "dateModified", modified);
    insert_opt(
        &mut doc,
        "image",
        input.image.map(|img| absolute_url(site_url, &img)),
    );
    let minutes = reading_time_minutes(&input.body);
    if minutes > 0 {
        doc.insert("wordCount".into(), json!(input.body.split_whitespace().count()));
        doc.insert("timeRequired".into(), json!(format!("PT{minutes}M")));
    }
    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seo::DEFAULT_SITE_URL;

    #[test]
    fn breadcrumbs_are_one_indexed() {
        let doc = breadcrumb_list(&[
            BreadcrumbItem { name: "Home".into(), url: "https://shifaalhind.com/en".into() },
            BreadcrumbItem { name: "IVF".into(), url: "https://shifaalhind.com/en/treatments/ivf".into() },
        ]);
        assert_eq!(doc["@type"], "BreadcrumbList");
        assert_eq!(doc["itemListElement"][0]["position"], 1);
        assert_eq!(doc["itemListElement"][1]["name"], "IVF");
    }

    #[test]
    fn procedure_cost_is_a_monetary_amount() {
        let doc = medical_procedure(MedicalProcedureInput {
            name: "Hip Replacement".into(),
            description: "Minimally invasive".into(),
            cost: Some(CostRange { min: 4500.0, max: 8500.0, currency: "USD".into() }),
            ..Default::default()
        });
        assert_eq!(doc["procedureType"], "Hip Replacement");
        assert_eq!(doc["cost"]["@type"], "MonetaryAmount");
        assert_eq!(doc["cost"]["maxValue"], 8500.0);
        assert!(doc.get("url").is_none());
    }

    #[test]
    fn procedure_without_cost_omits_it() {
        let doc = medical_procedure(MedicalProcedureInput {
            name: "Consultation".into(),
            ..Default::default()
        });
        assert!(doc.get("cost").is_none());
    }

    #[test]
    fn faq_entries_pick_locale_and_skip_incomplete() {
        let stored = json!([
            { "q_en": "Recovery time?", "a_en": "6-8 weeks", "q_ar": "كم مدة التعافي؟", "a_ar": "6-8 أسابيع" },
            { "q_en": "No answer" },
            { "question": "Plain?", "answer": "Yes" },
        ]);
        let en = faq_items_from_json(&stored, Locale::En);
        assert_eq!(en.len(), 2);
        assert_eq!(en[1].question, "Plain?");

        let ar = faq_items_from_json(&stored, Locale::Ar);
        assert_eq!(ar[0].answer, "6-8 أسابيع");

        let doc = faq_page(&en);
        assert_eq!(doc["mainEntity"][0]["acceptedAnswer"]["text"], "6-8 weeks");
        assert!(faq_items_from_json(&json!({}), Locale::En).is_empty());
    }

    #[test]
    fn hospital_defaults_image_and_city() {
        let doc = hospital(
            DEFAULT_SITE_URL,
            HospitalInput {
                name: "Apollo Hospitals".into(),
                accreditations: vec!["JCI".into()],
                ..Default::default()
            },
        );
        assert_eq!(doc["image"], "https://shifaalhind.com/hospitals/default.jpg");
        assert_eq!(doc["address"]["addressLocality"], "Bangalore");
        assert_eq!(doc["accreditation"][0], "JCI");
        assert!(doc.get("description").is_none());
    }

    #[test]
    fn physician_work_location_only_with_hospital() {
        let without = physician(DEFAULT_SITE_URL, PhysicianInput { name: "Dr. Rao".into(), ..Default::default() });
        assert!(without.get("workLocation").is_none());

        let with = physician(
            DEFAULT_SITE_URL,
            PhysicianInput {
                name: "Dr. Rao".into(),
                qualifications: vec!["MS Ortho".into()],
                hospital_name: Some("Manipal".into()),
                hospital_city: Some("Chennai".into()),
                ..Default::default()
            },
        );
        assert_eq!(with["workLocation"]["address"]["addressLocality"], "Chennai");
        assert_eq!(with["hasCredential"][0]["credentialCategory"], "MS Ortho");
    }

    #[test]
    fn blog_posting_falls_back_to_published_date() {
        let doc = blog_posting(
            DEFAULT_SITE_URL,
            BlogPostingInput {
                headline: "IVF costs".into(),
                description: "Guide".into(),
                date_published: Some("2026-01-10T00:00:00Z".into()),
                url: "https://shifaalhind.com/en/blog/ivf-costs".into(),
                ..Default::default()
            },
        );
        assert_eq!(doc["dateModified"], "2026-01-10T00:00:00Z");
        assert_eq!(doc["author"]["name"], "Shifa AlHind");
        assert_eq!(doc["publisher"]["logo"]["url"], "https://shifaalhind.com/logo.png");
        assert!(doc.get("timeRequired").is_none());
    }

    #[test]
    fn blog_posting_carries_reading_time() {
        let doc = blog_posting(
            DEFAULT_SITE_URL,
            BlogPostingInput {
                headline: "Knee recovery".into(),
                url: "https://shifaalhind.com/en/blog/knee-recovery".into(),
                body: "word ".repeat(450),
                ..Default::default()
            },
        );
        assert_eq!(doc["wordCount"], 450);
        assert_eq!(doc["timeRequired"], "PT3M");
    }

    #[test]
    fn medical_business_serves_gcc() {
        let doc = medical_business(DEFAULT_SITE_URL, "desc");
        assert_eq!(doc["areaServed"].as_array().map(Vec::len), Some(6));
        assert_eq!(doc["alternateName"], "شفاء الهند");
    }
}
