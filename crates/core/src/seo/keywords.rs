//! GCC-targeted base keywords attached to every page's metadata.

use crate::locale::Locale;

/// How many base keywords page metadata carries.
pub const BASE_KEYWORD_COUNT: usize = 10;

const KEYWORDS_EN: [&str; BASE_KEYWORD_COUNT] = [
    "medical tourism India",
    "healthcare Bangalore",
    "medical treatment India for GCC patients",
    "affordable medical care India",
    "JCI accredited hospitals Bangalore",
    "IVF treatment cost Bangalore",
    "IVF cost India vs UAE",
    "fertility treatment India for UAE patients",
    "heart surgery India for foreigners",
    "cardiac surgery cost Bangalore",
];

const KEYWORDS_AR: [&str; BASE_KEYWORD_COUNT] = [
    "السياحة العلاجية الهند",
    "الرعاية الصحية بنغالور",
    "العلاج الطبي في الهند",
    "تكلفة علاج أطفال الأنابيب في بنغالور",
    "تكلفة أطفال الأنابيب الهند",
    "علاج تأخر الإنجاب في الهند",
    "تكلفة جراحة القلب في الهند",
    "جراحة القلب المفتوح بنغالور",
    "تكلفة استبدال الركبة الهند",
    "استبدال مفصل الورك الهند",
];

pub fn base_keywords(locale: Locale) -> &'static [&'static str] {
    match locale {
        Locale::En => &KEYWORDS_EN,
        Locale::Ar => &KEYWORDS_AR,
    }
}
