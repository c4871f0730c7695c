use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{TypeInfo, TypeKind, Typed};
use crate::reflection::impl_reflect_cast_fn;

// -----------------------------------------------------------------------------
// Table

/// `(code, English name)`, sorted by code.
#[rustfmt::skip]
static LANGUAGES: &[(&str, &str)] = &[
    ("aa", "Afar"), ("ab", "Abkhazian"), ("ae", "Avestan"), ("af", "Afrikaans"),
    ("ak", "Akan"), ("am", "Amharic"), ("an", "Aragonese"), ("ar", "Arabic"),
    ("as", "Assamese"), ("av", "Avaric"), ("ay", "Aymara"), ("az", "Azerbaijani"),
    ("ba", "Bashkir"), ("be", "Belarusian"), ("bg", "Bulgarian"), ("bi", "Bislama"),
    ("bm", "Bambara"), ("bn", "Bengali"), ("bo", "Tibetan"), ("br", "Breton"),
    ("bs", "Bosnian"), ("ca", "Catalan"), ("ce", "Chechen"), ("ch", "Chamorro"),
    ("co", "Corsican"), ("cr", "Cree"), ("cs", "Czech"), ("cu", "Church Slavic"),
    ("cv", "Chuvash"), ("cy", "Welsh"), ("da", "Danish"), ("de", "German"),
    ("dv", "Divehi"), ("dz", "Dzongkha"), ("ee", "Ewe"), ("el", "Greek"),
    ("en", "English"), ("eo", "Esperanto"), ("es", "Spanish"), ("et", "Estonian"),
    ("eu", "Basque"), ("fa", "Persian"), ("ff", "Fulah"), ("fi", "Finnish"),
    ("fj", "Fijian"), ("fo", "Faroese"), ("fr", "French"), ("fy", "Western Frisian"),
    ("ga", "Irish"), ("gd", "Gaelic"), ("gl", "Galician"), ("gn", "Guarani"),
    ("gu", "Gujarati"), ("gv", "Manx"), ("ha", "Hausa"), ("he", "Hebrew"),
    ("hi", "Hindi"), ("ho", "Hiri Motu"), ("hr", "Croatian"), ("ht", "Haitian"),
    ("hu", "Hungarian"), ("hy", "Armenian"), ("hz", "Herero"), ("ia", "Interlingua"),
    ("id", "Indonesian"), ("ie", "Interlingue"), ("ig", "Igbo"), ("ii", "Sichuan Yi"),
    ("ik", "Inupiaq"), ("io", "Ido"), ("is", "Icelandic"), ("it", "Italian"),
    ("iu", "Inuktitut"), ("ja", "Japanese"), ("jv", "Javanese"), ("ka", "Georgian"),
    ("kg", "Kongo"), ("ki", "Kikuyu"), ("kj", "Kuanyama"), ("kk", "Kazakh"),
    ("kl", "Kalaallisut"), ("km", "Central Khmer"), ("kn", "Kannada"), ("ko", "Korean"),
    ("kr", "Kanuri"), ("ks", "Kashmiri"), ("ku", "Kurdish"), ("kv", "Komi"),
    ("kw", "Cornish"), ("ky", "Kirghiz"), ("la", "Latin"), ("lb", "Luxembourgish"),
    ("lg", "Ganda"), ("li", "Limburgan"), ("ln", "Lingala"), ("lo", "Lao"),
    ("lt", "Lithuanian"), ("lu", "Luba-Katanga"), ("lv", "Latvian"), ("mg", "Malagasy"),
    ("mh", "Marshallese"), ("mi", "Maori"), ("mk", "Macedonian"), ("ml", "Malayalam"),
    ("mn", "Mongolian"), ("mr", "Marathi"), ("ms", "Malay"), ("mt", "Maltese"),
    ("my", "Burmese"), ("na", "Nauru"), ("nb", "Norwegian Bokmal"), ("nd", "North Ndebele"),
    ("ne", "Nepali"), ("ng", "Ndonga"), ("nl", "Dutch"), ("nn", "Norwegian Nynorsk"),
    ("no", "Norwegian"), ("nr", "South Ndebele"), ("nv", "Navajo"), ("ny", "Chichewa"),
    ("oc", "Occitan"), ("oj", "Ojibwa"), ("om", "Oromo"), ("or", "Oriya"),
    ("os", "Ossetian"), ("pa", "Punjabi"), ("pi", "Pali"), ("pl", "Polish"),
    ("ps", "Pashto"), ("pt", "Portuguese"), ("qu", "Quechua"), ("rm", "Romansh"),
    ("rn", "Rundi"), ("ro", "Romanian"), ("ru", "Russian"), ("rw", "Kinyarwanda"),
    ("sa", "Sanskrit"), ("sc", "Sardinian"), ("sd", "Sindhi"), ("se", "Northern Sami"),
    ("sg", "Sango"), ("si", "Sinhala"), ("sk", "Slovak"), ("sl", "Slovenian"),
    ("sm", "Samoan"), ("sn", "Shona"), ("so", "Somali"), ("sq", "Albanian"),
    ("sr", "Serbian"), ("ss", "Swati"), ("st", "Southern Sotho"), ("su", "Sundanese"),
    ("sv", "Swedish"), ("sw", "Swahili"), ("ta", "Tamil"), ("te", "Telugu"),
    ("tg", "Tajik"), ("th", "Thai"), ("ti", "Tigrinya"), ("tk", "Turkmen"),
    ("tl", "Tagalog"), ("tn", "Tswana"), ("to", "Tonga"), ("tr", "Turkish"),
    ("ts", "Tsonga"), ("tt", "Tatar"), ("tw", "Twi"), ("ty", "Tahitian"),
    ("ug", "Uighur"), ("uk", "Ukrainian"), ("ur", "Urdu"), ("uz", "Uzbek"),
    ("ve", "Venda"), ("vi", "Vietnamese"), ("vo", "Volapuk"), ("wa", "Walloon"),
    ("wo", "Wolof"), ("xh", "Xhosa"), ("yi", "Yiddish"), ("yo", "Yoruba"),
    ("za", "Zhuang"), ("zh", "Chinese"), ("zu", "Zulu"),
];

// -----------------------------------------------------------------------------
// Language

/// A neutral language, identified by its ISO 639-1 code.
///
/// Parsing ignores case and a trailing region, so `en`, `EN` and `en-GB`
/// all denote English.
///
/// # Examples
///
/// ```
/// use vc_qs::impls::Language;
///
/// let lang: Language = "de-AT".parse().unwrap();
/// assert_eq!(lang.code(), "de");
/// assert_eq!(lang.name(), "German");
/// assert_eq!(lang.to_string(), "de");
/// assert!("xx".parse::<Language>().is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    index: u16,
}

/// Error of parsing an unknown language code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("`{0}` is not an ISO 639-1 language code")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Looks up an exact lowercase two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        LANGUAGES
            .binary_search_by(|(key, _)| (*key).cmp(code))
            .ok()
            .map(|index| Self { index: index as u16 })
    }

    /// The two-letter code, e.g. `en`.
    #[inline]
    pub fn code(&self) -> &'static str {
        LANGUAGES[self.index as usize].0
    }

    /// The English name, e.g. `English`.
    #[inline]
    pub fn name(&self) -> &'static str {
        LANGUAGES[self.index as usize].1
    }

    /// Every known language, ordered by code.
    pub fn all() -> impl ExactSizeIterator<Item = Language> {
        (0..LANGUAGES.len()).map(|index| Self { index: index as u16 })
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Language({})", self.code())
    }
}

impl fmt::Display for Language {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let neutral = s.split(['-', '_']).next().unwrap_or_default();
        Self::from_code(&neutral.to_ascii_lowercase()).ok_or_else(|| UnknownLanguage(s.into()))
    }
}

impl Typed for Language {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| {
            TypeInfo::new::<Self>(TypeKind::Opaque)
                .with_display::<Self>()
                .with_from_str::<Self>()
        })
    }
}

impl Reflect for Language {
    impl_reflect_cast_fn!(Value, Value);
}

#[cfg(test)]
mod tests {
    use super::{LANGUAGES, Language, UnknownLanguage};
    use alloc::string::ToString;

    #[test]
    fn table_is_sorted() {
        assert!(LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(LANGUAGES.iter().all(|(code, _)| code.len() == 2));
    }

    #[test]
    fn parse_ignores_case_and_region() {
        let en = Language::from_code("en").unwrap();
        assert_eq!("EN".parse::<Language>(), Ok(en));
        assert_eq!("en_US".parse::<Language>(), Ok(en));
        assert_eq!(
            "".parse::<Language>(),
            Err(UnknownLanguage("".to_string()))
        );
    }

    #[test]
    fn every_code_round_trips() {
        for lang in Language::all() {
            assert_eq!(lang.to_string().parse::<Language>(), Ok(lang));
        }
    }
}
