/// A target language the translation service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

pub const LANGUAGES: &[Language] = &[
    lang("RU", "Russian"),
    lang("EN", "English"),
    lang("ES", "Spanish"),
    lang("IT", "Italian"),
    lang("DE", "German"),
    lang("FR", "French"),
    lang("AR", "Arabic"),
    lang("AZ", "Azerbaijani"),
    lang("BE", "Belarusian"),
    lang("BN", "Bengali"),
    lang("BS", "Bosnian"),
    lang("PT-BR", "Brazilian Portuguese"),
    lang("BG", "Bulgarian"),
    lang("YUE", "Cantonese"),
    lang("CA", "Catalan"),
    lang("ZH", "Chinese"),
    lang("HR", "Croatian"),
    lang("CS", "Czech"),
    lang("DA", "Danish"),
    lang("NL", "Dutch"),
    lang("ET", "Estonian"),
    lang("FI", "Finnish"),
    lang("EL", "Greek"),
    lang("GU", "Gujarati"),
    lang("HI", "Hindi"),
    lang("HU", "Hungarian"),
    lang("ID", "Indonesian"),
    lang("GA", "Irish"),
    lang("JA", "Japanese"),
    lang("KZ", "Kazakh"),
    lang("KO", "Korean"),
    lang("KY", "Kyrgyz"),
    lang("LV", "Latvian"),
    lang("LT", "Lithuanian"),
    lang("MK", "Macedonian"),
    lang("MS", "Malay"),
    lang("MT", "Maltese"),
    lang("CMN", "Mandarin"),
    lang("MR", "Marathi"),
    lang("MO", "Moldovan"),
    lang("MN", "Mongolian"),
    lang("NE", "Nepali"),
    lang("NO", "Norwegian"),
    lang("PL", "Polish"),
    lang("PT", "Portuguese"),
    lang("PA", "Punjabi"),
    lang("RO", "Romanian"),
    lang("SR", "Serbian"),
    lang("SK", "Slovak"),
    lang("SL", "Slovenian"),
    lang("SW", "Swahili"),
    lang("SV", "Swedish"),
    lang("TG", "Tajik"),
    lang("TA", "Tamil"),
    lang("TT", "Tatar"),
    lang("TE", "Telugu"),
    lang("TH", "Thai"),
    lang("TR", "Turkish"),
    lang("TK", "Turkmen"),
    lang("UK", "Ukrainian"),
    lang("UR", "Urdu"),
    lang("UZ", "Uzbek"),
    lang("VI", "Vietnamese"),
];

/// Case-insensitive lookup by language code.
pub fn find_language(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES
        .iter()
        .find(|language| language.code.eq_ignore_ascii_case(code))
}
