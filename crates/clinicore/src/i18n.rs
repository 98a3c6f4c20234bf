use fluent_templates::{static_loader, Loader};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

static_loader! {
    static LOCALES = {
        locales: "./locales",
        fallback_language: "uk",
        customise: |bundle| bundle.set_use_isolating(false),
    };
}

/// Supported languages (code, human-readable name).
pub static SUPPORTED_LANGS: &[(&str, &str)] = &[("uk", "Українська"), ("en", "English")];

/// Code of the site's default language.
pub const DEFAULT_LANG_CODE: &str = "uk";

/// Default language identifier.
pub static DEFAULT_LANG: Lazy<LanguageIdentifier> =
    Lazy::new(|| lang_from_code(DEFAULT_LANG_CODE).unwrap_or_default());

/// Subject tag ids offered on the contact form, in display order.
/// Each id has a `tag-<id>` message in every locale.
pub const SUBJECT_TAG_IDS: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 8];

/// A subject tag with its localized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTag {
    pub id: u32,
    pub name: String,
}

/// Checks if a language code is supported by the site.
/// Returns the normalized language code if supported, None otherwise.
pub fn is_language_supported(code: &str) -> Option<&'static str> {
    // Normalize the code (e.g., "uk-UA" -> "uk", "en_GB" -> "en")
    let normalized = code.trim().split(['-', '_']).next().unwrap_or(code).to_lowercase();

    SUPPORTED_LANGS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(&normalized))
        .map(|(c, _)| *c)
}

/// Language identifier for a supported code, None for anything else.
pub fn lang_from_code(code: &str) -> Option<LanguageIdentifier> {
    is_language_supported(code).and_then(|c| c.parse().ok())
}

/// Returns a localized string for the given key, or the key itself.
pub fn t(lang: &LanguageIdentifier, key: &str) -> String {
    LOCALES.lookup(lang, key).unwrap_or_else(|| key.to_string())
}

/// Localized subject names.
///
/// The pipeline and the HTTP layer only see this trait, so tests can supply
/// their own tag sets.
pub trait SubjectCatalog: Send + Sync {
    /// Display name of `subject_id` in `locale`, None when the locale is
    /// unsupported or has no such tag.
    fn subject_name(&self, locale: &str, subject_id: &str) -> Option<String>;

    /// All tags of a locale, None when the locale is unsupported.
    fn subjects(&self, locale: &str) -> Option<Vec<SubjectTag>>;
}

/// Catalog backed by the bundled Fluent resources.
#[derive(Debug, Clone, Copy, Default)]
pub struct FluentCatalog;

impl FluentCatalog {
    fn tag_key(tag_id: u32) -> String {
        format!("tag-{}", tag_id)
    }
}

impl SubjectCatalog for FluentCatalog {
    fn subject_name(&self, locale: &str, subject_id: &str) -> Option<String> {
        let lang = lang_from_code(locale)?;
        // Only the canonical spelling names a tag: "03", "+3" or " 3" do not
        let tag_id: u32 = subject_id.parse().ok().filter(|id: &u32| id.to_string() == subject_id)?;
        if !SUBJECT_TAG_IDS.contains(&tag_id) {
            return None;
        }
        LOCALES.lookup(&lang, &Self::tag_key(tag_id))
    }

    fn subjects(&self, locale: &str) -> Option<Vec<SubjectTag>> {
        let lang = lang_from_code(locale)?;
        Some(
            SUBJECT_TAG_IDS
                .iter()
                .filter_map(|&id| {
                    LOCALES
                        .lookup(&lang, &Self::tag_key(id))
                        .map(|name| SubjectTag { id, name })
                })
                .collect(),
        )
    }
}

/// Resolves the display name of a submitted subject, falling back to the
/// raw identifier verbatim when the catalog has nothing for it.
pub fn subject_label(catalog: &dyn SubjectCatalog, locale: &str, subject_id: &str) -> String {
    catalog
        .subject_name(locale, subject_id)
        .unwrap_or_else(|| subject_id.to_string())
}
