//! Locale resolution and localized content.
//!
//! Three locales are supported; English is the fixed default. A visitor's
//! locale is resolved from the persisted `lang` cookie first, then from the
//! browser's `Accept-Language` header, then falls back to English.
//!
//! Repository-backed content carries all three locales in a [`LocalizedText`]
//! (or [`LocalizedList`] for tag lists) next to an optional legacy
//! single-locale column kept from earlier data. [`LocalizedText::localize`]
//! implements the full fallback chain so templates never render a blank
//! where any locale has content.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    Uk,
    Ru,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Uk, Locale::Ru, Locale::En];
    pub const DEFAULT: Locale = Locale::En;

    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Uk => "uk",
            Locale::Ru => "ru",
            Locale::En => "en",
        }
    }

    /// Exact-tag parse, used for the persisted preference.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        match tag {
            "uk" => Some(Locale::Uk),
            "ru" => Some(Locale::Ru),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Resolve the active locale: saved preference, then the first supported
    /// language prefix in `Accept-Language`, then the default.
    pub fn resolve(saved: Option<&str>, accept_language: Option<&str>) -> Locale {
        if let Some(locale) = saved.and_then(Locale::from_tag) {
            return locale;
        }
        if let Some(header) = accept_language
            && let Some(locale) = from_accept_language(header)
        {
            return locale;
        }
        Locale::DEFAULT
    }
}

/// Scan an `Accept-Language` value in listed order and return the first
/// entry whose primary subtag matches a supported locale.
fn from_accept_language(header: &str) -> Option<Locale> {
    header.split(',').find_map(|entry| {
        let tag = entry.split(';').next().unwrap_or("").trim();
        let primary = tag.split(['-', '_']).next().unwrap_or("");
        Locale::from_tag(&primary.to_ascii_lowercase())
    })
}

/// A per-locale text field as stored on repository records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub uk: String,
    pub ru: String,
    pub en: String,
}

impl LocalizedText {
    pub fn new(
        uk: impl Into<String>,
        ru: impl Into<String>,
        en: impl Into<String>,
    ) -> LocalizedText {
        LocalizedText {
            uk: uk.into(),
            ru: ru.into(),
            en: en.into(),
        }
    }

    fn field(&self, locale: Locale) -> &str {
        match locale {
            Locale::Uk => &self.uk,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
        }
    }

    pub fn is_empty(&self) -> bool {
        Locale::ALL
            .iter()
            .all(|locale| self.field(*locale).trim().is_empty())
    }

    /// Resolve display text for `locale` with the documented fallback chain:
    /// the localized field, the legacy single-locale field, the remaining
    /// locales in uk/ru/en order, and finally the empty string.
    pub fn localize<'a>(&'a self, legacy: Option<&'a str>, locale: Locale) -> &'a str {
        let own = self.field(locale);
        if !own.trim().is_empty() {
            return own;
        }
        if let Some(text) = legacy
            && !text.trim().is_empty()
        {
            return text;
        }
        for fallback in Locale::ALL {
            let text = self.field(fallback);
            if !text.trim().is_empty() {
                return text;
            }
        }
        ""
    }
}

/// A per-locale ordered tag list (service tags on a case study).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedList {
    pub uk: Vec<String>,
    pub ru: Vec<String>,
    pub en: Vec<String>,
}

impl LocalizedList {
    fn field(&self, locale: Locale) -> &[String] {
        match locale {
            Locale::Uk => &self.uk,
            Locale::Ru => &self.ru,
            Locale::En => &self.en,
        }
    }

    /// Same fallback chain as [`LocalizedText::localize`], over lists.
    pub fn localize<'a>(&'a self, legacy: Option<&'a [String]>, locale: Locale) -> &'a [String] {
        let own = self.field(locale);
        if !own.is_empty() {
            return own;
        }
        if let Some(list) = legacy
            && !list.is_empty()
        {
            return list;
        }
        for fallback in Locale::ALL {
            let list = self.field(fallback);
            if !list.is_empty() {
                return list;
            }
        }
        &[]
    }
}

/// Static UI copy for one locale. Every key is a struct field, so lookup is
/// total by construction.
#[derive(Debug)]
pub struct Translations {
    pub nav_work: &'static str,
    pub nav_contact: &'static str,
    pub before: &'static str,
    pub after: &'static str,
    pub other_work: &'static str,
    pub view_project: &'static str,
    pub back_to_work: &'static str,
    pub project_not_found: &'static str,
    pub showcase_empty: &'static str,

    pub contact_title: &'static str,
    pub contact_description: &'static str,
    pub field_name: &'static str,
    pub field_platform: &'static str,
    pub field_contact: &'static str,
    pub field_message: &'static str,
    pub optional_label: &'static str,
    pub placeholder_name: &'static str,
    pub placeholder_contact_telegram: &'static str,
    pub placeholder_contact_instagram: &'static str,
    pub placeholder_message: &'static str,
    pub platform_instagram: &'static str,
    pub platform_telegram: &'static str,
    pub submit: &'static str,
    pub submitting: &'static str,
    pub submit_success: &'static str,
    pub submit_error: &'static str,

    pub name_required: &'static str,
    pub name_min: &'static str,
    pub platform_required: &'static str,
    pub contact_required: &'static str,
    pub telegram_format: &'static str,
    pub instagram_format: &'static str,
    pub message_min: &'static str,

    pub cookie_title: &'static str,
    pub cookie_description: &'static str,
    pub cookie_notice: &'static str,
    pub cookie_accept_all: &'static str,
    pub cookie_reject_all: &'static str,
    pub cookie_customize: &'static str,
    pub cookie_save: &'static str,
    pub cookie_learn_more: &'static str,
    pub cookie_necessary: &'static str,
    pub cookie_necessary_desc: &'static str,
    pub cookie_analytics: &'static str,
    pub cookie_analytics_desc: &'static str,
    pub cookie_marketing: &'static str,
    pub cookie_marketing_desc: &'static str,

    pub thanks_title: &'static str,
    pub thanks_body: &'static str,
    pub thanks_back_home: &'static str,
    pub privacy_title: &'static str,
    pub cookies_title: &'static str,
    pub footer_location: &'static str,
    pub footer_rights: &'static str,
}

pub fn translations(locale: Locale) -> &'static Translations {
    match locale {
        Locale::Uk => &UK,
        Locale::Ru => &RU,
        Locale::En => &EN,
    }
}

static EN: Translations = Translations {
    nav_work: "Work",
    nav_contact: "Contact",
    before: "Before",
    after: "After",
    other_work: "Other work",
    view_project: "View project",
    back_to_work: "Back to work",
    project_not_found: "This project does not exist or was removed.",
    showcase_empty: "The portfolio is being updated. Please check back soon.",

    contact_title: "Let's work together",
    contact_description: "Tell me about your project and I will get back to you within a day.",
    field_name: "Name",
    field_platform: "Where should I reply?",
    field_contact: "Your handle or phone",
    field_message: "Message",
    optional_label: "optional",
    placeholder_name: "Your name",
    placeholder_contact_telegram: "@username or phone number",
    placeholder_contact_instagram: "@username",
    placeholder_message: "A few words about your photos...",
    platform_instagram: "Instagram",
    platform_telegram: "Telegram",
    submit: "Send",
    submitting: "Sending...",
    submit_success: "Message sent! I will reply soon.",
    submit_error: "Something went wrong. Please try again.",

    name_required: "Please enter your name",
    name_min: "Name must be at least 2 characters",
    platform_required: "Please choose a platform",
    contact_required: "Please enter your contact",
    telegram_format: "Enter a @username or a phone number",
    instagram_format: "Enter an Instagram @username",
    message_min: "Message must be at least 10 characters",

    cookie_title: "Cookies & privacy",
    cookie_description: "We use cookies to remember your preferences and understand how the site is used. You can choose which categories to allow.",
    cookie_notice: "This site uses cookies to remember your preferences.",
    cookie_accept_all: "Accept all",
    cookie_reject_all: "Reject all",
    cookie_customize: "Customize",
    cookie_save: "Save choices",
    cookie_learn_more: "Learn more",
    cookie_necessary: "Necessary",
    cookie_necessary_desc: "Required for the site to work. Always on.",
    cookie_analytics: "Analytics",
    cookie_analytics_desc: "Help us understand which work resonates.",
    cookie_marketing: "Marketing",
    cookie_marketing_desc: "Used to show relevant offers elsewhere.",

    thanks_title: "Thank you!",
    thanks_body: "Your message has been sent. I will get back to you shortly.",
    thanks_back_home: "Back to the portfolio",
    privacy_title: "Privacy policy",
    cookies_title: "Cookie policy",
    footer_location: "Based in",
    footer_rights: "All rights reserved.",
};

static UK: Translations = Translations {
    nav_work: "Роботи",
    nav_contact: "Контакти",
    before: "До",
    after: "Після",
    other_work: "Інші роботи",
    view_project: "Переглянути проєкт",
    back_to_work: "Назад до робіт",
    project_not_found: "Цього проєкту не існує або його видалено.",
    showcase_empty: "Портфоліо оновлюється. Завітайте трохи згодом.",

    contact_title: "Працюймо разом",
    contact_description: "Розкажіть про свій проєкт, і я відповім протягом дня.",
    field_name: "Ім'я",
    field_platform: "Де вам відповісти?",
    field_contact: "Ваш нік або телефон",
    field_message: "Повідомлення",
    optional_label: "необов'язково",
    placeholder_name: "Ваше ім'я",
    placeholder_contact_telegram: "@нікнейм або номер телефону",
    placeholder_contact_instagram: "@нікнейм",
    placeholder_message: "Кілька слів про ваші фото...",
    platform_instagram: "Instagram",
    platform_telegram: "Telegram",
    submit: "Надіслати",
    submitting: "Надсилаю...",
    submit_success: "Повідомлення надіслано! Скоро відповім.",
    submit_error: "Щось пішло не так. Спробуйте ще раз.",

    name_required: "Вкажіть, будь ласка, ім'я",
    name_min: "Ім'я має містити щонайменше 2 символи",
    platform_required: "Оберіть, будь ласка, платформу",
    contact_required: "Вкажіть, будь ласка, контакт",
    telegram_format: "Введіть @нікнейм або номер телефону",
    instagram_format: "Введіть Instagram @нікнейм",
    message_min: "Повідомлення має містити щонайменше 10 символів",

    cookie_title: "Cookie та приватність",
    cookie_description: "Ми використовуємо cookie, щоб запам'ятовувати ваші налаштування та розуміти, як користуються сайтом. Ви можете обрати дозволені категорії.",
    cookie_notice: "Цей сайт використовує cookie, щоб запам'ятати ваші налаштування.",
    cookie_accept_all: "Прийняти всі",
    cookie_reject_all: "Відхилити всі",
    cookie_customize: "Налаштувати",
    cookie_save: "Зберегти вибір",
    cookie_learn_more: "Докладніше",
    cookie_necessary: "Необхідні",
    cookie_necessary_desc: "Потрібні для роботи сайту. Завжди ввімкнені.",
    cookie_analytics: "Аналітика",
    cookie_analytics_desc: "Допомагають зрозуміти, які роботи відгукуються.",
    cookie_marketing: "Маркетинг",
    cookie_marketing_desc: "Використовуються для релевантних пропозицій.",

    thanks_title: "Дякую!",
    thanks_body: "Ваше повідомлення надіслано. Я відповім найближчим часом.",
    thanks_back_home: "Назад до портфоліо",
    privacy_title: "Політика приватності",
    cookies_title: "Політика cookie",
    footer_location: "Працюю з",
    footer_rights: "Усі права захищено.",
};

static RU: Translations = Translations {
    nav_work: "Работы",
    nav_contact: "Контакты",
    before: "До",
    after: "После",
    other_work: "Другие работы",
    view_project: "Смотреть проект",
    back_to_work: "Назад к работам",
    project_not_found: "Этого проекта не существует или он удалён.",
    showcase_empty: "Портфолио обновляется. Загляните чуть позже.",

    contact_title: "Давайте работать вместе",
    contact_description: "Расскажите о своём проекте, и я отвечу в течение дня.",
    field_name: "Имя",
    field_platform: "Где вам ответить?",
    field_contact: "Ваш ник или телефон",
    field_message: "Сообщение",
    optional_label: "необязательно",
    placeholder_name: "Ваше имя",
    placeholder_contact_telegram: "@никнейм или номер телефона",
    placeholder_contact_instagram: "@никнейм",
    placeholder_message: "Пара слов о ваших фото...",
    platform_instagram: "Instagram",
    platform_telegram: "Telegram",
    submit: "Отправить",
    submitting: "Отправляю...",
    submit_success: "Сообщение отправлено! Скоро отвечу.",
    submit_error: "Что-то пошло не так. Попробуйте ещё раз.",

    name_required: "Пожалуйста, укажите имя",
    name_min: "Имя должно содержать минимум 2 символа",
    platform_required: "Пожалуйста, выберите платформу",
    contact_required: "Пожалуйста, укажите контакт",
    telegram_format: "Введите @никнейм или номер телефона",
    instagram_format: "Введите Instagram @никнейм",
    message_min: "Сообщение должно содержать минимум 10 символов",

    cookie_title: "Cookie и приватность",
    cookie_description: "Мы используем cookie, чтобы запоминать ваши настройки и понимать, как используется сайт. Вы можете выбрать разрешённые категории.",
    cookie_notice: "Этот сайт использует cookie, чтобы запомнить ваши настройки.",
    cookie_accept_all: "Принять все",
    cookie_reject_all: "Отклонить все",
    cookie_customize: "Настроить",
    cookie_save: "Сохранить выбор",
    cookie_learn_more: "Подробнее",
    cookie_necessary: "Необходимые",
    cookie_necessary_desc: "Нужны для работы сайта. Всегда включены.",
    cookie_analytics: "Аналитика",
    cookie_analytics_desc: "Помогают понять, какие работы откликаются.",
    cookie_marketing: "Маркетинг",
    cookie_marketing_desc: "Используются для релевантных предложений.",

    thanks_title: "Спасибо!",
    thanks_body: "Ваше сообщение отправлено. Я отвечу в ближайшее время.",
    thanks_back_home: "Назад к портфолио",
    privacy_title: "Политика конфиденциальности",
    cookies_title: "Политика cookie",
    footer_location: "Работаю из",
    footer_rights: "Все права защищены.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_preference_wins_over_header() {
        let locale = Locale::resolve(Some("ru"), Some("uk-UA,uk;q=0.9"));
        assert_eq!(locale, Locale::Ru);
    }

    #[test]
    fn unknown_saved_value_falls_through_to_header() {
        let locale = Locale::resolve(Some("de"), Some("uk-UA,en;q=0.8"));
        assert_eq!(locale, Locale::Uk);
    }

    #[test]
    fn header_prefix_matches_primary_subtag() {
        assert_eq!(Locale::resolve(None, Some("ru-RU,ru;q=0.9")), Locale::Ru);
        assert_eq!(Locale::resolve(None, Some("fr-FR,de;q=0.7")), Locale::En);
        assert_eq!(Locale::resolve(None, Some("fr-FR,uk;q=0.7")), Locale::Uk);
    }

    #[test]
    fn default_is_english() {
        assert_eq!(Locale::resolve(None, None), Locale::En);
        assert_eq!(Locale::resolve(Some(""), Some("")), Locale::En);
    }

    #[test]
    fn localize_prefers_the_requested_locale() {
        let text = LocalizedText::new("Портрет", "Портрет", "Portrait");
        assert_eq!(text.localize(None, Locale::En), "Portrait");
        assert_eq!(text.localize(None, Locale::Uk), "Портрет");
    }

    #[test]
    fn localize_falls_back_to_legacy_then_other_locales() {
        let text = LocalizedText::new("", "", "");
        assert_eq!(text.localize(Some("Retouch"), Locale::Uk), "Retouch");

        let text = LocalizedText::new("", "Ретушь", "");
        assert_eq!(text.localize(None, Locale::En), "Ретушь");

        let empty = LocalizedText::default();
        assert_eq!(empty.localize(None, Locale::Ru), "");
    }

    #[test]
    fn whitespace_only_fields_do_not_satisfy_the_chain() {
        let text = LocalizedText::new("  ", "", "Portrait");
        assert_eq!(text.localize(Some("   "), Locale::Uk), "Portrait");
    }

    #[test]
    fn list_fallback_mirrors_text_fallback() {
        let list = LocalizedList {
            uk: vec![],
            ru: vec!["Ретушь".into()],
            en: vec![],
        };
        assert_eq!(list.localize(None, Locale::En), ["Ретушь".to_string()]);

        let legacy = ["Color".to_string()];
        let empty = LocalizedList::default();
        assert_eq!(empty.localize(Some(&legacy), Locale::Uk), legacy);
        assert!(empty.localize(None, Locale::Uk).is_empty());
    }

    #[test]
    fn every_locale_has_a_translation_table() {
        for locale in Locale::ALL {
            let table = translations(locale);
            assert!(!table.submit.is_empty());
            assert!(!table.name_required.is_empty());
        }
    }
}
