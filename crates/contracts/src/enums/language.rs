use serde::{Deserialize, Serialize};

/// Языки контента сайта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    English,
    German,
}

impl Language {
    /// Получить короткий код языка
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }

    /// Получить название языка, как оно хранится в записях
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::German => "German",
        }
    }

    /// Получить все языки
    pub fn all() -> Vec<Language> {
        vec![Language::English, Language::German]
    }

    /// Парсинг из названия ("English", "German")
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "English" => Some(Language::English),
            "German" => Some(Language::German),
            _ => None,
        }
    }

    /// Код языка по названию. Для неизвестных названий берутся первые две
    /// буквы в нижнем регистре.
    pub fn code_for(name: &str) -> String {
        match Language::from_name(name) {
            Some(lang) => lang.code().to_string(),
            None => name.chars().take(2).collect::<String>().to_lowercase(),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
