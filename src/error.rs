use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failures surfaced to the person using the diary. Display strings are the
/// messages shown in the UI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Користувача з таким email не знайдено.")]
    NotFound,

    #[error("Неправильний пароль.")]
    InvalidCredentials,

    #[error("{}", ip_key_message(*during_registration))]
    InvalidIpKey { during_registration: bool },

    #[error("Користувач з таким email вже існує.")]
    DuplicateEmail,

    #[error("Пароль має бути не менше 8 символів.")]
    WeakPassword,

    #[error("Потрібно увійти в систему.")]
    Unauthenticated,

    #[error("Помилка збереження даних: {0}")]
    Storage(#[from] StoreError),
}

fn ip_key_message(during_registration: bool) -> &'static str {
    if during_registration {
        "Неправильний IP-ключ для реєстрації вчителя."
    } else {
        "Неправильний IP-ключ."
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
