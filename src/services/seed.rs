use tracing::info;

use crate::error::StoreError;
use crate::models::{AppSettings, Homework, Message, Note, Role, Subject, UserRecord};
use crate::storage::{Storage, StoreKey};

pub const SEED_TEACHER_ID: &str = "teacher-1";
pub const SEED_STUDENT_ID: &str = "student-1";

const SUBJECT_TITLES: [&str; 26] = [
    "Українська мова",
    "Українська література",
    "Зарубіжна література",
    "Англійська мова",
    "Німецька мова",
    "Математика",
    "Алгебра",
    "Геометрія",
    "Інформатика",
    "Історія України",
    "Всесвітня історія",
    "Географія",
    "Біологія",
    "Фізика",
    "Хімія",
    "Астрономія",
    "Основи здоров'я",
    "Фізична культура",
    "Трудове навчання",
    "Мистецтво",
    "Музичне мистецтво",
    "Правознавство",
    "Громадянська освіта",
    "Економіка",
    "Захист Вітчизни",
    "Екологія",
];

pub fn seed_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: SEED_TEACHER_ID.to_string(),
            name: "Вчитель Адмін".to_string(),
            email: "teacher@example.com".to_string(),
            role: Role::Teacher,
            password: Some("password123".to_string()),
        },
        UserRecord {
            id: SEED_STUDENT_ID.to_string(),
            name: "Тестовий Учень".to_string(),
            email: "student@example.com".to_string(),
            role: Role::Student,
            password: Some("password123".to_string()),
        },
    ]
}

pub fn seed_subjects() -> Vec<Subject> {
    SUBJECT_TITLES
        .iter()
        .enumerate()
        .map(|(index, title)| Subject {
            id: format!("subject-{}", index + 1),
            title: title.to_string(),
            teacher_id: SEED_TEACHER_ID.to_string(),
        })
        .collect()
}

/// Seeds the store on first run. Returns `true` when seeding happened and
/// `false` when the sentinel was already set.
pub async fn init_storage(storage: &Storage) -> Result<bool, StoreError> {
    if storage.get(StoreKey::StorageInitialized, false).await {
        return Ok(false);
    }

    info!("Initializing storage for the first time...");

    storage.set(StoreKey::Users, &seed_users()).await?;
    storage.set(StoreKey::Subjects, &seed_subjects()).await?;
    storage.set(StoreKey::Homeworks, &Vec::<Homework>::new()).await?;
    storage.set(StoreKey::Notes, &Vec::<Note>::new()).await?;
    storage.set(StoreKey::Messages, &Vec::<Message>::new()).await?;
    storage.set(StoreKey::Settings, &AppSettings::default()).await?;

    // Sentinel last: a failed seed is retried on the next start.
    storage.set(StoreKey::StorageInitialized, &true).await?;

    info!("Seeded {} subjects", SUBJECT_TITLES.len());
    Ok(true)
}
