use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::api::MockBackend;
use crate::error::ApiError;
use crate::models::{
    AppSettings, Homework, Message, NewHomework, NewMessage, NewNote, Note, Subject, Theme, User,
    UserRecord,
};
use crate::storage::StoreKey;

impl MockBackend {
    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.delay(self.options.latency.read).await;
        let users: Vec<UserRecord> = self.storage.get(StoreKey::Users, Vec::new()).await;
        Ok(users.into_iter().map(User::from).collect())
    }

    pub async fn get_subjects(&self) -> Result<Vec<Subject>, ApiError> {
        self.delay(self.options.latency.read).await;
        Ok(self.storage.get(StoreKey::Subjects, Vec::new()).await)
    }

    pub async fn get_homeworks(&self) -> Result<Vec<Homework>, ApiError> {
        self.delay(self.options.latency.read).await;
        Ok(self.storage.get(StoreKey::Homeworks, Vec::new()).await)
    }

    pub async fn get_notes(&self, user_id: &str) -> Result<Vec<Note>, ApiError> {
        self.delay(self.options.latency.read).await;
        let notes: Vec<Note> = self.storage.get(StoreKey::Notes, Vec::new()).await;
        Ok(notes.into_iter().filter(|n| n.user_id == user_id).collect())
    }

    /// Newest first.
    pub async fn get_messages(&self) -> Result<Vec<Message>, ApiError> {
        self.delay(self.options.latency.read).await;
        let mut messages: Vec<Message> = self.storage.get(StoreKey::Messages, Vec::new()).await;
        messages.sort_by(|a, b| parse_timestamp(&b.date).cmp(&parse_timestamp(&a.date)));
        Ok(messages)
    }

    pub async fn add_homework(&self, req: NewHomework) -> Result<Homework, ApiError> {
        self.delay(self.options.latency.write).await;

        let _guard = self.write_lock.lock().await;
        let mut homeworks: Vec<Homework> = self.storage.get(StoreKey::Homeworks, Vec::new()).await;
        let homework = req.into_homework(Uuid::new_v4().to_string());
        homeworks.push(homework.clone());
        self.storage.set(StoreKey::Homeworks, &homeworks).await?;

        debug!("added homework {} for subject {}", homework.id, homework.subject_id);
        Ok(homework)
    }

    pub async fn add_note(&self, req: NewNote) -> Result<Note, ApiError> {
        self.delay(self.options.latency.write).await;

        let _guard = self.write_lock.lock().await;
        let mut notes: Vec<Note> = self.storage.get(StoreKey::Notes, Vec::new()).await;
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let note = req.into_note(Uuid::new_v4().to_string(), today);
        notes.push(note.clone());
        self.storage.set(StoreKey::Notes, &notes).await?;

        debug!("added note {} for user {}", note.id, note.user_id);
        Ok(note)
    }

    /// Replaces the note with the same id. Returns `None` without writing when
    /// no such note exists.
    pub async fn update_note(&self, updated: Note) -> Result<Option<Note>, ApiError> {
        self.delay(self.options.latency.write).await;

        let _guard = self.write_lock.lock().await;
        let mut notes: Vec<Note> = self.storage.get(StoreKey::Notes, Vec::new()).await;
        let Some(slot) = notes.iter_mut().find(|n| n.id == updated.id) else {
            return Ok(None);
        };
        *slot = updated.clone();
        self.storage.set(StoreKey::Notes, &notes).await?;

        debug!("updated note {}", updated.id);
        Ok(Some(updated))
    }

    /// Returns whether a note was removed.
    pub async fn delete_note(&self, id: &str) -> Result<bool, ApiError> {
        self.delay(self.options.latency.write).await;

        let _guard = self.write_lock.lock().await;
        let mut notes: Vec<Note> = self.storage.get(StoreKey::Notes, Vec::new()).await;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        self.storage.set(StoreKey::Notes, &notes).await?;

        debug!("deleted note {}", id);
        Ok(true)
    }

    pub async fn add_message(&self, req: NewMessage, author: &User) -> Result<Message, ApiError> {
        self.delay(self.options.latency.write).await;

        let _guard = self.write_lock.lock().await;
        let mut messages: Vec<Message> = self.storage.get(StoreKey::Messages, Vec::new()).await;
        let message = Message {
            id: Uuid::new_v4().to_string(),
            author_id: author.id.clone(),
            author_name: author.name.clone(),
            date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            title: req.title,
            content: req.content,
        };
        messages.insert(0, message.clone());
        self.storage.set(StoreKey::Messages, &messages).await?;

        debug!("added message {} by {}", message.id, message.author_id);
        Ok(message)
    }

    pub async fn get_settings(&self) -> Result<AppSettings, ApiError> {
        self.delay(self.options.latency.read).await;
        Ok(self.storage.get(StoreKey::Settings, AppSettings::default()).await)
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<AppSettings, ApiError> {
        self.delay(self.options.latency.write).await;

        let _guard = self.write_lock.lock().await;
        let mut settings: AppSettings = self.storage.get(StoreKey::Settings, AppSettings::default()).await;
        settings.theme = theme;
        self.storage.set(StoreKey::Settings, &settings).await?;
        Ok(settings)
    }
}

fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BackendOptions;
    use crate::models::Role;
    use crate::services::seed::{SEED_STUDENT_ID, SEED_TEACHER_ID, init_storage};
    use crate::storage::Storage;

    async fn setup_backend() -> MockBackend {
        let storage = Storage::in_memory();
        init_storage(&storage).await.expect("Failed to seed storage");
        MockBackend::new(storage, BackendOptions::instant())
    }

    fn new_note(user_id: &str, title: &str) -> NewNote {
        NewNote {
            user_id: user_id.to_string(),
            title: title.to_string(),
            content: "зміст".to_string(),
            linked_homework_id: None,
        }
    }

    fn message(id: &str, date: &str) -> Message {
        Message {
            id: id.to_string(),
            author_id: SEED_TEACHER_ID.to_string(),
            author_name: "Вчитель Адмін".to_string(),
            date: date.to_string(),
            title: id.to_string(),
            content: String::new(),
        }
    }

    #[tokio::test]
    async fn test_get_users_strips_passwords() {
        let backend = setup_backend().await;

        let users = backend.get_users().await.expect("Failed to fetch users");
        assert_eq!(users.len(), 2);
        let json = serde_json::to_string(&users).expect("Failed to serialize");
        assert!(!json.contains("password"));
    }

    #[tokio::test]
    async fn test_add_homework() {
        let backend = setup_backend().await;

        let homework = backend
            .add_homework(NewHomework {
                subject_id: "subject-7".to_string(),
                date: "2026-01-10".to_string(),
                title: "Рівняння".to_string(),
                description: "№ 101-105".to_string(),
                attachments: vec!["worksheet.pdf".to_string()],
                created_by: SEED_TEACHER_ID.to_string(),
            })
            .await
            .expect("Failed to add homework");
        assert!(!homework.id.is_empty());

        let homeworks = backend.get_homeworks().await.expect("Failed to fetch homeworks");
        assert_eq!(homeworks, vec![homework]);
    }

    #[tokio::test]
    async fn test_notes_are_scoped_to_owner() {
        let backend = setup_backend().await;

        backend.add_note(new_note(SEED_STUDENT_ID, "мої")).await.expect("Failed to add note");
        backend.add_note(new_note(SEED_TEACHER_ID, "вчителя")).await.expect("Failed to add note");
        backend.add_note(new_note(SEED_STUDENT_ID, "ще мої")).await.expect("Failed to add note");

        let notes = backend.get_notes(SEED_STUDENT_ID).await.expect("Failed to fetch notes");
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(|n| n.user_id == SEED_STUDENT_ID));

        assert!(backend.get_notes("nobody").await.expect("Failed to fetch notes").is_empty());
    }

    #[tokio::test]
    async fn test_add_note_stamps_today() {
        let backend = setup_backend().await;

        let note = backend.add_note(new_note(SEED_STUDENT_ID, "дата")).await.expect("Failed to add note");
        assert_eq!(note.date, Utc::now().format("%Y-%m-%d").to_string());
    }

    #[tokio::test]
    async fn test_update_note() {
        let backend = setup_backend().await;

        let mut note = backend.add_note(new_note(SEED_STUDENT_ID, "стара")).await.expect("Failed to add note");
        note.title = "нова".to_string();
        note.linked_homework_id = Some("hw-1".to_string());

        let updated = backend
            .update_note(note.clone())
            .await
            .expect("Failed to update note")
            .expect("Note not found");
        assert_eq!(updated, note);

        let notes = backend.get_notes(SEED_STUDENT_ID).await.expect("Failed to fetch notes");
        assert_eq!(notes, vec![note]);
    }

    #[tokio::test]
    async fn test_update_unknown_note_writes_nothing() {
        let backend = setup_backend().await;
        let before = backend.storage().snapshot().await.expect("Failed to snapshot");

        let ghost = Note {
            id: "ghost".to_string(),
            user_id: SEED_STUDENT_ID.to_string(),
            title: "x".to_string(),
            content: "y".to_string(),
            date: "2026-01-01".to_string(),
            linked_homework_id: None,
        };
        assert!(backend.update_note(ghost).await.expect("Failed to update").is_none());

        let after = backend.storage().snapshot().await.expect("Failed to snapshot");
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_delete_note_removes_only_target() {
        let backend = setup_backend().await;

        let first = backend.add_note(new_note(SEED_STUDENT_ID, "перша")).await.expect("Failed to add note");
        let second = backend.add_note(new_note(SEED_STUDENT_ID, "друга")).await.expect("Failed to add note");
        let other = backend.add_note(new_note(SEED_TEACHER_ID, "чужа")).await.expect("Failed to add note");

        assert!(backend.delete_note(&first.id).await.expect("Failed to delete note"));
        assert!(!backend.delete_note(&first.id).await.expect("Failed to delete note"));

        let all: Vec<Note> = backend.storage().get(StoreKey::Notes, Vec::new()).await;
        assert_eq!(all, vec![second, other]);
    }

    #[tokio::test]
    async fn test_messages_sorted_newest_first() {
        let backend = setup_backend().await;
        let stored = vec![
            message("old", "2026-01-01T08:00:00.000Z"),
            message("new", "2026-03-01T08:00:00.000Z"),
            message("mid", "2026-02-01T10:00:00+02:00"),
        ];
        backend.storage().set(StoreKey::Messages, &stored).await.expect("Failed to set messages");

        let ids: Vec<String> = backend
            .get_messages()
            .await
            .expect("Failed to fetch messages")
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_add_message_prepends_with_author() {
        let backend = setup_backend().await;
        let author = User {
            id: SEED_TEACHER_ID.to_string(),
            name: "Вчитель Адмін".to_string(),
            email: "teacher@example.com".to_string(),
            role: Role::Teacher,
        };
        backend
            .storage()
            .set(StoreKey::Messages, &vec![message("old", "2026-01-01T08:00:00.000Z")])
            .await
            .expect("Failed to set messages");

        let created = backend
            .add_message(
                NewMessage {
                    title: "Батьківські збори".to_string(),
                    content: "У п'ятницю о 18:00".to_string(),
                },
                &author,
            )
            .await
            .expect("Failed to add message");
        assert_eq!(created.author_id, SEED_TEACHER_ID);
        assert_eq!(created.author_name, "Вчитель Адмін");
        assert!(parse_timestamp(&created.date).is_some());

        let stored: Vec<Message> = backend.storage().get(StoreKey::Messages, Vec::new()).await;
        assert_eq!(stored[0].id, created.id);
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_set_theme_persists() {
        let backend = setup_backend().await;
        assert_eq!(backend.get_settings().await.expect("Failed to get settings").theme, Theme::System);

        backend.set_theme(Theme::Dark).await.expect("Failed to set theme");
        assert_eq!(backend.get_settings().await.expect("Failed to get settings").theme, Theme::Dark);
    }
}
