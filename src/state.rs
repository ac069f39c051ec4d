use std::sync::Arc;

use tracing::info;

use crate::api::MockBackend;
use crate::error::ApiError;
use crate::models::{
    Homework, Message, NewHomework, NewMessage, NewNote, Note, Role, Subject, User,
};

/// Everything the dashboard shows after sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub subjects: Vec<Subject>,
    pub homeworks: Vec<Homework>,
    pub notes: Vec<Note>,
    pub messages: Vec<Message>,
    /// Only populated for teachers.
    pub users: Vec<User>,
}

/// The signed-in user plus the last authentication error, as seen by the UI.
pub struct Session {
    backend: Arc<MockBackend>,
    user: Option<User>,
    last_error: Option<String>,
}

impl Session {
    pub fn new(backend: Arc<MockBackend>) -> Self {
        Self {
            backend,
            user: None,
            last_error: None,
        }
    }

    pub fn backend(&self) -> &MockBackend {
        &self.backend
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
        ip_key: Option<&str>,
    ) -> Result<&User, ApiError> {
        self.last_error = None;
        let result = self.backend.login(email, password, ip_key).await;
        self.accept(result)
    }

    pub async fn register(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
        ip_key: Option<&str>,
    ) -> Result<&User, ApiError> {
        self.last_error = None;
        let result = self.backend.register(name, email, password, role, ip_key).await;
        self.accept(result)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!("user {} logged out", user.id);
        }
    }

    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        let user = self.require_user()?;
        let backend = &self.backend;

        let (subjects, homeworks, notes, messages) = tokio::try_join!(
            backend.get_subjects(),
            backend.get_homeworks(),
            backend.get_notes(&user.id),
            backend.get_messages(),
        )?;
        let users = if user.role == Role::Teacher {
            backend.get_users().await?
        } else {
            Vec::new()
        };

        Ok(Dashboard {
            subjects,
            homeworks,
            notes,
            messages,
            users,
        })
    }

    pub async fn notes(&self) -> Result<Vec<Note>, ApiError> {
        let user = self.require_user()?;
        self.backend.get_notes(&user.id).await
    }

    /// Adds homework authored by the signed-in user; `created_by` is overwritten.
    pub async fn add_homework(&self, mut req: NewHomework) -> Result<Homework, ApiError> {
        req.created_by = self.require_user()?.id.clone();
        self.backend.add_homework(req).await
    }

    /// Adds a note owned by the signed-in user; `user_id` is overwritten.
    pub async fn add_note(&self, mut req: NewNote) -> Result<Note, ApiError> {
        req.user_id = self.require_user()?.id.clone();
        self.backend.add_note(req).await
    }

    pub async fn add_message(&self, req: NewMessage) -> Result<Message, ApiError> {
        let user = self.require_user()?;
        self.backend.add_message(req, user).await
    }

    fn require_user(&self) -> Result<&User, ApiError> {
        self.user.as_ref().ok_or(ApiError::Unauthenticated)
    }

    fn accept(&mut self, result: Result<User, ApiError>) -> Result<&User, ApiError> {
        match result {
            Ok(user) => {
                let user = self.user.insert(user);
                Ok(&*user)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
