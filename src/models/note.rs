use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_homework_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub user_id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_homework_id: Option<String>,
}

impl NewNote {
    pub fn into_note(self, id: String, date: String) -> Note {
        Note {
            id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            date,
            linked_homework_id: self.linked_homework_id,
        }
    }
}
