use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Homework {
    pub id: String,
    pub subject_id: String,
    /// YYYY-MM-DD
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHomework {
    pub subject_id: String,
    pub date: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub created_by: String,
}

impl NewHomework {
    pub fn into_homework(self, id: String) -> Homework {
        Homework {
            id,
            subject_id: self.subject_id,
            date: self.date,
            title: self.title,
            description: self.description,
            attachments: self.attachments,
            created_by: self.created_by,
        }
    }
}
