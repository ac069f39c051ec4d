pub mod homework;
pub mod message;
pub mod note;
pub mod settings;
pub mod subject;
pub mod user;

pub use homework::{Homework, NewHomework};
pub use message::{Message, NewMessage};
pub use note::{NewNote, Note};
pub use settings::{AppSettings, Theme};
pub use subject::Subject;
pub use user::{Role, User, UserRecord};
