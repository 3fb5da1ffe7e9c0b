//! # SchoolDesk Models
//!
//! Database rows, request DTOs and response payloads.
//!
//! - [`ids`]: typed `Uuid` newtypes for every entity
//! - [`users`]: [`User`] and the closed [`UserType`] enum
//! - [`messages`]: [`Message`] rows and caller-relative [`MessageView`]s
//! - [`classes`]: classes, grade levels and subjects
//! - [`auth`]: login/logout payloads

pub mod auth;
pub mod classes;
pub mod ids;
pub mod messages;
pub mod users;

pub use auth::{LoginRequest, LoginResponse, LogoutResponse, MeResponse};
pub use classes::{Class, CreateSubjectDto, Grade, Subject};
pub use ids::{ClassId, GradeId, MessageId, SubjectId, UserId};
pub use messages::{Message, MessageView, NewMessage, SendMessageDto, UnreadCountResponse};
pub use users::{NewUser, ParseUserTypeError, User, UserCredentials, UserType};
