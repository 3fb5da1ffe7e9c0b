use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use schooldesk_core::{PaginationMeta, PaginationParams};
use schooldesk_models::{
    Class, CreateSubjectDto, Grade, LoginRequest, LoginResponse, LogoutResponse, MeResponse,
    MessageView, SendMessageDto, Subject, UnreadCountResponse, User, UserType,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::landing::controller::landing,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::messages::controller::list_inbox,
        crate::modules::messages::controller::list_sent,
        crate::modules::messages::controller::unread_count,
        crate::modules::messages::controller::get_message,
        crate::modules::messages::controller::send_message,
        crate::modules::classes::controller::list_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::grades::controller::list_grades,
        crate::modules::subjects::controller::list_subjects,
        crate::modules::subjects::controller::create_subject,
    ),
    components(
        schemas(
            User,
            UserType,
            LoginRequest,
            LoginResponse,
            LogoutResponse,
            MeResponse,
            MessageView,
            SendMessageDto,
            UnreadCountResponse,
            Class,
            Grade,
            Subject,
            CreateSubjectDto,
            PaginationMeta,
            PaginationParams,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Landing", description = "Role-based entry point"),
        (name = "Authentication", description = "Sessions: login, logout and the current caller"),
        (name = "Messages", description = "Direct messages between users"),
        (name = "Classes", description = "Classes visible to the caller"),
        (name = "Grades", description = "Grade levels"),
        (name = "Subjects", description = "Subjects taught at the school")
    ),
    info(
        title = "SchoolDesk API",
        version = "0.1.0",
        description = "School management API with cookie sessions, role-based landing and direct messaging.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("schooldesk_session"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
