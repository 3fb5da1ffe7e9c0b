use schooldesk_auth::{AuthService, LandingRoute};
use schooldesk_core::{AppError, verify_password, verify_password_decoy};
use schooldesk_models::{LoginRequest, LoginResponse, MeResponse};
use tracing::{info, instrument, warn};

use crate::metrics::{
    track_login_failure, track_login_success, track_session_created, track_session_destroyed,
};
use crate::middleware::auth::AuthUser;
use crate::modules::users::repository::UserRepository;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct LoginService;

impl LoginService {
    /// Checks credentials and opens a session. Unknown usernames and wrong
    /// passwords fail the same way, and both pay for a bcrypt check.
    #[instrument(skip(users, auth, dto), fields(username = %dto.username))]
    pub async fn login(
        users: &dyn UserRepository,
        auth: &AuthService,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let Some(credentials) = users.find_credentials(dto.username.trim()).await? else {
            verify_password_decoy(&dto.password);
            track_login_failure("unknown_user");
            warn!("Login failed: unknown username");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &credentials.password)? {
            track_login_failure("wrong_password");
            warn!(user_id = %credentials.user.id, "Login failed: wrong password");
            return Err(AppError::unauthenticated(INVALID_CREDENTIALS));
        }

        let user = credentials.user;
        let issued = auth.create_session(user.id, user.user_type).await?;
        track_session_created(user.user_type);
        track_login_success(user.user_type);
        info!(user_id = %user.id, user_type = %user.user_type, "User logged in");

        Ok(LoginResponse {
            session_token: issued.token.into_string(),
            expires_at: issued.identity.expires_at,
            redirect_to: LandingRoute::for_identity(Some(&issued.identity))
                .path()
                .to_string(),
            user,
        })
    }

    pub async fn logout(auth: &AuthService, token: Option<&str>) -> Result<(), AppError> {
        if token.is_none() {
            return Ok(());
        }
        auth.destroy_session(token).await?;
        track_session_destroyed();
        Ok(())
    }

    /// The caller's profile. A session whose user was since deleted no
    /// longer counts as authenticated.
    #[instrument(skip(users))]
    pub async fn me(users: &dyn UserRepository, auth_user: AuthUser) -> Result<MeResponse, AppError> {
        let user = users
            .find_by_id(auth_user.user_id())
            .await?
            .ok_or_else(|| AppError::unauthenticated("Session user no longer exists"))?;

        Ok(MeResponse {
            user_type: auth_user.user_type(),
            session_expires_at: auth_user.identity().expires_at,
            user,
        })
    }
}
