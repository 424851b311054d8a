use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(Serialize, ToSchema)]
pub struct ProfileDoc {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub email: String,
    pub fullname: String,
}

#[derive(Serialize, ToSchema)]
pub struct SessionDoc {
    pub data: ProfileDoc,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
    ),
    components(
        schemas(
            HealthResponse,
            ProfileDoc,
            SessionDoc,
            crate::validation::RegisterRequest,
            crate::validation::LoginRequest,
            crate::validation::FieldError,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
