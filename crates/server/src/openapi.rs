use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct StatusBodyDoc { pub status: String }

#[derive(ToSchema)]
pub struct NewListRequestDoc {
    #[schema(value_type = Vec<Object>)]
    pub new_item: Vec<serde_json::Value>,
}

#[derive(ToSchema)]
pub struct ListsResponseDoc {
    #[schema(value_type = Vec<Object>)]
    pub lists: Vec<serde_json::Value>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::lists::add_new_list,
        crate::routes::lists::show_lists,
        crate::routes::lists::example_error,
    ),
    components(
        schemas(
            HealthResponse,
            StatusBodyDoc,
            NewListRequestDoc,
            ListsResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "lists")
    )
)]
pub struct ApiDoc;
