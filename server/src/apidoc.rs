use utoipa::OpenApi;

pub const DOCS_PATH: &str = "/swagger";
pub const OPENAPI_JSON_PATH: &str = "/swagger/calendar-api/swagger.json";

#[derive(OpenApi)]
#[openapi(info(
    title = "Calendar Api",
    version = "v1",
    description = "Lists and serves iCalendar files from the calendar catalog"
))]
pub struct ApiDoc;
