//! Retreat catalogue endpoints.
//!
//! ```text
//! GET /retreats?search=yoga%20beach&min_price=100&page=2&limit=10
//! POST /retreats {"title":"Forest Reset","description":"...","location":"Black Forest",
//!                 "price":450,"duration":3,"capacity":12}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewRetreat, Retreat, RetreatDraft, RetreatFilter, RetreatValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::paging::{PaginationResponse, page_request};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, QueryPairs, first_value, invalid_type_error, lenient, missing_field_error,
    parse_json_object, require_f64, require_i32, require_str, too_long_error,
};

const TITLE: FieldName = FieldName::new("title");
const DESCRIPTION: FieldName = FieldName::new("description");
const LOCATION: FieldName = FieldName::new("location");
const PRICE: FieldName = FieldName::new("price");
const DURATION: FieldName = FieldName::new("duration");
const CAPACITY: FieldName = FieldName::new("capacity");

/// Fields `POST /retreats` requires, in the order they are checked.
const REQUIRED_FIELDS: [FieldName; 6] = [TITLE, DESCRIPTION, LOCATION, PRICE, DURATION, CAPACITY];

/// A retreat as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RetreatResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Forest Reset")]
    pub title: String,
    #[schema(example = "Three days of silence and forest walks")]
    pub description: String,
    #[schema(example = "Black Forest")]
    pub location: String,
    #[schema(example = 450.0)]
    pub price: f64,
    /// Length in days.
    #[schema(example = 3)]
    pub duration: i32,
    #[schema(example = 12)]
    pub capacity: i32,
}

impl From<Retreat> for RetreatResponse {
    fn from(retreat: Retreat) -> Self {
        Self {
            id: retreat.id.get(),
            title: retreat.title,
            description: retreat.description,
            location: retreat.location,
            price: retreat.price,
            duration: retreat.duration,
            capacity: retreat.capacity,
        }
    }
}

/// Response body for `GET /retreats`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RetreatListResponse {
    pub retreats: Vec<RetreatResponse>,
    pub pagination: PaginationResponse,
}

/// Response body for `POST /retreats`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRetreatResponse {
    #[schema(example = "Retreat created successfully")]
    pub message: String,
    pub retreat: RetreatResponse,
}

/// Request body for `POST /retreats`, for documentation only.
///
/// `price`, `duration` and `capacity` also accept numeric strings.
#[derive(ToSchema)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CreateRetreatRequest {
    title: String,
    description: String,
    location: String,
    price: f64,
    duration: i32,
    capacity: i32,
}

/// Query parameters for `GET /retreats`.
///
/// Values are kept as text and numeric ones that fail to parse are ignored.
/// When a key repeats, its first value is used.
#[derive(Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RetreatListQuery {
    /// 1-based page number.
    #[param(value_type = Option<i64>, example = 1)]
    pub page: Option<String>,
    /// Page size.
    #[param(value_type = Option<i64>, example = 10)]
    pub limit: Option<String>,
    /// Whitespace-separated tokens; each must appear in the title,
    /// description or location.
    pub search: Option<String>,
    /// Substring of the title or description.
    pub filter: Option<String>,
    /// Substring of the location.
    pub location: Option<String>,
    #[param(value_type = Option<f64>)]
    pub min_price: Option<String>,
    #[param(value_type = Option<f64>)]
    pub max_price: Option<String>,
    #[param(value_type = Option<i32>)]
    pub min_duration: Option<String>,
    #[param(value_type = Option<i32>)]
    pub max_duration: Option<String>,
}

impl RetreatListQuery {
    fn from_pairs(pairs: &QueryPairs) -> Self {
        let get = |key: &str| first_value(pairs, key);
        Self {
            page: get("page"),
            limit: get("limit"),
            search: get("search"),
            filter: get("filter"),
            location: get("location"),
            min_price: get("min_price"),
            max_price: get("max_price"),
            min_duration: get("min_duration"),
            max_duration: get("max_duration"),
        }
    }

    fn to_filter(&self) -> RetreatFilter {
        RetreatFilter::default()
            .with_search(self.search.as_deref().unwrap_or_default())
            .with_text(self.filter.as_deref().unwrap_or_default())
            .with_location(self.location.as_deref().unwrap_or_default())
            .with_min_price(lenient(self.min_price.as_deref()))
            .with_max_price(lenient(self.max_price.as_deref()))
            .with_min_duration(lenient(self.min_duration.as_deref()))
            .with_max_duration(lenient(self.max_duration.as_deref()))
    }
}

fn map_retreat_validation_error(err: RetreatValidationError) -> Error {
    match err {
        RetreatValidationError::TitleTooLong { max } => too_long_error(TITLE, max),
        RetreatValidationError::LocationTooLong { max } => too_long_error(LOCATION, max),
        RetreatValidationError::NonFinitePrice => invalid_type_error(PRICE, "a number"),
    }
}

/// Parse and validate a `POST /retreats` body.
fn parse_new_retreat(body: &[u8]) -> Result<NewRetreat, Error> {
    let object = parse_json_object(body)?;
    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| object.get(field.as_str()).is_none_or(serde_json::Value::is_null))
    {
        return Err(missing_field_error(missing));
    }

    let draft = RetreatDraft {
        title: require_str(&object, TITLE)?,
        description: require_str(&object, DESCRIPTION)?,
        location: require_str(&object, LOCATION)?,
        price: require_f64(&object, PRICE)?,
        duration: require_i32(&object, DURATION)?,
        capacity: require_i32(&object, CAPACITY)?,
    };
    NewRetreat::new(draft).map_err(map_retreat_validation_error)
}

/// Search, filter and paginate retreats.
#[utoipa::path(
    get,
    path = "/retreats",
    params(RetreatListQuery),
    responses(
        (status = 200, description = "Matching retreats", body = RetreatListResponse),
        (status = 400, description = "Invalid page size", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["retreats"],
    operation_id = "listRetreats"
)]
#[get("/retreats")]
pub async fn list_retreats(
    state: web::Data<HttpState>,
    pairs: web::Query<Vec<(String, String)>>,
) -> ApiResult<web::Json<RetreatListResponse>> {
    let query = RetreatListQuery::from_pairs(&pairs);
    let page = page_request(query.page.as_deref(), query.limit.as_deref())?;
    let filter = query.to_filter();
    let (items, meta) = state.retreats.list_retreats(&filter, page).await?.into_parts();

    Ok(web::Json(RetreatListResponse {
        retreats: items.into_iter().map(RetreatResponse::from).collect(),
        pagination: PaginationResponse::from(&meta),
    }))
}

/// Create a retreat.
#[utoipa::path(
    post,
    path = "/retreats",
    request_body = CreateRetreatRequest,
    responses(
        (status = 201, description = "Retreat created", body = CreateRetreatResponse),
        (status = 400, description = "Missing or invalid field", body = ErrorSchema),
        (status = 500, description = "Store failure", body = ErrorSchema)
    ),
    tags = ["retreats"],
    operation_id = "createRetreat"
)]
#[post("/retreats")]
pub async fn create_retreat(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let retreat = parse_new_retreat(&body)?;
    let created = state.retreats_command.create_retreat(retreat).await?;

    Ok(HttpResponse::Created().json(CreateRetreatResponse {
        message: "Retreat created successfully".to_owned(),
        retreat: created.into(),
    }))
}

#[cfg(test)]
#[path = "retreats_tests.rs"]
mod tests;
