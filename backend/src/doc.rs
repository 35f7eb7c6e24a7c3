//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI document for the REST API. It registers
//! every HTTP endpoint from the inbound layer (retreats, bookings, health)
//! and the schema wrappers from [`crate::inbound::http::schemas`] that keep
//! domain types free of utoipa derives.
//!
//! The document is served by Swagger UI in debug builds.

use crate::inbound::http::bookings::{
    BookingListResponse, BookingResponse, CreateBookingRequest, CreateBookingResponse,
};
use crate::inbound::http::health::WelcomeResponse;
use crate::inbound::http::paging::PaginationResponse;
use crate::inbound::http::retreats::{
    CreateRetreatRequest, CreateRetreatResponse, RetreatListResponse, RetreatResponse,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wellness Retreat API",
        description = "List and publish wellness retreats and record user bookings.",
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::home,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::retreats::list_retreats,
        crate::inbound::http::retreats::create_retreat,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        WelcomeResponse,
        PaginationResponse,
        RetreatResponse,
        RetreatListResponse,
        CreateRetreatRequest,
        CreateRetreatResponse,
        BookingResponse,
        BookingListResponse,
        CreateBookingRequest,
        CreateBookingResponse,
    )),
    tags(
        (name = "retreats", description = "Retreat catalogue search and publication"),
        (name = "bookings", description = "Retreat bookings"),
        (name = "health", description = "Welcome route and health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure and path registration.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "details");
    }

    #[rstest]
    #[case("RetreatResponse", &["id", "title", "price", "duration", "capacity"])]
    #[case("BookingResponse", &["user_id", "retreat_id", "payment_details", "booking_date"])]
    #[case("PaginationResponse", &["total", "pages", "page", "per_page"])]
    fn openapi_resource_schemas_expose_wire_fields(
        #[case] name: &str,
        #[case] fields: &[&str],
    ) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/")]
    #[case("/retreats")]
    #[case("/book")]
    #[case("/bookings")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn openapi_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(
            doc.paths.paths.contains_key(path),
            "path {path} should be documented"
        );
    }
}
