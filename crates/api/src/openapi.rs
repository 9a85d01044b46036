//! OpenAPI document for the filterable list endpoints.
//!
//! Only query parameters are declared here; request and response bodies
//! are not described.

use axum::Json;
use cinema_core::filters::{PARAM_ACTORS, PARAM_DATE, PARAM_GENRES, PARAM_MOVIE, PARAM_TITLE};
use utoipa::openapi::path::{
    HttpMethod, OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItem, PathsBuilder,
};
use utoipa::openapi::response::ResponseBuilder;
use utoipa::openapi::schema::{KnownFormat, ObjectBuilder, Schema, SchemaFormat, Type};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme};
use utoipa::openapi::{ComponentsBuilder, InfoBuilder, OpenApi, OpenApiBuilder, RefOr, Required};

const BEARER_SCHEME: &str = "jwtAuth";

/// GET /api/schema/
pub async fn schema() -> Json<OpenApi> {
    Json(doc())
}

/// Build the OpenAPI 3 document.
pub fn doc() -> OpenApi {
    let paths = PathsBuilder::new()
        .path(
            "/api/cinema/movies/",
            PathItem::new(
                HttpMethod::Get,
                list_operation(
                    "list_movies",
                    "List movies",
                    [
                        id_list_param(PARAM_ACTORS, "Movies featuring any of these actor ids, e.g. `1,2`"),
                        id_list_param(PARAM_GENRES, "Movies in any of these genre ids, e.g. `1,2`"),
                        query_param(
                            PARAM_TITLE,
                            "Case-insensitive substring of the movie title",
                            string_schema(None),
                        ),
                    ],
                ),
            ),
        )
        .path(
            "/api/cinema/movie_sessions/",
            PathItem::new(
                HttpMethod::Get,
                list_operation(
                    "list_movie_sessions",
                    "List movie sessions",
                    [
                        query_param(
                            PARAM_DATE,
                            "Sessions whose show time falls on this date (`YYYY-MM-DD`, UTC)",
                            string_schema(Some(KnownFormat::Date)),
                        ),
                        id_list_param(PARAM_MOVIE, "Sessions screening any of these movie ids, e.g. `1,2`"),
                    ],
                ),
            ),
        )
        .build();

    let components = ComponentsBuilder::new()
        .security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        )
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Cinema API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(
                    "Movies, screenings, and ticket orders. All cinema endpoints require a bearer token.",
                ))
                .build(),
        )
        .paths(paths)
        .components(Some(components))
        .security(Some(vec![SecurityRequirement::new(
            BEARER_SCHEME,
            Vec::<String>::new(),
        )]))
        .build()
}

fn list_operation<const N: usize>(
    operation_id: &str,
    summary: &str,
    parameters: [Parameter; N],
) -> utoipa::openapi::path::Operation {
    OperationBuilder::new()
        .operation_id(Some(operation_id))
        .summary(Some(summary))
        .tag("cinema")
        .parameters(Some(parameters))
        .response("200", ResponseBuilder::new().description("OK").build())
        .response(
            "400",
            ResponseBuilder::new()
                .description("A filter parameter could not be parsed")
                .build(),
        )
        .response(
            "401",
            ResponseBuilder::new()
                .description("Authentication credentials were not provided")
                .build(),
        )
        .build()
}

/// Comma-separated ids travel as a plain string.
fn id_list_param(name: &str, description: &str) -> Parameter {
    query_param(name, description, string_schema(None))
}

fn query_param(name: &str, description: &str, schema: Schema) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(RefOr::T(schema)))
        .build()
}

fn string_schema(format: Option<KnownFormat>) -> Schema {
    Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::String)
            .format(format.map(SchemaFormat::KnownFormat))
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameter_names(value: &serde_json::Value, path: &str) -> Vec<String> {
        value["paths"][path]["get"]["parameters"]
            .as_array()
            .map(|params| {
                params
                    .iter()
                    .filter_map(|p| p["name"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn declares_every_filter_parameter() {
        let value = serde_json::to_value(doc()).unwrap();

        let movie_params = parameter_names(&value, "/api/cinema/movies/");
        assert_eq!(movie_params, vec!["actors", "genres", "title"]);

        let session_params = parameter_names(&value, "/api/cinema/movie_sessions/");
        assert_eq!(session_params, vec!["date", "movie"]);
    }

    #[test]
    fn date_parameter_uses_date_format() {
        let value = serde_json::to_value(doc()).unwrap();
        let date = &value["paths"]["/api/cinema/movie_sessions/"]["get"]["parameters"][0];
        assert_eq!(date["in"], "query");
        assert_eq!(date["required"], false);
        assert_eq!(date["schema"]["format"], "date");
    }

    #[test]
    fn bearer_scheme_is_declared() {
        let value = serde_json::to_value(doc()).unwrap();
        assert_eq!(
            value["components"]["securitySchemes"][BEARER_SCHEME]["scheme"],
            "bearer"
        );
    }
}
