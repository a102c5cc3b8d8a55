use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{location_path, GeoDataset, LocationSlugCodec};
use crate::models::{EncodeSlugRequest, SlugResponse};
use crate::routes::error_response;
use std::sync::Arc;

/// Reference data and codec shared by the location routes
#[derive(Clone)]
pub struct LocationState {
    pub geo: Arc<GeoDataset>,
    pub codec: LocationSlugCodec,
}

/// Configure all location slug routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/locations/slug", web::post().to(encode_slug))
        .route("/locations/decode/{slug}", web::get().to(decode_slug));
}

/// Build the slug for a known city/state
///
/// POST /api/v1/locations/slug
///
/// Request body:
/// ```json
/// {
///   "city": "string",
///   "state": "string"
/// }
/// ```
async fn encode_slug(
    state: web::Data<LocationState>,
    req: web::Json<EncodeSlugRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    // Only build URLs for places that exist
    let Some(resolved) = state.geo.resolve(&req.city, &req.state, state.codec.country()) else {
        tracing::info!("Refusing slug for unknown location: {}, {}", req.city, req.state);
        return error_response(
            StatusCode::NOT_FOUND,
            "Unknown location",
            format!("{}, {} is not a known location in {}", req.city, req.state, state.codec.country()),
        );
    };

    let slug = state.codec.encode(&resolved.city, &resolved.state);
    if slug.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Location not encodable", "city and state are required");
    }

    HttpResponse::Ok().json(SlugResponse {
        path: location_path(&slug),
        slug,
    })
}

/// Decode a slug into a validated location
///
/// GET /api/v1/locations/decode/{slug}
///
/// Always 200; unknown places come back with `isValid: false`.
async fn decode_slug(
    state: web::Data<LocationState>,
    path: web::Path<String>,
) -> impl Responder {
    let decoded = state.codec.decode(&path, &state.geo);

    tracing::debug!("Decoded slug {} (valid: {})", path.as_str(), decoded.is_valid);

    HttpResponse::Ok().json(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DecodedLocation;
    use actix_web::{test, App};

    const SAMPLE: &str = r#"{
        "countries": [{
            "name": "United States",
            "isoCode": "US",
            "states": [
                { "name": "New York", "isoCode": "NY", "cities": [{ "name": "New York" }] },
                { "name": "New Mexico", "isoCode": "NM", "cities": [{ "name": "Santa Fe" }] }
            ]
        }]
    }"#;

    fn location_state() -> LocationState {
        LocationState {
            geo: Arc::new(GeoDataset::from_json_str(SAMPLE).unwrap()),
            codec: LocationSlugCodec::new("United States"),
        }
    }

    #[actix_web::test]
    async fn test_encode_known_location() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(location_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/locations/slug")
            .set_json(serde_json::json!({ "city": "santa fe", "state": "NM" }))
            .to_request();
        let body: SlugResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.slug, "santa-fe-new-mexico");
        assert_eq!(body.path, "/explore/santa-fe-new-mexico");
    }

    #[actix_web::test]
    async fn test_encode_unknown_location_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(location_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/locations/slug")
            .set_json(serde_json::json!({ "city": "Gotham", "state": "New York" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_encode_blank_field_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(location_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/locations/slug")
            .set_json(serde_json::json!({ "city": "New York", "state": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_decode_returns_sentinel_for_unknown_slug() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(location_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/locations/decode/new-york-new-york").to_request();
        let body: DecodedLocation = test::call_and_read_body_json(&app, req).await;
        assert!(body.is_valid);
        assert_eq!(body.city.as_deref(), Some("New York"));

        let req = test::TestRequest::get().uri("/locations/decode/atlantis").to_request();
        let body: DecodedLocation = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, DecodedLocation::invalid());
    }
}
