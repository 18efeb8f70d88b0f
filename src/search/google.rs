use crate::{
    core::geo::{LatLng, LatLngBounds},
    search::{
        prediction::RawSuggestion,
        service::{AutocompleteRequest, PlaceDetails, PlaceDetailsRequest, PlacesService, SearchArea},
    },
    MapError, Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

/// Places API (New) endpoint root.
pub const PLACES_BASE_URL: &str = "https://places.googleapis.com/v1";

/// Shared async HTTP client; clones reuse one connection pool
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(concat!("spinmap/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            Client::new()
        })
});

/// [`PlacesService`] backed by the Google Places REST API
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    suggestions: Vec<RawSuggestion>,
}

#[derive(Debug, Deserialize)]
struct WireLatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct WireLocalizedText {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePlace {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    location: Option<WireLatLng>,
    #[serde(default)]
    display_name: Option<WireLocalizedText>,
    #[serde(default)]
    formatted_address: Option<String>,
}

impl From<WirePlace> for PlaceDetails {
    fn from(place: WirePlace) -> Self {
        Self {
            id: place.id,
            location: place
                .location
                .map(|l| LatLng::new(l.latitude, l.longitude)),
            display_name: place
                .display_name
                .and_then(|n| n.text)
                .filter(|n| !n.is_empty()),
            formatted_address: place.formatted_address.filter(|a| !a.is_empty()),
        }
    }
}

fn rectangle(bounds: &LatLngBounds) -> Value {
    json!({
        "rectangle": {
            "low": { "latitude": bounds.south(), "longitude": bounds.west() },
            "high": { "latitude": bounds.north(), "longitude": bounds.east() },
        }
    })
}

/// Request body for `places:autocomplete`
pub(crate) fn autocomplete_body(request: &AutocompleteRequest) -> Value {
    let mut body = json!({ "input": request.input });
    if !request.region_codes.is_empty() {
        body["includedRegionCodes"] = json!(request.region_codes);
    }
    if !request.primary_types.is_empty() {
        body["includedPrimaryTypes"] = json!(request.primary_types);
    }
    if let Some(language) = &request.language {
        body["languageCode"] = json!(language);
    }
    match &request.area {
        Some(SearchArea::Bias(bounds)) => body["locationBias"] = rectangle(bounds),
        Some(SearchArea::Restriction(bounds)) => body["locationRestriction"] = rectangle(bounds),
        None => {}
    }
    body
}

/// Field mask for a details lookup; an empty field list asks for everything
pub(crate) fn field_mask(fields: &[String]) -> String {
    if fields.is_empty() {
        "*".to_string()
    } else {
        fields.join(",")
    }
}

/// `{base}/places/{place_id}` with the id escaped as one path segment
pub(crate) fn details_url(base_url: &str, place_id: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| MapError::Config(format!("invalid places base url {:?}: {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| MapError::Config(format!("places base url {:?} cannot hold a path", base_url)))?
        .pop_if_empty()
        .push("places")
        .push(place_id);
    Ok(url)
}

pub(crate) fn parse_autocomplete(json: &str) -> Result<Vec<RawSuggestion>> {
    let response: AutocompleteResponse = serde_json::from_str(json)?;
    Ok(response.suggestions)
}

pub(crate) fn parse_place(json: &str) -> Result<PlaceDetails> {
    let place: WirePlace = serde_json::from_str(json)?;
    Ok(place.into())
}

impl GooglePlacesClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            api_key: api_key.into(),
            base_url: PLACES_BASE_URL.to_string(),
        }
    }

    /// Build a client from the configured credential
    pub fn from_config(config: &crate::core::config::AppConfig) -> Result<Self> {
        config
            .api_key
            .as_deref()
            .map(Self::new)
            .ok_or_else(|| MapError::Config("missing places API key".to_string()))
    }

    /// Point the client at a different endpoint root (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MapError::Service(format!("HTTP {}: {}", status, body)));
        }
        Ok(body)
    }
}

#[async_trait]
impl PlacesService for GooglePlacesClient {
    async fn autocomplete(&self, request: AutocompleteRequest) -> Result<Vec<RawSuggestion>> {
        let url = format!("{}/places:autocomplete", self.base_url);
        log::debug!("autocomplete {:?}", request.input);
        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&autocomplete_body(&request))
            .send()
            .await?;
        parse_autocomplete(&Self::read_body(response).await?)
    }

    async fn place_details(&self, request: PlaceDetailsRequest) -> Result<PlaceDetails> {
        let url = details_url(&self.base_url, &request.place_id)?;
        log::debug!("place details {}", request.place_id);
        let response = self
            .client
            .get(url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", field_mask(&request.fields))
            .query(&[
                ("languageCode", request.language.as_str()),
                ("regionCode", request.region.as_str()),
            ])
            .send()
            .await?;
        parse_place(&Self::read_body(response).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::prediction::PlacePrediction;

    fn request(area: Option<SearchArea>) -> AutocompleteRequest {
        AutocompleteRequest {
            input: "拉麵".to_string(),
            region_codes: vec!["tw".to_string()],
            primary_types: vec!["restaurant".to_string(), "food".to_string()],
            area,
            language: None,
        }
    }

    #[test]
    fn test_autocomplete_body_with_bias() {
        let bounds = LatLngBounds::from_coords(24.0, 120.0, 25.0, 121.0);
        let body = autocomplete_body(&request(Some(SearchArea::Bias(bounds))));

        assert_eq!(body["input"], "拉麵");
        assert_eq!(body["includedRegionCodes"], json!(["tw"]));
        assert_eq!(body["includedPrimaryTypes"], json!(["restaurant", "food"]));
        assert_eq!(body["locationBias"]["rectangle"]["low"]["latitude"], 24.0);
        assert_eq!(body["locationBias"]["rectangle"]["high"]["longitude"], 121.0);
        assert!(body.get("locationRestriction").is_none());
    }

    #[test]
    fn test_autocomplete_body_with_restriction() {
        let bounds = LatLngBounds::from_coords(24.0, 120.0, 25.0, 121.0);
        let body = autocomplete_body(&request(Some(SearchArea::Restriction(bounds))));

        assert!(body.get("locationBias").is_none());
        assert_eq!(body["locationRestriction"]["rectangle"]["low"]["longitude"], 120.0);
    }

    #[test]
    fn test_autocomplete_body_without_area() {
        let body = autocomplete_body(&request(None));
        assert!(body.get("locationBias").is_none());
        assert!(body.get("locationRestriction").is_none());
    }

    #[test]
    fn test_details_url_escapes_place_id() {
        let url = details_url(PLACES_BASE_URL, "ChIJ123").unwrap();
        assert_eq!(url.as_str(), "https://places.googleapis.com/v1/places/ChIJ123");

        let url = details_url(PLACES_BASE_URL, "a/b c?d#e").unwrap();
        assert_eq!(
            url.as_str(),
            "https://places.googleapis.com/v1/places/a%2Fb%20c%3Fd%23e"
        );
        assert!(url.query().is_none());
        assert!(url.fragment().is_none());

        let url = details_url("http://localhost:8080/", "x").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/places/x");
    }

    #[test]
    fn test_details_url_rejects_bad_base() {
        assert!(matches!(details_url("not a url", "x"), Err(MapError::Config(_))));
        assert!(matches!(details_url("mailto:a@b.c", "x"), Err(MapError::Config(_))));
    }

    #[test]
    fn test_field_mask() {
        let fields = vec!["location".to_string(), "displayName".to_string()];
        assert_eq!(field_mask(&fields), "location,displayName");
        assert_eq!(field_mask(&[]), "*");
    }

    #[test]
    fn test_parse_autocomplete() {
        let json = r#"{
            "suggestions": [
                { "placePrediction": {
                    "placeId": "ChIJ1",
                    "text": { "text": "一蘭拉麵, 台北市" },
                    "structuredFormat": {
                        "mainText": { "text": "一蘭拉麵" },
                        "secondaryText": { "text": "台北市" }
                    }
                } },
                { "queryPrediction": { "text": { "text": "拉麵 附近" } } }
            ]
        }"#;
        let raw = parse_autocomplete(json).unwrap();
        assert_eq!(raw.len(), 2);

        let first = PlacePrediction::from_raw(&raw[0]).unwrap();
        assert_eq!(first.place_id, "ChIJ1");
        assert_eq!(first.main_text, "一蘭拉麵");
        assert!(PlacePrediction::from_raw(&raw[1]).is_none());
    }

    #[test]
    fn test_parse_empty_autocomplete() {
        assert!(parse_autocomplete("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_place() {
        let json = r#"{
            "id": "ChIJ1",
            "location": { "latitude": 25.04, "longitude": 121.55 },
            "displayName": { "text": "一蘭拉麵", "languageCode": "zh-TW" },
            "formattedAddress": "台北市信義區"
        }"#;
        let details = parse_place(json).unwrap();

        assert_eq!(details.id.as_deref(), Some("ChIJ1"));
        assert_eq!(details.location, Some(LatLng::new(25.04, 121.55)));
        assert_eq!(details.display_name.as_deref(), Some("一蘭拉麵"));
        assert_eq!(details.formatted_address.as_deref(), Some("台北市信義區"));
    }

    #[test]
    fn test_parse_place_missing_fields() {
        let details = parse_place(r#"{ "id": "x" }"#).unwrap();
        assert!(details.location.is_none());
        assert!(details.display_name.is_none());
    }

    #[test]
    fn test_parse_garbage_is_error() {
        assert!(matches!(parse_place("not json"), Err(MapError::Serialization(_))));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = crate::core::config::AppConfig::default();
        assert!(GooglePlacesClient::from_config(&config).is_err());
        assert!(GooglePlacesClient::from_config(&config.with_api_key("k")).is_ok());
    }
}
