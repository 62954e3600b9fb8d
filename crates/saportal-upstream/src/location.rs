//! Google reverse-geocoding results to a [`LocationResult`].

use saportal_core::{records::coordinate_label, AccuracyTier, LocationResult};

use crate::error::UpstreamError;
use crate::types::{GeocodeResponse, GeocodeResult};

const PROVIDER: &str = "Google Geocoding";

fn has_type(types: &[String], wanted: &str) -> bool {
    types.iter().any(|t| t == wanted)
}

fn component<'a>(result: &'a GeocodeResult, kinds: &[&str]) -> Option<&'a str> {
    result
        .address_components
        .iter()
        .find(|c| kinds.iter().any(|k| has_type(&c.types, k)))
        .map(|c| c.long_name.as_str())
}

/// The most specific name a single result supports, if any.
fn name_from_result(result: &GeocodeResult) -> Option<(String, AccuracyTier)> {
    let types = &result.types;

    if has_type(types, "street_address") || has_type(types, "route") {
        if let Some(route) = component(result, &["route"]) {
            return Some(match component(result, &["street_number"]) {
                Some(number) if !number.is_empty() => {
                    (format!("{number} {route}"), AccuracyTier::StreetAddress)
                }
                _ => (route.to_string(), AccuracyTier::Route),
            });
        }
    }

    let tiers: [(&[&str], AccuracyTier); 4] = [
        (&["neighborhood"], AccuracyTier::Neighborhood),
        (&["sublocality", "sublocality_level_1"], AccuracyTier::Sublocality),
        (&["locality"], AccuracyTier::Locality),
        (&["administrative_area_level_2"], AccuracyTier::Municipality),
    ];
    for (kinds, tier) in tiers {
        if kinds.iter().any(|k| has_type(types, k)) {
            if let Some(name) = component(result, kinds) {
                return Some((name.to_string(), tier));
            }
        }
    }
    None
}

/// Picks a display name for the coordinates and the tier it satisfies.
///
/// Results are scanned in order; the first one yielding a street, route,
/// neighbourhood, suburb, town or municipality wins. Otherwise the first
/// comma segment of the first formatted address is used (`general`), and as
/// a last resort the coordinates themselves.
#[must_use]
pub fn best_location_name(
    results: &[GeocodeResult],
    latitude: f64,
    longitude: f64,
) -> (String, AccuracyTier) {
    if let Some(found) = results.iter().find_map(name_from_result) {
        return found;
    }

    let segment = results
        .first()
        .and_then(|r| r.formatted_address.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty());
    match segment {
        Some(s) => (s.to_string(), AccuracyTier::General),
        None => (
            coordinate_label(latitude, longitude),
            AccuracyTier::Coordinates,
        ),
    }
}

/// Builds the location for a successful reverse-geocode response.
///
/// # Errors
///
/// Returns [`UpstreamError::Provider`] when the provider status is not `OK`
/// or the result list is empty.
pub fn normalize_location(
    response: &GeocodeResponse,
    latitude: f64,
    longitude: f64,
) -> Result<LocationResult, UpstreamError> {
    let Some(first) = response.results.first().filter(|_| response.status == "OK") else {
        return Err(UpstreamError::Provider {
            provider: PROVIDER,
            message: response
                .error_message
                .clone()
                .unwrap_or_else(|| response.status.clone()),
        });
    };

    let (name, accuracy_tier) = best_location_name(&response.results, latitude, longitude);
    Ok(LocationResult {
        name,
        formatted_address: first.formatted_address.clone(),
        latitude,
        longitude,
        accuracy_tier,
        success: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(value: serde_json::Value) -> Vec<GeocodeResult> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn street_number_and_route_give_street_address() {
        let r = results(json!([{
            "types": ["street_address"],
            "formatted_address": "12 Long St, Cape Town City Centre, Cape Town, 8001, South Africa",
            "address_components": [
                { "long_name": "12", "types": ["street_number"] },
                { "long_name": "Long Street", "types": ["route"] },
                { "long_name": "Cape Town", "types": ["locality", "political"] }
            ]
        }]));
        assert_eq!(
            best_location_name(&r, -33.92, 18.42),
            ("12 Long Street".to_string(), AccuracyTier::StreetAddress)
        );
    }

    #[test]
    fn route_beats_locality_in_the_same_result() {
        let r = results(json!([{
            "types": ["route", "locality"],
            "formatted_address": "Jan Smuts Ave, Johannesburg, South Africa",
            "address_components": [
                { "long_name": "Jan Smuts Avenue", "types": ["route"] },
                { "long_name": "Johannesburg", "types": ["locality", "political"] }
            ]
        }]));
        assert_eq!(
            best_location_name(&r, -26.15, 28.03),
            ("Jan Smuts Avenue".to_string(), AccuracyTier::Route)
        );
    }

    #[test]
    fn later_result_is_used_when_earlier_ones_lack_names() {
        let r = results(json!([
            { "types": ["plus_code"], "formatted_address": "XQ2G+8J Durban", "address_components": [] },
            {
                "types": ["sublocality_level_1", "sublocality", "political"],
                "formatted_address": "Umhlanga, Durban, South Africa",
                "address_components": [
                    { "long_name": "Umhlanga", "types": ["sublocality_level_1", "sublocality", "political"] }
                ]
            }
        ]));
        assert_eq!(
            best_location_name(&r, -29.72, 31.08),
            ("Umhlanga".to_string(), AccuracyTier::Sublocality)
        );
    }

    #[test]
    fn municipality_tier_from_admin_area_two() {
        let r = results(json!([{
            "types": ["administrative_area_level_2", "political"],
            "formatted_address": "City of Tshwane Metropolitan Municipality, South Africa",
            "address_components": [
                { "long_name": "City of Tshwane Metropolitan Municipality", "types": ["administrative_area_level_2", "political"] }
            ]
        }]));
        let (name, tier) = best_location_name(&r, -25.74, 28.18);
        assert_eq!(name, "City of Tshwane Metropolitan Municipality");
        assert_eq!(tier, AccuracyTier::Municipality);
    }

    #[test]
    fn falls_back_to_first_formatted_address_segment() {
        let r = results(json!([{
            "types": ["plus_code"],
            "formatted_address": "Kruger National Park, Mpumalanga, South Africa",
            "address_components": []
        }]));
        assert_eq!(
            best_location_name(&r, -24.0, 31.5),
            ("Kruger National Park".to_string(), AccuracyTier::General)
        );
    }

    #[test]
    fn falls_back_to_coordinates_when_nothing_usable() {
        assert_eq!(
            best_location_name(&[], -26.2041, 28.0473),
            ("Location (-26.2041, 28.0473)".to_string(), AccuracyTier::Coordinates)
        );
    }

    #[test]
    fn non_ok_status_is_a_provider_error() {
        let response: GeocodeResponse = serde_json::from_value(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid.",
            "results": []
        }))
        .unwrap();
        let err = normalize_location(&response, -26.2, 28.0).unwrap_err();
        assert!(err.to_string().contains("The provided API key is invalid."));
    }

    #[test]
    fn zero_results_is_a_provider_error() {
        let response: GeocodeResponse =
            serde_json::from_value(json!({ "status": "ZERO_RESULTS", "results": [] })).unwrap();
        assert!(matches!(
            normalize_location(&response, 0.0, 0.0),
            Err(UpstreamError::Provider { .. })
        ));
    }

    #[test]
    fn ok_response_uses_first_formatted_address() {
        let response: GeocodeResponse = serde_json::from_value(json!({
            "status": "OK",
            "results": [{
                "types": ["locality", "political"],
                "formatted_address": "Stellenbosch, South Africa",
                "address_components": [ { "long_name": "Stellenbosch", "types": ["locality", "political"] } ]
            }]
        }))
        .unwrap();
        let location = normalize_location(&response, -33.9321, 18.8602).unwrap();
        assert_eq!(location.name, "Stellenbosch");
        assert_eq!(location.formatted_address, "Stellenbosch, South Africa");
        assert_eq!(location.accuracy_tier, AccuracyTier::Locality);
        assert!(location.success);
    }
}
