//! Display-currency detection for GCC visitors.
//!
//! Resolution order: `country` query, then `timezone` query, then IP
//! geolocation, then USD. Any failure along the way falls through to the
//! next source.

use std::net::IpAddr;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use shifa_core::currency::{country_from_timezone, CurrencyInfo};
use shifa_core::rate_limit::client_identifier;

use crate::error::AppResult;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Geolocation lookups are abandoned after this long.
const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Default, Deserialize)]
pub struct CurrencyParams {
    pub country: Option<String>,
    pub timezone: Option<String>,
    /// Optional catalog price to convert and format.
    pub amount_usd: Option<f64>,
    /// Upper end of a price range starting at `amount_usd`.
    pub max_usd: Option<f64>,
}

/// Where the country came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencySource {
    Country,
    Timezone,
    Geolocation,
    Default,
}

#[derive(Debug, Serialize)]
pub struct CurrencyView {
    pub currency: CurrencyInfo,
    pub source: CurrencySource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_range: Option<String>,
}

/// GET /api/v1/currency?country=&timezone=&amount_usd=&max_usd=
pub async fn detect(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CurrencyParams>,
) -> AppResult<Json<ApiResponse<CurrencyView>>> {
    let (currency, source) = resolve(&state, &headers, &params).await;

    Ok(Json(ApiResponse::ok(CurrencyView {
        currency,
        source,
        amount: params.amount_usd.map(|usd| currency.convert(usd)),
        formatted: params.amount_usd.map(|usd| currency.format(usd, true)),
        formatted_range: params
            .amount_usd
            .zip(params.max_usd)
            .map(|(min, max)| currency.format_range(min, max)),
    })))
}

async fn resolve(
    state: &AppState,
    headers: &HeaderMap,
    params: &CurrencyParams,
) -> (CurrencyInfo, CurrencySource) {
    if let Some(info) = params.country.as_deref().and_then(CurrencyInfo::for_country) {
        return (info, CurrencySource::Country);
    }

    if let Some(info) = params
        .timezone
        .as_deref()
        .and_then(country_from_timezone)
        .and_then(CurrencyInfo::for_country)
    {
        return (info, CurrencySource::Timezone);
    }

    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let client = client_identifier(header("x-forwarded-for"), header("x-real-ip"));
    if let Some(ip) = public_ip(&client) {
        if let Some(info) = geolocate(state, ip)
            .await
            .as_deref()
            .and_then(CurrencyInfo::for_country)
        {
            return (info, CurrencySource::Geolocation);
        }
    }

    (CurrencyInfo::default_currency(), CurrencySource::Default)
}

/// Only routable addresses are worth asking the geolocation service about.
fn public_ip(client: &str) -> Option<IpAddr> {
    let ip: IpAddr = client.parse().ok()?;
    let private = match ip {
        IpAddr::V4(v4) => v4.is_private() || v4.is_loopback() || v4.is_link_local(),
        IpAddr::V6(v6) => v6.is_loopback() || v6.is_unspecified(),
    };
    (!private && !ip.is_unspecified()).then_some(ip)
}

#[derive(Debug, Deserialize)]
struct GeolocationResponse {
    country_code: Option<String>,
}

/// `GET {GEOLOCATION_URL}/{ip}/json/` and read `country_code`.
async fn geolocate(state: &AppState, ip: IpAddr) -> Option<String> {
    let url = format!(
        "{}/{ip}/json/",
        state.config.geolocation_url.trim_end_matches('/')
    );

    let result = async {
        state
            .http_client
            .get(&url)
            .timeout(GEOLOCATION_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<GeolocationResponse>()
            .await
    }
    .await;

    match result {
        Ok(body) => body.country_code,
        Err(e) => {
            tracing::debug!(%ip, error = %e, "Geolocation lookup failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_and_unknown_clients_skip_geolocation() {
        assert!(public_ip("unknown-client").is_none());
        assert!(public_ip("127.0.0.1").is_none());
        assert!(public_ip("10.2.3.4").is_none());
        assert!(public_ip("192.168.1.20").is_none());
        assert!(public_ip("::1").is_none());
        assert_eq!(public_ip("94.200.10.7"), Some("94.200.10.7".parse().unwrap()));
    }
}
