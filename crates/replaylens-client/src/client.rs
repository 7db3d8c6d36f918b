use chrono::{DateTime, Utc};
use replaylens_model::{Hero, MatchAnalysis};

use crate::{
    CacheEntry, CacheStorage, FetchError, MatchCache, Transport,
    cache::{expires_at, parse_max_age},
};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_HEROES_URL: &str = "https://assets.deadlock-api.com/v2/heroes?only_active=true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Serve a stale cache entry when the request fails or returns an error status.
    pub allow_stale_on_error: bool,
}

/// Client of the analysis backend and the hero assets API.
#[derive(Debug, Clone)]
pub struct AnalysisClient<T> {
    transport: T,
    backend_url: String,
    heroes_url: String,
    clock: fn() -> DateTime<Utc>,
}

impl<T> AnalysisClient<T>
where
    T: Transport,
{
    pub fn new(
        transport: T,
        backend_url: impl Into<String>,
        heroes_url: impl Into<String>,
    ) -> Self {
        let backend_url = backend_url.into().trim_end_matches('/').to_owned();
        Self {
            transport,
            backend_url,
            heroes_url: heroes_url.into(),
            clock: Utc::now,
        }
    }

    /// Replaces the wall clock used for cache expiry.
    #[must_use]
    pub fn with_clock(self, clock: fn() -> DateTime<Utc>) -> Self {
        Self { clock, ..self }
    }

    #[must_use]
    pub fn match_url(&self, match_id: u64) -> String {
        format!("{}/match/analysis/{match_id}", self.backend_url)
    }

    /// Fetches a match analysis through `cache`.
    pub fn fetch_match_analysis<S>(
        &self,
        cache: &mut MatchCache<S>,
        match_id: u64,
        options: FetchOptions,
    ) -> Result<MatchAnalysis, FetchError>
    where
        S: CacheStorage,
    {
        let cached = cache.get(match_id).cloned();
        if let Some(entry) = &cached
            && entry.is_fresh((self.clock)())
        {
            log::info!("match {match_id}: cache hit");
            return Ok(entry.data.clone());
        }

        let url = self.match_url(match_id);
        let etag = cached.as_ref().and_then(|entry| entry.etag.as_deref());
        let headers: Vec<(&str, &str)> = etag
            .map(|etag| ("If-None-Match", etag))
            .into_iter()
            .collect();
        if etag.is_some() {
            log::info!("match {match_id}: revalidating cached entry");
        }

        let stale = |err: FetchError| match &cached {
            Some(entry) if options.allow_stale_on_error => {
                log::warn!("match {match_id}: serving stale data after error: {err}");
                Ok(entry.data.clone())
            }
            _ => Err(err),
        };

        let response = match self.transport.get(&url, &headers) {
            Ok(response) => response,
            Err(err) => return stale(err.into()),
        };

        let max_age = parse_max_age(response.header("Cache-Control"));
        let expires_at = expires_at((self.clock)(), max_age);
        let new_etag = response.header("ETag").map(str::to_owned);

        if response.status == 304 {
            let Some(entry) = cached else {
                return Err(FetchError::NotModifiedWithoutCache);
            };
            let data = entry.data.clone();
            cache.insert(
                match_id,
                CacheEntry {
                    etag: new_etag.or(entry.etag),
                    expires_at,
                    data: entry.data,
                },
            );
            return Ok(data);
        }

        if !response.is_success() {
            return stale(FetchError::Status {
                status: response.status,
                body: response.body,
            });
        }

        let data = MatchAnalysis::from_json(&response.body)?;
        cache.insert(
            match_id,
            CacheEntry {
                data: data.clone(),
                etag: new_etag,
                expires_at,
            },
        );
        Ok(data)
    }

    /// Fetches the active hero list.
    pub fn fetch_heroes(&self) -> Result<Vec<Hero>, FetchError> {
        let response = self.transport.get(&self.heroes_url, &[])?;
        if !response.is_success() {
            return Err(FetchError::HeroStatus {
                status: response.status,
            });
        }
        serde_json::from_str(&response.body).map_err(FetchError::Heroes)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::VecDeque};

    use super::*;
    use crate::{HttpResponse, MemoryStorage, TransportError};

    type Request = (String, Vec<(String, String)>);

    /// Replays canned responses in order and records every request.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
        requests: RefCell<Vec<Request>>,
    }

    impl ScriptedTransport {
        fn push(&self, response: Result<HttpResponse, TransportError>) {
            self.responses.borrow_mut().push_back(response);
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for &ScriptedTransport {
        fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push((
                url.to_owned(),
                headers
                    .iter()
                    .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                    .collect(),
            ));
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::new("no scripted response")))
        }
    }

    const BODY: &str = r#"{"match_metadata": {"match_info": {"match_id": 7, "duration_s": 60}}}"#;

    fn ok(body: &str, headers: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status: 200,
            headers: headers
                .iter()
                .map(|&(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            body: body.to_owned(),
        })
    }

    fn status(status: u16, body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_owned(),
        })
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_000_000, 0).unwrap()
    }

    fn t_late() -> DateTime<Utc> {
        DateTime::from_timestamp(1_000_000 + 3600, 0).unwrap()
    }

    fn client(
        transport: &ScriptedTransport,
        clock: fn() -> DateTime<Utc>,
    ) -> AnalysisClient<&ScriptedTransport> {
        AnalysisClient::new(transport, "http://backend/", DEFAULT_HEROES_URL)
            .with_clock(clock)
    }

    const STALE: FetchOptions = FetchOptions {
        allow_stale_on_error: true,
    };

    /// Cache holding match 7, fetched at `t0` with ETag `"v1"` and a 60 s lifetime.
    fn warm_cache(transport: &ScriptedTransport) -> MatchCache<MemoryStorage> {
        let mut cache = MatchCache::new(MemoryStorage::default());
        transport.push(ok(BODY, &[("ETag", "\"v1\""), ("Cache-Control", "max-age=60")]));
        client(transport, t0)
            .fetch_match_analysis(&mut cache, 7, FetchOptions::default())
            .unwrap();
        cache
    }

    #[test]
    fn test_fresh_entry_skips_network() {
        let transport = ScriptedTransport::default();
        let mut cache = warm_cache(&transport);
        let data = client(&transport, t0)
            .fetch_match_analysis(&mut cache, 7, FetchOptions::default())
            .unwrap();
        assert_eq!(data.match_info().match_id, 7);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://backend/match/analysis/7");
        assert!(requests[0].1.is_empty());
    }

    #[test]
    fn test_stale_entry_revalidates_with_etag() {
        let transport = ScriptedTransport::default();
        let mut cache = warm_cache(&transport);
        transport.push(Ok(HttpResponse {
            status: 304,
            headers: vec![("Cache-Control".to_owned(), "max-age=120".to_owned())],
            body: String::new(),
        }));
        let data = client(&transport, t_late)
            .fetch_match_analysis(&mut cache, 7, FetchOptions::default())
            .unwrap();
        assert_eq!(data.match_info().match_id, 7);

        let requests = transport.requests();
        assert_eq!(
            requests[1].1,
            [("If-None-Match".to_owned(), "\"v1\"".to_owned())]
        );
        let entry = cache.get(7).unwrap();
        assert_eq!(entry.etag.as_deref(), Some("\"v1\""));
        assert_eq!(entry.expires_at, t_late() + chrono::TimeDelta::seconds(118));
    }

    #[test]
    fn test_not_modified_without_cache_is_an_error() {
        let transport = ScriptedTransport::default();
        transport.push(status(304, ""));
        let mut cache = MatchCache::new(MemoryStorage::default());
        let err = client(&transport, t0)
            .fetch_match_analysis(&mut cache, 7, STALE)
            .unwrap_err();
        assert!(matches!(err, FetchError::NotModifiedWithoutCache));
    }

    #[test]
    fn test_error_status_serves_stale_only_when_allowed() {
        let transport = ScriptedTransport::default();
        let mut cache = warm_cache(&transport);

        transport.push(status(502, "Bad Gateway"));
        let err = client(&transport, t_late)
            .fetch_match_analysis(&mut cache, 7, FetchOptions::default())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch match analysis (502): Bad Gateway"
        );
        assert!(err.user_message().starts_with("The parser service"));

        transport.push(status(502, "Bad Gateway"));
        let data = client(&transport, t_late)
            .fetch_match_analysis(&mut cache, 7, STALE)
            .unwrap();
        assert_eq!(data.match_info().match_id, 7);
    }

    #[test]
    fn test_transport_failure_serves_stale_when_allowed() {
        let transport = ScriptedTransport::default();
        let mut cache = warm_cache(&transport);
        transport.push(Err(TransportError::new("request timeout")));
        assert!(
            client(&transport, t_late)
                .fetch_match_analysis(&mut cache, 7, STALE)
                .is_ok()
        );

        let mut empty = MatchCache::new(MemoryStorage::default());
        transport.push(Err(TransportError::new("request timeout")));
        let err = client(&transport, t_late)
            .fetch_match_analysis(&mut empty, 7, STALE)
            .unwrap_err();
        assert_eq!(err.category(), crate::ErrorCategory::Timeout);
    }

    #[test]
    fn test_invalid_payload_is_rejected_and_not_cached() {
        let transport = ScriptedTransport::default();
        let paths = r#"{"match_paths": {"x_resolution": 0, "y_resolution": 1}}"#;
        let payload = format!(r#"{{"match_metadata": {{"match_info": {paths}}}}}"#);
        transport.push(ok(&payload, &[]));
        let mut cache = MatchCache::new(MemoryStorage::default());
        let err = client(&transport, t0)
            .fetch_match_analysis(&mut cache, 7, FetchOptions::default())
            .unwrap_err();
        assert!(matches!(err, FetchError::Analysis(_)));
        assert!(cache.get(7).is_none());
    }

    #[test]
    fn test_default_lifetime_without_cache_control() {
        let transport = ScriptedTransport::default();
        transport.push(ok(BODY, &[]));
        let mut cache = MatchCache::new(MemoryStorage::default());
        client(&transport, t0)
            .fetch_match_analysis(&mut cache, 7, FetchOptions::default())
            .unwrap();
        let entry = cache.get(7).unwrap();
        assert_eq!(entry.etag, None);
        assert_eq!(entry.expires_at, t0() + chrono::TimeDelta::seconds(298));
    }

    #[test]
    fn test_fetch_heroes() {
        let transport = ScriptedTransport::default();
        transport.push(ok(r#"[{"id": 1, "name": "Haze", "images": {}}]"#, &[]));
        transport.push(status(500, ""));
        let client = client(&transport, t0);
        let heroes = client.fetch_heroes().unwrap();
        assert_eq!(heroes[0].name, "Haze");
        assert!(matches!(
            client.fetch_heroes(),
            Err(FetchError::HeroStatus { status: 500 })
        ));

        assert_eq!(transport.requests()[0].0, DEFAULT_HEROES_URL);
    }
}
