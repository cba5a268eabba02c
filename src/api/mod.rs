pub mod nominatim;
pub mod overpass;

use anyhow::{Context, Result};
use serde::Serialize;
use std::time::Duration;

use crate::domain::{Coordinate, SchoolRecord};

pub use nominatim::NominatimGeocoder;
pub use overpass::{OverpassResponse, OverpassSchoolFinder};

/// One match for a geocoded address
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeocodeCandidate {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub display_name: Option<String>,
}

/// Translates free-text addresses into coordinates.
pub trait Geocoder {
    /// Name used when reporting failures
    fn name(&self) -> &str;

    /// Candidates in upstream order; empty when nothing matched.
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>>;
}

/// Finds schools within a radius of a point.
pub trait SchoolFinder {
    /// Name used when reporting failures
    fn name(&self) -> &str;

    fn find_schools(&self, origin: Coordinate, radius_m: f64) -> Result<Vec<SchoolRecord>>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>> {
        (**self).geocode(address)
    }
}

impl<T: SchoolFinder + ?Sized> SchoolFinder for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn find_schools(&self, origin: Coordinate, radius_m: f64) -> Result<Vec<SchoolRecord>> {
        (**self).find_schools(origin, radius_m)
    }
}

/// Build the HTTP client shared by both collaborators.
///
/// # Arguments
/// * `user_agent` - Sent with every request (Nominatim requires one)
/// * `timeout` - Per-request timeout
///
/// # Returns
/// * `Ok(client)` - Cheap to clone; clones share one connection pool
/// * `Err` - If the TLS backend could not be initialised
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .context("Failed to create HTTP client")
}

#[cfg(test)]
pub(crate) mod test_server {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single HTTP request on a local port with a canned response.
    ///
    /// # Returns
    /// * Base URL of the server, e.g. `http://127.0.0.1:4321/`
    pub fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream);

            // Drain the request so the client sees a clean response
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                if reader.read_line(&mut line).unwrap_or(0) == 0 || line == "\r\n" {
                    break;
                }
                if let Some((name, value)) = line.split_once(':')
                    && name.eq_ignore_ascii_case("content-length")
                {
                    content_length = value.trim().parse().unwrap_or(0);
                }
            }
            let mut request_body = vec![0; content_length];
            reader.read_exact(&mut request_body).ok();

            let mut stream = reader.into_inner();
            stream.write_all(response.as_bytes()).ok();
            stream.flush().ok();
        });

        format!("http://{addr}/")
    }

    /// Client that ignores proxy settings so requests reach the local server
    pub fn client() -> reqwest::blocking::Client {
        reqwest::blocking::Client::builder()
            .no_proxy()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap()
    }
}
