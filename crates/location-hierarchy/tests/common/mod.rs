//! Shared fixtures: a scripted local HTTP server and KML documents.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Response served for one request
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
}

pub fn ok(body: impl Into<String>) -> CannedResponse {
    CannedResponse {
        status: 200,
        body: body.into(),
    }
}

pub fn status(code: u16, body: impl Into<String>) -> CannedResponse {
    CannedResponse {
        status: code,
        body: body.into(),
    }
}

/// Geocoding body with one result carrying `components`
pub fn single_result(components: serde_json::Value) -> String {
    serde_json::json!({
        "results": [{ "components": components }],
        "status": { "code": 200, "message": "OK" }
    })
    .to_string()
}

/// Geocoding body with no results
pub fn no_results() -> String {
    serde_json::json!({
        "results": [],
        "status": { "code": 200, "message": "OK" }
    })
    .to_string()
}

/// Serve `responses` to consecutive connections, one request each.
///
/// Returns the endpoint URL and a handle yielding the request lines seen.
pub fn spawn_http_sequence(
    responses: Vec<CannedResponse>,
) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let mut request_lines = Vec::new();
        for response in responses {
            let (mut stream, _) = listener.accept().unwrap();
            request_lines.push(read_request_line(&mut stream));

            let reason = match response.status {
                200 => "OK",
                401 => "Unauthorized",
                402 => "Payment Required",
                500 => "Internal Server Error",
                _ => "Status",
            };
            let headers = format!(
                "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                response.status,
                reason,
                response.body.len()
            );
            stream.write_all(headers.as_bytes()).unwrap();
            stream.write_all(response.body.as_bytes()).unwrap();
            let _ = stream.flush();
        }
        request_lines
    });
    (format!("http://{addr}/geocode/v1/json"), handle)
}

/// Endpoint on a port nothing listens on
pub fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/geocode/v1/json")
}

fn read_request_line(stream: &mut TcpStream) -> String {
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
        if request.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&request)
        .lines()
        .next()
        .unwrap_or_default()
        .to_string()
}

/// KML document with one point placemark per `(lon, lat)` pair
pub fn kml_with_points(points: &[(&str, &str)]) -> String {
    let placemarks: String = points
        .iter()
        .enumerate()
        .map(|(i, (lon, lat))| {
            format!(
                "    <Placemark><name>P{i}</name><Point><coordinates>{lon},{lat},0</coordinates></Point></Placemark>\n"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<kml xmlns=\"http://www.opengis.net/kml/2.2\">\n  <Document>\n{placemarks}  </Document>\n</kml>\n"
    )
}

/// HTTP client that ignores proxy settings from the environment
pub fn direct_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
