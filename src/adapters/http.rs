//! HTTP adapter: JSON-over-HTTP client for the prediction service.
//!
//! Issues a single `POST {api_url}/predict` per call with the eight
//! parameters under their wire names, and maps every failure onto
//! [`TransportError`].

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize, Serializer};

use crate::config::Config;
use crate::domain::{Confidence, HealthParameters, PredictionResult};
use crate::ports::{PredictionService, TransportError};

/// Request body sent to `/predict`.
///
/// Field names are the wire names. Whole-valued measurements are sent as
/// JSON integers (`100`, not `100.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionRequest {
    pub pregnancies: u32,
    #[serde(serialize_with = "whole_as_integer")]
    pub glucose: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub blood_pressure: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub skin_thickness: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub insulin: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub bmi: f64,
    #[serde(serialize_with = "whole_as_integer")]
    pub dpf: f64,
    pub age: u32,
}

// Largest magnitude below which every whole f64 is exactly an i64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn whole_as_integer<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

impl From<&HealthParameters> for PredictionRequest {
    fn from(p: &HealthParameters) -> Self {
        Self {
            pregnancies: p.pregnancies,
            glucose: p.glucose,
            blood_pressure: p.blood_pressure,
            skin_thickness: p.skin_thickness,
            insulin: p.insulin,
            bmi: p.bmi,
            dpf: p.dpf,
            age: p.age,
        }
    }
}

/// Success body returned by `/predict`. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    prediction: u8,
    probability: f64,
    confidence: Confidence,
}

impl TryFrom<PredictionResponse> for PredictionResult {
    type Error = TransportError;

    fn try_from(r: PredictionResponse) -> Result<Self, Self::Error> {
        if r.prediction > 1 {
            return Err(TransportError::Parse(format!(
                "prediction must be 0 or 1, got {}",
                r.prediction
            )));
        }
        if !(0.0..=1.0).contains(&r.probability) {
            return Err(TransportError::Parse(format!(
                "probability must be within [0, 1], got {}",
                r.probability
            )));
        }
        Ok(Self {
            prediction: r.prediction,
            probability: r.probability,
            confidence: r.confidence,
        })
    }
}

/// Blocking HTTP client for the prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: Client,
    url: String,
}

impl HttpPredictionClient {
    /// Build a client for `config.predict_url()` with the configured timeout.
    ///
    /// # Errors
    /// Returns `GlycocheckError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(Self {
            http,
            url: config.predict_url(),
        })
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(&self, params: &HealthParameters) -> Result<PredictionResult, TransportError> {
        let body = PredictionRequest::from(params);

        tracing::debug!(url = %self.url, "Sending prediction request");

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Prediction service returned an error status");
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = resp
            .text()
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let parsed: PredictionResponse =
            serde_json::from_str(&text).map_err(|e| TransportError::Parse(e.to_string()))?;

        PredictionResult::try_from(parsed)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ParameterField;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use std::time::Duration;

    /// Captured request: head (request line + headers) and body.
    struct Captured {
        head: String,
        body: String,
    }

    fn read_request(stream: &mut std::net::TcpStream) -> Captured {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        let head_end = loop {
            let n = stream.read(&mut chunk).expect("Should read request");
            assert!(n > 0, "Connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < head_end + content_length {
            let n = stream.read(&mut chunk).expect("Should read body");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        Captured {
            head,
            body: String::from_utf8_lossy(&buf[head_end..]).to_string(),
        }
    }

    /// Serve one canned response on an ephemeral port.
    fn serve_once(status_line: &'static str, body: &'static str) -> (Config, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
        let addr = listener.local_addr().expect("Should have addr");

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("Should accept");
            let captured = read_request(&mut stream);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .expect("Should write response");
            captured
        });

        let config = Config {
            api_url: format!("http://{addr}"),
            timeout: Duration::from_secs(5),
            ..Config::default()
        };
        (config, handle)
    }

    #[test]
    fn test_default_parameters_wire_body() {
        let body = serde_json::to_value(PredictionRequest::from(&HealthParameters::default()))
            .expect("Should serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "pregnancies": 0,
                "glucose": 100,
                "blood_pressure": 70,
                "skin_thickness": 20,
                "insulin": 100,
                "bmi": 25,
                "dpf": 0.5,
                "age": 30
            })
        );
    }

    #[test]
    fn test_wire_fields_match_renaming_map() {
        let params = HealthParameters {
            pregnancies: 17,
            glucose: 199.0,
            blood_pressure: 0.0,
            skin_thickness: 99.0,
            insulin: 846.0,
            bmi: 67.1,
            dpf: 0.078,
            age: 81,
        };
        let body = serde_json::to_value(PredictionRequest::from(&params)).expect("Should serialize");
        let object = body.as_object().expect("Should be an object");

        assert_eq!(object.len(), 8);
        for field in ParameterField::ALL {
            let wire = object
                .get(field.wire_name())
                .and_then(serde_json::Value::as_f64)
                .unwrap_or_else(|| panic!("missing wire field {}", field.wire_name()));
            assert!((wire - params.get(field)).abs() < f64::EPSILON);
        }
        assert!(object.get("bloodPressure").is_none());
        assert!(object.get("skinThickness").is_none());
    }

    #[test]
    fn test_fractional_values_stay_fractional() {
        let params = HealthParameters {
            bmi: 31.6,
            dpf: 0.627,
            glucose: 148.0,
            ..HealthParameters::default()
        };
        let text = serde_json::to_string(&PredictionRequest::from(&params)).expect("Should serialize");
        assert!(text.contains(r#""bmi":31.6"#));
        assert!(text.contains(r#""dpf":0.627"#));
        assert!(text.contains(r#""glucose":148,"#));
    }

    #[test]
    fn test_successful_prediction() {
        let (config, server) = serve_once(
            "200 OK",
            r#"{"prediction":1,"probability":0.73,"confidence":"High","model":"rf-v2"}"#,
        );
        let client = HttpPredictionClient::new(&config).expect("Should build client");

        let result = client
            .predict(&HealthParameters::default())
            .expect("Should succeed");
        assert_eq!(result.prediction, 1);
        assert!((result.probability - 0.73).abs() < f64::EPSILON);
        assert_eq!(result.confidence, Confidence::High);

        let captured = server.join().expect("Server thread");
        assert!(captured.head.starts_with("POST /predict HTTP/1.1"));
        assert!(captured
            .head
            .to_ascii_lowercase()
            .contains("content-type: application/json"));

        let sent: serde_json::Value = serde_json::from_str(&captured.body).expect("JSON body");
        assert_eq!(sent["blood_pressure"], serde_json::json!(70));
        assert_eq!(sent["age"], serde_json::json!(30));
    }

    #[test]
    fn test_server_error_status() {
        let (config, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        let client = HttpPredictionClient::new(&config).expect("Should build client");

        let err = client
            .predict(&HealthParameters::default())
            .expect_err("Should fail");
        match err {
            TransportError::HttpStatus { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        server.join().expect("Server thread");
    }

    #[test]
    fn test_malformed_body() {
        let (config, server) = serve_once("200 OK", "not json");
        let client = HttpPredictionClient::new(&config).expect("Should build client");

        let err = client
            .predict(&HealthParameters::default())
            .expect_err("Should fail");
        assert!(matches!(err, TransportError::Parse(_)));
        server.join().expect("Server thread");
    }

    #[test]
    fn test_missing_field() {
        let (config, server) = serve_once("200 OK", r#"{"prediction":0,"probability":0.1}"#);
        let client = HttpPredictionClient::new(&config).expect("Should build client");

        let err = client
            .predict(&HealthParameters::default())
            .expect_err("Should fail");
        assert!(matches!(err, TransportError::Parse(_)));
        server.join().expect("Server thread");
    }

    #[test]
    fn test_out_of_domain_response() {
        let (config, server) = serve_once(
            "200 OK",
            r#"{"prediction":1,"probability":1.7,"confidence":"High"}"#,
        );
        let client = HttpPredictionClient::new(&config).expect("Should build client");

        let err = client
            .predict(&HealthParameters::default())
            .expect_err("Should fail");
        assert!(matches!(err, TransportError::Parse(_)));
        server.join().expect("Server thread");
    }

    #[test]
    fn test_connection_refused() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("Should bind");
            listener.local_addr().expect("Should have addr")
        };
        let config = Config {
            api_url: format!("http://{addr}"),
            timeout: Duration::from_secs(2),
            ..Config::default()
        };
        let client = HttpPredictionClient::new(&config).expect("Should build client");

        let err = client
            .predict(&HealthParameters::default())
            .expect_err("Should fail");
        assert!(matches!(err, TransportError::Network(_)));
    }
}
