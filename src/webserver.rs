//! HTTP front-end for certificate issuance.
//!
//! Serves the certificate request form and turns submitted form data into a
//! fresh key pair plus a self-signed root CA certificate, returned to the
//! browser as PEM text. All issuance logic lives in the library modules;
//! this layer only parses the form and maps errors to HTTP statuses.

use crate::configs::{AppConfig, IssuanceConfig};
use crate::encode;
use crate::error::WebCaError;
use crate::issuer;
use crate::keygen;
use crate::template::{self, SubjectAttributes};
use anyhow::{Context, Result};
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

const CERT_FORM_PATH: &str = "/cert/new";

const CERT_REQUEST_FORM: &str = r#"<!doctype html>
<head>
<title>Create Certificate</title>
<style>
label {
	display:block;
	padding:0.25em 0;
	width:20em;
}
input {
	width:20em;
}
</style>
</head>
<body>
<form method=post action="/cert/">
<p>
<label for=cn>Hostname (CN)</label>
<input type=text name=cn>
</p>
<p>
<label for=country>Country</label>
<input type=text name=country id=country>
</p>
<p>
<label for=ou>Department (OU)</label>
<input type=text name=ou>
</p>
<p>
<input type=submit value="Submit">
</p>
</form>
</body>"#;

#[derive(Debug, Deserialize)]
struct CertRequest {
    #[serde(default)]
    cn: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    ou: String,
}

/// Run the issuance web server until the process is terminated.
pub fn start_webserver(config: AppConfig) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to create Tokio runtime")?;
    rt.block_on(async {
        let issuance = Arc::new(config.issuance.clone());
        let app = Router::new()
            .route("/", get(|| async { Redirect::to(CERT_FORM_PATH) }))
            .route(CERT_FORM_PATH, get(certificate_form))
            .route("/cert/", post(create_certificate))
            .with_state(issuance)
            .layer(TraceLayer::new_for_http());

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .context("Invalid listen address")?;

        tracing::info!(%addr, "server listening");

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context("Failed to bind listen address")?;
        axum::serve(listener, app)
            .await
            .context("Server terminated")
    })
}

async fn certificate_form() -> Html<&'static str> {
    Html(CERT_REQUEST_FORM)
}

/// Take form data, generate a key and certificate, and hand both back to the
/// browser in PEM format.
async fn create_certificate(
    State(issuance): State<Arc<IssuanceConfig>>,
    Form(request): Form<CertRequest>,
) -> Result<String, (StatusCode, String)> {
    issue_root_certificate(&request, issuance.key_bits).map_err(|err| match err {
        WebCaError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        _ => {
            tracing::error!(error = %err, "certificate issuance failed");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    })
}

fn issue_root_certificate(request: &CertRequest, key_bits: u32) -> crate::error::Result<String> {
    let private_key = keygen::generate_rsa_key(key_bits)?;

    let subject = SubjectAttributes {
        common_name: request.cn.clone(),
        country: request.country.clone(),
        organizational_unit: request.ou.clone(),
        organization: format!("{} root CA", request.cn),
    };

    let template = template::build_template(subject, true)?;
    let certificate = issuer::self_sign(template, &private_key)?;

    encode::issuance_bundle(&private_key, &certificate)
}
