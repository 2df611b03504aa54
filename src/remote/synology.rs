//! Synology FileStation web API client (session login, folder listing, file download).

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{IndexError, IndexResult};
use crate::utils::config::NAS_HTTP_TIMEOUT_SECS;
use crate::{NasOpts, RemoteFile};

use super::RemoteArchive;

/// Response envelope shared by every FileStation call.
#[derive(Debug, Deserialize)]
struct NasEnvelope<T> {
    data: Option<T>,
    success: bool,
    error: Option<NasErrorBody>,
}

#[derive(Debug, Deserialize)]
struct NasErrorBody {
    code: i64,
}

#[derive(Debug, Deserialize)]
struct NasSid {
    sid: String,
}

#[derive(Debug, Deserialize)]
struct NasFiles {
    #[serde(default)]
    files: Vec<RemoteFile>,
}

/// Unwrap an envelope into its data, mapping `success=false` to an error string with the NAS code.
fn unwrap_envelope<T>(env: NasEnvelope<T>) -> Result<T, String> {
    if !env.success {
        let code = env.error.map(|e| e.code).unwrap_or(-1);
        return Err(format!("NAS returned error code {}", code));
    }
    env.data.ok_or_else(|| "NAS response has no data".to_string())
}

/// Logged-in FileStation session. The session id is reused for every call.
pub struct SynologyClient {
    http: Client,
    base_url: String,
    sid: String,
}

impl SynologyClient {
    /// Log in with `SYNO.API.Auth` and keep the returned session id.
    pub fn login(nas: &NasOpts) -> IndexResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(NAS_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| IndexError::Config(format!("build HTTP client: {}", e)))?;
        let base_url = format!("http://{}:{}/webapi", nas.host, nas.port);
        let env: NasEnvelope<NasSid> = get_json(
            &http,
            &format!("{}/auth.cgi", base_url),
            &[
                ("api", "SYNO.API.Auth"),
                ("version", "3"),
                ("method", "login"),
                ("account", nas.user.as_str()),
                ("passwd", nas.password.as_str()),
                ("session", "FileStation"),
                ("format", "sid"),
            ],
        )
        .map_err(|e| IndexError::listing("<login>", e))?;
        let sid = unwrap_envelope(env)
            .map_err(|e| IndexError::listing("<login>", e))?
            .sid;
        debug!("Logged in to NAS at {}", base_url);
        Ok(Self {
            http,
            base_url,
            sid,
        })
    }

    fn entry_url(&self) -> String {
        format!("{}/entry.cgi", self.base_url)
    }
}

fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, String> {
    http.get(url)
        .query(query)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.json::<T>())
        .map_err(|e| e.to_string())
}

impl RemoteArchive for SynologyClient {
    fn list(&self, dir: &str) -> IndexResult<Vec<RemoteFile>> {
        let env: NasEnvelope<NasFiles> = get_json(
            &self.http,
            &self.entry_url(),
            &[
                ("api", "SYNO.FileStation.List"),
                ("version", "2"),
                ("method", "list"),
                ("folder_path", dir),
                ("session", "FileStation"),
                ("additional", "real_path"),
                ("_sid", self.sid.as_str()),
            ],
        )
        .map_err(|e| IndexError::listing(dir, e))?;
        unwrap_envelope(env)
            .map(|d| d.files)
            .map_err(|e| IndexError::listing(dir, e))
    }

    fn download(&self, path: &str) -> IndexResult<Vec<u8>> {
        let resp = self
            .http
            .get(self.entry_url())
            .query(&[
                ("api", "SYNO.FileStation.Download"),
                ("version", "2"),
                ("method", "download"),
                ("path", path),
                ("mode", "download"),
                ("_sid", self.sid.as_str()),
            ])
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| IndexError::download(path, e))?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let bytes = resp.bytes().map_err(|e| IndexError::download(path, e))?;
        download_body(path, content_type.as_deref(), bytes.to_vec())
    }
}

/// FileStation answers a failed download with HTTP 200 and a JSON error envelope.
fn download_body(path: &str, content_type: Option<&str>, bytes: Vec<u8>) -> IndexResult<Vec<u8>> {
    let is_json = content_type.is_some_and(|ct| ct.starts_with("application/json"))
        || bytes.first() == Some(&b'{');
    if !is_json {
        return Ok(bytes);
    }
    let env: NasEnvelope<serde_json::Value> = serde_json::from_slice(&bytes)
        .map_err(|e| IndexError::download(path, format!("unexpected JSON body: {}", e)))?;
    match unwrap_envelope(env) {
        Err(e) => Err(IndexError::download(path, e)),
        Ok(_) => Err(IndexError::download(path, "NAS returned JSON instead of file contents")),
    }
}
