//! Page data loading for the printer status page
//!
//! In live mode the status JSON and the webcam snapshot are requested
//! together, both are awaited, and the results are merged into a single
//! [`PageData`]. Either all of it comes back or an error does. In development
//! mode fixed readings are returned without touching the network.

pub mod data_url;
pub mod http_client;
pub mod mock;
pub mod models;

pub use data_url::{decode_data_url, encode_data_url, image_bytes_to_data_url, sniff_image_mime};
pub use http_client::{Fetch, FetchResponse, HttpFetcher, create_http_client_with_timeout};
pub use mock::mock_page_data;
pub use models::{Fan, ImageData, PageData, StatusPayload, Temperature};

use tracing::{error, info, instrument};

use crate::constants::endpoints;
use crate::error::{AppError, FetchFailure};

/// Which data source the loader uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Query the printer.
    #[default]
    Live,
    /// Serve the fixed mock readings; no I/O.
    Development,
}

/// Parses and validates a status body.
///
/// Syntax errors are reported as malformed JSON; well-formed JSON with the
/// wrong shape or out-of-range readings as an unexpected structure.
pub fn parse_status(body: &[u8]) -> Result<StatusPayload, FetchFailure> {
    match serde_json::from_slice::<StatusPayload>(body) {
        Ok(status) => {
            status
                .validate()
                .map_err(FetchFailure::UnexpectedStructure)?;
            Ok(status)
        }
        Err(e) if e.is_syntax() || e.is_eof() => Err(FetchFailure::MalformedJson(e.to_string())),
        Err(e) => Err(FetchFailure::UnexpectedStructure(e.to_string())),
    }
}

#[instrument(skip(fetcher))]
async fn fetch_status<F: Fetch>(fetcher: &F) -> Result<StatusPayload, AppError> {
    let path = endpoints::PRINTER_STATUS;
    let response = fetcher
        .get(path)
        .await
        .map_err(|reason| AppError::status_fetch(fetcher.url_for(path), reason))?;

    if !response.is_success() {
        error!("HTTP {} from status endpoint (URL: {})", response.status, response.url);
        return Err(AppError::status_fetch(
            response.url,
            FetchFailure::http_status(response.status),
        ));
    }

    parse_status(&response.body).map_err(|reason| {
        error!("Rejected status payload: {} (URL: {})", reason, response.url);
        AppError::status_fetch(response.url.clone(), reason)
    })
}

#[instrument(skip(fetcher))]
async fn fetch_image<F: Fetch>(fetcher: &F) -> Result<FetchResponse, AppError> {
    let path = endpoints::WEBCAM_SNAPSHOT;
    let response = fetcher
        .get(path)
        .await
        .map_err(|reason| AppError::image_fetch(fetcher.url_for(path), reason))?;

    if !response.is_success() {
        error!("HTTP {} from webcam endpoint (URL: {})", response.status, response.url);
        return Err(AppError::image_fetch(
            response.url,
            FetchFailure::http_status(response.status),
        ));
    }

    Ok(response)
}

/// Produces the data for one render of the printer page.
///
/// Both requests are in flight at the same time and both are awaited before
/// either result is looked at. The status result is checked first, so a
/// failing status endpoint is reported as `StatusFetch` whatever happened to
/// the image.
///
/// # Errors
/// * `AppError::StatusFetch` - status endpoint unreachable, non-2xx, or bad JSON
/// * `AppError::ImageFetch` - webcam endpoint unreachable or non-2xx
/// * `AppError::ImageDecode` - snapshot bytes could not be turned into a data URL
#[instrument(skip(fetcher))]
pub async fn load_page_data<F: Fetch>(fetcher: &F, mode: LoadMode) -> Result<PageData, AppError> {
    if mode == LoadMode::Development {
        info!("Development mode, serving mock printer data");
        return Ok(mock_page_data());
    }

    let (status, image) = futures::future::join(fetch_status(fetcher), fetch_image(fetcher)).await;
    let status = status?;
    let image = image?;

    let data_url = image_bytes_to_data_url(image.content_type, image.body).await?;
    info!(
        "Loaded printer page data: print {}%, nozzle {}°C",
        status.print_percent, status.temperature.nozzle
    );

    Ok(PageData::new(status, ImageData::from_data_url(data_url)))
}

/// Owns a fetch capability and a mode; each [`load`](Self::load) is independent.
#[derive(Debug, Clone)]
pub struct PageDataLoader<F> {
    fetcher: F,
    mode: LoadMode,
}

impl<F: Fetch> PageDataLoader<F> {
    pub fn new(fetcher: F, mode: LoadMode) -> Self {
        Self { fetcher, mode }
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn load(&self) -> Result<PageData, AppError> {
        load_page_data(&self.fetcher, self.mode).await
    }
}
