//! One search run: query the API, sort, render both documents and write the
//! pair.
//!
//! Everything is rendered in memory before any file is touched, so a failure
//! at any step leaves the output directory unchanged.

use std::env::VarError;

use chrono::{DateTime, Utc};
use foodwaste_api::{ApiError, FoodWasteClient};
use foodwaste_core::{
    build_app_config, sort_stores, AppConfig, ConfigError, SearchRequest, ValidationError,
};
use foodwaste_report::fonts::{load_font_family, resolve_font_files};
use foodwaste_report::{
    file_token, render_html, render_pdf, render_summary, write_report_pair, ImageFetcher,
    ProductImages, RenderError, ReportMeta, ReportPaths,
};
use thiserror::Error;

/// Any failure that ends a run.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl RunError {
    /// A short, plain-language suggestion for the user.
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            Self::Config(_) => {
                "Tjek at SALLING_API_TOKEN er sat i miljøet eller i .env-filen."
            }
            Self::Validation(_) => {
                "Tjek inputformatet: postnummer som 8000, koordinater som 55.676 og 12.568, radius i km."
            }
            Self::Api(ApiError::Http(_)) => "Tjek din netværksforbindelse og prøv igen.",
            Self::Api(ApiError::RateLimited { .. }) => {
                "API'et afviser for mange kald lige nu. Vent lidt før du prøver igen."
            }
            Self::Api(ApiError::Status { status: 401 | 403, .. } | ApiError::EmptyToken) => {
                "Tjek at SALLING_API_TOKEN er gyldig."
            }
            Self::Api(ApiError::InvalidBaseUrl { .. }) => "Tjek FOODWASTE_API_BASE_URL.",
            Self::Api(_) => "API'et svarede uventet. Prøv igen senere.",
            Self::Render(RenderError::Fonts { .. }) => {
                "Installer Liberation Sans eller peg FOODWASTE_FONT_DIR på en mappe med TTF-filer."
            }
            Self::Render(RenderError::Io { .. }) => {
                "Tjek at FOODWASTE_OUTPUT_DIR findes og er skrivbar."
            }
            Self::Render(_) => "Rapporten kunne ikke genereres. Ingen filer er skrevet.",
        }
    }
}

/// Builds the configuration from `lookup` and checks the PDF fonts.
///
/// Nothing is requested and no output directory is created here, so a
/// misconfigured environment fails before any side effect.
///
/// # Errors
///
/// Returns [`RunError::Config`] for a missing token or malformed variable and
/// [`RunError::Render`] when the font family cannot be found.
pub(crate) fn startup<F>(lookup: F) -> Result<AppConfig, RunError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let config = build_app_config(lookup)?;
    resolve_font_files(&config.font_dir, &config.font_family)?;
    Ok(config)
}

/// Result of a successful run.
#[derive(Debug)]
pub(crate) struct RunOutcome {
    pub(crate) paths: ReportPaths,
    pub(crate) summary: String,
}

/// Executes one search and writes the HTML/PDF pair.
///
/// Fonts are resolved before the API call so a run that cannot produce a PDF
/// does not spend request quota.
///
/// # Errors
///
/// Returns [`RunError`] for font, API, rendering or file-writing failures.
/// No report files exist after an error.
pub(crate) async fn run_search(
    config: &AppConfig,
    request: &SearchRequest,
    started_at: DateTime<Utc>,
) -> Result<RunOutcome, RunError> {
    let fonts = load_font_family(&config.font_dir, &config.font_family)?;
    let client = FoodWasteClient::from_config(config)?;

    tracing::info!(search = %request, "starting run");
    let stores = sort_stores(client.search(request).await?);
    let product_count: usize = stores.iter().map(|s| s.products.len()).sum();
    tracing::info!(stores = stores.len(), products = product_count, "search complete");

    let meta = ReportMeta::new(started_at, request.to_string());
    let html = render_html(&stores, &meta);

    let images = if config.pdf_images {
        ImageFetcher::new(config.request_timeout_secs, &config.user_agent)?
            .fetch_all(&stores)
            .await
    } else {
        ProductImages::default()
    };
    let pdf = render_pdf(&stores, &meta, fonts, &images)?;

    let paths = write_report_pair(&config.output_dir, &file_token(started_at), &html, &pdf)?;
    Ok(RunOutcome {
        paths,
        summary: render_summary(&stores, started_at),
    })
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
