use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub api_token: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub output_dir: PathBuf,
    pub font_dir: PathBuf,
    pub font_family: String,
    pub pdf_images: bool,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_token", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("output_dir", &self.output_dir)
            .field("font_dir", &self.font_dir)
            .field("font_family", &self.font_family)
            .field("pdf_images", &self.pdf_images)
            .field("log_level", &self.log_level)
            .finish()
    }
}
