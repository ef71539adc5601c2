use std::time::Duration;

use clap::{Parser, ValueEnum};
use eframe::egui::Color32;
use treemap_data::{BackendConfig, RequestMethod, DEFAULT_BASE_URL, DEFAULT_ENDPOINT_PATH};

use crate::widgets::TreemapStyle;

/// Treemap of accounts grouped by country or currency.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Base url of the tree data backend.
    #[arg(long, env = "TREEMAP_BACKEND_URL", default_value = DEFAULT_BASE_URL)]
    pub backend_url: String,
    #[arg(long, env = "TREEMAP_ENDPOINT_PATH", default_value = DEFAULT_ENDPOINT_PATH)]
    pub endpoint_path: String,
    /// How the grouping key is sent: as a JSON body or as a query parameter.
    #[arg(long, env = "TREEMAP_METHOD", value_enum, default_value_t = Method::Post)]
    pub method: Method,
    /// Gives up on a request after this many seconds. Waits forever when unset.
    #[arg(long, env = "TREEMAP_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
    /// Comma separated `#rrggbb` colors the cells cycle through.
    #[arg(long, env = "TREEMAP_PALETTE", value_delimiter = ',', value_parser = parse_color)]
    pub palette: Vec<Color32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Method {
    Post,
    Get,
}

impl From<Method> for RequestMethod {
    fn from(value: Method) -> Self {
        match value {
            Method::Post => RequestMethod::Post,
            Method::Get => RequestMethod::Get,
        }
    }
}

impl Args {
    #[allow(clippy::missing_errors_doc)]
    pub fn backend_config(&self) -> Result<BackendConfig, treemap_data::Error> {
        Ok(BackendConfig::new(&self.backend_url)?
            .with_path(self.endpoint_path.clone())
            .with_method(self.method.into())
            .with_timeout(self.timeout_secs.map(Duration::from_secs)))
    }

    /// Built-in colors unless a palette was given.
    #[must_use]
    pub fn treemap_style(&self) -> TreemapStyle {
        TreemapStyle::default()
            .with_palette(self.palette.clone())
            .unwrap_or_default()
    }
}

fn parse_color(value: &str) -> Result<Color32, String> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return Err(format!("expected #rrggbb, got {value:?}"));
    }
    let rgb = u32::from_str_radix(hex, 16).map_err(|error| format!("{value:?}: {error}"))?;
    let [_, r, g, b] = rgb.to_be_bytes();
    Ok(Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_post() {
        let config = Args::try_parse_from(["treemap-desktop"])
            .unwrap()
            .backend_config()
            .unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "http://localhost:8080/api/treedata"
        );
        assert_eq!(config.method, RequestMethod::Post);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = Args::try_parse_from([
            "treemap-desktop",
            "--backend-url",
            "https://reports.internal:9443",
            "--endpoint-path",
            "/v2/tree",
            "--method",
            "get",
            "--timeout-secs",
            "5",
        ])
        .unwrap()
        .backend_config()
        .unwrap();
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://reports.internal:9443/v2/tree"
        );
        assert_eq!(config.method, RequestMethod::Get);
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn palette_replaces_builtin_colors() {
        let args = Args::try_parse_from(["treemap-desktop"]).unwrap();
        assert_eq!(args.treemap_style(), TreemapStyle::default());

        let args =
            Args::try_parse_from(["treemap-desktop", "--palette", "#991f29,42bd7f"]).unwrap();
        assert_eq!(
            args.palette,
            vec![
                Color32::from_rgb(0x99, 0x1f, 0x29),
                Color32::from_rgb(0x42, 0xbd, 0x7f)
            ]
        );
        let style = args.treemap_style();
        assert_eq!(style.color(2), Color32::from_rgb(0x99, 0x1f, 0x29));
        assert_eq!(style.color(3), Color32::from_rgb(0x42, 0xbd, 0x7f));
    }

    #[test]
    fn malformed_palette_is_rejected() {
        for palette in ["#991f2", "red", "#99gf29", "+99f29"] {
            assert!(
                Args::try_parse_from(["treemap-desktop", "--palette", palette]).is_err(),
                "accepted {palette}"
            );
        }
    }

    #[test]
    fn invalid_url_is_an_error() {
        let args = Args::try_parse_from(["treemap-desktop", "--backend-url", "localhost"]).unwrap();
        assert!(args.backend_config().is_err());
    }
}
