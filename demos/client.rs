use argh::FromArgs;
use labelscope::{
    AnalysisClient, AnalysisError, AnalysisOutcome, AnalysisView, Endpoints, HttpAnalysisSource,
    ImageLoad, ImageSize, OverlayElement,
};
use std::{io::Cursor, sync::Mutex};

#[derive(FromArgs)]
/// Fetches the latest image analysis and prints its labels and overlays
struct ClientArgs {
    /// endpoint returning the latest image key
    #[argh(option, default = "Endpoints::default().lookup_url")]
    lookup_url: String,

    /// prefix of the analysis endpoint
    #[argh(option, default = "Endpoints::default().analysis_url")]
    analysis_url: String,

    /// prefix of the image host
    #[argh(option, default = "Endpoints::default().asset_base_url")]
    asset_url: String,

    /// width the image is displayed at; defaults to its natural width
    #[argh(option, short = 'w')]
    display_width: Option<f64>,
}

// prints to stdout instead of touching a page
struct TerminalView {
    client: reqwest::Client,
    display_width: Option<f64>,
    image: Mutex<(String, ImageLoad)>,
}

impl TerminalView {
    fn new(display_width: Option<f64>) -> Self {
        Self {
            client: reqwest::Client::new(),
            display_width,
            image: Mutex::new((String::new(), ImageLoad::new())),
        }
    }

    async fn load(&self, url: &str) -> Result<ImageSize, String> {
        let response = self.client.get(url).send().await.map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("{} returned {}", url, response.status()));
        }
        let bytes = response.bytes().await.map_err(|e| e.to_string())?;

        let (width, height) = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| e.to_string())?
            .into_dimensions()
            .map_err(|e| e.to_string())?;

        // scale like a browser keeping the aspect ratio
        let (width, height) = (width as f64, height as f64);
        Ok(match self.display_width {
            Some(display_width) if width > 0.0 => {
                ImageSize::new(display_width, height * display_width / width)
            }
            _ => ImageSize::new(width, height),
        })
    }
}

impl AnalysisView for TerminalView {
    fn set_trigger(&self, enabled: bool, caption: &str) {
        log::debug!("[trigger {}] {caption}", if enabled { "on" } else { "off" });
    }

    fn set_loading_indicator(&self, visible: bool) {
        log::debug!("[loading indicator {}]", if visible { "shown" } else { "hidden" });
    }

    fn set_status_text(&self, text: &str) {
        println!("{text}");
    }

    fn set_image_key_text(&self, text: &str) {
        println!("{text}");
    }

    fn clear_labels(&self) {}

    fn append_label(&self, text: &str) {
        println!("  {text}");
    }

    fn set_image_source(&self, url: &str) {
        let mut image = self.image.lock().unwrap_or_else(|e| e.into_inner());
        *image = (url.to_string(), ImageLoad::new());
    }

    async fn wait_for_image(&self) -> Result<ImageSize, AnalysisError> {
        let (url, load) = self.image.lock().unwrap_or_else(|e| e.into_inner()).clone();
        if !load.is_settled() {
            match self.load(&url).await {
                Ok(size) => load.resolve(size),
                Err(reason) => load.fail(reason),
            };
        }
        load.wait().await
    }

    fn remove_overlays(&self) {}

    fn append_overlay(&self, element: &OverlayElement) {
        match element {
            OverlayElement::Box(rect) => println!(
                "  box     x={:.1}px y={:.1}px w={:.1}px h={:.1}px",
                rect.x, rect.y, rect.width, rect.height
            ),
            OverlayElement::Caption { text, left, top } => {
                println!("  caption x={left:.1}px y={top:.1}px {text}")
            }
        }
    }

    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: ClientArgs = argh::from_env();

    let source = HttpAnalysisSource::new(Endpoints {
        lookup_url: args.lookup_url,
        analysis_url: args.analysis_url,
        asset_base_url: args.asset_url,
    });
    let client = AnalysisClient::new(source, TerminalView::new(args.display_width));

    match client.start_analysis().await {
        AnalysisOutcome::Completed(report) => {
            println!(
                "Analysed {} ({:.0}x{:.0}px) in {:?}",
                report.key, report.image_size.width, report.image_size.height, report.duration
            );
            Ok(())
        }
        AnalysisOutcome::NoImage | AnalysisOutcome::Busy => Ok(()),
        AnalysisOutcome::Failed(e) => Err(e.into()),
    }
}
