use std::path::{Path, PathBuf};

use crate::{
    cli::stats::{collect_snapshot, load_client},
    error,
    render::{Profile, RenderRequest, Renderer},
    success,
};

/// Collects the stats and renders a single infographic.
///
/// The document goes to `output` when given, otherwise to stdout. An unknown
/// section, time range or profile terminates before anything is fetched.
///
/// # Example Usage
///
/// ```bash
/// spotstats render --section artists --time-range short_term > artists.svg
/// spotstats render --section albums --profile compact --output albums.svg
/// ```
pub async fn render(
    section: String,
    time_range: Option<String>,
    profile: String,
    output: Option<PathBuf>,
    verbose: bool,
) {
    let request = match RenderRequest::new(&section, time_range.as_deref()) {
        Ok(r) => r,
        Err(e) => error!("{}", e),
    };
    let renderer = build_renderer(&profile);

    let client = load_client().await;
    let snapshot = collect_snapshot(&client, verbose).await;
    let svg = renderer.render(&snapshot, &request).await;

    match output {
        Some(path) => {
            write_document(&path, &svg).await;
            success!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
}

/// Collects the stats once and renders every section/time range combination
/// into `out_dir` (`artists_short_term.svg`, ..., `albums.svg`).
pub async fn render_all(profile: String, out_dir: PathBuf, verbose: bool) {
    let renderer = build_renderer(&profile);

    if let Err(e) = async_fs::create_dir_all(&out_dir).await {
        error!("Cannot create {}. Err: {}", out_dir.display(), e);
    }

    let client = load_client().await;
    let snapshot = collect_snapshot(&client, verbose).await;

    let documents = renderer.render_all(&snapshot).await;
    for (request, svg) in &documents {
        let path = out_dir.join(format!("{}.svg", request.file_stem()));
        write_document(&path, svg).await;
    }

    success!(
        "Rendered {} infographics into {}",
        documents.len(),
        out_dir.display()
    );
}

fn build_renderer(profile: &str) -> Renderer {
    let profile = match profile.parse::<Profile>() {
        Ok(p) => p,
        Err(e) => error!("{}", e),
    };

    match Renderer::with_http(profile) {
        Ok(r) => r,
        Err(e) => error!("Cannot create image client. Err: {}", e),
    }
}

async fn write_document(path: &Path, svg: &str) {
    if let Err(e) = async_fs::write(path, svg).await {
        error!("Failed to write {}. Err: {}", path.display(), e);
    }
}
