// tests/live_smoke.rs
// Smoke test against the real Gemini API.
//
// Needs GEMINI_API_KEY (in .env or the environment) and LOOKRATE_SMOKE_IMAGE
// pointing at a real photo. Run with: cargo test -- --ignored

use std::path::Path;

use lookrate::analysis::{AnalysisMode, GeminiAnalyzer, ImageAnalyzer};
use lookrate::format::AnalysisReport;

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_gemini_rating() {
    dotenvy::dotenv().ok();

    if std::env::var("GEMINI_API_KEY").is_err() {
        eprintln!("Skipping live smoke test - no GEMINI_API_KEY in .env");
        return;
    }
    let image_path = match std::env::var("LOOKRATE_SMOKE_IMAGE") {
        Ok(path) => path,
        Err(_) => {
            eprintln!("Skipping live smoke test - set LOOKRATE_SMOKE_IMAGE to a photo path");
            return;
        }
    };

    let image = lookrate::image::read_image(Path::new(&image_path))
        .await
        .expect("smoke image should be readable");
    let analyzer = GeminiAnalyzer::from_env().expect("analyzer from environment");

    let text = analyzer
        .analyze(&image, AnalysisMode::Face)
        .await
        .expect("live analysis should succeed");

    println!(
        "✅ Gemini replied: {}",
        text.chars().take(200).collect::<String>()
    );

    let report = AnalysisReport::from_text(text);
    assert!(!report.text.is_empty());
    assert!(report.stars.contains('⭐') || report.stars.contains('☆'));
}
