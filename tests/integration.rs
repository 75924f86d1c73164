//! Integration tests using real HTTP requests.
//!
//! These tests are marked with `#[ignore]` by default because they require
//! network access and may be slow or flaky.
//!
//! Run with: `cargo test --test integration -- --ignored`

use futures::StreamExt;

use ddgimage::{Client, ImageQuery, SafeSearch};

#[tokio::test]
#[ignore]
async fn test_live_search() {
    let client = Client::new();
    let query = ImageQuery::new("red panda").with_max_results(5);

    let results = client.search_collect(query).await.unwrap();
    println!("Live search returned {} results", results.len());
    for (i, result) in results.iter().enumerate() {
        println!("  {}. {} - {}", i + 1, result.title, result.image_url);
    }

    assert!(!results.is_empty(), "Live search should return results");
    assert!(results.len() <= 5);
    assert!(results.iter().all(|r| !r.image_url.is_empty()));
}

#[tokio::test]
#[ignore]
async fn test_live_search_with_filters() {
    use ddgimage::{ImageSize, ImageType};

    let client = Client::new();
    let query = ImageQuery::new("ferris crab")
        .with_max_results(3)
        .with_safesearch(SafeSearch::Off)
        .with_size(ImageSize::Large)
        .with_image_type(ImageType::Photo);

    let results = client.search_collect(query).await.unwrap();
    println!("Filtered search returned {} results", results.len());
}

#[tokio::test]
#[ignore]
async fn test_live_search_streaming() {
    let client = Client::new();
    let mut stream = client.search(ImageQuery::new("rust programming"));

    let first = stream.next().await;
    assert!(first.is_some(), "Stream should yield at least one result");
    if let Some(Ok(result)) = first {
        println!("First streamed result: {}", result.title);
        assert!(!result.image_url.is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_live_page_images() {
    let client = Client::new();
    let urls = client.page_images("https://www.rust-lang.org/").await.unwrap();

    println!("Found {} images on rust-lang.org", urls.len());
    for url in urls.iter().take(5) {
        println!("  {}", url);
    }
    assert!(urls.iter().all(|u| u.starts_with("http")));
}

#[tokio::test]
#[ignore]
async fn test_live_download() {
    let temp_dir = tempfile::tempdir().unwrap();
    let client = Client::new();

    let path = client
        .download("https://httpbin.org/image/png", temp_dir.path(), Some("test.png"))
        .await
        .unwrap();

    let metadata = std::fs::metadata(&path).unwrap();
    assert!(metadata.len() > 0, "Downloaded file should not be empty");

    temp_dir.close().unwrap();
}

#[tokio::test]
#[ignore]
async fn test_live_download_inferred_filename() {
    let temp_dir = tempfile::tempdir().unwrap();
    let client = Client::new();

    let path = client
        .download("https://httpbin.org/image/jpeg", temp_dir.path(), None)
        .await
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "jpeg");
    temp_dir.close().unwrap();
}
