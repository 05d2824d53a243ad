use serde_json::Value;

pub fn assert_story_summary(story: &Value, expected_title: &str) {
    assert!(story.get("id").and_then(|v| v.as_str()).is_some());
    assert_eq!(
        story.get("title").and_then(|v| v.as_str()),
        Some(expected_title)
    );
}

/// Pages carry the deterministic asset locations of their story
pub fn assert_page_assets(page: &Value, story_id: &str) {
    let n = page
        .get("page_number")
        .and_then(|v| v.as_i64())
        .expect("Missing page_number");

    assert_eq!(
        page.get("image_url").and_then(|v| v.as_str()),
        Some(format!("https://storage.test/story_images/{}/{}.png", story_id, n).as_str())
    );
    assert_eq!(
        page.get("audio_url").and_then(|v| v.as_str()),
        Some(format!("https://storage.test/story_audio/{}/{}.wav", story_id, n).as_str())
    );
}

pub fn assert_snapshot_page(snapshot: &Value, expected_index: u64) {
    assert_eq!(
        snapshot.get("current_page_index").and_then(|v| v.as_u64()),
        Some(expected_index)
    );
    assert_eq!(
        snapshot
            .get("page")
            .and_then(|p| p.get("page_number"))
            .and_then(|v| v.as_u64()),
        Some(expected_index + 1)
    );
}
