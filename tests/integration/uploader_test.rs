//! Integration tests for the upload lifecycle

use crate::test_utils::{video_file, ScriptedTransport};
use mediacli::cloud::{ResourceType, UploadParams};
use mediacli::uploader::{
    SubmitRejection, UploadErrorKind, UploadSnapshot, UploadStateUpdate, UploadStatus, UploadLimits,
    Uploader,
};
use std::time::Duration;

fn limits(max_bytes: u64) -> UploadLimits {
    UploadLimits {
        max_bytes,
        accepted_types: Some(vec!["video/mp4".to_string(), "video/webm".to_string()]),
    }
}

async fn wait_for_terminal(uploader: &Uploader) -> UploadSnapshot {
    for _ in 0..200 {
        let snapshot = uploader.snapshot().await;
        match snapshot.status {
            UploadStatus::Succeeded | UploadStatus::Failed => return snapshot,
            _ => tokio::time::sleep(Duration::from_millis(5)).await,
        }
    }
    panic!("upload never reached a terminal state");
}

#[tokio::test]
async fn test_full_upload_lifecycle() {
    let transport = ScriptedTransport::new(vec![25, 50, 75, 100]);
    let mut uploader = Uploader::new(transport.clone(), limits(100 * 1024 * 1024));
    let mut updates = uploader.subscribe_updates();

    uploader
        .submit(video_file(2 * 1024 * 1024), UploadParams::new(ResourceType::Video))
        .await
        .unwrap();

    let snapshot = wait_for_terminal(&uploader).await;
    assert_eq!(snapshot.status, UploadStatus::Succeeded);
    assert_eq!(snapshot.progress, 100);
    assert_eq!(
        snapshot.result_locator().unwrap(),
        "https://res.cloudinary.com/demo-cloud/video/upload/v1/clip.mp4"
    );
    assert_eq!(transport.call_count(), 1);

    // First update announces the transfer, last one carries the result
    let mut seen = Vec::new();
    while let Ok(update) = updates.try_recv() {
        seen.push(update);
    }
    assert!(matches!(
        seen.first(),
        Some(UploadStateUpdate::Started { file_name, size })
            if file_name == "clip.mp4" && *size == 2 * 1024 * 1024
    ));
    assert!(matches!(
        seen.last(),
        Some(UploadStateUpdate::Succeeded { response }) if response.public_id == "clip"
    ));
}

#[tokio::test]
async fn test_preflight_rejections_never_reach_transport() {
    let transport = ScriptedTransport::new(vec![100]);
    let mut uploader = Uploader::new(transport.clone(), limits(1024 * 1024));

    let rejection = uploader
        .submit(video_file(2 * 1024 * 1024), UploadParams::new(ResourceType::Video))
        .await
        .unwrap_err();
    match rejection {
        SubmitRejection::Rejected(error) => {
            assert_eq!(error.kind, UploadErrorKind::SizeExceeded)
        }
        other => panic!("unexpected rejection: {other:?}"),
    }

    // Failed is not Busy, so a second attempt is allowed through validation
    let rejection = uploader
        .submit(
            mediacli::cloud::FileSource::new(vec![0u8; 64], "notes.txt", "text/plain"),
            UploadParams::new(ResourceType::Video),
        )
        .await
        .unwrap_err();
    match rejection {
        SubmitRejection::Rejected(error) => {
            assert_eq!(error.kind, UploadErrorKind::TypeRejected)
        }
        other => panic!("unexpected rejection: {other:?}"),
    }

    assert_eq!(transport.call_count(), 0);
    assert_eq!(uploader.snapshot().await.status, UploadStatus::Failed);
}

#[tokio::test]
async fn test_reset_returns_to_idle_and_allows_resubmit() {
    let transport = ScriptedTransport::new(vec![50, 100]);
    let mut uploader = Uploader::new(transport.clone(), limits(100 * 1024 * 1024));

    uploader
        .submit(video_file(1024), UploadParams::new(ResourceType::Video))
        .await
        .unwrap();
    wait_for_terminal(&uploader).await;

    uploader.reset().await;
    let snapshot = uploader.snapshot().await;
    assert_eq!(snapshot.status, UploadStatus::Idle);
    assert_eq!(snapshot.progress, 0);
    assert!(snapshot.error.is_none());
    assert!(snapshot.result.is_none());

    uploader
        .submit(video_file(1024), UploadParams::new(ResourceType::Video))
        .await
        .unwrap();
    let snapshot = wait_for_terminal(&uploader).await;
    assert_eq!(snapshot.status, UploadStatus::Succeeded);
    assert_eq!(transport.call_count(), 2);
}
