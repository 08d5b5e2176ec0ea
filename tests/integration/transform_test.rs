//! Integration tests for delivery URL construction

use mediacli::cloud::{
    transform, CloudClient, CropMode, Quality, ResourceType, Transformation,
};

#[test]
fn test_client_delivery_url_matches_free_function() {
    let client = CloudClient::new("demo-cloud", "ml_default");
    let t = Transformation {
        width: Some(300),
        height: Some(200),
        crop: Some(CropMode::Fill),
        ..Transformation::default()
    };

    let via_client = client
        .delivery_url("sample", ResourceType::Image, &t)
        .unwrap();
    let via_function =
        transform::delivery_url("demo-cloud", ResourceType::Image, &t, "sample").unwrap();

    assert_eq!(via_client, via_function);
    assert_eq!(
        via_client,
        "https://res.cloudinary.com/demo-cloud/image/upload/w_300,h_200,c_fill/sample"
    );
}

#[test]
fn test_video_thumbnail_url() {
    // Thumbnail of a stored video: frame as jpg, smart-cropped
    let t = Transformation {
        width: Some(640),
        height: Some(360),
        crop: Some(CropMode::Fill),
        gravity: Some("auto".to_string()),
        format: Some("jpg".to_string()),
        quality: Some(Quality::Auto),
        ..Transformation::default()
    };
    let url = transform::delivery_url("demo-cloud", ResourceType::Video, &t, "clips/intro").unwrap();
    assert_eq!(
        url,
        "https://res.cloudinary.com/demo-cloud/video/upload/w_640,h_360,c_fill,q_auto,f_jpg,g_auto/clips%2Fintro"
    );
}

#[test]
fn test_gif_conversion_url_uses_fps_code() {
    let t = Transformation {
        width: Some(480),
        format: Some("gif".to_string()),
        fps: Some(12),
        ..Transformation::default()
    };
    let url = transform::delivery_url("demo-cloud", ResourceType::Video, &t, "clip").unwrap();
    assert_eq!(
        url,
        "https://res.cloudinary.com/demo-cloud/video/upload/w_480,f_gif,fps_12/clip"
    );
}

#[test]
fn test_crop_and_quality_parse_from_cli_strings() {
    assert_eq!("thumb".parse::<CropMode>().unwrap(), CropMode::Thumb);
    assert!("zoom".parse::<CropMode>().is_err());

    assert_eq!("auto".parse::<Quality>().unwrap(), Quality::Auto);
    assert_eq!("80".parse::<Quality>().unwrap(), Quality::Fixed(80));
    assert!("best".parse::<Quality>().is_err());
}
