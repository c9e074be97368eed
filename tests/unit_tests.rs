//! Unit tests for individual components

use std::io::Cursor;

use pic2pdf::{
    config::default_allowed_extensions,
    error::AppError,
    models::{PageGeometry, PageSize, PlacementTransform, UploadedImage},
    services::{PageComposer, Validator},
};

const EPSILON: f64 = 1e-6;

fn encode_image(width: u32, height: u32, format: image::ImageOutputFormat) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        width,
        height,
        image::Rgb([180, 60, 40]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, image::ImageOutputFormat::Png)
}

fn square_page(side: f64) -> PageGeometry {
    PageGeometry {
        width: side,
        height: side,
    }
}

fn default_validator() -> Validator {
    Validator::with_limits(10, default_allowed_extensions())
}

#[test]
fn test_fit_tall_image_fills_height() {
    let transform = PlacementTransform::fit(100, 200, &square_page(200.0)).unwrap();

    assert!((transform.scale - 1.0).abs() < EPSILON);
    assert!((transform.width - 100.0).abs() < EPSILON);
    assert!((transform.height - 200.0).abs() < EPSILON);
    assert!((transform.x - 50.0).abs() < EPSILON);
    assert!(transform.y.abs() < EPSILON);
}

#[test]
fn test_fit_wide_image_fills_width() {
    let transform = PlacementTransform::fit(300, 100, &square_page(200.0)).unwrap();

    assert!((transform.scale - 2.0 / 3.0).abs() < EPSILON);
    assert!((transform.width - 200.0).abs() < EPSILON);
    assert!((transform.height - 200.0 / 3.0).abs() < EPSILON);
    assert!(transform.x.abs() < EPSILON);
    assert!((transform.y - 66.6667).abs() < 1e-2);
}

#[test]
fn test_fit_matching_aspect_fills_page_exactly() {
    // Upscaling is allowed: a small square image grows to cover the square
    // page with zero margin on both axes.
    let transform = PlacementTransform::fit(100, 100, &square_page(200.0)).unwrap();

    assert!((transform.scale - 2.0).abs() < EPSILON);
    assert!((transform.width - 200.0).abs() < EPSILON);
    assert!((transform.height - 200.0).abs() < EPSILON);
    assert!(transform.x.abs() < EPSILON);
    assert!(transform.y.abs() < EPSILON);
}

#[test]
fn test_fit_never_overflows_and_always_centers() {
    let page = PageSize::A4.geometry();

    for (w, h) in [(640u32, 480u32), (123, 7), (1, 1000), (4096, 4096)] {
        let transform = PlacementTransform::fit(w, h, &page).unwrap();

        assert!(transform.width <= page.width + EPSILON);
        assert!(transform.height <= page.height + EPSILON);
        assert!(transform.x >= -EPSILON);
        assert!(transform.y >= -EPSILON);
        // Margin is split evenly on both axes
        assert!((2.0 * transform.x + transform.width - page.width).abs() < EPSILON);
        assert!((2.0 * transform.y + transform.height - page.height).abs() < EPSILON);
    }
}

#[test]
fn test_fit_rejects_zero_dimensions() {
    let page = square_page(200.0);

    assert!(matches!(
        PlacementTransform::fit(0, 100, &page),
        Err(AppError::InvalidDimensions)
    ));
    assert!(matches!(
        PlacementTransform::fit(100, 0, &page),
        Err(AppError::InvalidDimensions)
    ));
}

#[test]
fn test_fit_is_deterministic() {
    let page = PageSize::A4.geometry();
    let first = PlacementTransform::fit(640, 480, &page).unwrap();
    let second = PlacementTransform::fit(640, 480, &page).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_page_size_presets() {
    assert_eq!(PageSize::from_name("a4"), Some(PageSize::A4));
    assert_eq!(PageSize::from_name("Letter"), Some(PageSize::Letter));
    assert_eq!(PageSize::from_name("LEGAL"), Some(PageSize::Legal));
    assert_eq!(PageSize::from_name("tabloid"), None);

    let a4 = PageSize::A4.geometry();
    assert!((a4.width - 595.2756).abs() < 1e-3);
    assert!((a4.height - 841.8898).abs() < 1e-3);
}

#[test]
fn test_validator_rejects_empty_upload() {
    let validator = default_validator();
    let upload = UploadedImage::new("photo.png".to_string(), Vec::new());

    assert!(matches!(
        validator.validate(&upload),
        Err(AppError::EmptyUpload)
    ));

    // Emptiness is checked before the extension, so an empty file with a
    // disallowed name still reports the empty upload.
    let upload = UploadedImage::new("photo.bmp".to_string(), Vec::new());
    assert!(matches!(
        validator.validate(&upload),
        Err(AppError::EmptyUpload)
    ));
}

#[test]
fn test_validator_rejects_oversized_upload() {
    let validator = Validator::with_limits(1, default_allowed_extensions());
    let upload = UploadedImage::new("photo.png".to_string(), vec![0u8; 1024 * 1024 + 1]);

    match validator.validate(&upload) {
        Err(AppError::FileTooLarge { size, limit }) => {
            assert_eq!(size, 1);
            assert_eq!(limit, 1);
        }
        other => panic!("Expected FileTooLarge, got {:?}", other),
    }
}

#[test]
fn test_validator_accepts_upload_at_size_limit() {
    let validator = Validator::with_limits(1, default_allowed_extensions());
    let upload = UploadedImage::new("photo.png".to_string(), vec![0u8; 1024 * 1024]);

    assert!(validator.validate(&upload).is_ok());
}

#[test]
fn test_validator_rejects_unsupported_extension() {
    let validator = default_validator();
    // Content is a perfectly valid PNG; only the declared name matters here
    let upload = UploadedImage::new("photo.bmp".to_string(), png_bytes(4, 4));

    match validator.validate(&upload) {
        Err(AppError::UnsupportedType { extension, allowed }) => {
            assert_eq!(extension, "bmp");
            assert_eq!(allowed, "gif, jpeg, jpg, png");
        }
        other => panic!("Expected UnsupportedType, got {:?}", other),
    }

    // Missing extension is rejected the same way
    let upload = UploadedImage::new("photo".to_string(), vec![1, 2, 3]);
    assert!(matches!(
        validator.validate(&upload),
        Err(AppError::UnsupportedType { .. })
    ));
}

#[test]
fn test_validator_extension_is_case_insensitive() {
    let validator = default_validator();

    for name in ["photo.PNG", "photo.Jpg", "photo.JPEG", "photo.GIF"] {
        let upload = UploadedImage::new(name.to_string(), vec![1, 2, 3]);
        assert!(validator.validate(&upload).is_ok(), "rejected {}", name);
    }
}

#[test]
fn test_output_filename_strips_final_extension_only() {
    let upload = UploadedImage::new("photo.png".to_string(), vec![1]);
    assert_eq!(upload.output_filename(), "photo.pdf");

    let upload = UploadedImage::new("holiday.photo.jpeg".to_string(), vec![1]);
    assert_eq!(upload.output_filename(), "holiday.photo.pdf");
}

#[test]
fn test_compose_produces_single_page_pdf() {
    let upload = UploadedImage::new("photo.png".to_string(), png_bytes(40, 60));
    let document = PageComposer::default().compose(&upload).unwrap();

    assert_eq!(document.filename, "photo.pdf");
    assert!(document.bytes.starts_with(b"%PDF"));

    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 1);
}

#[test]
fn test_compose_decodes_by_content_not_extension() {
    // PNG bytes behind a .jpg name still decode: the format is sniffed from
    // the content, never dispatched on the extension.
    let upload = UploadedImage::new("photo.jpg".to_string(), png_bytes(16, 16));
    let document = PageComposer::default().compose(&upload).unwrap();

    assert!(document.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_compose_rejects_corrupt_bytes_as_decode_error() {
    let upload = UploadedImage::new(
        "a.png".to_string(),
        b"definitely not an image".to_vec(),
    );

    match PageComposer::default().compose(&upload) {
        Err(AppError::DecodeError { .. }) => {}
        other => panic!("Expected DecodeError, got {:?}", other),
    }
}

#[test]
fn test_compose_supports_jpeg_and_gif() {
    let jpeg = UploadedImage::new(
        "shot.jpeg".to_string(),
        encode_image(32, 24, image::ImageOutputFormat::Jpeg(80)),
    );
    let gif = UploadedImage::new(
        "anim.gif".to_string(),
        encode_image(24, 32, image::ImageOutputFormat::Gif),
    );

    for upload in [jpeg, gif] {
        let document = PageComposer::default().compose(&upload).unwrap();
        let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
        assert_eq!(parsed.get_pages().len(), 1, "for {}", upload.name);
    }
}

#[test]
fn test_compose_with_custom_page_geometry() {
    let composer = PageComposer::with_page(square_page(200.0));
    let upload = UploadedImage::new("tall.png".to_string(), png_bytes(100, 200));

    let document = composer.compose(&upload).unwrap();
    let parsed = lopdf::Document::load_mem(&document.bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 1);
}
