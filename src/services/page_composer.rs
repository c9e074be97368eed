use std::time::Instant;

use image::GenericImageView;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{OutputDocument, PageGeometry, PageSize, PlacementTransform, UploadedImage};

/// Renders a validated upload onto a single PDF page.
///
/// Decode, transform, page assembly, and serialization run sequentially with
/// no I/O; the whole conversion operates on in-memory buffers owned by the
/// call.
pub struct PageComposer {
    page: PageGeometry,
}

impl PageComposer {
    pub fn new(config: &Config) -> Self {
        Self {
            page: config.page_size.geometry(),
        }
    }

    /// Composer targeting an explicit page geometry.
    pub fn with_page(page: PageGeometry) -> Self {
        Self { page }
    }

    /// Convert an uploaded image into a single-page PDF.
    pub fn compose(&self, upload: &UploadedImage) -> AppResult<OutputDocument> {
        let start = Instant::now();

        info!(
            file_name = %upload.name,
            file_size = upload.size,
            "Starting image to PDF conversion"
        );

        // Decode by sniffing the byte content. The extension is metadata
        // only: a mislabeled-but-valid file still decodes.
        let detected_format = image::guess_format(&upload.content).ok();
        let decoded = image::load_from_memory(&upload.content)
            .map_err(|e| AppError::decode(e.to_string()))?;

        let (img_width, img_height) = decoded.dimensions();
        debug!(
            format = ?detected_format,
            width = img_width,
            height = img_height,
            "Image decoded"
        );

        let transform = PlacementTransform::fit(img_width, img_height, &self.page)?;
        debug!(
            scale = transform.scale,
            x = transform.x,
            y = transform.y,
            "Computed placement transform"
        );

        // The PDF encoder takes a fixed RGB8 pixel layout; dimensions are
        // unchanged by the conversion.
        let rgb = decoded.to_rgb8();
        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: img_width as usize,
            height: img_height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        let filename = upload.output_filename();

        let mut doc = PdfDocument::new(&filename);
        let image_id = doc.add_image(&raw);

        // With dpi = 72 the image's native size is one point per pixel, so
        // the transform scale applies directly in page units.
        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(transform.x as f32)),
                translate_y: Some(Pt(transform.y as f32)),
                scale_x: Some(transform.scale as f32),
                scale_y: Some(transform.scale as f32),
                dpi: Some(72.0),
                rotate: None,
            },
        }];

        let page = PdfPage::new(
            Mm(self.page.width_mm() as f32),
            Mm(self.page.height_mm() as f32),
            ops,
        );
        doc.with_pages(vec![page]);

        let bytes = serialize(doc)?;

        info!(
            file_name = %upload.name,
            output = %filename,
            output_size = bytes.len(),
            processing_time_ms = start.elapsed().as_millis() as u64,
            "Conversion completed"
        );

        Ok(OutputDocument::new(filename, bytes))
    }

    /// Check if the composer is available
    pub fn is_available(&self) -> bool {
        // Composition uses pure in-process libraries
        true
    }
}

impl Default for PageComposer {
    fn default() -> Self {
        Self {
            page: PageSize::A4.geometry(),
        }
    }
}

fn serialize(doc: PdfDocument) -> AppResult<Vec<u8>> {
    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    if !warnings.is_empty() {
        debug!(warnings = warnings.len(), "PDF serializer reported warnings");
    }
    if bytes.is_empty() {
        return Err(AppError::encode("serializer produced no output"));
    }

    Ok(bytes)
}
