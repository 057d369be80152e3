//! End-to-end ingest → convert scenarios.

use framegrab_color::{sample_to_argb, ArgbImage, PixelConverter};
use framegrab_core::{
    ChromaSubsampling, FrameConfig, FrameStore, IngestOptions, ProcessingMode, Rotation,
    SourceFrame, StrideMode,
};

// ── Helpers ────────────────────────────────────────────────────

struct I420 {
    width: u32,
    height: u32,
    y: Vec<u8>,
    u: Vec<u8>,
    v: Vec<u8>,
}

impl I420 {
    fn uniform(width: u32, height: u32, y: u8, u: u8, v: u8) -> Self {
        let luma = (width * height) as usize;
        let chroma = ((width / 2) * (height / 2)) as usize;
        Self {
            width,
            height,
            y: vec![y; luma],
            u: vec![u; chroma],
            v: vec![v; chroma],
        }
    }

    fn gradient(width: u32, height: u32) -> Self {
        let cw = width / 2;
        let ch = height / 2;
        Self {
            width,
            height,
            y: (0..width * height).map(|i| (i * 7 % 256) as u8).collect(),
            u: (0..cw * ch).map(|i| (64 + i * 5 % 128) as u8).collect(),
            v: (0..cw * ch).map(|i| (192 - i * 3 % 128) as u8).collect(),
        }
    }

    fn source(&self) -> SourceFrame<'_> {
        SourceFrame::packed(self.width, self.height, &self.y, &self.u, &self.v)
    }
}

fn convert(store: &FrameStore) -> ArgbImage {
    PixelConverter::new()
        .convert_store(store)
        .expect("store should hold a frame")
}

// ── Scenarios ──────────────────────────────────────────────────

#[test]
fn neutral_gray_frame_converts_to_gray() {
    let frame = I420::uniform(6, 4, 100, 128, 128);
    let store = FrameStore::default();
    store
        .ingest(&frame.source(), IngestOptions::default())
        .unwrap();

    assert_eq!(store.dimensions(), (6, 4));
    let image = convert(&store);
    assert_eq!((image.width, image.height), (6, 4));
    assert_eq!(image.pixels.len(), 24);
    assert!(image.pixels.iter().all(|&p| p == 0xFF64_6464));
}

#[test]
fn copy_is_identity() {
    let frame = I420::gradient(10, 6);
    let store = FrameStore::default();
    store
        .ingest(&frame.source(), IngestOptions::default())
        .unwrap();

    let stored = store.snapshot();
    assert_eq!((stored.width, stored.height), (10, 6));
    assert_eq!(stored.y_plane().unwrap(), frame.y.as_slice());
    assert_eq!(stored.u_plane().unwrap(), frame.u.as_slice());
    assert_eq!(stored.v_plane().unwrap(), frame.v.as_slice());
}

#[test]
fn crop_then_rotate() {
    let frame = I420::gradient(12, 8);
    let store = FrameStore::default();
    let src = frame.source().with_rotation(Rotation::DEG_90);
    let report = store
        .ingest(&src, IngestOptions::new(ProcessingMode::CropToSquare))
        .unwrap();
    assert_eq!(report.applied, ProcessingMode::CropToSquare);

    store.with_frame(|f| {
        assert_eq!((f.width, f.height), (8, 8));
        assert_eq!(f.u_plane().unwrap().len(), 16);
        assert_eq!(f.v_plane().unwrap().len(), 16);
    });

    let image = convert(&store);
    assert_eq!((image.width, image.height), (8, 8));

    // Output (0, 0) of a 90° rotation is source bottom-left of the crop:
    // crop row 7, col 0 -> source row 7, col 2.
    let y = frame.y[7 * 12 + 2];
    let u = frame.u[3 * 6 + 1];
    let v = frame.v[3 * 6 + 1];
    assert_eq!(image.pixel(0, 0), Some(sample_to_argb(y, u, v)));
}

#[test]
fn misaligned_crop_matches_plain_copy() {
    let frame = I420::gradient(10, 8);

    let cropped = FrameStore::default();
    cropped
        .ingest(
            &frame.source(),
            IngestOptions::new(ProcessingMode::CropToSquare),
        )
        .unwrap();
    let copied = FrameStore::default();
    copied
        .ingest(&frame.source(), IngestOptions::default())
        .unwrap();

    assert_eq!(convert(&cropped), convert(&copied));
}

#[test]
fn converted_image_outlives_next_ingest() {
    let store = FrameStore::default();
    let first = I420::uniform(4, 4, 50, 128, 128);
    let second = I420::uniform(4, 4, 200, 128, 128);

    store
        .ingest(&first.source(), IngestOptions::default())
        .unwrap();
    let image = convert(&store);

    let report = store
        .ingest(&second.source(), IngestOptions::default())
        .unwrap();
    assert!(!report.reallocated);

    assert!(image.pixels.iter().all(|&p| p == sample_to_argb(50, 128, 128)));
    assert!(convert(&store)
        .pixels
        .iter()
        .all(|&p| p == sample_to_argb(200, 128, 128)));
}

#[test]
fn failed_ingest_yields_no_image() {
    let good = I420::gradient(8, 8);
    let store = FrameStore::default();
    store
        .ingest(&good.source(), IngestOptions::default())
        .unwrap();

    let truncated = SourceFrame::packed(8, 8, &good.y[..40], &good.u, &good.v);
    let wide = IngestOptions::new(ProcessingMode::CropToSquare);
    assert!(store.ingest(&truncated, wide).is_err());
    assert!(PixelConverter::new().convert_store(&store).is_none());

    // The store recovers on the next good frame
    store
        .ingest(&good.source(), IngestOptions::default())
        .unwrap();
    assert!(store.has_data());
}

#[test]
fn honored_strides_match_tight_frame() {
    let tight = I420::gradient(6, 4);

    let pad = |data: &[u8], row: usize, stride: usize| -> Vec<u8> {
        data.chunks(row)
            .flat_map(|r| {
                let mut padded = r.to_vec();
                padded.resize(stride, 0xEE);
                padded
            })
            .collect()
    };
    let y = pad(&tight.y, 6, 8);
    let u = pad(&tight.u, 3, 4);
    let v = pad(&tight.v, 3, 4);
    let padded = SourceFrame::packed(6, 4, &y, &u, &v)
        .with_strides(8, 4, 4)
        .with_subsampling(ChromaSubsampling::Yuv420);

    let honor = FrameStore::new(FrameConfig::default().with_stride_mode(StrideMode::Honor));
    honor.ingest(&padded, IngestOptions::default()).unwrap();

    let reference = FrameStore::default();
    reference
        .ingest(&tight.source(), IngestOptions::default())
        .unwrap();

    assert_eq!(convert(&honor), convert(&reference));

    // Packed mode ignores the padding and skews the picture
    let packed = FrameStore::default();
    packed.ingest(&padded, IngestOptions::default()).unwrap();
    assert_ne!(convert(&packed), convert(&reference));
}

#[test]
fn legacy_flags_drive_processing() {
    let frame = I420::gradient(12, 8);
    let store = FrameStore::default();
    let options = IngestOptions::new(ProcessingMode::from_flags(0x01));
    let report = store.ingest(&frame.source(), options).unwrap();
    assert_eq!((report.width, report.height), (8, 8));
}
