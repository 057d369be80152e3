//! Property tests for square cropping through the frame store.

use framegrab_core::{FrameStore, IngestOptions, ProcessingMode, SourceFrame};
use proptest::prelude::*;

fn planes(width: u32, height: u32) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let chroma = ((width / 2) * (height / 2)) as usize;
    (
        (0..width * height).map(|i| (i % 253) as u8).collect(),
        (0..chroma).map(|i| (i % 127) as u8).collect(),
        (0..chroma).map(|i| (i % 131) as u8).collect(),
    )
}

// Even dimensions, as delivered by real I420 sources.
fn even_dim() -> impl Strategy<Value = u32> {
    (1u32..48).prop_map(|d| d * 2)
}

proptest! {
    #[test]
    fn aligned_crop_is_square(width in even_dim(), height in even_dim()) {
        prop_assume!(width.abs_diff(height) % 4 == 0);
        let (y, u, v) = planes(width, height);
        let store = FrameStore::default();
        let report = store
            .ingest(
                &SourceFrame::packed(width, height, &y, &u, &v),
                IngestOptions::new(ProcessingMode::CropToSquare),
            )
            .unwrap();

        let side = width.min(height);
        prop_assert_eq!((report.width, report.height), (side, side));
        let chroma_len = ((side / 2) * (side / 2)) as usize;
        store.with_frame(|f| {
            assert_eq!(f.y_plane().unwrap().len(), (side * side) as usize);
            assert_eq!(f.u_plane().unwrap().len(), chroma_len);
            assert_eq!(f.v_plane().unwrap().len(), chroma_len);
        });
    }

    #[test]
    fn misaligned_crop_falls_back(width in even_dim(), height in even_dim()) {
        prop_assume!(width.abs_diff(height) % 4 != 0);
        let (y, u, v) = planes(width, height);
        let src = SourceFrame::packed(width, height, &y, &u, &v);

        let cropped = FrameStore::default();
        let report = cropped
            .ingest(&src, IngestOptions::new(ProcessingMode::CropToSquare))
            .unwrap();
        prop_assert_eq!(report.applied, ProcessingMode::None);

        let copied = FrameStore::default();
        copied.ingest(&src, IngestOptions::default()).unwrap();

        prop_assert_eq!(cropped.dimensions(), copied.dimensions());
        let (cropped, copied) = (cropped.snapshot(), copied.snapshot());
        prop_assert_eq!(cropped.planes(), copied.planes());
    }

    #[test]
    fn repeated_ingest_reuses_buffers(width in even_dim(), height in even_dim()) {
        let (y, u, v) = planes(width, height);
        let src = SourceFrame::packed(width, height, &y, &u, &v);
        let store = FrameStore::default();
        store.ingest(&src, IngestOptions::default()).unwrap();
        let before = store.with_frame(|f| f.planes().map(|p| (p.y.as_ptr(), p.u.as_ptr(), p.v.as_ptr())));

        let report = store.ingest(&src, IngestOptions::default()).unwrap();
        let after = store.with_frame(|f| f.planes().map(|p| (p.y.as_ptr(), p.u.as_ptr(), p.v.as_ptr())));
        prop_assert!(!report.reallocated);
        prop_assert_eq!(before, after);
    }
}
