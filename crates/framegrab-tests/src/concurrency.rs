//! A shared frame store fed by one thread and read by another.

use framegrab_color::{sample_to_argb, PixelConverter};
use framegrab_core::{FrameStore, IngestOptions, SourceFrame};
use std::sync::Arc;
use std::thread;

#[test]
fn reader_never_sees_a_torn_frame() {
    let store = Arc::new(FrameStore::default());
    let (width, height) = (32u32, 16u32);
    let chroma = vec![128u8; ((width / 2) * (height / 2)) as usize];

    let writer = {
        let store = Arc::clone(&store);
        let chroma = chroma.clone();
        thread::spawn(move || {
            for i in 0..200u32 {
                let luma = vec![(i % 2) as u8 * 200; (width * height) as usize];
                let src = SourceFrame::packed(width, height, &luma, &chroma, &chroma);
                store.ingest(&src, IngestOptions::default()).unwrap();
            }
        })
    };

    let dark = sample_to_argb(0, 128, 128);
    let light = sample_to_argb(200, 128, 128);
    let converter = PixelConverter::new();
    for _ in 0..200 {
        if let Some(image) = converter.convert_store(&store) {
            let first = image.pixels[0];
            assert!(first == dark || first == light);
            assert!(image.pixels.iter().all(|&p| p == first), "mixed frame");
        }
    }

    writer.join().unwrap();
    assert!(store.has_data());
}
