//! FrameGrab - planar YUV snapshot tool
//!
//! Reads one raw planar frame described by a JSON job file, ingests it into a
//! frame store (optionally cropping to square), converts it to ARGB with the
//! recorded rotation applied, and saves it as an image.

mod job;
mod snapshot;

use anyhow::{bail, Context, Result};
use framegrab_color::PixelConverter;
use framegrab_core::{FrameStore, IngestOptions};
use job::{RawPlanarFile, SnapshotJob};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let Some(job_path) = std::env::args().nth(1).map(PathBuf::from) else {
        bail!("usage: framegrab <job.json>");
    };

    let job = SnapshotJob::load(&job_path)?;
    run(&job)
}

fn run(job: &SnapshotJob) -> Result<()> {
    info!(input = %job.input.display(), "Reading raw frame");
    let raw = RawPlanarFile::read(job)?;

    let store = FrameStore::new(job.frame.clone());
    let report = store
        .ingest(&raw, IngestOptions::new(job.processing))
        .context("ingesting frame")?;
    info!(
        width = report.width,
        height = report.height,
        applied = ?report.applied,
        "Frame ingested"
    );

    let Some(image) = PixelConverter::new().convert_store(&store) else {
        bail!("frame store holds no data after ingest");
    };

    snapshot::save(&image, &job.output)?;

    info!(
        output = %job.output.display(),
        width = image.width,
        height = image.height,
        "Snapshot written"
    );
    Ok(())
}
