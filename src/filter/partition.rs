//! Row-band partitioning and the fan-out/fan-in filter coordinator
//!
//! The image height is split into `threads` contiguous bands covering the
//! full width. Each band is filtered independently against one shared
//! read-only view, then the partial results are copied into the output grid
//! by the calling thread once every band has finished.

use crate::data::{GridView, PixelGrid};
use crate::error::FilterError;
use crate::filter::median::{filter_region, RADIUS};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, Span};

/// Half-open rectangle `[start_y, end_y) x [start_x, end_x)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub start_y: usize,
    pub end_y: usize,
    pub start_x: usize,
    pub end_x: usize,
}

impl Region {
    pub fn new(start_y: usize, end_y: usize, start_x: usize, end_x: usize) -> Self {
        Self {
            start_y,
            end_y,
            start_x,
            end_x,
        }
    }

    /// The whole `height x width` grid
    pub fn full(height: usize, width: usize) -> Self {
        Self::new(0, height, 0, width)
    }

    pub fn height(&self) -> usize {
        self.end_y - self.start_y
    }

    pub fn width(&self) -> usize {
        self.end_x - self.start_x
    }
}

/// How band seams are treated when more than one thread is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeamPolicy {
    /// Each band zeroes its own `RADIUS` border, so seam rows come out black
    /// and the result depends on the thread count.
    #[default]
    Legacy,
    /// Each band reads `RADIUS` extra rows from its neighbours; the result
    /// matches the single-thread output for any thread count.
    Overlap,
}

impl fmt::Display for SeamPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeamPolicy::Legacy => write!(f, "legacy"),
            SeamPolicy::Overlap => write!(f, "overlap"),
        }
    }
}

impl FromStr for SeamPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(SeamPolicy::Legacy),
            "overlap" => Ok(SeamPolicy::Overlap),
            other => Err(format!("Unknown seam policy: {} (expected legacy or overlap)", other)),
        }
    }
}

/// Split `[0, height)` into `threads` full-width bands.
///
/// Every band is `height / threads` rows tall except the last, which also
/// takes the remainder. Fails when `threads` is 0 or larger than `height`.
pub fn compute_bands(height: usize, width: usize, threads: usize) -> Result<Vec<Region>, FilterError> {
    if threads == 0 {
        return Err(FilterError::InvalidThreadCount { threads });
    }

    let band_height = height / threads;
    if band_height == 0 {
        return Err(FilterError::TooManyThreads { threads, height });
    }

    let bands = (0..threads)
        .map(|t| {
            let start_y = t * band_height;
            let end_y = if t == threads - 1 {
                height
            } else {
                (t + 1) * band_height
            };
            Region::new(start_y, end_y, 0, width)
        })
        .collect();

    Ok(bands)
}

/// Filter a `height x width` image with the legacy seam behaviour
pub fn run(
    height: usize,
    width: usize,
    threads: usize,
    source: &GridView<'_>,
) -> Result<PixelGrid, FilterError> {
    run_with_policy(height, width, threads, SeamPolicy::Legacy, source)
}

/// Filter a `height x width` image using `threads` concurrent bands
pub fn run_with_policy(
    height: usize,
    width: usize,
    threads: usize,
    policy: SeamPolicy,
    source: &GridView<'_>,
) -> Result<PixelGrid, FilterError> {
    run_banded(height, width, threads, policy, source).map(|(output, _)| output)
}

/// Filter the image and also return the bands it was split into.
///
/// With one thread the kernel runs once over the full image and its result is
/// returned as is, with the full image as the only band. Otherwise a worker
/// pool of exactly `threads` threads is built for this call, one band is
/// filtered per task, and the partial grids are merged in band order after all
/// of them have completed.
pub fn run_banded(
    height: usize,
    width: usize,
    threads: usize,
    policy: SeamPolicy,
    source: &GridView<'_>,
) -> Result<(PixelGrid, Vec<Region>), FilterError> {
    if threads == 0 {
        return Err(FilterError::InvalidThreadCount { threads });
    }

    if threads == 1 {
        debug!(height, width, "Filtering full image on the calling thread");
        let full = Region::full(height, width);
        return Ok((filter_region(&full, source), vec![full]));
    }

    let bands = compute_bands(height, width, threads)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("denoise-band-{}", i))
        .build()?;

    // pool threads start with no subscriber and no span; hand them the caller's
    let dispatch = tracing::dispatcher::get_default(|current| current.clone());
    let parent = Span::current();

    let partials: Vec<PixelGrid> = pool.install(|| {
        bands
            .par_iter()
            .enumerate()
            .map(|(index, band)| {
                tracing::dispatcher::with_default(&dispatch, || {
                    parent.in_scope(|| {
                        debug!(
                            band = index,
                            start_y = band.start_y,
                            end_y = band.end_y,
                            "Filtering band"
                        );
                        filter_band(band, height, policy, source)
                    })
                })
            })
            .collect()
    });

    let mut output = PixelGrid::new(height, width);
    for (band, partial) in bands.iter().zip(&partials) {
        output.paste_rows(band.start_y, partial);
    }
    debug!(bands = bands.len(), "Merged band results");

    Ok((output, bands))
}

/// Filter one band, returning a grid exactly `band.height()` rows tall
fn filter_band(band: &Region, height: usize, policy: SeamPolicy, source: &GridView<'_>) -> PixelGrid {
    match policy {
        SeamPolicy::Legacy => filter_region(band, source),
        SeamPolicy::Overlap => {
            let read = Region::new(
                band.start_y.saturating_sub(RADIUS),
                (band.end_y + RADIUS).min(height),
                band.start_x,
                band.end_x,
            );
            let filtered = filter_region(&read, source);
            filtered.rows_range(band.start_y - read.start_y, band.height())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::registry::LookupSpan;
    use tracing_subscriber::Layer;

    #[test]
    fn test_bands_absorb_remainder_in_last() {
        let bands = compute_bands(10, 4, 3).unwrap();
        assert_eq!(
            bands,
            vec![
                Region::new(0, 3, 0, 4),
                Region::new(3, 6, 0, 4),
                Region::new(6, 10, 0, 4),
            ]
        );
    }

    #[test]
    fn test_single_band_covers_image() {
        let bands = compute_bands(7, 3, 1).unwrap();
        assert_eq!(bands, vec![Region::full(7, 3)]);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert_eq!(
            compute_bands(10, 10, 0),
            Err(FilterError::InvalidThreadCount { threads: 0 })
        );
    }

    #[test]
    fn test_more_threads_than_rows_rejected() {
        assert_eq!(
            compute_bands(4, 10, 5),
            Err(FilterError::TooManyThreads { threads: 5, height: 4 })
        );
    }

    #[test]
    fn test_one_row_per_band_is_allowed() {
        let bands = compute_bands(4, 2, 4).unwrap();
        assert_eq!(bands.len(), 4);
        assert!(bands.iter().all(|b| b.height() == 1));
    }

    #[test]
    fn test_seam_policy_parsing() {
        assert_eq!("legacy".parse::<SeamPolicy>(), Ok(SeamPolicy::Legacy));
        assert_eq!("Overlap".parse::<SeamPolicy>(), Ok(SeamPolicy::Overlap));
        assert!("mirror".parse::<SeamPolicy>().is_err());
        assert_eq!(SeamPolicy::default(), SeamPolicy::Legacy);
    }

    #[test]
    fn test_run_banded_returns_bands_used() {
        let grid = PixelGrid::filled(9, 4, 5);
        let (_, bands) = run_banded(9, 4, 2, SeamPolicy::Legacy, &grid.view()).unwrap();
        assert_eq!(bands, vec![Region::new(0, 4, 0, 4), Region::new(4, 9, 0, 4)]);

        let (_, bands) = run_banded(9, 4, 1, SeamPolicy::Legacy, &grid.view()).unwrap();
        assert_eq!(bands, vec![Region::full(9, 4)]);
    }

    #[test]
    fn test_single_thread_accepts_empty_grid() {
        let grid = PixelGrid::new(0, 6);
        let (output, bands) = run_banded(0, 6, 1, SeamPolicy::Legacy, &grid.view()).unwrap();
        assert_eq!(output.dimensions(), (0, 6));
        assert_eq!(bands, vec![Region::full(0, 6)]);
    }

    /// Records the name of the span each band event was emitted in
    struct BandEventLayer {
        parents: Arc<Mutex<Vec<Option<String>>>>,
    }

    impl<S> Layer<S> for BandEventLayer
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            if event.metadata().fields().field("band").is_some() {
                let parent = ctx.event_span(event).map(|span| span.name().to_string());
                self.parents.lock().unwrap().push(parent);
            }
        }
    }

    #[test]
    fn test_band_events_stay_inside_caller_span() {
        let parents = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(BandEventLayer {
            parents: Arc::clone(&parents),
        });
        let grid = PixelGrid::filled(20, 6, 3);

        tracing::subscriber::with_default(subscriber, || {
            let span = tracing::info_span!("denoise_run");
            let _enter = span.enter();
            run(20, 6, 4, &grid.view()).unwrap();
        });

        let parents = parents.lock().unwrap();
        assert_eq!(parents.len(), 4);
        assert!(parents.iter().all(|p| p.as_deref() == Some("denoise_run")));
    }

    #[test]
    fn test_run_rejects_zero_threads() {
        let grid = PixelGrid::filled(10, 10, 1);
        let err = run(10, 10, 0, &grid.view()).unwrap_err();
        assert_eq!(err, FilterError::InvalidThreadCount { threads: 0 });
    }
}
