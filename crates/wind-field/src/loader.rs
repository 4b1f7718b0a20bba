//! Produce-once loading of the source raster.
//!
//! The first caller starts the fetch and decode; every caller, including
//! ones that arrive while the load is still running, awaits the same shared
//! future. The outcome (success or failure) stays in the slot until
//! [`RasterLoader::retry`] or [`RasterLoader::reset`] clears it.

use std::sync::Arc;
use std::time::Instant;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::{info, warn};
use wind_common::{WindError, WindResult};

use crate::metrics;
use crate::raster::WindRaster;
use crate::reproject::RasterDims;
use crate::source::RasterSource;

type SharedLoad = Shared<BoxFuture<'static, WindResult<Arc<WindRaster>>>>;

/// Memoized loader for the source wind raster.
pub struct RasterLoader {
    source: Arc<dyn RasterSource>,
    fallback_dims: Option<RasterDims>,
    slot: Mutex<Option<SharedLoad>>,
}

impl RasterLoader {
    /// Create a loader. Nothing is fetched until the first [`get`](Self::get).
    pub fn new(source: Arc<dyn RasterSource>, fallback_dims: Option<RasterDims>) -> Self {
        Self {
            source,
            fallback_dims,
            slot: Mutex::new(None),
        }
    }

    /// Resolve the raster, starting the load if nobody has yet.
    pub async fn get(&self) -> WindResult<Arc<WindRaster>> {
        let load = {
            let mut slot = self.slot.lock().await;
            slot.get_or_insert_with(|| self.start_load()).clone()
        };
        load.await
    }

    /// Clear a cached failure and load again.
    ///
    /// A pending or successful load is left in place, so retrying never
    /// triggers a duplicate fetch.
    pub async fn retry(&self) -> WindResult<Arc<WindRaster>> {
        {
            let mut slot = self.slot.lock().await;
            let failed = matches!(slot.as_ref().and_then(|load| load.peek()), Some(Err(_)));
            if failed {
                info!(source = %self.source.describe(), "Retrying failed raster load");
                *slot = None;
            }
        }
        self.get().await
    }

    /// Drop whatever is cached; the next call fetches again.
    pub async fn reset(&self) {
        *self.slot.lock().await = None;
    }

    /// Whether a raster has been loaded successfully.
    pub async fn is_loaded(&self) -> bool {
        let slot = self.slot.lock().await;
        matches!(slot.as_ref().and_then(|load| load.peek()), Some(Ok(_)))
    }

    fn start_load(&self) -> SharedLoad {
        let source = Arc::clone(&self.source);
        let fallback = self.fallback_dims;

        async move {
            let location = source.describe();
            let start = Instant::now();
            info!(source = %location, "Loading wind raster");
            metrics::record_raster_fetch();

            let result = async {
                let bytes = source.fetch().await?;
                let raster =
                    tokio::task::spawn_blocking(move || WindRaster::decode(&bytes, fallback))
                        .await
                        .map_err(|e| {
                            WindError::Internal(format!("raster decode task failed: {}", e))
                        })??;
                Ok::<_, WindError>(raster)
            }
            .await;

            match result {
                Ok(raster) => {
                    let dims = raster.dims();
                    info!(
                        source = %location,
                        width = dims.width,
                        height = dims.height,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Wind raster loaded"
                    );
                    metrics::record_raster_loaded(start.elapsed());
                    Ok(Arc::new(raster))
                }
                Err(e) => {
                    warn!(source = %location, error = %e, "Wind raster load failed");
                    metrics::record_raster_failure();
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }
}

impl std::fmt::Debug for RasterLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterLoader")
            .field("source", &self.source.describe())
            .field("fallback_dims", &self.fallback_dims)
            .finish()
    }
}
