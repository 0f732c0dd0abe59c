//! Load cycle runner.
//!
//! Uses channel-based communication to bridge the async load cycle
//! with egui's synchronous update loop.

use super::{load_all, platform_fetcher, CategoryLayers, SharedSourceCache};
use crate::catalog::Catalog;
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Outcome of polling an in-flight load cycle.
#[derive(Debug)]
pub enum LoadPoll {
    /// No cycle running, or the running one has not finished.
    Pending,
    /// The cycle finished with one layer per category.
    Ready(CategoryLayers),
    /// The cycle's task ended without producing a result.
    Aborted,
}

/// Channel-based runner for the category load cycle.
///
/// Each cycle gets a fresh channel so a task that dies without sending
/// is observed as a disconnect rather than waiting forever.
#[derive(Default)]
pub struct LoadChannel {
    receiver: Option<Receiver<CategoryLayers>>,
}

impl LoadChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a cycle is in flight.
    pub fn is_loading(&self) -> bool {
        self.receiver.is_some()
    }

    /// Spawns a load cycle over the whole catalog.
    ///
    /// On native: spawns a new thread using pollster to block on the loads.
    /// On WASM: uses wasm_bindgen_futures::spawn_local.
    ///
    /// Any cycle still in flight is abandoned; its result is discarded.
    pub fn spawn(&mut self, ctx: egui::Context, catalog: Catalog, data_root: String, dedupe: bool) {
        let (sender, receiver) = channel();
        self.receiver = Some(receiver);

        // The cycle future holds `Rc`s, so it is built where it runs.
        let task = move || async move {
            let layers = run_cycle(&catalog, &data_root, dedupe).await;
            let _ = sender.send(layers);
            ctx.request_repaint();
        };

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || pollster::block_on(task()));
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(task());
        }
    }

    /// Non-blocking check for a finished cycle.
    pub fn poll(&mut self) -> LoadPoll {
        let Some(receiver) = &self.receiver else {
            return LoadPoll::Pending;
        };

        let poll = match receiver.try_recv() {
            Ok(layers) => LoadPoll::Ready(layers),
            Err(TryRecvError::Empty) => return LoadPoll::Pending,
            Err(TryRecvError::Disconnected) => LoadPoll::Aborted,
        };
        self.receiver = None;
        poll
    }
}

async fn run_cycle(catalog: &Catalog, data_root: &str, dedupe: bool) -> CategoryLayers {
    let fetcher = platform_fetcher(data_root);
    if dedupe {
        load_all(catalog, &SharedSourceCache::new(fetcher)).await
    } else {
        load_all(catalog, &fetcher).await
    }
}
