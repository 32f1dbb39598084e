//! # Static Page Store
//!
//! In-process embodiment of the hosting platform's static-generation
//! contract. Pages are generated by calling the injected catalog provider,
//! cached, and served as-is while the revalidation window is open. The first
//! request after the window triggers regeneration.
//!
//! Product detail pages additionally follow the static path plan: ids in the
//! plan are generated at build time via `prerender`; other ids are handled
//! per the plan's fallback policy (hard not-found, generate-while-the-caller
//! waits, or generate in the background behind a loading placeholder).

use chrono::Utc;
use shop_core::{
    BoxedCatalogProvider, FallbackPolicy, GenerationState, HomeProps, ProductProps,
    RevalidationPolicy, StaticPage, StaticPathPlan, StoreError, StoreResult,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

/// Answer to a product-page request
#[derive(Debug, Clone)]
pub enum PageResponse<T> {
    /// Generated props, fresh enough to serve
    Ready(StaticPage<T>),
    /// First-time generation is running in the background; show a loading
    /// placeholder
    Generating,
}

#[derive(Default)]
struct DetailEntry {
    /// Last generated output, possibly stale
    page: Option<StaticPage<ProductProps>>,
    /// Present while a generation for this id is in flight; resolves to
    /// `true` when it finishes
    generating: Option<watch::Receiver<bool>>,
}

enum Action {
    Serve(StaticPage<ProductProps>),
    Await(watch::Receiver<bool>),
    Generate {
        done: watch::Sender<bool>,
        first_time: bool,
    },
}

struct Inner {
    catalog: BoxedCatalogProvider,
    plan: StaticPathPlan,
    home_policy: RevalidationPolicy,
    detail_policy: RevalidationPolicy,
    home: RwLock<Option<StaticPage<HomeProps>>>,
    details: RwLock<HashMap<String, DetailEntry>>,
}

/// Cache of generated pages, keyed by the flows that produce them.
/// Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct PageStore {
    inner: Arc<Inner>,
}

impl PageStore {
    /// Create a store with the standard revalidation windows
    /// (2 h listing, 1 h detail)
    pub fn new(catalog: BoxedCatalogProvider, plan: StaticPathPlan) -> Self {
        Self::with_policies(
            catalog,
            plan,
            RevalidationPolicy::catalog(),
            RevalidationPolicy::product_detail(),
        )
    }

    /// Create a store with explicit revalidation windows (used by tests)
    pub fn with_policies(
        catalog: BoxedCatalogProvider,
        plan: StaticPathPlan,
        home_policy: RevalidationPolicy,
        detail_policy: RevalidationPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                plan,
                home_policy,
                detail_policy,
                home: RwLock::new(None),
                details: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// The static path plan this store serves under
    pub fn plan(&self) -> &StaticPathPlan {
        &self.inner.plan
    }

    /// Build-time pass: generate the home page and every listed product page.
    /// Failures abort loudly; a broken catalog should fail the build, not
    /// ship empty pages.
    pub async fn prerender(&self) -> StoreResult<()> {
        info!("Pre-rendering home page");
        self.home_page().await?;

        for id in &self.inner.plan.prerender {
            info!("Pre-rendering product page: {}", id);
            let (done, rx) = watch::channel(false);
            {
                let mut details = self.inner.details.write().await;
                details.entry(id.clone()).or_default().generating = Some(rx);
            }
            self.generate_detail(id, done).await?;
        }

        Ok(())
    }

    /// Catalog listing flow: serve the cached home page while fresh,
    /// regenerate otherwise
    pub async fn home_page(&self) -> StoreResult<StaticPage<HomeProps>> {
        {
            let home = self.inner.home.read().await;
            if let Some(page) = home.as_ref() {
                if page.is_fresh(self.inner.home_policy, Utc::now()) {
                    return Ok(page.clone());
                }
            }
        }

        // Re-check under the write lock; another request may have finished
        // the regeneration already
        let mut home = self.inner.home.write().await;
        if let Some(page) = home.as_ref() {
            if page.is_fresh(self.inner.home_policy, Utc::now()) {
                return Ok(page.clone());
            }
        }

        info!("Generating home page");
        let products = self.inner.catalog.list_products().await?;
        let page = StaticPage::new(HomeProps { products });
        *home = Some(page.clone());
        Ok(page)
    }

    /// Product detail flow: serve, wait, or generate per the cached state and
    /// the fallback policy
    pub async fn product_page(
        &self,
        product_id: &str,
    ) -> StoreResult<PageResponse<ProductProps>> {
        loop {
            let action = self.next_action(product_id).await?;

            match action {
                Action::Serve(page) => return Ok(PageResponse::Ready(page)),
                Action::Await(mut rx) => {
                    if self.inner.plan.fallback == FallbackPolicy::GenerateWithoutWaiting {
                        return Ok(PageResponse::Generating);
                    }
                    // A dropped sender also wakes us; the re-check recovers
                    let _ = rx.wait_for(|done| *done).await;
                }
                Action::Generate { done, first_time } => {
                    if first_time
                        && self.inner.plan.fallback == FallbackPolicy::GenerateWithoutWaiting
                    {
                        let store = self.clone();
                        let id = product_id.to_string();
                        tokio::spawn(async move {
                            if let Err(err) = store.generate_detail(&id, done).await {
                                warn!("On-demand generation failed for {}: {}", id, err);
                            }
                        });
                        return Ok(PageResponse::Generating);
                    }

                    return self
                        .generate_detail(product_id, done)
                        .await
                        .map(PageResponse::Ready);
                }
            }
        }
    }

    /// Observable lifecycle of a product page
    pub async fn generation_state(&self, product_id: &str) -> GenerationState {
        let details = self.inner.details.read().await;
        match details.get(product_id) {
            None => GenerationState::NotStarted,
            Some(entry) if entry.page.is_some() => GenerationState::Ready,
            Some(entry) => match &entry.generating {
                Some(rx) if rx.has_changed().is_ok() => GenerationState::Generating,
                // Cancelled mid-generation: nothing cached, nothing in flight
                _ => GenerationState::NotStarted,
            },
        }
    }

    async fn next_action(&self, product_id: &str) -> StoreResult<Action> {
        let mut details = self.inner.details.write().await;

        match details.get_mut(product_id) {
            Some(entry) => {
                // A stored receiver whose sender is gone means the generating
                // request was cancelled before cleanup ran; discard it so the
                // id can be claimed again instead of waiting on a dead channel
                if entry
                    .generating
                    .as_ref()
                    .is_some_and(|rx| rx.has_changed().is_err())
                {
                    entry.generating = None;
                }

                if let Some(page) = &entry.page {
                    if page.is_fresh(self.inner.detail_policy, Utc::now())
                        || entry.generating.is_some()
                    {
                        // Fresh, or stale with a refresh already in flight:
                        // serve what we have
                        return Ok(Action::Serve(page.clone()));
                    }

                    let (done, rx) = watch::channel(false);
                    entry.generating = Some(rx);
                    return Ok(Action::Generate {
                        done,
                        first_time: false,
                    });
                }

                if let Some(rx) = &entry.generating {
                    return Ok(Action::Await(rx.clone()));
                }

                let (done, rx) = watch::channel(false);
                entry.generating = Some(rx);
                Ok(Action::Generate {
                    done,
                    first_time: true,
                })
            }
            None => {
                let listed = self.inner.plan.prerender.iter().any(|p| p == product_id);
                if !listed && self.inner.plan.fallback == FallbackPolicy::NeverGenerate {
                    return Err(StoreError::ProductNotFound {
                        product_id: product_id.to_string(),
                    });
                }

                let (done, rx) = watch::channel(false);
                details.insert(
                    product_id.to_string(),
                    DetailEntry {
                        page: None,
                        generating: Some(rx),
                    },
                );
                Ok(Action::Generate {
                    done,
                    first_time: true,
                })
            }
        }
    }

    async fn generate_detail(
        &self,
        product_id: &str,
        done: watch::Sender<bool>,
    ) -> StoreResult<StaticPage<ProductProps>> {
        info!("Generating product page: {}", product_id);
        let result = self.inner.catalog.get_product(product_id).await;

        let mut details = self.inner.details.write().await;
        let outcome = match result {
            Ok(product) => {
                let page = StaticPage::new(ProductProps { product });
                let entry = details.entry(product_id.to_string()).or_default();
                entry.page = Some(page.clone());
                entry.generating = None;
                Ok(page)
            }
            Err(err) => {
                if let Some(entry) = details.get_mut(product_id) {
                    entry.generating = None;
                    // A failed first generation returns the id to NotStarted
                    if entry.page.is_none() {
                        details.remove(product_id);
                    }
                }
                Err(err)
            }
        };
        drop(details);

        let _ = done.send(true);
        outcome
    }
}
