//! Page Host: keeps exactly one page mounted for the current route.
//!
//! The host subscribes to the [`RouteResolver`] and reacts synchronously
//! to every route notification: a same-kind route with a new id or slug
//! retargets the mounted page, anything else unmounts it and builds the
//! page for the new route. Fetching happens in [`PageHost::load`]: a route
//! change abandons the superseded page's in-flight fetches and starts the
//! new page's load at once, so `load` returns only when the page mounted
//! at that moment has been loaded.
//!
//! The persistent shell (header menu, footer) is loaded once per mount.

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use discovery_cms::{CmsClient, DownloadRequest, spawn_download};
use discovery_router::{Route, RouteResolver, Subscription};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::components::CategoryMenu;
use crate::components::listing::category_menu;
use crate::error::ViewError;
use crate::pages::Page;
use crate::render::{Renderer, safe};

struct HostInner {
    resolver: RouteResolver,
    client: Arc<CmsClient>,
    renderer: Renderer,
    download_dir: PathBuf,
    menu: RefCell<Rc<CategoryMenu>>,
    menu_loaded: Cell<bool>,
    route: RefCell<Route>,
    page: RefCell<Option<Rc<Page>>>,
    needs_load: Cell<bool>,
    route_changed: Notify,
    subscription: RefCell<Option<Subscription>>,
}

impl HostInner {
    fn active_page(&self) -> Option<Rc<Page>> {
        self.page.borrow().clone()
    }

    fn menu(&self) -> Rc<CategoryMenu> {
        Rc::clone(&self.menu.borrow())
    }

    fn request_load(&self) {
        self.needs_load.set(true);
        self.route_changed.notify_waiters();
    }

    fn apply_route(&self, route: &Route) {
        if let Some(page) = self.active_page() {
            if *self.route.borrow() == *route {
                debug!(route = route.name(), "route unchanged");
                return;
            }
            if page.retarget(route) {
                *self.route.borrow_mut() = route.clone();
                self.request_load();
                return;
            }
            info!(page = page.kind(), "unmounting page");
            page.unmount();
        }

        let page = Page::for_route(route, &self.client);
        info!(route = route.name(), page = page.kind(), "mounting page");
        *self.page.borrow_mut() = Some(Rc::new(page));
        *self.route.borrow_mut() = route.clone();
        self.request_load();
    }
}

/// Owns the active page and the site shell.
///
/// Cloning yields another handle to the same host.
#[derive(Clone)]
pub struct PageHost {
    inner: Rc<HostInner>,
}

impl PageHost {
    /// Create an unmounted host.
    pub fn new(
        resolver: RouteResolver,
        client: Arc<CmsClient>,
        renderer: Renderer,
        download_dir: PathBuf,
    ) -> Self {
        let menu = category_menu(Arc::clone(&client));
        Self {
            inner: Rc::new(HostInner {
                resolver,
                client,
                renderer,
                download_dir,
                menu: RefCell::new(Rc::new(menu)),
                menu_loaded: Cell::new(false),
                route: RefCell::new(Route::Home),
                page: RefCell::new(None),
                needs_load: Cell::new(false),
                route_changed: Notify::new(),
                subscription: RefCell::new(None),
            }),
        }
    }

    /// Subscribe to route changes and mount the page for the current route.
    ///
    /// Each mount starts with a fresh header menu, fetched by the next
    /// [`load`](Self::load).
    pub fn mount(&self) {
        if self.inner.subscription.borrow().is_some() {
            return;
        }
        *self.inner.menu.borrow_mut() = Rc::new(category_menu(Arc::clone(&self.inner.client)));
        self.inner.menu_loaded.set(false);
        let weak: Weak<HostInner> = Rc::downgrade(&self.inner);
        let subscription = self.inner.resolver.subscribe(move |route| {
            if let Some(inner) = weak.upgrade() {
                inner.apply_route(route);
            }
        });
        *self.inner.subscription.borrow_mut() = Some(subscription);
        info!(route = self.inner.route.borrow().name(), "host mounted");
    }

    /// Drop the subscription and unmount the active page and shell.
    ///
    /// Responses that arrive afterwards are ignored.
    pub fn unmount(&self) {
        let subscription = self.inner.subscription.borrow_mut().take();
        drop(subscription);
        if let Some(page) = self.inner.page.borrow_mut().take() {
            page.unmount();
        }
        self.inner.menu().unmount();
        self.inner.needs_load.set(false);
        self.inner.route_changed.notify_waiters();
        info!("host unmounted");
    }

    /// Whether the host is subscribed to route changes.
    pub fn is_mounted(&self) -> bool {
        self.inner.subscription.borrow().is_some()
    }

    /// The route the mounted page was built for.
    pub fn route(&self) -> Route {
        self.inner.route.borrow().clone()
    }

    /// The mounted page, if any.
    pub fn page(&self) -> Option<Rc<Page>> {
        self.inner.active_page()
    }

    /// Load the shell (first time only) and the mounted page.
    ///
    /// If navigation happens while a load is in flight, the superseded
    /// page's fetches are abandoned and the new page is loaded before this
    /// returns.
    pub async fn load(&self) {
        if self.inner.menu_loaded.replace(true) {
            self.load_pages().await;
        } else {
            let menu = self.inner.menu();
            futures::join!(menu.load(), self.load_pages());
        }
    }

    /// Re-fetch the mounted page; the action behind "Try again".
    pub async fn reload(&self) {
        self.inner.needs_load.set(true);
        self.load_pages().await;
    }

    async fn load_pages(&self) {
        while self.inner.needs_load.replace(false) {
            let Some(page) = self.inner.active_page() else {
                return;
            };
            debug!(page = page.kind(), "loading page");
            tokio::select! {
                () = page.load() => {}
                () = self.inner.route_changed.notified() => {
                    debug!(page = page.kind(), "route changed mid-load");
                }
            }
        }
    }

    /// The newsletter page's month selector; `None` shows every issue.
    ///
    /// Does nothing unless the newsletter archive is mounted.
    pub async fn select_newsletter_month(&self, month: Option<String>) {
        let Some(page) = self.inner.active_page() else {
            return;
        };
        if let Page::Newsletter(archive) = page.as_ref() {
            archive.select_month(month).await;
        }
    }

    /// Render the full document: shell around the mounted page.
    pub fn render(&self) -> Result<String, ViewError> {
        let renderer = &self.inner.renderer;
        let page = self.inner.active_page();
        let (title, body) = match &page {
            Some(page) => (page.title(), page.render(renderer)?),
            None => ("Mining Discovery".to_owned(), String::new()),
        };
        let menu = self.inner.menu().render(renderer)?;
        renderer.render(
            "layout.html",
            minijinja::context! {
                title => title,
                route => self.route().to_fragment(),
                menu => safe(menu),
                body => safe(body),
            },
        )
    }

    /// Navigate to an article detail page.
    pub fn navigate_to_article(&self, document_id: &str) {
        self.inner
            .resolver
            .navigate(&Route::Article(document_id.to_owned()));
    }

    /// The article page's close action: back to the home page.
    pub fn close_article(&self) {
        self.inner.resolver.navigate(&Route::Home);
    }

    /// Fire-and-forget PDF download into the configured directory.
    ///
    /// Must be called from within a tokio runtime.
    pub fn download_pdf(&self, url: &str, name: Option<&str>) -> JoinHandle<()> {
        let request = DownloadRequest::new(url, name);
        info!(url, file = request.file_name, "starting PDF download");
        spawn_download(
            Arc::clone(&self.inner.client),
            request,
            self.inner.download_dir.clone(),
        )
    }
}
