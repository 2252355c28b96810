//! Route Resolver: turns fragment changes into [`Route`] notifications.

use std::rc::Rc;

use tracing::{debug, info};

use crate::navigation::{ListenerId, NavigationPort};
use crate::route::Route;

/// Translates the navigation port's fragment into [`Route`] values.
///
/// Cloning is cheap and yields a resolver over the same port.
#[derive(Clone)]
pub struct RouteResolver {
    port: Rc<dyn NavigationPort>,
}

impl RouteResolver {
    /// Create a resolver over an injected navigation port.
    pub fn new(port: Rc<dyn NavigationPort>) -> Self {
        Self { port }
    }

    /// The route for the current fragment.
    pub fn current(&self) -> Route {
        Route::parse(&self.port.current_fragment())
    }

    /// Subscribe to route changes.
    ///
    /// `listener` is invoked once immediately with the current route, then
    /// once per fragment change in the order the changes occur. The
    /// listener stays registered until the returned [`Subscription`] is
    /// dropped or [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Route) + 'static,
    {
        let listener = Rc::new(listener);
        let on_change = Rc::clone(&listener);
        let id = self.port.on_change(Rc::new(move |fragment: &str| {
            on_change(&Route::parse(fragment));
        }));
        debug!(listener = ?id, "route listener registered");
        listener(&self.current());
        Subscription {
            port: Rc::clone(&self.port),
            id: Some(id),
        }
    }

    /// Navigate to `route` by writing its fragment to the port.
    ///
    /// Subscribers are notified exactly as for a manual fragment edit.
    pub fn navigate(&self, route: &Route) {
        info!(route = route.name(), fragment = %route, "navigating");
        self.port.set_fragment(&route.to_fragment());
    }
}

/// Keeps a resolver listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription immediately unsubscribes the listener"]
pub struct Subscription {
    port: Rc<dyn NavigationPort>,
    id: Option<ListenerId>,
}

impl Subscription {
    /// Detach the listener now.
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        if let Some(id) = self.id.take() {
            self.port.remove_listener(id);
            debug!(listener = ?id, "route listener removed");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::navigation::MemoryNavigation;

    fn resolver_at(fragment: &str) -> (MemoryNavigation, RouteResolver) {
        let port = MemoryNavigation::new(fragment);
        let resolver = RouteResolver::new(Rc::new(port.clone()));
        (port, resolver)
    }

    #[test]
    fn subscribe_delivers_initial_route_immediately() {
        let (_, resolver) = resolver_at("#/magazines");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = resolver.subscribe(move |r| sink.borrow_mut().push(r.clone()));
        assert_eq!(*seen.borrow(), vec![Route::Magazines]);
    }

    #[test]
    fn fragment_edits_and_navigate_both_notify() {
        let (port, resolver) = resolver_at("");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _sub = resolver.subscribe(move |r| sink.borrow_mut().push(r.clone()));

        port.set_fragment("#/news/gold");
        resolver.navigate(&Route::Article("sx6gn6ckwbiljfpq226eqzbz".to_owned()));

        assert_eq!(
            *seen.borrow(),
            vec![
                Route::Home,
                Route::Category("gold".to_owned()),
                Route::Article("sx6gn6ckwbiljfpq226eqzbz".to_owned()),
            ]
        );
        assert_eq!(port.current_fragment(), "#/article/sx6gn6ckwbiljfpq226eqzbz");
    }

    #[test]
    fn unsubscribe_and_drop_detach() {
        let (port, resolver) = resolver_at("#/");
        let count = Rc::new(RefCell::new(0_u32));

        let sink = Rc::clone(&count);
        let sub = resolver.subscribe(move |_| *sink.borrow_mut() += 1);
        sub.unsubscribe();

        let sink = Rc::clone(&count);
        drop(resolver.subscribe(move |_| *sink.borrow_mut() += 1));

        port.set_fragment("#/services");
        assert_eq!(*count.borrow(), 2);
        assert_eq!(port.listener_count(), 0);
    }

    #[test]
    fn rapid_changes_settle_on_final_route() {
        let (port, resolver) = resolver_at("#/");
        let last = Rc::new(RefCell::new(Route::Home));
        let sink = Rc::clone(&last);
        let _sub = resolver.subscribe(move |r| *sink.borrow_mut() = r.clone());

        for fragment in ["#/news/a", "#/news/b", "#/article/c", "#/contact-us"] {
            port.set_fragment(fragment);
        }
        assert_eq!(*last.borrow(), Route::ContactUs);
        assert_eq!(resolver.current(), Route::ContactUs);
    }
}
