//! Client-side hash routing for the Mining Discovery portal.
//!
//! The URL fragment is the portal's entire public surface: bookmarks,
//! shared links, and back/forward navigation all go through it.
//!
//! # Modules
//!
//! - [`route`] -- The [`Route`] enum, fragment parsing and serialization
//! - [`navigation`] -- The injected [`NavigationPort`] and an in-memory port
//! - [`resolver`] -- [`RouteResolver`]: subscribe to and request route changes

pub mod navigation;
pub mod resolver;
pub mod route;

pub use navigation::{FragmentListener, ListenerId, MemoryNavigation, NavigationPort};
pub use resolver::{RouteResolver, Subscription};
pub use route::Route;
