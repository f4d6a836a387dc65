/// In-app navigation
///
/// Locations are written as paths (`/`, `/about`, `/?filter=adventures`) so a
/// filtered view can be shared or restored, and a history stack provides
/// back/forward the way a browser would.
use percent_encoding::percent_decode_str;
use std::fmt;
use url::Url;

use crate::state::data::FilterTag;

/// Base used to parse relative paths; never shown to the user
const BASE: &str = "folio://local/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Page(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub filter: Option<FilterTag>,
}

impl Default for Location {
    fn default() -> Self {
        Self::home(None)
    }
}

impl Location {
    pub fn home(filter: Option<FilterTag>) -> Self {
        Self {
            route: Route::Home,
            filter,
        }
    }

    pub fn about() -> Self {
        Self {
            route: Route::About,
            filter: None,
        }
    }

    pub fn page(id: impl Into<String>) -> Self {
        Self {
            route: Route::Page(id.into()),
            filter: None,
        }
    }

    /// Parse a path such as `/?filter=professional`.
    ///
    /// Unknown or malformed paths fall back to the home page.
    pub fn parse(path: &str) -> Self {
        let url = match Url::parse(BASE).and_then(|base| base.join(path)) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Unparseable location '{path}': {e}");
                return Self::default();
            }
        };

        let filter = url
            .query_pairs()
            .find(|(key, _)| key == "filter")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .map(FilterTag::new);

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Self::home(filter),
            ["about"] => Self::about(),
            // Legacy section links redirect to the filtered grid
            ["my-adventures"] => Self::home(Some(FilterTag::adventures())),
            ["my-product-management"] => Self::home(Some(FilterTag::professional())),
            ["pages", id] => Self::page(percent_decode_str(id).decode_utf8_lossy()),
            _ => {
                tracing::warn!("Unknown location '{path}', showing home");
                Self::home(filter)
            }
        }
    }

    pub fn to_path(&self) -> String {
        let mut url = match Url::parse(BASE) {
            Ok(url) => url,
            Err(_) => return "/".to_string(),
        };

        match &self.route {
            Route::Home => {}
            Route::About => url.set_path("/about"),
            Route::Page(id) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.clear().push("pages").push(id);
                }
            }
        }

        if let Some(filter) = &self.filter {
            url.query_pairs_mut().append_pair("filter", filter.as_str());
        }

        match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

/// Back/forward stack of visited locations
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Location>,
    cursor: usize,
}

impl History {
    pub fn new(start: Location) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.cursor]
    }

    /// Visit a new location, discarding anything ahead of the cursor.
    /// Returns false if `location` is already current.
    pub fn push(&mut self, location: Location) -> bool {
        if *self.current() == location {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor += 1;
        true
    }

    pub fn back(&mut self) -> Option<&Location> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Location> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}

/// Entry in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub target: Location,
}

pub fn nav_items() -> Vec<NavItem> {
    vec![
        NavItem {
            name: "Myself",
            target: Location::about(),
        },
        NavItem {
            name: "My Product Management",
            target: Location::home(Some(FilterTag::professional())),
        },
        NavItem {
            name: "My Adventures",
            target: Location::home(Some(FilterTag::adventures())),
        },
    ]
}

/// Items to show for the current location; the about page only links to itself
pub fn visible_nav_items(current: &Location) -> Vec<NavItem> {
    let items = nav_items();
    if current.route == Route::About {
        items
            .into_iter()
            .filter(|item| item.target.route == Route::About)
            .collect()
    } else {
        items
    }
}

pub fn is_active(item: &NavItem, current: &Location) -> bool {
    item.target == *current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_home_with_filter() {
        let location = Location::parse("/?filter=adventures");
        assert_eq!(location, Location::home(Some(FilterTag::adventures())));
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Location::parse("/"), Location::home(None));
        assert_eq!(Location::parse("/about"), Location::about());
        assert_eq!(Location::parse("/pages/roadmapping"), Location::page("roadmapping"));
        assert_eq!(Location::parse("/?filter="), Location::home(None));
    }

    #[test]
    fn test_legacy_links_redirect_to_filter() {
        assert_eq!(
            Location::parse("/my-adventures"),
            Location::home(Some(FilterTag::adventures()))
        );
        assert_eq!(
            Location::parse("/my-product-management"),
            Location::home(Some(FilterTag::professional()))
        );
    }

    #[test]
    fn test_unknown_path_falls_back_home() {
        assert_eq!(Location::parse("/nope/at/all"), Location::home(None));
    }

    #[test]
    fn test_path_roundtrip() {
        for path in ["/", "/about", "/?filter=professional", "/pages/delivery", "/pages/my%20page"] {
            assert_eq!(Location::parse(path).to_path(), path);
        }
    }

    #[test]
    fn test_page_ids_are_decoded() {
        let location = Location::page("my page");
        assert_eq!(location.to_path(), "/pages/my%20page");
        assert_eq!(Location::parse(&location.to_path()), location);
        assert_eq!(Location::parse("/pages/caf%C3%A9"), Location::page("café"));
    }

    #[test]
    fn test_history_back_forward() {
        let mut history = History::new(Location::home(None));
        assert!(history.push(Location::about()));
        assert!(history.push(Location::home(Some(FilterTag::adventures()))));
        assert!(!history.push(Location::home(Some(FilterTag::adventures()))));

        assert_eq!(history.back(), Some(&Location::about()));
        assert_eq!(history.back(), Some(&Location::home(None)));
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), Some(&Location::about()));

        // A new visit drops the forward entries
        history.push(Location::page("delivery"));
        assert!(!history.can_go_forward());
        assert_eq!(history.back(), Some(&Location::about()));
    }

    #[test]
    fn test_about_hides_filter_items() {
        let items = visible_nav_items(&Location::about());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Myself");
        assert!(is_active(&items[0], &Location::about()));

        let items = visible_nav_items(&Location::home(Some(FilterTag::professional())));
        assert_eq!(items.len(), 3);
        assert!(is_active(&items[1], &Location::home(Some(FilterTag::professional()))));
        assert!(!is_active(&items[2], &Location::home(Some(FilterTag::professional()))));
    }
}
