use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Top-level pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Route {
    #[default]
    Home,
    About,
    Contact,
    Games,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::About, Route::Contact, Route::Games];

    pub fn all() -> &'static [Route] {
        &Self::ALL
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Contact => "/contact",
            Route::Games => "/games",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Contact => "Contact",
            Route::Games => "Games",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|r| *r == self).unwrap_or(0)
    }

    /// Next page in navigation order, wrapping around
    pub fn next(self) -> Route {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Route {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Accepts paths (`/about`, `about/`) and bare names (`Games`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed.trim_matches('/').to_ascii_lowercase();
        match name.as_str() {
            "" | "home" => Ok(Route::Home),
            "about" => Ok(Route::About),
            "contact" => Ok(Route::Contact),
            "games" => Ok(Route::Games),
            _ => Err(Error::UnknownRoute(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for Route {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_and_names() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("/about".parse::<Route>().unwrap(), Route::About);
        assert_eq!("contact/".parse::<Route>().unwrap(), Route::Contact);
        assert_eq!("Games".parse::<Route>().unwrap(), Route::Games);
        assert_eq!("home".parse::<Route>().unwrap(), Route::Home);
    }

    #[test]
    fn test_unknown_route() {
        let err = "/press".parse::<Route>().unwrap_err();
        assert!(matches!(err, Error::UnknownRoute(ref r) if r == "/press"));
    }

    #[test]
    fn test_path_round_trip() {
        for route in Route::all() {
            assert_eq!(route.path().parse::<Route>().unwrap(), *route);
        }
    }

    #[test]
    fn test_next_prev_wrap() {
        assert_eq!(Route::Home.next(), Route::About);
        assert_eq!(Route::Games.next(), Route::Home);
        assert_eq!(Route::Home.prev(), Route::Games);
    }

    #[test]
    fn test_serde_as_path() {
        #[derive(Deserialize, Serialize)]
        struct Wrapper {
            route: Route,
        }
        let w: Wrapper = toml::from_str("route = \"/games\"").unwrap();
        assert_eq!(w.route, Route::Games);
        assert_eq!(toml::to_string(&w).unwrap().trim(), "route = \"/games\"");
    }
}
